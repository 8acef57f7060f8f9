//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use crate::domain::cluster::{ClusterRow, DriveRow, ProjectRow, ToolRow};
use crate::domain::config::OutputFormat;
use crate::infrastructure::constants::{
    CLUSTER_LIST_WIDTHS, DRIVE_LIST_WIDTHS, PROJECT_LIST_WIDTHS, TOOL_LIST_WIDTHS,
};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

pub const CLUSTER_LIST_HEADER: [&str; 5] = ["NAME", "DATAVOLUME", "READY", "NAMESPACE", "AGE"];
pub const PROJECT_LIST_HEADER: [&str; 5] = ["NAME", "PROJECT", "TYPE", "READY", "AGE"];
pub const TOOL_LIST_HEADER: [&str; 5] = ["NINENAME", "TOOLNAME", "READY", "NAMESPACE", "ACCESS"];
pub const DRIVE_LIST_HEADER: [&str; 5] = ["DRIVE", "NODE", "CAPACITY", "ALLOCATED", "STATUS"];

/// One line of plain output: every cell left aligned and padded to its
/// width (never truncated), cells separated by tabs.
pub fn plain_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let mut line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join("\t");
    line.push('\n');
    line
}

/// Parse a `ready/total` string as printed for workloads.
pub fn parse_ratio(s: &str) -> Option<(u32, u32)> {
    let (ready, total) = s.split_once('/')?;
    Some((ready.trim().parse().ok()?, total.trim().parse().ok()?))
}

pub fn format_bytes(bytes: i64) -> String {
    const UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value.abs() >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
    format: OutputFormat,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new(OutputFormat::Plain)
    }
}

impl TableRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            theme: ColorTheme::default(),
            format,
        }
    }

    fn new_table(header: &[&str]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                header
                    .iter()
                    .map(|h| Cell::new(h).set_alignment(CellAlignment::Left))
                    .collect::<Vec<_>>(),
            );
        table
    }

    fn ratio_cell(&self, ratio: &str) -> Cell {
        match parse_ratio(ratio) {
            Some((ready, total)) => Cell::new(format!(
                "{} {}",
                StatusIcon::get_replica_icon(ready, total),
                ratio
            ))
            .fg(self.theme.get_replica_color(ready, total)),
            None => Cell::new(ratio).fg(self.theme.muted),
        }
    }

    fn titled(title: &str, count: usize, table: &Table) -> String {
        format!(
            "{} {}\n{}\n",
            title.bold(),
            format!("[{}]", count).bright_black(),
            table
        )
    }

    pub fn render_clusters_list(&self, clusters: &[ClusterRow]) -> String {
        match self.format {
            OutputFormat::Plain => {
                let mut output = plain_line(&CLUSTER_LIST_HEADER, &CLUSTER_LIST_WIDTHS);
                for c in clusters {
                    output.push_str(&plain_line(
                        &[
                            c.name.clone(),
                            c.data_volume.to_string(),
                            c.ready.to_string(),
                            c.namespace.clone(),
                            c.age.clone(),
                        ],
                        &CLUSTER_LIST_WIDTHS,
                    ));
                }
                output
            }
            OutputFormat::Table => {
                let mut table = Self::new_table(&CLUSTER_LIST_HEADER);
                for c in clusters {
                    table.add_row(vec![
                        Cell::new(&c.name),
                        Cell::new(c.data_volume).set_alignment(CellAlignment::Right),
                        Cell::new(format!("{} {}", StatusIcon::get_ready_icon(c.ready), c.ready))
                            .fg(self.theme.get_ready_color(c.ready)),
                        Cell::new(&c.namespace),
                        Cell::new(&c.age),
                    ]);
                }
                Self::titled("NineClusters", clusters.len(), &table)
            }
        }
    }

    pub fn render_projects(&self, projects: &[ProjectRow]) -> String {
        match self.format {
            OutputFormat::Plain => {
                let mut output = plain_line(&PROJECT_LIST_HEADER, &PROJECT_LIST_WIDTHS);
                for p in projects {
                    output.push_str(&plain_line(
                        &[
                            p.name.as_str(),
                            p.project.as_str(),
                            p.kind.as_str(),
                            p.ready.as_str(),
                            p.age.as_str(),
                        ],
                        &PROJECT_LIST_WIDTHS,
                    ));
                }
                output
            }
            OutputFormat::Table => {
                let mut table = Self::new_table(&PROJECT_LIST_HEADER);
                for p in projects {
                    table.add_row(vec![
                        Cell::new(&p.name),
                        Cell::new(&p.project),
                        Cell::new(p.kind).fg(self.theme.info),
                        self.ratio_cell(&p.ready),
                        Cell::new(&p.age),
                    ]);
                }
                Self::titled("Projects", projects.len(), &table)
            }
        }
    }

    pub fn render_tools(&self, tools: &[ToolRow]) -> String {
        match self.format {
            OutputFormat::Plain => {
                let mut output = plain_line(&TOOL_LIST_HEADER, &TOOL_LIST_WIDTHS);
                for t in tools {
                    output.push_str(&plain_line(
                        &[
                            t.cluster.clone(),
                            t.tool.clone(),
                            format!("{}/{}", t.ready, t.total),
                            t.namespace.clone(),
                            t.access.clone(),
                        ],
                        &TOOL_LIST_WIDTHS,
                    ));
                }
                output
            }
            OutputFormat::Table => {
                let mut table = Self::new_table(&TOOL_LIST_HEADER);
                for t in tools {
                    table.add_row(vec![
                        Cell::new(&t.cluster),
                        Cell::new(&t.tool),
                        self.ratio_cell(&format!("{}/{}", t.ready, t.total)),
                        Cell::new(&t.namespace),
                        Cell::new(&t.access).fg(self.theme.info),
                    ]);
                }
                Self::titled("Tools", tools.len(), &table)
            }
        }
    }

    pub fn render_drives(&self, drives: &[DriveRow]) -> String {
        match self.format {
            OutputFormat::Plain => {
                let mut output = plain_line(&DRIVE_LIST_HEADER, &DRIVE_LIST_WIDTHS);
                for d in drives {
                    output.push_str(&plain_line(
                        &[
                            d.name.clone(),
                            d.node.clone(),
                            format_bytes(d.total_capacity),
                            format_bytes(d.allocated_capacity),
                            d.status.clone(),
                        ],
                        &DRIVE_LIST_WIDTHS,
                    ));
                }
                output
            }
            OutputFormat::Table => {
                let mut table = Self::new_table(&DRIVE_LIST_HEADER);
                for d in drives {
                    let status_color = if d.status.eq_ignore_ascii_case("ready") {
                        self.theme.success
                    } else {
                        self.theme.warning
                    };
                    table.add_row(vec![
                        Cell::new(&d.name),
                        Cell::new(&d.node),
                        Cell::new(format_bytes(d.total_capacity)).set_alignment(CellAlignment::Right),
                        Cell::new(format_bytes(d.allocated_capacity))
                            .set_alignment(CellAlignment::Right),
                        Cell::new(&d.status).fg(status_color),
                    ]);
                }
                Self::titled("Drives", drives.len(), &table)
            }
        }
    }
}
