// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::infrastructure::constants::{NOT_FOUND_AGE, NOT_FOUND_READY};
use crate::infrastructure::kubernetes::crd::Cluster;
use chrono::{DateTime, Duration, Utc};
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::fmt;

/// Kind of workload backing a project or a tool component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkloadKind {
    StatefulSet,
    Deployment,
    /// CloudNativePG database cluster
    Cluster,
}

impl WorkloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::StatefulSet => "statefulset",
            WorkloadKind::Deployment => "deployment",
            WorkloadKind::Cluster => "cluster",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorkloadKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "statefulset" | "sts" => Ok(WorkloadKind::StatefulSet),
            "deployment" | "deploy" => Ok(WorkloadKind::Deployment),
            "cluster" => Ok(WorkloadKind::Cluster),
            _ => Err(format!("unknown workload kind: {}", s)),
        }
    }
}

/// A workload addressed by name, namespace and kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadRef {
    pub name: String,
    pub namespace: String,
    pub kind: WorkloadKind,
}

impl WorkloadRef {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, kind: WorkloadKind) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            kind,
        }
    }
}

/// Ready versus desired count of a fetched workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replicas {
    pub ready: i32,
    pub desired: i32,
}

impl Replicas {
    pub fn is_ready(&self) -> bool {
        self.ready == self.desired
    }

    pub fn from_statefulset(sts: &StatefulSet) -> Self {
        Self {
            ready: sts
                .status
                .as_ref()
                .and_then(|s| s.ready_replicas)
                .unwrap_or(0),
            desired: sts.spec.as_ref().and_then(|s| s.replicas).unwrap_or(1),
        }
    }

    pub fn from_deployment(deploy: &Deployment) -> Self {
        Self {
            ready: deploy
                .status
                .as_ref()
                .and_then(|s| s.ready_replicas)
                .unwrap_or(0),
            desired: deploy.spec.as_ref().and_then(|s| s.replicas).unwrap_or(1),
        }
    }

    pub fn from_pg_cluster(pg: &Cluster) -> Self {
        Self {
            ready: pg.ready_instances(),
            desired: pg.spec.instances,
        }
    }
}

impl fmt::Display for Replicas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.ready, self.desired)
    }
}

/// Display strings for a workload row.
///
/// Empty strings mean the workload could not be inspected and the row
/// should be skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadyAge {
    pub ready: String,
    pub age: String,
}

impl ReadyAge {
    pub fn found(replicas: Replicas, age: impl Into<String>) -> Self {
        Self {
            ready: replicas.to_string(),
            age: age.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            ready: NOT_FOUND_READY.to_string(),
            age: NOT_FOUND_AGE.to_string(),
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_unknown(&self) -> bool {
        self.ready.is_empty() || self.age.is_empty()
    }
}

/// Age of an object from its creation timestamp, `0s` when it has none.
pub fn age_of(metadata: &ObjectMeta, now: DateTime<Utc>) -> String {
    match &metadata.creation_timestamp {
        Some(ts) => human_duration(now.signed_duration_since(ts.0)),
        None => NOT_FOUND_AGE.to_string(),
    }
}

/// Format a duration the way kubectl prints resource ages.
///
/// Precision drops as the duration grows: seconds up to two minutes,
/// then minutes, hours, days and finally years.
pub fn human_duration(d: Duration) -> String {
    let seconds = d.num_seconds();
    if seconds < -1 {
        return "<invalid>".to_string();
    } else if seconds < 0 {
        return "0s".to_string();
    } else if seconds < 60 * 2 {
        return format!("{}s", seconds);
    }

    let minutes = d.num_minutes();
    if minutes < 10 {
        let s = seconds % 60;
        if s == 0 {
            return format!("{}m", minutes);
        }
        return format!("{}m{}s", minutes, s);
    } else if minutes < 60 * 3 {
        return format!("{}m", minutes);
    }

    let hours = d.num_hours();
    if hours < 8 {
        let m = minutes % 60;
        if m == 0 {
            return format!("{}h", hours);
        }
        format!("{}h{}m", hours, m)
    } else if hours < 48 {
        format!("{}h", hours)
    } else if hours < 24 * 8 {
        let h = hours % 24;
        if h == 0 {
            return format!("{}d", hours / 24);
        }
        format!("{}d{}h", hours / 24, h)
    } else if hours < 24 * 365 * 2 {
        format!("{}d", hours / 24)
    } else if hours < 24 * 365 * 8 {
        let dy = (hours / 24) % 365;
        if dy == 0 {
            return format!("{}y", hours / 24 / 365);
        }
        format!("{}y{}d", hours / 24 / 365, dy)
    } else {
        format!("{}y", hours / 24 / 365)
    }
}
