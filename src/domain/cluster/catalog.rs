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

//! Projects a NineCluster is made of, and the tools installable next to it

use super::workload::WorkloadKind;
use crate::infrastructure::constants::{
    DEFAULT_NINE_SUFFIX, DEFAULT_TOOLS_NAME_PREFIX, KYUUBI_SERVICE_SUFFIX,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectSpec {
    pub name: &'static str,
    pub kind: WorkloadKind,
    /// Appended to the cluster name to form the workload name
    pub suffix: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolWorkload {
    pub suffix: &'static str,
    pub kind: WorkloadKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: &'static str,
    pub workloads: &'static [ToolWorkload],
    pub service: &'static str,
    pub port_name: &'static str,
    /// URL scheme for the access column, empty for raw `ip:port`
    pub protocol: &'static str,
}

impl ToolSpec {
    pub fn release_name(&self) -> String {
        tool_resource_name(self.name)
    }

    pub fn service_name(&self) -> String {
        tool_resource_name(self.service)
    }
}

pub const PROJECTS: &[ProjectSpec] = &[
    ProjectSpec {
        name: "minio",
        kind: WorkloadKind::StatefulSet,
        suffix: "-nine-minio",
    },
    ProjectSpec {
        name: "metastore",
        kind: WorkloadKind::StatefulSet,
        suffix: "-nine-metastore",
    },
    ProjectSpec {
        name: "kyuubi",
        kind: WorkloadKind::StatefulSet,
        suffix: "-nine-kyuubi",
    },
    ProjectSpec {
        name: "zookeeper",
        kind: WorkloadKind::StatefulSet,
        suffix: "-nine-zookeeper",
    },
    ProjectSpec {
        name: "database",
        kind: WorkloadKind::Cluster,
        suffix: "-nine-pg",
    },
];

pub const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "superset",
        workloads: &[
            ToolWorkload {
                suffix: "superset",
                kind: WorkloadKind::Deployment,
            },
            ToolWorkload {
                suffix: "superset-worker",
                kind: WorkloadKind::Deployment,
            },
        ],
        service: "superset",
        port_name: "http",
        protocol: "http",
    },
    ToolSpec {
        name: "grafana",
        workloads: &[ToolWorkload {
            suffix: "grafana",
            kind: WorkloadKind::Deployment,
        }],
        service: "grafana",
        port_name: "service",
        protocol: "http",
    },
    ToolSpec {
        name: "trino",
        workloads: &[
            ToolWorkload {
                suffix: "trino-coordinator",
                kind: WorkloadKind::Deployment,
            },
            ToolWorkload {
                suffix: "trino-worker",
                kind: WorkloadKind::Deployment,
            },
        ],
        service: "trino",
        port_name: "http",
        protocol: "http",
    },
    ToolSpec {
        name: "redis",
        workloads: &[ToolWorkload {
            suffix: "redis-master",
            kind: WorkloadKind::StatefulSet,
        }],
        service: "redis-master",
        port_name: "tcp-redis",
        protocol: "",
    },
];

pub fn workload_name(cluster: &str, project: &ProjectSpec) -> String {
    format!("{}{}", cluster, project.suffix)
}

pub fn tool_resource_name(suffix: &str) -> String {
    format!("{}{}", DEFAULT_TOOLS_NAME_PREFIX, suffix)
}

pub fn kyuubi_service_name(cluster: &str) -> String {
    format!("{}{}{}", cluster, DEFAULT_NINE_SUFFIX, KYUUBI_SERVICE_SUFFIX)
}

pub fn find_tool(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|t| t.name == name)
}
