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

//! Custom resources read by the CLI.
//!
//! Only the fields the status views need are modelled; everything else the
//! operators write is ignored on deserialization.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The top-level NineCluster owned by the nineinfra operator.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, JsonSchema)]
#[kube(
    group = "nine.nineinfra.tech",
    version = "v1alpha1",
    kind = "NineCluster",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct NineClusterSpec {
    /// Declared data volume size in Gi
    #[serde(default)]
    pub data_volume: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_sets: Option<Vec<serde_json::Value>>,
}

/// CloudNativePG database cluster.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, JsonSchema)]
#[kube(
    group = "postgresql.cnpg.io",
    version = "v1",
    kind = "Cluster",
    plural = "clusters",
    namespaced,
    status = "PgClusterStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct PgClusterSpec {
    #[serde(default)]
    pub instances: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PgClusterStatus {
    #[serde(default)]
    pub ready_instances: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

impl Cluster {
    pub fn ready_instances(&self) -> i32 {
        self.status
            .as_ref()
            .map(|s| s.ready_instances)
            .unwrap_or(0)
    }

    pub fn is_ready(&self) -> bool {
        self.ready_instances() == self.spec.instances
    }
}

/// A drive managed by the DirectPV volume provisioner.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, JsonSchema)]
#[kube(
    group = "directpv.min.io",
    version = "v1beta1",
    kind = "DirectPVDrive",
    plural = "directpvdrives",
    status = "DirectPVDriveStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct DirectPVDriveSpec {
    #[serde(default)]
    pub unschedulable: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectPVDriveStatus {
    #[serde(default)]
    pub total_capacity: i64,
    #[serde(default)]
    pub allocated_capacity: i64,
    #[serde(default)]
    pub status: String,
}
