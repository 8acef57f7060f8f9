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

//! NineCluster status domain

pub mod catalog;
pub mod inspector;
pub mod workload;

pub use self::catalog::{ProjectSpec, ToolSpec, ToolWorkload, PROJECTS, TOOLS};
pub use self::inspector::{
    ClusterRow, DriveRow, NineClusterInspector, ProjectRow, ServiceAccess, ToolRow,
};
pub use self::workload::{human_duration, ReadyAge, Replicas, WorkloadKind, WorkloadRef};
