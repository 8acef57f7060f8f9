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

/// DirectPV drive labels
pub const LABEL_DIRECTPV_NODE: &str = "directpv.min.io/node";
pub const LABEL_DIRECTPV_DRIVE_NAME: &str = "directpv.min.io/drive-name";

/// Workload naming
pub const DEFAULT_NINE_SUFFIX: &str = "-nine";
pub const DEFAULT_TOOLS_NAME_PREFIX: &str = "nine-tool-";

/// Kyuubi thrift endpoint
pub const KYUUBI_SERVICE_SUFFIX: &str = "-kyuubi";
pub const DEFAULT_THRIFT_PORT_NAME: &str = "thrift-binary";

/// Defaults
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_HELM_BIN: &str = "helm";

/// Readiness strings for absent resources
pub const NOT_FOUND_READY: &str = "0/0";
pub const NOT_FOUND_AGE: &str = "0s";

/// Column widths of the plain output
pub const CLUSTER_LIST_WIDTHS: [usize; 5] = [20, 10, 10, 10, 10];
pub const TOOL_LIST_WIDTHS: [usize; 5] = [20, 10, 10, 10, 10];
pub const PROJECT_LIST_WIDTHS: [usize; 5] = [40, 10, 10, 10, 10];
pub const DRIVE_LIST_WIDTHS: [usize; 5] = [40, 20, 10, 10, 10];
