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

use super::catalog::{
    kyuubi_service_name, tool_resource_name, workload_name, ToolSpec, PROJECTS, TOOLS,
};
use super::workload::{age_of, ReadyAge, Replicas, WorkloadKind, WorkloadRef};
use crate::infrastructure::constants::{
    DEFAULT_THRIFT_PORT_NAME, LABEL_DIRECTPV_DRIVE_NAME, LABEL_DIRECTPV_NODE,
};
use crate::infrastructure::helm::{HelmReleaseProbe, ReleaseProbe};
use crate::infrastructure::kubernetes::client::{
    node_access_ip, KubeConfigSource, NineKubeClient, NineKubeClientImpl,
};
use crate::infrastructure::kubernetes::crd::NineCluster;
use crate::shared::error::KubeError;
use chrono::Utc;
use kube::ResourceExt;
use std::fmt;

/// Read-only view over NineClusters, their projects and their tools.
///
/// Every check is a fresh request; requests are issued one after another.
pub struct NineClusterInspector {
    client: Box<dyn NineKubeClient>,
    releases: Box<dyn ReleaseProbe>,
}

impl NineClusterInspector {
    pub fn new(client: Box<dyn NineKubeClient>, releases: Box<dyn ReleaseProbe>) -> Self {
        Self { client, releases }
    }

    pub async fn new_with_config(
        source: &KubeConfigSource,
        helm_bin: &str,
    ) -> Result<Self, KubeError> {
        let client = NineKubeClientImpl::new_with_config(source).await?;
        let releases = HelmReleaseProbe::new(source.clone()).with_helm_bin(helm_bin);
        Ok(Self::new(Box::new(client), Box::new(releases)))
    }

    /// Look up NineClusters by name, or list them all when no name is
    /// given. `None` for the namespace means every namespace, where a name
    /// may match more than one cluster. A missing named cluster yields an
    /// empty list.
    pub async fn find_clusters(
        &self,
        name: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<Vec<NineCluster>, KubeError> {
        match (name, namespace) {
            (Some(name), Some(namespace)) => {
                match self.client.get_nine_cluster(name, namespace).await {
                    Ok(cluster) => Ok(vec![cluster]),
                    Err(KubeError::NotFound { .. }) => Ok(Vec::new()),
                    Err(e) => Err(e),
                }
            }
            (Some(name), None) => {
                let clusters = self.client.list_nine_clusters(None).await?;
                Ok(clusters
                    .into_iter()
                    .filter(|c| c.name_any() == name)
                    .collect())
            }
            (None, namespace) => self.client.list_nine_clusters(namespace).await,
        }
    }

    async fn fetch_replicas(&self, workload: &WorkloadRef) -> Result<(Replicas, String), KubeError> {
        let now = Utc::now();
        let name = workload.name.as_str();
        let ns = workload.namespace.as_str();
        match workload.kind {
            WorkloadKind::StatefulSet => {
                let sts = self.client.get_statefulset(name, ns).await?;
                Ok((Replicas::from_statefulset(&sts), age_of(&sts.metadata, now)))
            }
            WorkloadKind::Deployment => {
                let deploy = self.client.get_deployment(name, ns).await?;
                Ok((Replicas::from_deployment(&deploy), age_of(&deploy.metadata, now)))
            }
            WorkloadKind::Cluster => {
                let pg = self.client.get_pg_cluster(name, ns).await?;
                Ok((Replicas::from_pg_cluster(&pg), age_of(&pg.metadata, now)))
            }
        }
    }

    /// True iff the workload exists and its ready count equals the desired
    /// count. Any fetch error counts as not ready.
    pub async fn is_workload_ready(&self, workload: &WorkloadRef) -> bool {
        match self.fetch_replicas(workload).await {
            Ok((replicas, _)) => replicas.is_ready(),
            Err(e) => {
                tracing::debug!("{} {} not ready: {}", workload.kind, workload.name, e);
                false
            }
        }
    }

    /// A NineCluster is ready when all of its projects are.
    pub async fn is_cluster_ready(&self, name: &str, namespace: &str) -> bool {
        for project in PROJECTS {
            let workload = WorkloadRef::new(workload_name(name, project), namespace, project.kind);
            if !self.is_workload_ready(&workload).await {
                return false;
            }
        }
        true
    }

    pub async fn workload_ready_and_age(&self, workload: &WorkloadRef) -> ReadyAge {
        match self.fetch_replicas(workload).await {
            Ok((replicas, age)) => ReadyAge::found(replicas, age),
            Err(KubeError::NotFound { .. }) => ReadyAge::not_found(),
            Err(e) => {
                tracing::debug!("Cannot inspect {} {}: {}", workload.kind, workload.name, e);
                ReadyAge::unknown()
            }
        }
    }

    /// Address of a named service port as seen from outside the pod network
    /// where possible. Empty ip and port 0 when it cannot be determined.
    pub async fn service_access(
        &self,
        service_name: &str,
        port_name: &str,
        namespace: &str,
    ) -> ServiceAccess {
        let svc = match self.client.get_service(service_name, namespace).await {
            Ok(svc) => svc,
            Err(e) => {
                tracing::debug!("Cannot read service {}: {}", service_name, e);
                return ServiceAccess::default();
            }
        };
        let Some(spec) = svc.spec else {
            return ServiceAccess::default();
        };
        let named_port = spec
            .ports
            .as_ref()
            .and_then(|ports| ports.iter().rev().find(|p| p.name.as_deref() == Some(port_name)));

        match spec.type_.as_deref().unwrap_or("ClusterIP") {
            "ClusterIP" => ServiceAccess {
                ip: spec.cluster_ip.clone().unwrap_or_default(),
                port: named_port.map(|p| p.port).unwrap_or(0),
            },
            "NodePort" => ServiceAccess {
                ip: node_access_ip(self.client.api_host()),
                port: named_port.and_then(|p| p.node_port).unwrap_or(0),
            },
            other => {
                tracing::debug!("Service {} has unsupported type {}", service_name, other);
                ServiceAccess::default()
            }
        }
    }

    pub async fn tool_access(&self, tool: &ToolSpec, namespace: &str) -> String {
        self.service_access(&tool.service_name(), tool.port_name, namespace)
            .await
            .url(tool.protocol)
    }

    /// Kyuubi thrift endpoint of a NineCluster.
    pub async fn thrift_endpoint(&self, name: &str, namespace: &str) -> ServiceAccess {
        self.service_access(&kyuubi_service_name(name), DEFAULT_THRIFT_PORT_NAME, namespace)
            .await
    }

    pub async fn cluster_rows(&self, clusters: &[NineCluster]) -> Vec<ClusterRow> {
        let now = Utc::now();
        let mut rows = Vec::with_capacity(clusters.len());
        for cluster in clusters {
            let name = cluster.name_any();
            let namespace = cluster.namespace().unwrap_or_default();
            let ready = self.is_cluster_ready(&name, &namespace).await;
            rows.push(ClusterRow {
                name,
                data_volume: cluster.spec.data_volume,
                ready,
                namespace,
                age: age_of(&cluster.metadata, now),
            });
        }
        rows
    }

    /// One row per project, skipping projects that could not be inspected.
    pub async fn project_rows(&self, cluster: &NineCluster) -> Vec<ProjectRow> {
        let name = cluster.name_any();
        let namespace = cluster.namespace().unwrap_or_default();
        let mut rows = Vec::new();
        for project in PROJECTS {
            let workload = WorkloadRef::new(workload_name(&name, project), &namespace, project.kind);
            let status = self.workload_ready_and_age(&workload).await;
            if status.is_unknown() {
                continue;
            }
            rows.push(ProjectRow {
                name: workload.name,
                project: project.name.to_string(),
                kind: project.kind,
                ready: status.ready,
                age: status.age,
            });
        }
        rows
    }

    /// One row per installed tool of every cluster. Tools without a release
    /// are left out entirely.
    pub async fn tool_rows(&self, clusters: &[NineCluster]) -> Vec<ToolRow> {
        let mut rows = Vec::new();
        for cluster in clusters {
            let name = cluster.name_any();
            let namespace = cluster.namespace().unwrap_or_default();
            for tool in TOOLS {
                if let Some(row) = self.tool_row(&name, &namespace, tool).await {
                    rows.push(row);
                }
            }
        }
        rows
    }

    async fn tool_row(&self, cluster: &str, namespace: &str, tool: &ToolSpec) -> Option<ToolRow> {
        if !self.releases.release_exists(&tool.release_name(), namespace).await {
            return None;
        }

        let mut ready = 0;
        let mut total = 0;
        for component in tool.workloads {
            let workload = WorkloadRef::new(
                tool_resource_name(component.suffix),
                namespace,
                component.kind,
            );
            if self.is_workload_ready(&workload).await {
                ready += 1;
            }
            total += 1;
        }
        if total == 0 {
            return None;
        }

        Some(ToolRow {
            cluster: cluster.to_string(),
            tool: tool.name.to_string(),
            ready,
            total,
            namespace: namespace.to_string(),
            access: self.tool_access(tool, namespace).await,
        })
    }

    pub async fn drive_rows(&self) -> Result<Vec<DriveRow>, KubeError> {
        let drives = self.client.list_drives().await?;
        Ok(drives
            .into_iter()
            .map(|drive| {
                let labels = drive.labels();
                let status = drive.status.clone().unwrap_or_default();
                DriveRow {
                    name: labels
                        .get(LABEL_DIRECTPV_DRIVE_NAME)
                        .cloned()
                        .unwrap_or_else(|| drive.name_any()),
                    node: labels.get(LABEL_DIRECTPV_NODE).cloned().unwrap_or_default(),
                    total_capacity: status.total_capacity,
                    allocated_capacity: status.allocated_capacity,
                    status: status.status,
                }
            })
            .collect())
    }
}

/// Where a service port can be reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceAccess {
    pub ip: String,
    pub port: i32,
}

impl ServiceAccess {
    pub fn url(&self, protocol: &str) -> String {
        if protocol.is_empty() {
            self.to_string()
        } else {
            format!("{}://{}", protocol, self)
        }
    }
}

impl fmt::Display for ServiceAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterRow {
    pub name: String,
    pub data_volume: i32,
    pub ready: bool,
    pub namespace: String,
    pub age: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow {
    pub name: String,
    pub project: String,
    pub kind: WorkloadKind,
    pub ready: String,
    pub age: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRow {
    pub cluster: String,
    pub tool: String,
    pub ready: u32,
    pub total: u32,
    pub namespace: String,
    pub access: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveRow {
    pub name: String,
    pub node: String,
    pub total_capacity: i64,
    pub allocated_capacity: i64,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use serde_json::json;

    const NS: &str = "dwh";

    fn inspector(server: MockApiServer, releases: &[&str]) -> NineClusterInspector {
        NineClusterInspector::new(
            Box::new(server.into_client()),
            Box::new(StaticReleaseProbe::with(releases)),
        )
    }

    /// Every project of cluster `nine` present and ready.
    fn ready_cluster() -> MockApiServer {
        let mut server = MockApiServer::new();
        for project in PROJECTS {
            let name = workload_name("nine", project);
            server = match project.kind {
                WorkloadKind::Cluster => server.on_get(
                    &pg_cluster_path(NS, &name),
                    200,
                    pg_cluster_json(NS, &name, 3, 3),
                ),
                _ => server.on_get(
                    &statefulset_path(NS, &name),
                    200,
                    statefulset_json(NS, &name, 1, 1),
                ),
            };
        }
        server
    }

    fn nine_cluster() -> NineCluster {
        serde_json::from_value(nine_cluster_json(NS, "nine", 32)).unwrap()
    }

    #[tokio::test]
    async fn test_workload_readiness() {
        let server = MockApiServer::new()
            .on_get(&statefulset_path(NS, "a"), 200, statefulset_json(NS, "a", 3, 3))
            .on_get(&statefulset_path(NS, "b"), 200, statefulset_json(NS, "b", 3, 2))
            .on_get(&deployment_path(NS, "c"), 200, deployment_json(NS, "c", 2, 2))
            .on_get(&pg_cluster_path(NS, "d"), 200, pg_cluster_json(NS, "d", 3, 1));
        let inspector = inspector(server, &[]);

        let check = |name: &str, kind| WorkloadRef::new(name, NS, kind);
        assert!(inspector.is_workload_ready(&check("a", WorkloadKind::StatefulSet)).await);
        assert!(!inspector.is_workload_ready(&check("b", WorkloadKind::StatefulSet)).await);
        assert!(inspector.is_workload_ready(&check("c", WorkloadKind::Deployment)).await);
        assert!(!inspector.is_workload_ready(&check("d", WorkloadKind::Cluster)).await);
        assert!(!inspector.is_workload_ready(&check("missing", WorkloadKind::StatefulSet)).await);
        // Same name, wrong kind: nothing at that path.
        assert!(!inspector.is_workload_ready(&check("a", WorkloadKind::Deployment)).await);
    }

    #[tokio::test]
    async fn test_ready_and_age_outcomes() {
        let server = MockApiServer::new()
            .on_get(&statefulset_path(NS, "a"), 200, statefulset_json(NS, "a", 3, 2))
            .fail_get(&statefulset_path(NS, "broken"));
        let inspector = inspector(server, &[]);

        let found = inspector
            .workload_ready_and_age(&WorkloadRef::new("a", NS, WorkloadKind::StatefulSet))
            .await;
        assert_eq!(found.ready, "2/3");
        assert!(!found.age.is_empty());

        let missing = inspector
            .workload_ready_and_age(&WorkloadRef::new("gone", NS, WorkloadKind::StatefulSet))
            .await;
        assert_eq!(missing, ReadyAge::not_found());

        let broken = inspector
            .workload_ready_and_age(&WorkloadRef::new("broken", NS, WorkloadKind::StatefulSet))
            .await;
        assert!(broken.is_unknown());
        assert_eq!((broken.ready.as_str(), broken.age.as_str()), ("", ""));
    }

    #[tokio::test]
    async fn test_cluster_ready_requires_every_project() {
        assert!(inspector(ready_cluster(), &[]).is_cluster_ready("nine", NS).await);

        let pg = workload_name("nine", &PROJECTS[4]);
        let degraded = ready_cluster().on_get(
            &pg_cluster_path(NS, &pg),
            200,
            pg_cluster_json(NS, &pg, 3, 2),
        );
        assert!(!inspector(degraded, &[]).is_cluster_ready("nine", NS).await);

        let minio = workload_name("nine", &PROJECTS[0]);
        let missing = ready_cluster().on_get(
            &statefulset_path(NS, &minio),
            404,
            status_json(404, "NotFound", "not found"),
        );
        assert!(!inspector(missing, &[]).is_cluster_ready("nine", NS).await);
    }

    #[tokio::test]
    async fn test_project_rows_skip_unknown() {
        let kyuubi = workload_name("nine", &PROJECTS[2]);
        let server = ready_cluster().fail_get(&statefulset_path(NS, &kyuubi));
        let rows = inspector(server, &[]).project_rows(&nine_cluster()).await;

        let projects: Vec<_> = rows.iter().map(|r| r.project.as_str()).collect();
        assert_eq!(projects, vec!["minio", "metastore", "zookeeper", "database"]);
        assert_eq!(rows[3].kind, WorkloadKind::Cluster);
        assert_eq!(rows[3].ready, "3/3");
        assert_eq!(rows[0].name, "nine-nine-minio");
    }

    #[tokio::test]
    async fn test_project_rows_report_missing_as_zero() {
        let rows = inspector(MockApiServer::new(), &[])
            .project_rows(&nine_cluster())
            .await;
        assert_eq!(rows.len(), PROJECTS.len());
        assert!(rows.iter().all(|r| r.ready == "0/0" && r.age == "0s"));
    }

    #[tokio::test]
    async fn test_tool_rows_require_release() {
        let server = MockApiServer::new()
            .on_get(
                &deployment_path(NS, "nine-tool-superset"),
                200,
                deployment_json(NS, "nine-tool-superset", 1, 1),
            )
            .on_get(
                &deployment_path(NS, "nine-tool-superset-worker"),
                200,
                deployment_json(NS, "nine-tool-superset-worker", 2, 1),
            )
            .on_get(
                &deployment_path(NS, "nine-tool-grafana"),
                200,
                deployment_json(NS, "nine-tool-grafana", 1, 1),
            )
            .on_get(
                &service_path(NS, "nine-tool-superset"),
                200,
                service_json(NS, "nine-tool-superset", "ClusterIP", "http", 8088, None),
            );
        let rows = inspector(server, &["nine-tool-superset"])
            .tool_rows(&[nine_cluster()])
            .await;

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.cluster, "nine");
        assert_eq!(row.tool, "superset");
        assert_eq!((row.ready, row.total), (1, 2));
        assert_eq!(row.namespace, NS);
        assert_eq!(row.access, "http://10.96.0.5:8088");
    }

    #[tokio::test]
    async fn test_node_port_access_uses_api_server_ip() {
        let server = MockApiServer::new().on_get(
            &service_path(NS, "nine-tool-redis-master"),
            200,
            service_json(NS, "nine-tool-redis-master", "NodePort", "tcp-redis", 6379, Some(31000)),
        );
        let inspector = inspector(server, &[]);
        let redis = crate::domain::cluster::catalog::find_tool("redis").unwrap();

        assert_eq!(inspector.tool_access(redis, NS).await, "172.16.8.2:31000");

        let access = inspector
            .service_access("nine-tool-redis-master", "tcp-redis", NS)
            .await;
        assert_eq!(access.url("http"), "http://172.16.8.2:31000");
    }

    #[tokio::test]
    async fn test_service_access_unknown_port_or_service() {
        let server = MockApiServer::new().on_get(
            &service_path(NS, "nine-nine-kyuubi"),
            200,
            service_json(NS, "nine-nine-kyuubi", "ClusterIP", "rest", 10099, None),
        );
        let inspector = inspector(server, &[]);

        let access = inspector.thrift_endpoint("nine", NS).await;
        assert_eq!(access, ServiceAccess { ip: "10.96.0.5".to_string(), port: 0 });

        let none = inspector.service_access("absent", "http", NS).await;
        assert_eq!(none.to_string(), ":0");
    }

    #[tokio::test]
    async fn test_find_clusters() {
        let server = MockApiServer::new()
            .on_get(&nine_cluster_path(NS, "nine"), 200, nine_cluster_json(NS, "nine", 32))
            .on_get(
                &nine_cluster_list_path(NS),
                200,
                nine_cluster_list_json(vec![
                    nine_cluster_json(NS, "nine", 32),
                    nine_cluster_json(NS, "lake", 128),
                ]),
            );
        let inspector = inspector(server, &[]);

        let one = inspector.find_clusters(Some("nine"), Some(NS)).await.unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].spec.data_volume, 32);

        assert!(inspector
            .find_clusters(Some("other"), Some(NS))
            .await
            .unwrap()
            .is_empty());

        let all = inspector.find_clusters(None, Some(NS)).await.unwrap();
        let names: Vec<_> = all.iter().map(|c| c.name_any()).collect();
        assert_eq!(names, vec!["nine", "lake"]);
    }

    #[tokio::test]
    async fn test_find_named_cluster_across_namespaces() {
        let server = MockApiServer::new()
            .on_get(&nine_cluster_path(NS, "nine"), 200, nine_cluster_json(NS, "nine", 32))
            .on_get(
                &nine_cluster_all_path(),
                200,
                nine_cluster_list_json(vec![
                    nine_cluster_json("ops", "lake", 8),
                    nine_cluster_json(NS, "nine", 32),
                    nine_cluster_json("staging", "nine", 16),
                ]),
            );
        let inspector = inspector(server, &[]);

        let found = inspector.find_clusters(Some("nine"), None).await.unwrap();
        let located: Vec<_> = found
            .iter()
            .map(|c| (c.namespace().unwrap_or_default(), c.spec.data_volume))
            .collect();
        assert_eq!(
            located,
            vec![(NS.to_string(), 32), ("staging".to_string(), 16)]
        );

        assert!(inspector
            .find_clusters(Some("absent"), None)
            .await
            .unwrap()
            .is_empty());

        assert_eq!(inspector.find_clusters(None, None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_drive_rows() {
        let server = MockApiServer::new().on_get(
            DRIVE_LIST_PATH,
            200,
            drive_list_json(vec![
                drive_json(
                    "4f0a1c2e-drive",
                    Some(("node1", "sdb")),
                    json!({"totalCapacity": 1073741824, "allocatedCapacity": 536870912, "status": "Ready"}),
                ),
                drive_json("9b3d7e11-drive", None, json!({})),
            ]),
        );
        let rows = inspector(server, &[]).drive_rows().await.unwrap();
        assert_eq!(
            rows,
            vec![
                DriveRow {
                    name: "sdb".to_string(),
                    node: "node1".to_string(),
                    total_capacity: 1073741824,
                    allocated_capacity: 536870912,
                    status: "Ready".to_string(),
                },
                DriveRow {
                    name: "9b3d7e11-drive".to_string(),
                    node: String::new(),
                    total_capacity: 0,
                    allocated_capacity: 0,
                    status: String::new(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_drive_rows_list_failure() {
        let server = MockApiServer::new().fail_get(DRIVE_LIST_PATH);
        assert!(inspector(server, &[]).drive_rows().await.is_err());
    }

    #[tokio::test]
    async fn test_cluster_rows() {
        let rows = inspector(ready_cluster(), &[])
            .cluster_rows(&[nine_cluster()])
            .await;
        assert_eq!(
            rows,
            vec![ClusterRow {
                name: "nine".to_string(),
                data_volume: 32,
                ready: true,
                namespace: NS.to_string(),
                age: "90m".to_string(),
            }]
        );
    }
}
