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

//! Canned Kubernetes API responses for unit tests

use crate::infrastructure::helm::ReleaseProbe;
use crate::infrastructure::kubernetes::NineKubeClientImpl;
use chrono::{Duration, Utc};
use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

pub const TEST_API_HOST: &str = "https://172.16.8.2:6443/";

/// Serves GET responses by exact path; anything else is a 404 `Status`.
#[derive(Clone, Default)]
pub struct MockApiServer {
    responses: Arc<Mutex<HashMap<String, (u16, String)>>>,
}

impl MockApiServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get(self, path: &str, status: u16, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    pub fn fail_get(self, path: &str) -> Self {
        self.on_get(path, 500, status_json(500, "InternalError", "etcdserver: request timed out"))
    }

    pub fn into_client(self) -> NineKubeClientImpl {
        NineKubeClientImpl::from_client(Client::new(self, "default"), TEST_API_HOST)
    }
}

impl Service<Request<Body>> for MockApiServer {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let found = if req.method() == http::Method::GET {
            self.responses.lock().unwrap().get(req.uri().path()).cloned()
        } else {
            None
        };
        let (status, body) = found
            .unwrap_or_else(|| (404, status_json(404, "NotFound", "not found").to_string()));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Release probe answering from a fixed set of installed releases.
pub struct StaticReleaseProbe(pub HashSet<String>);

impl StaticReleaseProbe {
    pub fn with(releases: &[&str]) -> Self {
        Self(releases.iter().map(|r| r.to_string()).collect())
    }
}

#[async_trait::async_trait]
impl ReleaseProbe for StaticReleaseProbe {
    async fn release_exists(&self, release: &str, _namespace: &str) -> bool {
        self.0.contains(release)
    }
}

fn created_minutes_ago(minutes: i64) -> String {
    (Utc::now() - Duration::minutes(minutes)).to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

pub fn status_json(code: u16, reason: &str, message: &str) -> Value {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
}

pub fn statefulset_path(ns: &str, name: &str) -> String {
    format!("/apis/apps/v1/namespaces/{}/statefulsets/{}", ns, name)
}

pub fn deployment_path(ns: &str, name: &str) -> String {
    format!("/apis/apps/v1/namespaces/{}/deployments/{}", ns, name)
}

pub fn service_path(ns: &str, name: &str) -> String {
    format!("/api/v1/namespaces/{}/services/{}", ns, name)
}

pub fn pg_cluster_path(ns: &str, name: &str) -> String {
    format!("/apis/postgresql.cnpg.io/v1/namespaces/{}/clusters/{}", ns, name)
}

pub fn nine_cluster_path(ns: &str, name: &str) -> String {
    format!("/apis/nine.nineinfra.tech/v1alpha1/namespaces/{}/nineclusters/{}", ns, name)
}

pub fn nine_cluster_list_path(ns: &str) -> String {
    format!("/apis/nine.nineinfra.tech/v1alpha1/namespaces/{}/nineclusters", ns)
}

pub fn nine_cluster_all_path() -> String {
    "/apis/nine.nineinfra.tech/v1alpha1/nineclusters".to_string()
}

pub const DRIVE_LIST_PATH: &str = "/apis/directpv.min.io/v1beta1/directpvdrives";

pub fn statefulset_json(ns: &str, name: &str, desired: i32, ready: i32) -> Value {
    json!({
        "apiVersion": "apps/v1",
        "kind": "StatefulSet",
        "metadata": {"name": name, "namespace": ns, "creationTimestamp": created_minutes_ago(30)},
        "spec": {
            "replicas": desired,
            "serviceName": name,
            "selector": {"matchLabels": {"app": name}},
            "template": {"metadata": {"labels": {"app": name}}}
        },
        "status": {"replicas": desired, "readyReplicas": ready}
    })
}

pub fn deployment_json(ns: &str, name: &str, desired: i32, ready: i32) -> Value {
    json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {"name": name, "namespace": ns, "creationTimestamp": created_minutes_ago(30)},
        "spec": {
            "replicas": desired,
            "selector": {"matchLabels": {"app": name}},
            "template": {"metadata": {"labels": {"app": name}}}
        },
        "status": {"replicas": desired, "readyReplicas": ready}
    })
}

pub fn pg_cluster_json(ns: &str, name: &str, instances: i32, ready: i32) -> Value {
    json!({
        "apiVersion": "postgresql.cnpg.io/v1",
        "kind": "Cluster",
        "metadata": {"name": name, "namespace": ns, "creationTimestamp": created_minutes_ago(30)},
        "spec": {"instances": instances},
        "status": {"readyInstances": ready, "phase": "Cluster in healthy state"}
    })
}

pub fn nine_cluster_json(ns: &str, name: &str, data_volume: i32) -> Value {
    json!({
        "apiVersion": "nine.nineinfra.tech/v1alpha1",
        "kind": "NineCluster",
        "metadata": {"name": name, "namespace": ns, "creationTimestamp": created_minutes_ago(90)},
        "spec": {"dataVolume": data_volume}
    })
}

pub fn nine_cluster_list_json(items: Vec<Value>) -> Value {
    json!({
        "apiVersion": "nine.nineinfra.tech/v1alpha1",
        "kind": "NineClusterList",
        "metadata": {"resourceVersion": "1"},
        "items": items
    })
}

/// Service exposing a single named port.
pub fn service_json(
    ns: &str,
    name: &str,
    service_type: &str,
    port_name: &str,
    port: i32,
    node_port: Option<i32>,
) -> Value {
    let mut port_spec = json!({"name": port_name, "port": port, "protocol": "TCP"});
    if let Some(np) = node_port {
        port_spec["nodePort"] = json!(np);
    }
    json!({
        "apiVersion": "v1",
        "kind": "Service",
        "metadata": {"name": name, "namespace": ns},
        "spec": {
            "type": service_type,
            "clusterIP": "10.96.0.5",
            "ports": [port_spec]
        }
    })
}

/// DirectPV drive, labelled with `(node, drive name)` when given.
pub fn drive_json(name: &str, labels: Option<(&str, &str)>, status: Value) -> Value {
    let mut metadata = json!({"name": name});
    if let Some((node, drive)) = labels {
        metadata["labels"] = json!({
            "directpv.min.io/node": node,
            "directpv.min.io/drive-name": drive
        });
    }
    json!({
        "apiVersion": "directpv.min.io/v1beta1",
        "kind": "DirectPVDrive",
        "metadata": metadata,
        "spec": {},
        "status": status
    })
}

pub fn drive_list_json(items: Vec<Value>) -> Value {
    json!({
        "apiVersion": "directpv.min.io/v1beta1",
        "kind": "DirectPVDriveList",
        "metadata": {"resourceVersion": "1"},
        "items": items
    })
}
