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

use crate::infrastructure::kubernetes::crd::{Cluster, DirectPVDrive, NineCluster};
use crate::shared::error::KubeError;
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::core::v1::Service;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client};
use regex::Regex;
use std::path::PathBuf;

/// Where to load the Kubernetes client configuration from.
///
/// An explicit path wins; otherwise the standard discovery applies
/// (`KUBECONFIG`, then `~/.kube/config`, then the in-cluster service account).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KubeConfigSource {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
}

impl KubeConfigSource {
    pub fn new(kubeconfig: Option<PathBuf>, context: Option<String>) -> Self {
        Self {
            kubeconfig,
            context,
        }
    }
}

pub async fn resolve_config(source: &KubeConfigSource) -> Result<kube::Config, KubeError> {
    let options = KubeConfigOptions {
        context: source.context.clone(),
        cluster: None,
        user: None,
    };

    let kubeconfig = match &source.kubeconfig {
        Some(path) => Kubeconfig::read_from(path).map_err(|e| {
            KubeError::config_error(format!(
                "Failed to load kubeconfig {}: {}",
                path.display(),
                e
            ))
        })?,
        None => match Kubeconfig::read() {
            Ok(kubeconfig) => kubeconfig,
            Err(e) => {
                tracing::debug!("No kubeconfig found ({}), trying in-cluster config", e);
                return kube::Config::incluster().map_err(|e| {
                    KubeError::config_error(format!("Failed to load Kubernetes config: {}", e))
                });
            }
        },
    };

    kube::Config::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| KubeError::config_error(format!("Failed to create Kubernetes config: {}", e)))
}

pub async fn kube_client(source: &KubeConfigSource) -> Result<Client, KubeError> {
    kube_client_with_config(source)
        .await
        .map(|(client, _)| client)
}

pub async fn kube_client_with_config(
    source: &KubeConfigSource,
) -> Result<(Client, kube::Config), KubeError> {
    let config = resolve_config(source).await?;
    let client = Client::try_from(config.clone()).map_err(|e| {
        KubeError::KubeError(format!("Failed to create Kubernetes client: {}", e))
    })?;
    Ok((client, config))
}

pub async fn nine_cluster_api(
    source: &KubeConfigSource,
    namespace: &str,
) -> Result<Api<NineCluster>, KubeError> {
    Ok(Api::namespaced(kube_client(source).await?, namespace))
}

pub async fn pg_cluster_api(
    source: &KubeConfigSource,
    namespace: &str,
) -> Result<Api<Cluster>, KubeError> {
    Ok(Api::namespaced(kube_client(source).await?, namespace))
}

pub async fn drive_api(source: &KubeConfigSource) -> Result<Api<DirectPVDrive>, KubeError> {
    Ok(Api::all(kube_client(source).await?))
}

/// Bare API server host for display, or an empty string when no
/// configuration can be resolved.
pub async fn kube_host(source: &KubeConfigSource) -> String {
    match resolve_config(source).await {
        Ok(config) => host_from_server_url(&config.cluster_url.to_string()),
        Err(e) => {
            tracing::debug!("Cannot resolve API server host: {}", e);
            String::new()
        }
    }
}

/// Strip the scheme, port and path from an API server URL.
pub fn host_from_server_url(server: &str) -> String {
    Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.\-]*://)?(\[[^\]]+\]|[^:/]+)")
        .ok()
        .and_then(|re| {
            re.captures(server)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim_start_matches('[').trim_end_matches(']').to_string())
        })
        .unwrap_or_default()
}

/// Address used to reach NodePort services: the first IPv4 address in the
/// API server URL, or its bare host when the server is addressed by name.
pub fn node_access_ip(server: &str) -> String {
    Regex::new(r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b")
        .ok()
        .and_then(|re| re.find(server).map(|m| m.as_str().to_string()))
        .unwrap_or_else(|| host_from_server_url(server))
}

/// Read access to the resources behind a NineCluster.
#[async_trait::async_trait]
pub trait NineKubeClient: Send + Sync {
    async fn get_statefulset(&self, name: &str, namespace: &str)
        -> Result<StatefulSet, KubeError>;

    async fn get_deployment(&self, name: &str, namespace: &str) -> Result<Deployment, KubeError>;

    async fn get_service(&self, name: &str, namespace: &str) -> Result<Service, KubeError>;

    async fn get_pg_cluster(&self, name: &str, namespace: &str) -> Result<Cluster, KubeError>;

    async fn get_nine_cluster(&self, name: &str, namespace: &str)
        -> Result<NineCluster, KubeError>;

    /// List NineClusters in one namespace, or in all namespaces for `None`.
    async fn list_nine_clusters(
        &self,
        namespace: Option<&str>,
    ) -> Result<Vec<NineCluster>, KubeError>;

    async fn list_drives(&self) -> Result<Vec<DirectPVDrive>, KubeError>;

    /// API server URL this client talks to.
    fn api_host(&self) -> &str;
}

pub struct NineKubeClientImpl {
    client: Client,
    api_host: String,
}

impl NineKubeClientImpl {
    pub async fn new_with_config(source: &KubeConfigSource) -> Result<Self, KubeError> {
        let (client, config) = kube_client_with_config(source).await?;
        Ok(Self {
            client,
            api_host: config.cluster_url.to_string(),
        })
    }

    pub fn from_client(client: Client, api_host: impl Into<String>) -> Self {
        Self {
            client,
            api_host: api_host.into(),
        }
    }
}

#[async_trait::async_trait]
impl NineKubeClient for NineKubeClientImpl {
    async fn get_statefulset(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<StatefulSet, KubeError> {
        let api: Api<StatefulSet> = Api::namespaced(self.client.clone(), namespace);
        api.get(name)
            .await
            .map_err(|e| KubeError::from_get(e, "StatefulSet", name, namespace))
    }

    async fn get_deployment(&self, name: &str, namespace: &str) -> Result<Deployment, KubeError> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        api.get(name)
            .await
            .map_err(|e| KubeError::from_get(e, "Deployment", name, namespace))
    }

    async fn get_service(&self, name: &str, namespace: &str) -> Result<Service, KubeError> {
        let api: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        api.get(name)
            .await
            .map_err(|e| KubeError::from_get(e, "Service", name, namespace))
    }

    async fn get_pg_cluster(&self, name: &str, namespace: &str) -> Result<Cluster, KubeError> {
        let api: Api<Cluster> = Api::namespaced(self.client.clone(), namespace);
        api.get(name)
            .await
            .map_err(|e| KubeError::from_get(e, "Cluster", name, namespace))
    }

    async fn get_nine_cluster(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<NineCluster, KubeError> {
        let api: Api<NineCluster> = Api::namespaced(self.client.clone(), namespace);
        api.get(name)
            .await
            .map_err(|e| KubeError::from_get(e, "NineCluster", name, namespace))
    }

    async fn list_nine_clusters(
        &self,
        namespace: Option<&str>,
    ) -> Result<Vec<NineCluster>, KubeError> {
        let api: Api<NineCluster> = match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };
        let lp = kube::api::ListParams::default();

        api.list(&lp)
            .await
            .map(|list| list.items)
            .map_err(|e| KubeError::KubeError(e.to_string()))
    }

    async fn list_drives(&self) -> Result<Vec<DirectPVDrive>, KubeError> {
        let api: Api<DirectPVDrive> = Api::all(self.client.clone());
        let lp = kube::api::ListParams::default();

        api.list(&lp)
            .await
            .map(|list| list.items)
            .map_err(|e| KubeError::KubeError(e.to_string()))
    }

    fn api_host(&self) -> &str {
        &self.api_host
    }
}
