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

use crate::infrastructure::constants::DEFAULT_HELM_BIN;
use crate::infrastructure::kubernetes::KubeConfigSource;
use crate::infrastructure::shell::run_command;

/// Tells whether an installed release exists in a namespace.
#[async_trait::async_trait]
pub trait ReleaseProbe: Send + Sync {
    async fn release_exists(&self, release: &str, namespace: &str) -> bool;
}

/// Probes releases with `helm status`.
pub struct HelmReleaseProbe {
    helm_bin: String,
    source: KubeConfigSource,
}

impl HelmReleaseProbe {
    pub fn new(source: KubeConfigSource) -> Self {
        Self {
            helm_bin: DEFAULT_HELM_BIN.to_string(),
            source,
        }
    }

    pub fn with_helm_bin(mut self, helm_bin: impl Into<String>) -> Self {
        self.helm_bin = helm_bin.into();
        self
    }

    pub fn status_args(&self, release: &str, namespace: &str) -> Vec<String> {
        let mut args = vec![
            "status".to_string(),
            release.to_string(),
            "-n".to_string(),
            namespace.to_string(),
        ];
        if let Some(path) = &self.source.kubeconfig {
            args.push("--kubeconfig".to_string());
            args.push(path.display().to_string());
        }
        if let Some(context) = &self.source.context {
            args.push("--kube-context".to_string());
            args.push(context.clone());
        }
        args
    }
}

#[async_trait::async_trait]
impl ReleaseProbe for HelmReleaseProbe {
    async fn release_exists(&self, release: &str, namespace: &str) -> bool {
        let args = self.status_args(release, namespace);
        match run_command(&self.helm_bin, &args).await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Release {} not found in {}: {}", release, namespace, e);
                false
            }
        }
    }
}
