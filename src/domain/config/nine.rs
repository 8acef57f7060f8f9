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

use crate::infrastructure::constants::{DEFAULT_HELM_BIN, DEFAULT_NAMESPACE};
use crate::infrastructure::kubernetes::KubeConfigSource;
use crate::shared::error::KubeError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab separated, fixed width columns
    #[default]
    Plain,
    /// Bordered, colored table
    Table,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(OutputFormat::Plain),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Defaults for the CLI, read from a TOML file.
///
/// ```toml
/// kubeconfig = "/etc/nine/kubeconfig"
/// context = "prod"
/// namespace = "dwh"
/// output = "table"
/// helm_bin = "/usr/local/bin/helm"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NineConf {
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
    pub namespace: String,
    pub output: OutputFormat,
    pub helm_bin: String,
}

impl Default for NineConf {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            context: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            output: OutputFormat::default(),
            helm_bin: DEFAULT_HELM_BIN.to_string(),
        }
    }
}

impl NineConf {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, KubeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            KubeError::config_error(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let conf: NineConf = toml::from_str(&content)?;
        Ok(conf)
    }

    /// Config from `path` when given, built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, KubeError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Command line values win over the file.
    pub fn kube_config_source(
        &self,
        kubeconfig: Option<&Path>,
        context: Option<&str>,
    ) -> KubeConfigSource {
        KubeConfigSource::new(
            kubeconfig
                .map(Path::to_path_buf)
                .or_else(|| self.kubeconfig.as_ref().map(PathBuf::from)),
            context
                .map(str::to_string)
                .or_else(|| self.context.clone()),
        )
    }

    pub fn namespace_or<'a>(&'a self, namespace: Option<&'a str>) -> &'a str {
        namespace.unwrap_or(&self.namespace)
    }

    pub fn output_or(&self, output: Option<OutputFormat>) -> OutputFormat {
        output.unwrap_or(self.output)
    }
}
