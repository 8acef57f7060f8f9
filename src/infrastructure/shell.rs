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

use crate::shared::error::KubeError;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code of the process, `None` when it was killed by a signal.
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn exited_cleanly(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run an external command, capturing stdout and stderr separately.
///
/// A command that printed anything on stdout counts as successful even when
/// it exited non-zero. The real exit code is still returned in
/// [`CommandOutput::exit_code`].
pub async fn run_command(program: &str, args: &[String]) -> Result<CommandOutput, KubeError> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| {
            tracing::debug!("Exec {} args:{:?} failed to start: {}", program, args, e);
            KubeError::command(program, e.to_string())
        })?;

    let result = CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code(),
    };

    tracing::debug!(
        "Exec {} args:{:?} with output:{}, errput:{}, status:{}",
        program,
        args,
        result.stdout,
        result.stderr,
        output.status
    );

    if output.status.success() || !result.stdout.is_empty() {
        return Ok(result);
    }

    let message = match result.stderr.trim() {
        "" => output.status.to_string(),
        stderr => stderr.to_string(),
    };
    Err(KubeError::command(program, message))
}
