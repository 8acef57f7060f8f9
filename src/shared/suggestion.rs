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

//! Remediation hints for errors surfaced to the user

use std::fmt::Display;

/// Known error substrings and their hints, matched in order.
pub const ERROR_SUGGESTIONS: &[(&str, &str)] = &[
    (
        "connection timed out",
        "If you run the nine out of the k8s? or if the status of the NineCluster is not ready?",
    ),
    (
        "connection refused",
        "Is the Kubernetes API server reachable? Check the server address in your kubeconfig.",
    ),
    (
        "Unauthorized",
        "Your credentials were rejected. Check the user and context in your kubeconfig.",
    ),
    (
        "no such host",
        "The API server host could not be resolved. Check your DNS or the kubeconfig server field.",
    ),
    (
        "No such file or directory",
        "A file or binary could not be found. Check the --kubeconfig and --conf paths, and make sure helm is on your PATH.",
    ),
];

pub const UNKNOWN_ERROR_SUGGESTION: &str = "I'm sorry, this error is not in my knowledge base. \n\
     Could you please submit an issue on GitHub to help me improve my knowledge base? Thank you!";

/// Return the hint for the first known substring found in the error message.
pub fn suggestion_for(err: &dyn Display) -> &'static str {
    let message = err.to_string();
    ERROR_SUGGESTIONS
        .iter()
        .find(|(pattern, _)| message.contains(pattern))
        .map(|(_, hint)| *hint)
        .unwrap_or(UNKNOWN_ERROR_SUGGESTION)
}
