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

use clap::Parser;
use nine_kube::cli::{commands::Commands, CliArgs};
use nine_kube::shared::suggestion_for;
use std::process::ExitCode;
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Initialize tracing
    let level = if args.global.debug {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let global = &args.global;
    let result = match &args.command {
        Commands::List(cmd) => cmd.execute(global).await,
        Commands::Show(cmd) => cmd.execute(global).await,
        Commands::Tools(cmd) => cmd.execute(global).await,
        Commands::Thrift(cmd) => cmd.execute(global).await,
        Commands::Drives(cmd) => cmd.execute(global).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", suggestion_for(&e));
            ExitCode::FAILURE
        }
    }
}
