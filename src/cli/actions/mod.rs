pub mod run;

use crate::performance::TimeUnit;
use anyhow::Result;
use std::{env, path::PathBuf, process::ExitStatus};
use tokio::process::Command;

#[derive(Debug)]
pub enum Action {
    Run {
        config: PathBuf,
        title: Option<String>,
        unit: Option<TimeUnit>,
    },
}

/// The user's `$SHELL`, or `sh`
fn default_shell() -> String {
    env::var("SHELL").unwrap_or_else(|_| "sh".to_string())
}

/// Runs `cmd` through `shell -c` with inherited stdio, errors only if it cannot be spawned
async fn execute_command(shell: &str, cmd: &str) -> Result<ExitStatus> {
    Ok(Command::new(shell).arg("-c").arg(cmd).status().await?)
}
