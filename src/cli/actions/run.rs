use crate::{
    cli::{
        actions::{default_shell, execute_command, Action},
        config::{Config, Step},
    },
    performance::{Clock, IntegerFormat, Performance, TimeUnit},
};
use anyhow::Result;
use tracing::{debug, error, info, instrument};

/// Handle the run action
#[instrument(skip(action))]
pub async fn handle(action: Action) -> Result<()> {
    let Action::Run {
        config,
        title,
        unit,
    } = action;

    let config = Config::new(config)?;

    let mut performance = Performance::new().with_format(config.grouping.integer_format());

    run_steps(&mut performance, &config, unit).await?;

    performance.report(title.as_deref().unwrap_or(&config.title));

    Ok(())
}

/// Runs every step in order, each one under its own timer
pub async fn run_steps<C: Clock, F: IntegerFormat>(
    performance: &mut Performance<C, F>,
    config: &Config,
    unit: Option<TimeUnit>,
) -> Result<()> {
    let shell = config.shell.clone().unwrap_or_else(default_shell);
    let default_unit = unit.unwrap_or(config.unit);

    for (position, step) in config.steps.iter().enumerate() {
        let unit = step.unit.unwrap_or(default_unit);

        if !run_step(performance, &shell, step, unit).await? && config.fail_fast {
            info!(
                "Step '{}' failed, skipping {} remaining step(s)",
                step.name,
                config.steps.len() - position - 1
            );
            break;
        }
    }

    Ok(())
}

/// Times a single step, returns whether it succeeded
async fn run_step<C: Clock, F: IntegerFormat>(
    performance: &mut Performance<C, F>,
    shell: &str,
    step: &Step,
    unit: TimeUnit,
) -> Result<bool> {
    debug!("Running step: {}", step.name);

    let id = performance.start(step.name.as_str(), unit);

    match execute_command(shell, &step.cmd).await {
        Ok(status) => {
            performance.stop(id)?;

            let elapsed = format!(
                "{} {unit}",
                performance.elapsed(id)?.unwrap_or_default()
            );

            if status.success() {
                info!(
                    step = %step.name,
                    cmd = %step.cmd,
                    elapsed = %elapsed,
                    status = %status
                );
            } else {
                error!(
                    step = %step.name,
                    cmd = %step.cmd,
                    elapsed = %elapsed,
                    status = %status
                );
            }

            Ok(status.success())
        }
        Err(e) => {
            error!("Failed to spawn step '{}': {}", step.name, e);
            Ok(false)
        }
    }
}
