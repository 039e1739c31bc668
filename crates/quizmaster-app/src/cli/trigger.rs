/*
[INPUT]:  AppConfig, job type, shutdown token
[OUTPUT]: Live job status lines until the job finishes
[POS]:    CLI admin dashboard
[UPDATE]: When Task fields or status rendering change
*/

use anyhow::{Result, bail};
use console::style;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use quizmaster_app::{AppConfig, Severity, Task, TaskRunner, TaskState};
use quizmaster_client::TaskType;

pub async fn run_trigger(
    config: &AppConfig,
    task_type: TaskType,
    shutdown: CancellationToken,
) -> Result<()> {
    let client = Arc::new(config.build_client()?);
    let runner = TaskRunner::new(client, config.poll_config());
    let mut updates = runner.subscribe();

    if !runner.trigger(task_type) {
        bail!("{} could not be started", task_type.display_name());
    }

    let mut last_message = String::new();
    loop {
        {
            let task = updates.borrow_and_update();
            if task.status_message != last_message {
                print_status(&task);
                last_message = task.status_message.clone();
            }
            if task.state.is_terminal() {
                break;
            }
        }

        tokio::select! {
            _ = shutdown.cancelled() => {
                runner.shutdown();
                println!("{}", style("Stopped following task.").yellow());
                return Ok(());
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    let task = runner.wait().await;
    match task.state {
        TaskState::Success => Ok(()),
        _ => bail!(
            "{}",
            task.error_detail
                .unwrap_or_else(|| "task did not complete".to_string())
        ),
    }
}

fn print_status(task: &Task) {
    let message = match task.severity {
        Severity::Success => style(&task.status_message).green(),
        Severity::Danger => style(&task.status_message).red(),
        Severity::Warning => style(&task.status_message).yellow(),
        Severity::Info => style(&task.status_message).cyan(),
    };
    match &task.task_id {
        Some(task_id) => println!("{message} {}", style(format!("[{task_id}]")).dim()),
        None => println!("{message}"),
    }
}
