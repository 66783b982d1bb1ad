//! `bootstrap` command - install the project templates in the foreground.

use std::time::Duration;

use indicatif::ProgressBar;

use boardlink_core::{InstallOutcome, PACKAGE_TOOL, TEMPLATE_PACKAGE};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Run the template install now and report the outcome.
///
/// The install itself is still non-fatal; a failure reports and exits
/// cleanly, matching the background path's containment policy.
pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Installing {TEMPLATE_PACKAGE}..."));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let outcome = ctx.installer.install(&ctx.shutdown).await;
    spinner.finish_and_clear();

    match outcome {
        InstallOutcome::Skipped => {
            println!("Skipped: no network reachability, or an attempt already ran");
        }
        InstallOutcome::Succeeded(_) => {
            println!("{TEMPLATE_PACKAGE} installed");
        }
        InstallOutcome::Failed(Some(run)) => {
            use boardlink_core::CommandStatus;
            let detail = match run.status {
                CommandStatus::Exited(code) => format!("exit code {code}"),
                CommandStatus::Cancelled => "cancelled".to_string(),
            };
            println!("Install failed ({detail})");
            if !run.stderr.is_empty() {
                eprintln!("{}", run.stderr.trim_end());
            }
        }
        InstallOutcome::Failed(None) => {
            println!("Install failed: {PACKAGE_TOOL} could not be launched");
        }
    }
    Ok(())
}
