//! `devices` command - list the connected devices.

use boardlink_core::{RequestKind, TargetRequest, TargetResponse, dispatch};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// List the candidate device targets, one per line.
pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let response = dispatch(
        ctx.selection.as_ref(),
        TargetRequest::query(RequestKind::ListValues),
    )
    .await?;

    if let TargetResponse::Values(devices) = response {
        for device in devices {
            println!("{device}");
        }
    }
    Ok(())
}
