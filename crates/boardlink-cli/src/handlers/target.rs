//! `target` command - show or set the current device target.

use boardlink_core::{RequestKind, TargetRequest, TargetResponse, dispatch};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Show the current target, or select `device` as the new one.
pub async fn execute(ctx: &CliContext, device: Option<String>) -> Result<(), CliError> {
    match device {
        Some(device) => {
            dispatch(ctx.selection.as_ref(), TargetRequest::set_value(device.as_str())).await?;
            println!("Device target set to {device}");
        }
        None => {
            let response = dispatch(
                ctx.selection.as_ref(),
                TargetRequest::query(RequestKind::CurrentValue),
            )
            .await?;

            if let TargetResponse::Value(value) = response {
                match value.as_deref() {
                    None => println!("Selection is paused while a deploy is in progress"),
                    Some("") => println!("No device selected"),
                    Some(name) => println!("{name}"),
                }
            }
        }
    }
    Ok(())
}
