//! Host query/command protocol for the device-target widget.
//!
//! The host UI drives the selection service through a three-operation
//! query/command shape: two queries (current value, list of values) and
//! one command (set value, with a string payload). This module pins that
//! contract down as data, so a host adapter only has to translate its
//! native event type into a [`TargetRequest`]. Malformed shapes are a
//! host/core contract mismatch and surface as hard errors, distinct from
//! data problems like an invalid selection.

use thiserror::Error;

use crate::services::{SelectionError, TargetValueSource};

/// Which of the three protocol operations is being invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Query: the value to display as currently selected.
    CurrentValue,
    /// Query: the candidate values to offer.
    ListValues,
    /// Command: accept the payload as the new selection.
    SetValue,
}

/// One protocol invocation as received from the host.
#[derive(Debug, Clone)]
pub struct TargetRequest {
    /// The operation being invoked.
    pub kind: RequestKind,
    /// Payload of a `SetValue` command; queries must not carry one.
    pub payload: Option<String>,
}

impl TargetRequest {
    /// A payload-less query.
    #[must_use]
    pub const fn query(kind: RequestKind) -> Self {
        Self {
            kind,
            payload: None,
        }
    }

    /// A `SetValue` command carrying `payload`.
    pub fn set_value(payload: impl Into<String>) -> Self {
        Self {
            kind: RequestKind::SetValue,
            payload: Some(payload.into()),
        }
    }
}

/// Answer to one protocol invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetResponse {
    /// Current value; `None` when the call was suppressed by the guard.
    Value(Option<String>),
    /// Candidate values.
    Values(Vec<String>),
    /// A `SetValue` command was accepted.
    Ack,
}

/// Protocol-level failures.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A `SetValue` command arrived without its payload.
    #[error("SetValue requires a payload")]
    MissingPayload,

    /// A query carried a payload it has no use for.
    #[error("{0:?} does not accept a payload")]
    UnexpectedPayload(RequestKind),

    /// The operation itself failed.
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Dispatch one host request against a value source.
pub async fn dispatch(
    source: &dyn TargetValueSource,
    request: TargetRequest,
) -> Result<TargetResponse, ProtocolError> {
    match request.kind {
        RequestKind::CurrentValue => {
            if request.payload.is_some() {
                return Err(ProtocolError::UnexpectedPayload(request.kind));
            }
            Ok(TargetResponse::Value(source.current_value().await?))
        }
        RequestKind::ListValues => {
            if request.payload.is_some() {
                return Err(ProtocolError::UnexpectedPayload(request.kind));
            }
            Ok(TargetResponse::Values(source.list_values().await?))
        }
        RequestKind::SetValue => {
            let payload = request.payload.ok_or(ProtocolError::MissingPayload)?;
            source.set_value(&payload).await?;
            Ok(TargetResponse::Ack)
        }
    }
}
