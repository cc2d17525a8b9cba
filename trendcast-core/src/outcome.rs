//! Tagged results for the model-or-template code paths.
//!
//! Every generation step returns a usable value. The tag records whether the
//! value came from the hosted model, from a salvaged model reply, or from the
//! deterministic fallback, and why.

use crate::{CoreError, ErrorExt};
use serde::{Deserialize, Serialize};

/// Why a generation step did not use a clean model answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No API key configured, or the caller asked for the template path
    ModelDisabled,
    /// The hosted model call failed (network, auth, quota, status)
    ModelCallFailed { code: String, message: String },
    /// The model answered but the reply did not have the expected shape
    MalformedOutput { details: String },
    /// Every trend source came back empty
    NoTrendSources,
}

impl FallbackReason {
    pub fn call_failed(error: &CoreError) -> Self {
        FallbackReason::ModelCallFailed {
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }

    pub fn malformed(details: impl Into<String>) -> Self {
        FallbackReason::MalformedOutput {
            details: details.into(),
        }
    }
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::ModelDisabled => f.write_str("model disabled"),
            FallbackReason::ModelCallFailed { code, message } => {
                write!(f, "model call failed [{}]: {}", code, message)
            }
            FallbackReason::MalformedOutput { details } => {
                write!(f, "malformed model output: {}", details)
            }
            FallbackReason::NoTrendSources => f.write_str("no trend source responded"),
        }
    }
}

/// Result of a generation step that degrades instead of failing
#[derive(Debug, Clone, PartialEq)]
pub enum Generated<T> {
    /// The model produced the value
    Ok(T),
    /// The model answered badly, the value is a partial salvage
    Degraded(T, FallbackReason),
    /// The deterministic path produced the value
    Fallback(T, FallbackReason),
}

impl<T> Generated<T> {
    pub fn value(&self) -> &T {
        match self {
            Generated::Ok(value)
            | Generated::Degraded(value, _)
            | Generated::Fallback(value, _) => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Generated::Ok(value)
            | Generated::Degraded(value, _)
            | Generated::Fallback(value, _) => value,
        }
    }

    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            Generated::Ok(_) => None,
            Generated::Degraded(_, reason) | Generated::Fallback(_, reason) => Some(reason),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Generated::Ok(_))
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Generated::Degraded(..))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Generated::Fallback(..))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Generated<U> {
        match self {
            Generated::Ok(value) => Generated::Ok(f(value)),
            Generated::Degraded(value, reason) => Generated::Degraded(f(value), reason),
            Generated::Fallback(value, reason) => Generated::Fallback(f(value), reason),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Generated::Ok(_) => "ok",
            Generated::Degraded(..) => "degraded",
            Generated::Fallback(..) => "fallback",
        }
    }

    /// Serializable summary of the tag, without the value
    pub fn report(&self) -> OutcomeReport {
        OutcomeReport {
            outcome: self.label().to_string(),
            reason: self.reason().cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeReport {
    pub outcome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<FallbackReason>,
}
