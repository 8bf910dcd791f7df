//! The single externally visible artifact of a run.

use serde::{Deserialize, Serialize};

use crate::RunError;

/// Tagged success/failure outcome. Success carries a human-readable summary
/// message; failure carries the rendered error text naming the failure kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

impl From<RunError> for RunOutcome {
    fn from(err: RunError) -> Self {
        Self::failure(err.to_string())
    }
}
