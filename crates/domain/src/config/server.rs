use serde::{Deserialize, Serialize};

/// What the listener supervisor does when one listener fails to bind or dies.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListenerFailurePolicy {
    /// Terminate the whole process on the first listener failure.
    #[default]
    Abort,

    /// Log the failure and keep serving on the remaining listeners.
    Continue,
}

impl ListenerFailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Continue => "continue",
        }
    }
}
