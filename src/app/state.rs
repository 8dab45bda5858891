use serde::{Deserialize, Serialize};

/// Where the current generation cycle stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// What the front end renders.
///
/// `latex` holds the last successfully generated document and survives failed
/// follow-ups. `error` is only set while `status` is [`GenerationStatus::Error`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationState {
    pub status: GenerationStatus,
    pub latex: Option<String>,
    pub error: Option<String>,
}

impl GenerationState {
    pub fn is_loading(&self) -> bool {
        self.status == GenerationStatus::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle_and_empty() {
        let state = GenerationState::default();

        assert_eq!(state.status, GenerationStatus::Idle);
        assert!(state.latex.is_none());
        assert!(state.error.is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&GenerationStatus::Loading).unwrap(), "\"loading\"");
        assert_eq!(serde_json::to_string(&GenerationStatus::Error).unwrap(), "\"error\"");
    }
}
