use thiserror::Error;

/// Errors raised on the control side of the engine.
///
/// The render path never produces these; anything that goes wrong while
/// rendering is absorbed in place.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("invalid patch: {0}")]
    InvalidPatch(String),
    #[error("unknown parameter '{0}'")]
    UnknownParam(String),
    #[error("command queue full ({capacity} pending)")]
    QueueFull { capacity: usize },
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for SynthError {
    fn from(e: serde_json::Error) -> Self {
        SynthError::InvalidPatch(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let e = SynthError::UnknownParam("wobble".to_string());
        assert_eq!(format!("{e}"), "unknown parameter 'wobble'");

        let e = SynthError::QueueFull { capacity: 256 };
        assert!(format!("{e}").contains("256"));
    }

    #[test]
    fn json_errors_become_invalid_patch() {
        let err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let e: SynthError = err.into();
        assert!(matches!(e, SynthError::InvalidPatch(_)));
    }
}
