use thiserror::Error;

/// Blend controller errors.
///
/// Clone + `PartialEq` so callers can match on outcomes in tests and
/// driver code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlendError {
    /// The configured target name resolved to nothing in the scene.
    /// Fatal for the controller instance: it disables itself and every
    /// later episode start or tick is a silent no-op.
    #[error("No scene object matches target name \"{name}\"")]
    TargetNotFound { name: String },

    /// A body-part discriminant outside 0..=2. Non-fatal: the tick that
    /// hits it emits nothing.
    #[error("Unknown body part discriminant {0}")]
    UnknownBodyPart(u8),

    /// A body-part name that is not `head`, `left_hand`, or `right_hand`.
    #[error("Unknown body part name \"{0}\"")]
    UnknownBodyPartName(String),

    /// The controller was disabled by an earlier configuration failure.
    /// Call [`reset`](crate::controller::BlendController::reset) to retry.
    #[error("Controller is disabled")]
    Disabled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            BlendError::TargetNotFound {
                name: "door".into()
            }
            .to_string(),
            "No scene object matches target name \"door\""
        );
        assert_eq!(
            BlendError::UnknownBodyPart(7).to_string(),
            "Unknown body part discriminant 7"
        );
        assert_eq!(BlendError::Disabled.to_string(), "Controller is disabled");
    }

    #[test]
    fn errors_are_comparable() {
        let a = BlendError::TargetNotFound { name: "x".into() };
        let b = BlendError::TargetNotFound { name: "x".into() };
        assert_eq!(a, b);
        assert_ne!(a, BlendError::Disabled);
    }
}
