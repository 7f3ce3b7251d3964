//! Error type shared by the animation library.
//!
//! Playback itself never fails: an empty sequence yields no frame and a
//! transport call in the wrong state is a no-op. Errors are reserved for
//! invalid construction (bad frame delays, malformed strip definitions) and
//! for lookups in the [`AnimationStore`](crate::resources::animationstore::AnimationStore).

use thiserror::Error;

/// Errors raised while building animations or querying the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnimationError {
    /// A frame delay was negative, NaN or infinite.
    #[error("invalid frame delay {0}: delays must be finite and non-negative")]
    InvalidDelay(f32),
    /// No animation definition is registered under this key.
    #[error("unknown animation '{0}'")]
    UnknownAnimation(String),
    /// A strip definition cannot produce a playable animation.
    #[error("invalid animation definition '{key}': {reason}")]
    InvalidDefinition { key: String, reason: String },
}
