//! Event types used by the engine.
//!
//! Submodules:
//! - [`animation`] – playback transitions, the listener contract and the ECS event
pub mod animation;
