//! Flipbook library.
//!
//! Frame-sequence animation playback for a 2D engine: the [`Animation`]
//! state machine and its listener contract, plus the bevy_ecs components,
//! resources, systems and events that drive it from a host update loop.
//!
//! [`Animation`]: components::animation::Animation

pub mod components;
pub mod error;
pub mod events;
pub mod resources;
pub mod systems;
