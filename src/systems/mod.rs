//! Engine systems.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations and expose transport controls
//! - [`animationconfig`] – apply [`AnimationConfig`](crate::resources::animationconfig::AnimationConfig) changes
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod animationconfig;
pub mod time;
