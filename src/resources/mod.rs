//! ECS resources made available to systems.
//!
//! Overview
//! - `animationconfig` – playback settings loaded from `animation.ini`
//! - `animationstore` – sprite-strip definitions reused across entities
//! - `worldtime` – simulation time and delta
pub mod animationconfig;
pub mod animationstore;
pub mod worldtime;
