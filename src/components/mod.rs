//! ECS components and the playback types they wrap.
//!
//! Submodules overview:
//! - [`animation`] – the frame-sequence state machine and the [`SpriteAnimation`](animation::SpriteAnimation) component
//! - [`sprite`] – texture regions and the sprite component the animation system updates

pub mod animation;
pub mod sprite;
