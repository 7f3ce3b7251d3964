//! Animation state notifications.
//!
//! Every observable change of an [`Animation`](crate::components::animation::Animation)
//! is described by an [`AnimationTransition`]. Transitions reach the outside
//! world in three ways:
//!
//! 1. Synchronously, through [`AnimationStateListener`] implementations
//!    subscribed with `Animation::add_listener`.
//! 2. By polling, through the opt-in transition log
//!    (`Animation::with_transition_log` + `Animation::drain_transitions`).
//! 3. In the ECS, as an [`AnimationEvent`] triggered by the
//!    [`animation`](crate::systems::animation::animation) system for every
//!    entry drained from a [`SpriteAnimation`](crate::components::animation::SpriteAnimation).
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(|trigger: On<AnimationEvent>| {
//!     if trigger.event().transition == AnimationTransition::Finished {
//!         log::info!("{:?} finished playing", trigger.event().entity);
//!     }
//! });
//! ```

use bevy_ecs::prelude::*;

/// A single observable change in playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationTransition {
    /// Playback began: the first running tick after creation, reset, clear or
    /// a restart through repetition. Pausing before that tick reports
    /// `Paused` (and `Resumed`) ahead of `Started`.
    Started,
    /// `Running -> Paused`.
    Paused,
    /// `Paused -> Running`.
    Resumed,
    /// The cursor moved to the contained index.
    FrameChanged(usize),
    /// The cursor wrapped from the last frame back to the first.
    LoopFinished,
    /// `Running -> Finished`; the cursor stays on the last frame.
    Finished,
}

impl AnimationTransition {
    /// Forward this transition to the matching listener hook.
    pub fn notify(self, listener: &mut dyn AnimationStateListener) {
        match self {
            AnimationTransition::Started => listener.on_started(),
            AnimationTransition::Paused => listener.on_paused(),
            AnimationTransition::Resumed => listener.on_resumed(),
            AnimationTransition::FrameChanged(index) => listener.on_frame_changed(index),
            AnimationTransition::LoopFinished => listener.on_loop_finished(),
            AnimationTransition::Finished => listener.on_finished(),
        }
    }
}

/// Observer interface for animation playback.
///
/// All hooks default to doing nothing, so implementors only override the
/// events they care about.
pub trait AnimationStateListener {
    fn on_started(&mut self) {}
    fn on_paused(&mut self) {}
    fn on_resumed(&mut self) {}
    /// Called with the new cursor position, including wraps back to 0.
    fn on_frame_changed(&mut self, _index: usize) {}
    fn on_loop_finished(&mut self) {}
    fn on_finished(&mut self) {}
}

/// Listener that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl AnimationStateListener for NoopListener {}

/// Event triggered once per transition of an entity's sprite animation.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AnimationEvent {
    /// The entity owning the [`SpriteAnimation`](crate::components::animation::SpriteAnimation).
    pub entity: Entity,
    /// What happened.
    pub transition: AnimationTransition,
}
