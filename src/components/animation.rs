//! Frame-sequence playback.
//!
//! An [`Animation`] owns an ordered list of [`AnimationFrame`]s and a cursor
//! into it. The host calls [`Animation::update`] once per tick with the
//! elapsed delta; the animation accumulates time on the current frame and
//! moves the cursor once that time strictly exceeds the frame's delay.
//!
//! # State machine
//!
//! ```text
//!            pause()                 last frame passed, no repetition
//!  Running ----------> Paused        Running -------------------------> Finished
//!     ^                  |              ^                                  |
//!     +------------------+              +----------------------------------+
//!          resume()                  set_repetition_enabled(true) / reset()
//! ```
//!
//! [`AnimationState::Finished`] is only reachable with repetition disabled,
//! so [`Animation::is_finished`] is always `false` for looping animations.
//!
//! # Advancing
//!
//! In [`AdvanceMode::SingleStep`] (the default) at most one frame is
//! advanced per update no matter how large the delta is, and the time in
//! excess of the delay is discarded. [`AdvanceMode::CatchUp`] repeats the
//! same step while the accumulated time covers the current frame, carrying
//! the remainder forward. A looping catch-up folds whole cycles out of the
//! accumulator before stepping, so one update walks at most one pass over
//! the frames however large the delta.
//!
//! Negative, NaN and infinite deltas are ignored.
//!
//! # Related
//!
//! - [`crate::events::animation`] – transitions and the listener contract
//! - [`crate::systems::animation::animation`] – ECS system driving [`SpriteAnimation`]

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::Component;
use log::debug;
use smallvec::SmallVec;

use crate::components::sprite::TextureRegion;
use crate::error::AnimationError;
use crate::events::animation::{AnimationStateListener, AnimationTransition};

fn validate_delay(delay: f32) -> Result<f32, AnimationError> {
    if delay.is_finite() && delay >= 0.0 {
        Ok(delay)
    } else {
        Err(AnimationError::InvalidDelay(delay))
    }
}

/// One visual state of an animation and how long it stays on screen.
///
/// The visual is shared: cloning a frame clones the `Arc`, never the
/// resource behind it.
#[derive(Debug)]
pub struct AnimationFrame<V> {
    delay: f32,
    visual: Arc<V>,
}

impl<V> Clone for AnimationFrame<V> {
    fn clone(&self) -> Self {
        Self {
            delay: self.delay,
            visual: Arc::clone(&self.visual),
        }
    }
}

impl<V> AnimationFrame<V> {
    /// Create a frame owning a fresh visual.
    pub fn new(delay: f32, visual: V) -> Result<Self, AnimationError> {
        Self::from_shared(delay, Arc::new(visual))
    }

    /// Create a frame referencing a visual that is already shared elsewhere.
    pub fn from_shared(delay: f32, visual: Arc<V>) -> Result<Self, AnimationError> {
        Ok(Self {
            delay: validate_delay(delay)?,
            visual,
        })
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Change the display time of this frame. Rejects negative and non-finite values.
    pub fn set_delay(&mut self, delay: f32) -> Result<(), AnimationError> {
        self.delay = validate_delay(delay)?;
        Ok(())
    }

    pub fn visual(&self) -> &Arc<V> {
        &self.visual
    }

    pub fn set_visual(&mut self, visual: Arc<V>) {
        self.visual = visual;
    }
}

/// Playback state of an [`Animation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Running,
    Paused,
    Finished,
}

/// How many frames a single [`Animation::update`] may advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdvanceMode {
    /// At most one frame per update; surplus time is dropped.
    #[default]
    SingleStep,
    /// As many frames as the accumulated time covers; surplus carries over.
    CatchUp,
}

/// Handle returned by [`Animation::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type BoxedListener = Box<dyn AnimationStateListener + Send + Sync>;

/// An ordered sequence of timed frames with a playback cursor.
pub struct Animation<V> {
    frames: Vec<AnimationFrame<V>>,
    current_frame_index: usize,
    elapsed_time: f32,
    repetition_enabled: bool,
    state: AnimationState,
    advance_mode: AdvanceMode,
    // cleared whenever playback restarts so the next running tick reports `Started`
    started: bool,
    listeners: Vec<(ListenerId, BoxedListener)>,
    next_listener_id: u64,
    transition_log: Option<SmallVec<[AnimationTransition; 4]>>,
}

impl<V> Default for Animation<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for Animation<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("frames", &self.frames.len())
            .field("current_frame_index", &self.current_frame_index)
            .field("elapsed_time", &self.elapsed_time)
            .field("repetition_enabled", &self.repetition_enabled)
            .field("state", &self.state)
            .field("advance_mode", &self.advance_mode)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<V> FromIterator<AnimationFrame<V>> for Animation<V> {
    fn from_iter<I: IntoIterator<Item = AnimationFrame<V>>>(iter: I) -> Self {
        let mut animation = Self::new();
        animation.frames.extend(iter);
        animation
    }
}

impl<V> Animation<V> {
    /// Create an empty, running, repeating animation.
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            current_frame_index: 0,
            elapsed_time: 0.0,
            repetition_enabled: true,
            state: AnimationState::Running,
            advance_mode: AdvanceMode::SingleStep,
            started: false,
            listeners: Vec::new(),
            next_listener_id: 0,
            transition_log: None,
        }
    }

    /// Create an empty animation with room for `capacity` frames.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut animation = Self::new();
        animation.frames.reserve(capacity);
        animation
    }

    pub fn with_repetition(mut self, enabled: bool) -> Self {
        self.repetition_enabled = enabled;
        self
    }

    pub fn with_advance_mode(mut self, mode: AdvanceMode) -> Self {
        self.advance_mode = mode;
        self
    }

    /// Record every transition so it can be collected with [`Self::drain_transitions`].
    pub fn with_transition_log(mut self) -> Self {
        self.transition_log = Some(SmallVec::new());
        self
    }

    /// Append a frame. Cursor and state are left alone.
    pub fn add_frame(&mut self, frame: AnimationFrame<V>) {
        self.frames.push(frame);
    }

    pub fn frames(&self) -> &[AnimationFrame<V>] {
        &self.frames
    }

    /// Mutable access to a frame, e.g. to retime it with [`AnimationFrame::set_delay`].
    pub fn frame_mut(&mut self, index: usize) -> Option<&mut AnimationFrame<V>> {
        self.frames.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn current_frame_index(&self) -> usize {
        self.current_frame_index
    }

    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn repetition_enabled(&self) -> bool {
        self.repetition_enabled
    }

    pub fn advance_mode(&self) -> AdvanceMode {
        self.advance_mode
    }

    pub fn set_advance_mode(&mut self, mode: AdvanceMode) {
        self.advance_mode = mode;
    }

    /// The frame under the cursor, without advancing time.
    pub fn current_frame(&self) -> Option<&AnimationFrame<V>> {
        self.frames.get(self.current_frame_index)
    }

    /// Advance playback by `delta` and return the frame to display.
    ///
    /// Time only accumulates while running with more than one frame; a
    /// single-frame animation never advances. Negative and non-finite
    /// deltas are ignored. Returns `None` for an empty animation regardless
    /// of state.
    pub fn update(&mut self, delta: f32) -> Option<&AnimationFrame<V>> {
        if self.state == AnimationState::Running && !self.frames.is_empty() {
            if !self.started {
                self.started = true;
                self.notify(AnimationTransition::Started);
            }
            if self.frames.len() > 1 {
                if delta.is_finite() && delta >= 0.0 {
                    self.elapsed_time = (self.elapsed_time + delta).min(f32::MAX);
                } else {
                    debug!("ignoring animation delta {}", delta);
                }
                match self.advance_mode {
                    AdvanceMode::SingleStep => {
                        self.step();
                    }
                    AdvanceMode::CatchUp => self.catch_up(),
                }
            }
        }
        self.current_frame()
    }

    /// Repeat [`Self::step`] until the accumulated time no longer covers the
    /// current frame.
    ///
    /// Whole cycles of a looping animation are folded out first and
    /// reported as a single `LoopFinished`, so the remaining steps never
    /// exceed one pass over the frames.
    fn catch_up(&mut self) {
        if self.repetition_enabled {
            let cycle: f32 = self.frames.iter().map(|frame| frame.delay).sum();
            if cycle > 0.0 && self.elapsed_time > cycle {
                self.elapsed_time %= cycle;
                self.notify(AnimationTransition::LoopFinished);
            }
        }
        for _ in 0..self.frames.len() {
            if !self.step() {
                break;
            }
        }
    }

    /// Move past the current frame if its delay has been exceeded.
    ///
    /// Returns `true` when the cursor advanced and another step may still
    /// fit in the remaining time.
    fn step(&mut self) -> bool {
        let delay = self.frames[self.current_frame_index].delay;
        // NaN never counts as past the delay
        if self.elapsed_time.partial_cmp(&delay) != Some(Ordering::Greater) {
            return false;
        }
        let may_continue = match self.advance_mode {
            AdvanceMode::SingleStep => {
                self.elapsed_time = 0.0;
                false
            }
            AdvanceMode::CatchUp => {
                self.elapsed_time -= delay;
                // a zero delay consumes no time, so stop here
                delay > 0.0
            }
        };

        self.current_frame_index += 1;
        if self.current_frame_index < self.frames.len() {
            self.notify(AnimationTransition::FrameChanged(self.current_frame_index));
            return may_continue;
        }

        if self.repetition_enabled {
            self.current_frame_index = 0;
            self.notify(AnimationTransition::LoopFinished);
            self.notify(AnimationTransition::FrameChanged(0));
            may_continue
        } else {
            self.current_frame_index = self.frames.len() - 1;
            self.elapsed_time = 0.0;
            self.state = AnimationState::Finished;
            self.notify(AnimationTransition::Finished);
            false
        }
    }

    /// Rewind to the first frame and resume playback. Frames and repetition are kept.
    pub fn reset(&mut self) {
        self.current_frame_index = 0;
        self.elapsed_time = 0.0;
        self.state = AnimationState::Running;
        self.started = false;
    }

    /// [`Self::reset`] and drop every frame.
    pub fn clear(&mut self) {
        self.reset();
        self.frames.clear();
    }

    /// Turn looping on or off.
    ///
    /// Enabling repetition on a finished animation restarts it from the
    /// first frame with a fresh accumulator.
    pub fn set_repetition_enabled(&mut self, enabled: bool) {
        self.repetition_enabled = enabled;
        if enabled && self.state == AnimationState::Finished {
            self.current_frame_index = 0;
            self.elapsed_time = 0.0;
            self.state = AnimationState::Running;
            self.started = false;
        }
    }

    pub fn pause(&mut self) {
        if self.state == AnimationState::Running {
            self.state = AnimationState::Paused;
            self.notify(AnimationTransition::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.state == AnimationState::Paused {
            self.state = AnimationState::Running;
            self.notify(AnimationTransition::Resumed);
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == AnimationState::Paused
    }

    pub fn is_finished(&self) -> bool {
        self.state == AnimationState::Finished
    }

    /// Subscribe a listener to every future transition.
    pub fn add_listener<L>(&mut self, listener: L) -> ListenerId
    where
        L: AnimationStateListener + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Detach a listener. Returns `false` if it was not subscribed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Take the transitions recorded since the last call.
    ///
    /// Always empty unless the animation was built [`Self::with_transition_log`].
    pub fn drain_transitions(&mut self) -> SmallVec<[AnimationTransition; 4]> {
        match self.transition_log.as_mut() {
            Some(log) => std::mem::take(log),
            None => SmallVec::new(),
        }
    }

    fn notify(&mut self, transition: AnimationTransition) {
        debug!("animation transition: {:?}", transition);
        for (_, listener) in self.listeners.iter_mut() {
            transition.notify(listener.as_mut());
        }
        if let Some(log) = self.transition_log.as_mut() {
            log.push(transition);
        }
    }
}

/// ECS component playing a sprite-sheet animation.
///
/// Built from an [`AnimationStore`](crate::resources::animationstore::AnimationStore)
/// definition; the transition log is always enabled so the animation system
/// can turn transitions into [`AnimationEvent`](crate::events::animation::AnimationEvent)s.
#[derive(Debug, Component)]
pub struct SpriteAnimation {
    pub animation_key: String,
    pub animation: Animation<TextureRegion>,
}

impl SpriteAnimation {
    pub fn new(animation_key: impl Into<String>, animation: Animation<TextureRegion>) -> Self {
        Self {
            animation_key: animation_key.into(),
            animation: animation.with_transition_log(),
        }
    }
}
