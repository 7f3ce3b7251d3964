//! Animation resource registry.
//!
//! This module provides a minimal store for animation definitions that can be
//! reused by multiple entities. Each definition describes a horizontal strip
//! of equally sized cells in a sprite sheet; [`AnimationStore::instantiate`]
//! turns it into a fresh [`Animation`] with its own cursor, so entities never
//! share playback state while sharing the frame regions themselves.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::warn;
use rustc_hash::FxHashMap;

use crate::components::animation::{Animation, AnimationFrame};
use crate::components::sprite::TextureRegion;
use crate::error::AnimationError;

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Default, Debug)]
pub struct AnimationStore {
    animations: FxHashMap<String, AnimationResource>,
}

/// Immutable data describing a sprite-sheet strip animation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationResource {
    /// Texture key the regions point into.
    pub tex_key: Arc<str>,
    /// Top-left corner of the first cell.
    pub position: Vec2,
    /// Distance between consecutive cells along the x axis.
    pub displacement: f32,
    /// Size of every cell.
    pub frame_size: Vec2,
    /// Number of frames in the animation.
    pub frame_count: usize,
    /// Frames per second playback speed.
    pub fps: f32,
    /// Whether the animation restarts after the last frame.
    pub looped: bool,
}

impl AnimationResource {
    /// Strip of `frame_count` cells laid side by side, starting at the origin.
    pub fn strip(tex_key: impl Into<Arc<str>>, frame_size: Vec2, frame_count: usize, fps: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            position: Vec2::ZERO,
            displacement: frame_size.x,
            frame_size,
            frame_count,
            fps,
            looped: true,
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    /// Source rectangle of cell `index`.
    pub fn frame_region(&self, index: usize) -> TextureRegion {
        TextureRegion {
            tex_key: Arc::clone(&self.tex_key),
            offset: Vec2::new(
                self.position.x + index as f32 * self.displacement,
                self.position.y,
            ),
            size: self.frame_size,
        }
    }

    /// Display time of each cell.
    pub fn frame_delay(&self) -> f32 {
        1.0 / self.fps
    }

    fn validate(&self, key: &str) -> Result<(), AnimationError> {
        let reason = if self.frame_count == 0 {
            "frame_count must be at least 1"
        } else if !(self.fps.is_finite() && self.fps > 0.0) {
            "fps must be a positive number"
        } else {
            return Ok(());
        };
        Err(AnimationError::InvalidDefinition {
            key: key.to_string(),
            reason: reason.to_string(),
        })
    }

    /// Build a new playable animation from this definition.
    pub fn build_animation(&self) -> Result<Animation<TextureRegion>, AnimationError> {
        let delay = self.frame_delay();
        let mut animation = Animation::with_capacity(self.frame_count).with_repetition(self.looped);
        for index in 0..self.frame_count {
            animation.add_frame(AnimationFrame::new(delay, self.frame_region(index))?);
        }
        Ok(animation)
    }
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any previous one under the same key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        resource: AnimationResource,
    ) -> Result<(), AnimationError> {
        let key = key.into();
        resource.validate(&key)?;
        self.animations.insert(key, resource);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&AnimationResource> {
        self.animations.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.animations.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<AnimationResource> {
        self.animations.remove(key)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Create a fresh animation for the definition stored under `key`.
    pub fn instantiate(&self, key: &str) -> Result<Animation<TextureRegion>, AnimationError> {
        match self.animations.get(key) {
            Some(resource) => resource.build_animation(),
            None => {
                warn!("Animation '{}' not found in AnimationStore", key);
                Err(AnimationError::UnknownAnimation(key.to_string()))
            }
        }
    }
}
