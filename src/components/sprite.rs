use std::sync::Arc;

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// A rectangle inside a texture, used as the visual of a sprite animation frame.
///
/// `offset` is the top-left corner in texture pixels and `size` the
/// rectangle's extent. The texture itself lives in whatever store the
/// renderer uses; only its key is kept here.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRegion {
    pub tex_key: Arc<str>,
    pub offset: Vec2,
    pub size: Vec2,
}

impl TextureRegion {
    pub fn new(tex_key: impl Into<Arc<str>>, offset: Vec2, size: Vec2) -> Self {
        Self {
            tex_key: tex_key.into(),
            offset,
            size,
        }
    }
}

/// Sprite is identified by a texture key and its size in world units.
///
/// `offset` and `source_size` select the rectangle of the texture to draw,
/// which for a spritesheet is the current animation frame. The world size
/// is independent of the source rectangle and is never touched by playback.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
    pub offset: Vec2,
    pub source_size: Vec2,
}

impl Sprite {
    /// Create a sprite showing the top-left `width` x `height` of the texture.
    pub fn new(tex_key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            width,
            height,
            offset: Vec2::ZERO,
            source_size: Vec2::new(width, height),
        }
    }

    /// Point the sprite at `region`, switching texture when the key differs.
    pub fn show_region(&mut self, region: &TextureRegion) {
        if self.tex_key.as_str() != &*region.tex_key {
            self.tex_key = region.tex_key.to_string();
        }
        self.offset = region.offset;
        self.source_size = region.size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_region_moves_offset_and_size() {
        let mut sprite = Sprite::new("hero", 16.0, 16.0);
        let region = TextureRegion::new("hero", Vec2::new(32.0, 0.0), Vec2::new(16.0, 24.0));
        sprite.show_region(&region);
        assert_eq!(sprite.offset, Vec2::new(32.0, 0.0));
        assert_eq!(sprite.source_size, Vec2::new(16.0, 24.0));
        assert_eq!(sprite.tex_key, "hero");
    }

    #[test]
    fn test_show_region_keeps_world_size() {
        let mut sprite = Sprite::new("hero", 64.0, 64.0);
        let region = TextureRegion::new("hero", Vec2::new(16.0, 0.0), Vec2::splat(16.0));
        sprite.show_region(&region);
        assert_eq!((sprite.width, sprite.height), (64.0, 64.0));
        assert_eq!(sprite.source_size, Vec2::splat(16.0));
    }

    #[test]
    fn test_show_region_switches_texture() {
        let mut sprite = Sprite::new("hero_idle", 16.0, 16.0);
        let region = TextureRegion::new("hero_run", Vec2::ZERO, Vec2::splat(16.0));
        sprite.show_region(&region);
        assert_eq!(sprite.tex_key, "hero_run");
    }
}
