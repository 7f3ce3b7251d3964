//! Animation configuration change detection system.
//!
//! Monitors [`AnimationConfig`] for changes and applies the playback
//! settings to [`WorldTime`] and to every [`SpriteAnimation`].

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::SpriteAnimation;
use crate::resources::animationconfig::AnimationConfig;
use crate::resources::worldtime::WorldTime;

/// System that applies animation configuration changes.
///
/// When [`AnimationConfig`] is added or modified, the time scale is copied
/// into [`WorldTime`] and the advance mode into every animation. Animations
/// spawned later pick up the current advance mode on their first run.
pub fn apply_animation_config(
    maybe_config: Option<Res<AnimationConfig>>,
    mut time: ResMut<WorldTime>,
    mut query: Query<&mut SpriteAnimation>,
) {
    let Some(config) = maybe_config else {
        return;
    };

    let config_changed = config.is_changed();
    if config_changed && time.time_scale != config.time_scale {
        debug!("time scale {} -> {}", time.time_scale, config.time_scale);
        time.time_scale = config.time_scale;
    }

    let mode = config.advance_mode();
    for mut sprite_anim in query.iter_mut() {
        if (config_changed || sprite_anim.is_added()) && sprite_anim.animation.advance_mode() != mode
        {
            sprite_anim.animation.set_advance_mode(mode);
        }
    }
}
