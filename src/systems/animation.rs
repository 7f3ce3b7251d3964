//! Animation systems.
//!
//! - [`animation`] advances every [`SpriteAnimation`] by the world delta,
//!   points the entity's [`Sprite`] at the current frame's region and
//!   triggers an [`AnimationEvent`] per transition.
//! - [`pause_animation`], [`resume_animation`] and [`restart_animation`] are
//!   one-shot transport systems meant to be registered with
//!   `World::register_system` and run with the target entity.
//!
//! # Animation Flow
//!
//! 1. Strip definitions live in [`AnimationStore`](crate::resources::animationstore::AnimationStore)
//! 2. Entities get a [`SpriteAnimation`] instantiated from a store key
//! 3. The `animation` system advances playback using [`WorldTime`]
//! 4. Observers of [`AnimationEvent`] react to frame changes, loops and endings
//!
//! Transitions caused by transport systems are recorded on the component and
//! surface as events on the next `animation` run.

use bevy_ecs::prelude::*;
use log::warn;

use crate::components::animation::SpriteAnimation;
use crate::components::sprite::Sprite;
use crate::events::animation::AnimationEvent;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback and update the sprite frame.
///
/// Contract
/// - Reads [`WorldTime`] for the scaled delta.
/// - Mutates [`SpriteAnimation`] playback state and, when present, the
///   [`Sprite`] texture key, offset and size.
/// - Triggers one [`AnimationEvent`] per recorded transition, in order.
pub fn animation(
    mut query: Query<(Entity, &mut SpriteAnimation, Option<&mut Sprite>)>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut sprite_anim, maybe_sprite) in query.iter_mut() {
        let region = sprite_anim
            .animation
            .update(time.delta)
            .map(|frame| frame.visual().clone());

        if let (Some(region), Some(mut sprite)) = (region, maybe_sprite) {
            sprite.show_region(&region);
        }

        for transition in sprite_anim.animation.drain_transitions() {
            commands.trigger(AnimationEvent { entity, transition });
        }
    }
}

/// Pause the animation on `entity`.
pub fn pause_animation(In(entity): In<Entity>, mut query: Query<&mut SpriteAnimation>) {
    match query.get_mut(entity) {
        Ok(mut sprite_anim) => sprite_anim.animation.pause(),
        Err(_) => warn!("pause_animation: {:?} has no SpriteAnimation", entity),
    }
}

/// Resume the animation on `entity`.
pub fn resume_animation(In(entity): In<Entity>, mut query: Query<&mut SpriteAnimation>) {
    match query.get_mut(entity) {
        Ok(mut sprite_anim) => sprite_anim.animation.resume(),
        Err(_) => warn!("resume_animation: {:?} has no SpriteAnimation", entity),
    }
}

/// Rewind the animation on `entity` to its first frame and play it again.
pub fn restart_animation(In(entity): In<Entity>, mut query: Query<&mut SpriteAnimation>) {
    match query.get_mut(entity) {
        Ok(mut sprite_anim) => sprite_anim.animation.reset(),
        Err(_) => warn!("restart_animation: {:?} has no SpriteAnimation", entity),
    }
}
