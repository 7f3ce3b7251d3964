//! Engine tick integration tests for the animation systems.

use std::sync::{Arc, Mutex};

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;

use flipbook::components::animation::{AdvanceMode, SpriteAnimation};
use flipbook::components::sprite::Sprite;
use flipbook::events::animation::{AnimationEvent, AnimationTransition};
use flipbook::resources::animationconfig::AnimationConfig;
use flipbook::resources::animationstore::{AnimationResource, AnimationStore};
use flipbook::resources::worldtime::WorldTime;
use flipbook::systems::animation::{
    animation, pause_animation, restart_animation, resume_animation,
};
use flipbook::systems::animationconfig::apply_animation_config;
use flipbook::systems::time::update_world_time;

const CELL: f32 = 16.0;

fn store_with(key: &str, frame_count: usize, looped: bool) -> AnimationStore {
    let mut store = AnimationStore::new();
    store
        .insert(
            key,
            AnimationResource::strip("hero", Vec2::splat(CELL), frame_count, 10.0)
                .with_looped(looped),
        )
        .unwrap();
    store
}

fn make_world(store: AnimationStore) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(store);
    world
}

fn spawn_animated(world: &mut World, key: &str) -> Entity {
    let anim = world.resource::<AnimationStore>().instantiate(key).unwrap();
    world
        .spawn((Sprite::new("hero", CELL, CELL), SpriteAnimation::new(key, anim)))
        .id()
}

fn record_events(world: &mut World) -> Arc<Mutex<Vec<AnimationEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    world.add_observer(move |trigger: On<AnimationEvent>| {
        sink.lock().unwrap().push(*trigger.event());
    });
    events
}

fn tick(world: &mut World, dt: f32) {
    update_world_time(world, dt);
    let mut schedule = Schedule::default();
    schedule.add_systems(animation);
    schedule.run(world);
}

fn transitions(events: &Arc<Mutex<Vec<AnimationEvent>>>) -> Vec<AnimationTransition> {
    std::mem::take(&mut *events.lock().unwrap())
        .into_iter()
        .map(|e| e.transition)
        .collect()
}

#[test]
fn animation_moves_sprite_along_strip() {
    let mut world = make_world(store_with("walk", 4, true));
    let entity = spawn_animated(&mut world, "walk");

    tick(&mut world, 0.05);
    assert_eq!(world.get::<Sprite>(entity).unwrap().offset, Vec2::ZERO);

    tick(&mut world, 0.1);
    assert_eq!(
        world.get::<Sprite>(entity).unwrap().offset,
        Vec2::new(CELL, 0.0)
    );

    tick(&mut world, 0.15);
    let sprite_anim = world.get::<SpriteAnimation>(entity).unwrap();
    assert_eq!(sprite_anim.animation.current_frame_index(), 2);
    assert_eq!(
        world.get::<Sprite>(entity).unwrap().offset,
        Vec2::new(2.0 * CELL, 0.0)
    );
}

#[test]
fn one_shot_emits_events_in_order() {
    let mut world = make_world(store_with("die", 2, false));
    let entity = spawn_animated(&mut world, "die");
    let events = record_events(&mut world);

    tick(&mut world, 0.15);
    tick(&mut world, 0.15);
    tick(&mut world, 0.15);

    let recorded = events.lock().unwrap().clone();
    assert!(recorded.iter().all(|e| e.entity == entity));
    assert_eq!(
        transitions(&events),
        vec![
            AnimationTransition::Started,
            AnimationTransition::FrameChanged(1),
            AnimationTransition::Finished,
        ]
    );
    let sprite_anim = world.get::<SpriteAnimation>(entity).unwrap();
    assert!(sprite_anim.animation.is_finished());
    assert_eq!(
        world.get::<Sprite>(entity).unwrap().offset,
        Vec2::new(CELL, 0.0)
    );
}

#[test]
fn looping_strip_emits_loop_events() {
    let mut world = make_world(store_with("idle", 2, true));
    spawn_animated(&mut world, "idle");
    let events = record_events(&mut world);

    tick(&mut world, 0.15);
    tick(&mut world, 0.15);

    assert_eq!(
        transitions(&events),
        vec![
            AnimationTransition::Started,
            AnimationTransition::FrameChanged(1),
            AnimationTransition::LoopFinished,
            AnimationTransition::FrameChanged(0),
        ]
    );
}

#[test]
fn transport_systems_pause_and_resume() {
    let mut world = make_world(store_with("walk", 4, true));
    let entity = spawn_animated(&mut world, "walk");
    let events = record_events(&mut world);
    let pause = world.register_system(pause_animation);
    let resume = world.register_system(resume_animation);

    tick(&mut world, 0.05);
    world.run_system_with(pause, entity).unwrap();
    for _ in 0..5 {
        tick(&mut world, 0.5);
    }
    {
        let sprite_anim = world.get::<SpriteAnimation>(entity).unwrap();
        assert!(sprite_anim.animation.is_paused());
        assert_eq!(sprite_anim.animation.current_frame_index(), 0);
    }

    world.run_system_with(resume, entity).unwrap();
    tick(&mut world, 0.06);

    assert_eq!(
        transitions(&events),
        vec![
            AnimationTransition::Started,
            AnimationTransition::Paused,
            AnimationTransition::Resumed,
            AnimationTransition::FrameChanged(1),
        ]
    );
}

#[test]
fn restart_system_rewinds_finished_animation() {
    let mut world = make_world(store_with("die", 2, false));
    let entity = spawn_animated(&mut world, "die");
    let restart = world.register_system(restart_animation);

    tick(&mut world, 0.15);
    tick(&mut world, 0.15);
    assert!(
        world
            .get::<SpriteAnimation>(entity)
            .unwrap()
            .animation
            .is_finished()
    );

    world.run_system_with(restart, entity).unwrap();
    let sprite_anim = world.get::<SpriteAnimation>(entity).unwrap();
    assert!(sprite_anim.animation.is_running());
    assert_eq!(sprite_anim.animation.current_frame_index(), 0);
}

#[test]
fn transport_on_entity_without_animation_is_harmless() {
    let mut world = make_world(AnimationStore::new());
    let entity = world.spawn(Sprite::new("hero", CELL, CELL)).id();
    let pause = world.register_system(pause_animation);
    world.run_system_with(pause, entity).unwrap();
    assert!(world.get::<SpriteAnimation>(entity).is_none());
}

#[test]
fn animation_without_sprite_still_advances() {
    let mut world = make_world(store_with("walk", 3, true));
    let anim = world
        .resource::<AnimationStore>()
        .instantiate("walk")
        .unwrap();
    let entity = world.spawn(SpriteAnimation::new("walk", anim)).id();

    tick(&mut world, 0.15);
    let sprite_anim = world.get::<SpriteAnimation>(entity).unwrap();
    assert_eq!(sprite_anim.animation.current_frame_index(), 1);
}

#[test]
fn config_applies_time_scale_and_catch_up() {
    let mut world = make_world(store_with("walk", 4, true));
    let mut config = AnimationConfig::new();
    config.time_scale = 2.0;
    config.catch_up = true;
    world.insert_resource(config);
    let entity = spawn_animated(&mut world, "walk");

    let mut schedule = Schedule::default();
    schedule.add_systems(apply_animation_config);
    schedule.add_systems(animation.after(apply_animation_config));

    // first run copies the scale; the scaled delta of the next tick covers two frames
    update_world_time(&mut world, 0.0);
    schedule.run(&mut world);
    assert_eq!(world.resource::<WorldTime>().time_scale, 2.0);

    update_world_time(&mut world, 0.125);
    schedule.run(&mut world);

    let sprite_anim = world.get::<SpriteAnimation>(entity).unwrap();
    assert_eq!(sprite_anim.animation.advance_mode(), AdvanceMode::CatchUp);
    assert_eq!(sprite_anim.animation.current_frame_index(), 2);
}

#[test]
fn config_reaches_animations_spawned_later() {
    let mut world = make_world(store_with("walk", 4, true));
    let mut config = AnimationConfig::new();
    config.catch_up = true;
    world.insert_resource(config);

    let mut schedule = Schedule::default();
    schedule.add_systems(apply_animation_config);
    schedule.run(&mut world);

    let entity = spawn_animated(&mut world, "walk");
    schedule.run(&mut world);

    let sprite_anim = world.get::<SpriteAnimation>(entity).unwrap();
    assert_eq!(sprite_anim.animation.advance_mode(), AdvanceMode::CatchUp);
}
