//! Flipbook headless demo.
//!
//! Plays a sprite-strip animation inside a bevy_ecs world without opening a
//! window, logging every playback transition. Useful for checking timing
//! settings from `animation.ini` before wiring them into a renderer.
//!
//! # Main Loop
//!
//! 1. Load [`AnimationConfig`] from the INI file and apply CLI overrides
//! 2. Register the demo strip in the [`AnimationStore`]
//! 3. Spawn a sprite entity with a [`SpriteAnimation`] and an event observer
//! 4. Tick the schedule a fixed number of times with a fixed delta
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --frames 6 --fps 12 --once
//! ```

use std::path::PathBuf;

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec2;

use flipbook::components::animation::{Animation, SpriteAnimation};
use flipbook::components::sprite::{Sprite, TextureRegion};
use flipbook::error::AnimationError;
use flipbook::events::animation::AnimationEvent;
use flipbook::resources::animationconfig::AnimationConfig;
use flipbook::resources::animationstore::{AnimationResource, AnimationStore};
use flipbook::resources::worldtime::WorldTime;
use flipbook::systems::animation::animation;
use flipbook::systems::animationconfig::apply_animation_config;
use flipbook::systems::time::update_world_time;

const DEMO_KEY: &str = "demo";
const DEMO_TEXTURE: &str = "demo_strip";
const DEMO_CELL: f32 = 32.0;

/// Flipbook headless animation player
#[derive(Parser)]
#[command(version, about = "Plays a sprite-strip animation headlessly and logs its transitions.")]
struct Cli {
    /// Configuration file (default: ./animation.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of frames in the strip.
    #[arg(long)]
    frames: Option<usize>,

    /// Playback speed in frames per second.
    #[arg(long)]
    fps: Option<f32>,

    /// Play the strip once and stop on the last frame.
    #[arg(long)]
    once: bool,

    /// Number of ticks to simulate.
    #[arg(long)]
    ticks: Option<u32>,

    /// Fixed delta in seconds fed to every tick.
    #[arg(long)]
    tick_seconds: Option<f32>,

    /// Advance several frames per tick when the delta covers them.
    #[arg(long)]
    catch_up: bool,
}

impl Cli {
    fn apply_to(&self, config: &mut AnimationConfig) {
        if let Some(frames) = self.frames {
            config.demo_frame_count = frames;
        }
        if let Some(fps) = self.fps {
            config.demo_fps = fps;
        }
        if self.once {
            config.demo_looped = false;
        }
        if let Some(ticks) = self.ticks {
            config.demo_ticks = ticks;
        }
        if let Some(seconds) = self.tick_seconds {
            config.demo_tick_seconds = seconds;
        }
        if self.catch_up {
            config.catch_up = true;
        }
    }
}

/// Register the demo strip described by `config` and instantiate it.
fn register_demo(
    config: &AnimationConfig,
    store: &mut AnimationStore,
) -> Result<Animation<TextureRegion>, AnimationError> {
    let definition = AnimationResource::strip(
        DEMO_TEXTURE,
        Vec2::splat(DEMO_CELL),
        config.demo_frame_count,
        config.demo_fps,
    )
    .with_looped(config.demo_looped);
    store.insert(DEMO_KEY, definition)?;
    store.instantiate(DEMO_KEY)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AnimationConfig::with_path(path),
        None => AnimationConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{}, using defaults", e);
    }
    cli.apply_to(&mut config);

    let mut store = AnimationStore::new();
    let demo = match register_demo(&config, &mut store) {
        Ok(animation) => animation,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let ticks = config.demo_ticks;
    let tick_seconds = config.demo_tick_seconds;

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
    world.insert_resource(config);
    world.insert_resource(store);

    world.add_observer(|trigger: On<AnimationEvent>, time: Res<WorldTime>| {
        let event = trigger.event();
        log::info!(
            "[frame {:>4} t={:>7.3}s] {:?}: {:?}",
            time.frame_count,
            time.elapsed,
            event.entity,
            event.transition
        );
    });

    world.spawn((
        Sprite::new(DEMO_TEXTURE, DEMO_CELL, DEMO_CELL),
        SpriteAnimation::new(DEMO_KEY, demo),
    ));

    let mut update = Schedule::default();
    update.add_systems(apply_animation_config);
    update.add_systems(animation.after(apply_animation_config));

    // --------------- Main loop ---------------
    for _ in 0..ticks {
        update_world_time(&mut world, tick_seconds);
        update.run(&mut world);
        world.clear_trackers();
    }

    let mut query = world.query::<(&SpriteAnimation, &Sprite)>();
    for (sprite_anim, sprite) in query.iter(&world) {
        log::info!(
            "'{}' stopped at frame {} ({:?}), sprite offset {}",
            sprite_anim.animation_key,
            sprite_anim.animation.current_frame_index(),
            sprite_anim.animation.state(),
            sprite.offset
        );
    }
}
