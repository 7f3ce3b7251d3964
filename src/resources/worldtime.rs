use bevy_ecs::prelude::Resource;

/// Simulation clock shared by all systems.
///
/// `delta` is the scaled duration of the current tick in seconds and is
/// what [`animation`](crate::systems::animation::animation) feeds into
/// every [`SpriteAnimation`](crate::components::animation::SpriteAnimation).
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
