//! Countdown timers that emit spikes and platforms.

use rand::Rng;

use crate::config::{ObstacleTuning, SpawnProfile, SpawnerTuning};
use crate::entities::{Level, Obstacle, ObstacleId, ObstacleKind};
use crate::geometry::Rect;

#[derive(Clone, Debug, PartialEq)]
pub struct Spawner {
    /// Frames until the next platform.
    pub platform_timer: u32,
    /// Frames until the next spike.
    pub spike_timer: u32,
    pub profile: SpawnProfile,
    pub obstacles: ObstacleTuning,
}

impl Spawner {
    /// Timers start from the tuning's initial delays.
    pub fn new(
        level: Level,
        tuning: &SpawnerTuning,
        obstacles: &ObstacleTuning,
        rng: &mut impl Rng,
    ) -> Self {
        Self::with_timers(
            tuning.initial_platform_delay.sample(rng),
            tuning.initial_spike_delay.sample(rng),
            tuning.profile(level).clone(),
            obstacles.clone(),
        )
    }

    pub fn with_timers(
        platform_timer: u32,
        spike_timer: u32,
        profile: SpawnProfile,
        obstacles: ObstacleTuning,
    ) -> Self {
        Self {
            platform_timer,
            spike_timer,
            profile,
            obstacles,
        }
    }

    /// Advance both timers by one frame and return whatever expired,
    /// platform first. `next_id` is bumped once per obstacle.
    pub fn tick(&mut self, rng: &mut impl Rng, next_id: &mut ObstacleId) -> Vec<Obstacle> {
        let mut spawned = Vec::new();

        self.platform_timer = self.platform_timer.saturating_sub(1);
        self.spike_timer = self.spike_timer.saturating_sub(1);

        if self.platform_timer == 0 {
            let y = match &self.profile.platform_y {
                Some(range) => range.sample(rng),
                None => self.obstacles.platform_y,
            };
            spawned.push(self.build(
                ObstacleKind::Platform,
                y,
                self.obstacles.platform_width,
                self.obstacles.platform_height,
                next_id,
            ));
            self.platform_timer = self.profile.platform_delay.sample(rng);
        }

        if self.spike_timer == 0 {
            spawned.push(self.build(
                ObstacleKind::Spike,
                self.obstacles.spike_y,
                self.obstacles.spike_width,
                self.obstacles.spike_height,
                next_id,
            ));
            self.spike_timer = self.profile.spike_delay.sample(rng);
        }

        for obstacle in &spawned {
            log::trace!(
                "spawned {:?} #{} at ({:.0}, {:.0})",
                obstacle.kind,
                obstacle.id,
                obstacle.rect.x,
                obstacle.rect.y
            );
        }
        spawned
    }

    fn build(
        &self,
        kind: ObstacleKind,
        y: f32,
        width: f32,
        height: f32,
        next_id: &mut ObstacleId,
    ) -> Obstacle {
        let id = *next_id;
        *next_id += 1;
        Obstacle {
            id,
            kind,
            rect: Rect::new(self.obstacles.spawn_x, y, width, height),
            speed: self.obstacles.speed,
            scrolls: true,
        }
    }
}
