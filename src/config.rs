//! Tuning constants for physics, obstacles, spawning and the bot.
//!
//! Every number the simulation depends on lives in [`Tuning`]. The defaults
//! are the canonical values; a JSON file may override any subset of them.

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::Level;
use crate::error::ConfigError;
use crate::geometry::Rect;

/// Logical size of the play field in pixels.
pub const WORLD_WIDTH: f32 = 500.0;
pub const WORLD_HEIGHT: f32 = 500.0;

// ── Ranges ────────────────────────────────────────────────────────────────────

/// Inclusive frame-count range. `min == max` means a fixed interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRange {
    pub min: u32,
    pub max: u32,
}

impl FrameRange {
    pub const fn fixed(frames: u32) -> Self {
        Self {
            min: frames,
            max: frames,
        }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> u32 {
        if self.min >= self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

/// Inclusive range of logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelRange {
    pub min: f32,
    pub max: f32,
}

impl PixelRange {
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        if self.min >= self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Added to `vy` every airborne frame.
    pub gravity: f32,
    /// Falling speed cap (px/frame).
    pub max_fall_speed: f32,
    /// `vy` right after a jump (negative is up).
    pub jump_velocity: f32,
    /// Penetration depth band `[min, max)` that counts as a contact.
    pub contact_min: f32,
    pub contact_max: f32,
    pub actor_size: f32,
    pub actor_start_x: f32,
    pub actor_start_y: f32,
    /// Added to the bot's start x when a human shares the field, so the
    /// two never spawn on the same cell.
    pub shared_bot_offset_x: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: 0.7,
            max_fall_speed: 10.0,
            jump_velocity: -10.0,
            contact_min: 1.0,
            contact_max: 15.0,
            actor_size: 20.0,
            actor_start_x: 250.0,
            actor_start_y: 250.0,
            shared_bot_offset_x: -30.0,
        }
    }
}

impl PhysicsTuning {
    pub fn in_contact_band(&self, depth: f32) -> bool {
        depth >= self.contact_min && depth < self.contact_max
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    /// Horizontal speed in px per millisecond.
    pub speed: f32,
    /// x where new obstacles appear.
    pub spawn_x: f32,
    pub spike_width: f32,
    pub spike_height: f32,
    pub spike_y: f32,
    pub platform_width: f32,
    pub platform_height: f32,
    pub platform_y: f32,
    /// The static floor every session starts with.
    pub ground: Rect,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            speed: 0.175,
            spawn_x: 500.0,
            spike_width: 20.0,
            spike_height: 20.0,
            spike_y: 290.0,
            platform_width: 50.0,
            platform_height: 10.0,
            platform_y: 250.0,
            ground: Rect::new(250.0, 400.0, 500.0, 200.0),
        }
    }
}

/// Spawn cadence for one difficulty level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnProfile {
    pub platform_delay: FrameRange,
    pub spike_delay: FrameRange,
    /// When set, each platform's center y is drawn from this range.
    #[serde(default)]
    pub platform_y: Option<PixelRange>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerTuning {
    pub initial_platform_delay: FrameRange,
    pub initial_spike_delay: FrameRange,
    pub easy: SpawnProfile,
    pub normal: SpawnProfile,
    pub hard: SpawnProfile,
}

impl Default for SpawnerTuning {
    fn default() -> Self {
        Self {
            initial_platform_delay: FrameRange::fixed(60),
            initial_spike_delay: FrameRange { min: 20, max: 60 },
            easy: SpawnProfile {
                platform_delay: FrameRange { min: 70, max: 90 },
                spike_delay: FrameRange { min: 70, max: 90 },
                platform_y: None,
            },
            normal: SpawnProfile {
                platform_delay: FrameRange { min: 60, max: 70 },
                spike_delay: FrameRange { min: 60, max: 70 },
                platform_y: None,
            },
            hard: SpawnProfile {
                platform_delay: FrameRange { min: 40, max: 55 },
                spike_delay: FrameRange { min: 40, max: 55 },
                platform_y: Some(PixelRange {
                    min: 235.0,
                    max: 265.0,
                }),
            },
        }
    }
}

impl SpawnerTuning {
    pub fn profile(&self, level: Level) -> &SpawnProfile {
        match level {
            Level::Easy => &self.easy,
            Level::Normal => &self.normal,
            Level::Hard => &self.hard,
        }
    }
}

/// Probe above and ahead of the actor used to spot overhead platforms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbeTuning {
    /// Probe center relative to the actor's center x.
    pub offset_x: f32,
    pub width: f32,
    /// Extends upward from the actor's top edge.
    pub height: f32,
}

/// Distance thresholds of the bot (px). See `heuristic` for the
/// `gap`/`behind` conventions they are measured with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicTuning {
    /// `d1` at or above this treats the first obstacle on its own.
    pub cluster_gap: f32,
    pub spaced_spike_trigger: f32,
    pub spaced_platform_pass: f32,
    /// Splits clustered pairs. Above it a spike-first pair jumps late and a
    /// platform-first pair is walked under; at or below it both jump early.
    pub late_jump_gap: f32,
    pub late_trigger: f32,
    pub early_trigger: f32,
    /// Platform-first and overlapping pairs.
    pub clustered_platform_trigger: f32,
    pub single_spike_trigger: f32,
    pub single_platform_pass: f32,
    /// A clustered jump consumes the second obstacle only when that
    /// obstacle's far edge is closer than this to the actor's leading edge.
    pub jump_reach: f32,
    /// Queue entries further than this behind the actor are dropped.
    pub queue_cull_margin: f32,
    pub overhead_probe: ProbeTuning,
    /// Frames simulated ahead to veto a fatal table decision. 0 disables it.
    pub lookahead_frames: u32,
}

impl Default for HeuristicTuning {
    fn default() -> Self {
        Self {
            cluster_gap: 75.0,
            spaced_spike_trigger: 100.0,
            spaced_platform_pass: -15.0,
            late_jump_gap: 28.0,
            late_trigger: 16.0,
            early_trigger: 36.0,
            clustered_platform_trigger: 90.0,
            single_spike_trigger: 100.0,
            single_platform_pass: -25.0,
            jump_reach: 210.0,
            queue_cull_margin: 25.0,
            overhead_probe: ProbeTuning {
                offset_x: 20.0,
                width: 26.0,
                height: 60.0,
            },
            lookahead_frames: 40,
        }
    }
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Target frame period in milliseconds (≈30 Hz).
    pub frame_ms: u64,
    pub physics: PhysicsTuning,
    pub obstacles: ObstacleTuning,
    pub spawner: SpawnerTuning,
    pub heuristic: HeuristicTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            frame_ms: 33,
            physics: PhysicsTuning::default(),
            obstacles: ObstacleTuning::default(),
            spawner: SpawnerTuning::default(),
            heuristic: HeuristicTuning::default(),
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_ms == 0 {
            return Err(ConfigError::invalid("frame_ms", "must be positive"));
        }

        let p = &self.physics;
        if p.gravity <= 0.0 {
            return Err(ConfigError::invalid("physics.gravity", "must be positive"));
        }
        if p.max_fall_speed <= 0.0 {
            return Err(ConfigError::invalid(
                "physics.max_fall_speed",
                "must be positive",
            ));
        }
        if p.jump_velocity >= 0.0 {
            return Err(ConfigError::invalid(
                "physics.jump_velocity",
                "must be negative (upward)",
            ));
        }
        if p.contact_min >= p.contact_max {
            return Err(ConfigError::invalid(
                "physics.contact_min",
                format!("{} is not below contact_max {}", p.contact_min, p.contact_max),
            ));
        }
        positive("physics.actor_size", p.actor_size)?;

        let o = &self.obstacles;
        positive("obstacles.speed", o.speed)?;
        positive("obstacles.spike_width", o.spike_width)?;
        positive("obstacles.spike_height", o.spike_height)?;
        positive("obstacles.platform_width", o.platform_width)?;
        positive("obstacles.platform_height", o.platform_height)?;
        positive("obstacles.ground.width", o.ground.width)?;
        positive("obstacles.ground.height", o.ground.height)?;

        let s = &self.spawner;
        frames("spawner.initial_platform_delay", &s.initial_platform_delay)?;
        frames("spawner.initial_spike_delay", &s.initial_spike_delay)?;
        for (name, profile) in [
            ("spawner.easy", &s.easy),
            ("spawner.normal", &s.normal),
            ("spawner.hard", &s.hard),
        ] {
            frames(name, &profile.platform_delay)?;
            frames(name, &profile.spike_delay)?;
            if let Some(range) = &profile.platform_y {
                if range.min > range.max {
                    return Err(ConfigError::invalid(
                        "spawner.platform_y",
                        format!("{name}: min {} exceeds max {}", range.min, range.max),
                    ));
                }
            }
        }

        positive("heuristic.jump_reach", self.heuristic.jump_reach)?;
        let probe = &self.heuristic.overhead_probe;
        positive("heuristic.overhead_probe.width", probe.width)?;
        positive("heuristic.overhead_probe.height", probe.height)?;

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be positive")))
    }
}

fn frames(field: &'static str, range: &FrameRange) -> Result<(), ConfigError> {
    if range.min == 0 {
        return Err(ConfigError::invalid(field, "delays start at 1 frame"));
    }
    if range.min > range.max {
        return Err(ConfigError::invalid(
            field,
            format!("min {} exceeds max {}", range.min, range.max),
        ));
    }
    Ok(())
}

/// Read, parse and validate a JSON tuning file. Missing keys keep their
/// defaults.
pub fn load_tuning(path: &Path) -> Result<Tuning, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tuning: Tuning = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tuning.validate()?;
    log::info!("Loaded tuning from {}", path.display());
    Ok(tuning)
}
