//! All game entity types. Pure data, no game rules.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::spawner::Spawner;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Easy,
    Normal,
    Hard,
}

/// Who plays a session. Fixed from session start to game over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    BotOnly,
    HumanOnly,
    Both,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::BotOnly, Mode::HumanOnly, Mode::Both];

    /// Menu selector value (0, 1, 2).
    pub fn index(self) -> usize {
        match self {
            Mode::BotOnly => 0,
            Mode::HumanOnly => 1,
            Mode::Both => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::BotOnly => "AI Only",
            Mode::HumanOnly => "Player Only",
            Mode::Both => "AI and Player",
        }
    }

    pub fn has_bot(self) -> bool {
        matches!(self, Mode::BotOnly | Mode::Both)
    }

    pub fn has_human(self) -> bool {
        matches!(self, Mode::HumanOnly | Mode::Both)
    }
}

/// A mode selector that names no mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidMode {
    /// Numeric selector outside `0..=2`.
    OutOfRange(usize),
    /// Neither a mode name nor a number.
    Unknown(String),
}

impl fmt::Display for InvalidMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(index) => write!(f, "mode selector {index} is not one of 0, 1, 2"),
            Self::Unknown(raw) => {
                write!(f, "unknown mode `{raw}` (expected bot, human, both or 0, 1, 2)")
            }
        }
    }
}

impl std::error::Error for InvalidMode {}

impl TryFrom<usize> for Mode {
    type Error = InvalidMode;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Mode::ALL
            .get(index)
            .copied()
            .ok_or(InvalidMode::OutOfRange(index))
    }
}

/// Accepts `bot`, `human`, `both` (any case) or the menu selector `0..=2`.
impl FromStr for Mode {
    type Err = InvalidMode;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "bot" => Ok(Mode::BotOnly),
            "human" => Ok(Mode::HumanOnly),
            "both" => Ok(Mode::Both),
            other => other
                .parse::<usize>()
                .map_err(|_| InvalidMode::Unknown(raw.to_string()))
                .and_then(Mode::try_from),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Actors ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Human,
    Bot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub rect: Rect,
    /// Vertical velocity in px/frame. Horizontal velocity is always zero.
    pub vy: f32,
    pub grounded: bool,
    pub dead: bool,
    pub role: Role,
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

pub type ObstacleId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Spike,
    Platform,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub kind: ObstacleKind,
    pub rect: Rect,
    /// Leftward speed in px per millisecond.
    pub speed: f32,
    /// `false` only for the static ground platform.
    pub scrolls: bool,
}

impl Obstacle {
    pub fn is_ground(&self) -> bool {
        self.kind == ObstacleKind::Platform && !self.scrolls
    }
}

/// Obstacles the bot has not acted on yet, oldest first.
///
/// Only the spawner side appends; only the bot and the cull step remove.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IncomingQueue {
    ids: VecDeque<ObstacleId>,
}

impl IncomingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` unless it is already queued.
    pub fn push(&mut self, id: ObstacleId) {
        if !self.ids.contains(&id) {
            self.ids.push_back(id);
        }
    }

    pub fn pop_front(&mut self) -> Option<ObstacleId> {
        self.ids.pop_front()
    }

    pub fn front(&self) -> Option<ObstacleId> {
        self.ids.front().copied()
    }

    pub fn get(&self, index: usize) -> Option<ObstacleId> {
        self.ids.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Keeps only the ids for which `keep` returns true, preserving order.
    pub fn retain(&mut self, keep: impl FnMut(&ObstacleId) -> bool) {
        self.ids.retain(keep);
    }

    pub fn iter(&self) -> impl Iterator<Item = ObstacleId> + '_ {
        self.ids.iter().copied()
    }
}

// ── Rendering view ────────────────────────────────────────────────────────────

/// Everything the renderer draws during play, as one tagged union.
#[derive(Clone, Debug, PartialEq)]
pub enum Sprite {
    Actor { rect: Rect, role: Role, dead: bool },
    Spike { rect: Rect },
    Platform { rect: Rect, ground: bool },
}

// ── Master session state ──────────────────────────────────────────────────────

/// One play session, from the menu's "Start Game" to game over.
/// Cloneable so `compute::tick` can return a fresh copy.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub mode: Mode,
    pub level: Level,
    pub status: GameStatus,
    pub human: Option<Actor>,
    pub bot: Option<Actor>,
    /// Ground first, then scrolling obstacles in spawn order.
    pub obstacles: Vec<Obstacle>,
    pub incoming: IncomingQueue,
    pub spawner: Spawner,
    /// Frames the human has survived (stays 0 in bot-only sessions).
    pub score: u32,
    pub frame: u64,
    pub next_id: ObstacleId,
    /// Obstacles that scrolled off screen.
    pub cleared: u32,
}

impl GameSession {
    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }
}
