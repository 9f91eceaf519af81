//! Session-level game logic.
//!
//! Every public function takes an immutable reference to the current
//! [`GameSession`] (and, where needed, an RNG handle) and returns a fresh
//! `GameSession`. Side effects are limited to the injected RNG and logging.

use rand::Rng;

use crate::config::Tuning;
use crate::entities::{
    Actor, GameSession, GameStatus, IncomingQueue, Level, Mode, Obstacle, ObstacleKind, Role,
    Sprite,
};
use crate::heuristic;
use crate::physics::{advance_obstacle, is_off_screen, spawn_actor, touches_spike, update_actor};
use crate::spawner::Spawner;

/// Id of the static ground platform; spawned obstacles count up from 1.
pub const GROUND_ID: u64 = 0;

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn init_session(mode: Mode, level: Level, tuning: &Tuning, rng: &mut impl Rng) -> GameSession {
    let ground = Obstacle {
        id: GROUND_ID,
        kind: ObstacleKind::Platform,
        rect: tuning.obstacles.ground,
        speed: 0.0,
        scrolls: false,
    };

    log::info!("Starting {:?} session on {:?}", mode, level);

    GameSession {
        mode,
        level,
        status: GameStatus::Playing,
        human: mode
            .has_human()
            .then(|| spawn_actor(Role::Human, &tuning.physics)),
        bot: mode.has_bot().then(|| spawn_bot(mode, tuning)),
        obstacles: vec![ground],
        incoming: IncomingQueue::new(),
        spawner: Spawner::new(level, &tuning.spawner, &tuning.obstacles, rng),
        score: 0,
        frame: 0,
        next_id: GROUND_ID + 1,
        cleared: 0,
    }
}

fn spawn_bot(mode: Mode, tuning: &Tuning) -> Actor {
    let bot = spawn_actor(Role::Bot, &tuning.physics);
    if !mode.has_human() {
        return bot;
    }
    Actor {
        rect: bot.rect.translate(tuning.physics.shared_bot_offset_x, 0.0),
        ..bot
    }
}

// ── Per-frame tick (nearly pure; RNG is injected) ───────────────────────────

/// Advance the session by one frame. `dt_ms` is the measured time since the
/// previous frame and only scales obstacle motion; actors move per frame.
/// `human_jump` is ignored when no human plays.
pub fn tick(
    state: &GameSession,
    human_jump: bool,
    dt_ms: f32,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> GameSession {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Spawn ─────────────────────────────────────────────────────────────
    for obstacle in next.spawner.tick(rng, &mut next.next_id) {
        next.incoming.push(obstacle.id);
        next.obstacles.push(obstacle);
    }

    // ── 2. Scroll ────────────────────────────────────────────────────────────
    next.obstacles = next
        .obstacles
        .iter()
        .map(|o| advance_obstacle(o, dt_ms))
        .collect();

    // ── 3. Cull off-screen and long-passed obstacles ─────────────────────────
    let before = next.obstacles.len();
    next.obstacles.retain(|o| !is_off_screen(o));
    next.cleared += (before - next.obstacles.len()) as u32;

    if let Some(reference) = next.bot.as_ref().or(next.human.as_ref()).map(|a| a.rect) {
        let margin = tuning.heuristic.queue_cull_margin;
        let obstacles = &next.obstacles;
        next.incoming.retain(|id| {
            obstacles
                .iter()
                .find(|o| o.id == *id)
                .is_some_and(|o| heuristic::behind(&reference, &o.rect) <= margin)
        });
    }

    // ── 4. Bot decision ──────────────────────────────────────────────────────
    let bot_jump = match &next.bot {
        Some(bot) if !bot.dead => {
            heuristic::decide(bot, &next.obstacles, &mut next.incoming, tuning)
        }
        _ => false,
    };

    // ── 5. Actor physics ─────────────────────────────────────────────────────
    next.bot = next
        .bot
        .as_ref()
        .map(|bot| update_actor(bot, bot_jump, &next.obstacles, &tuning.physics));
    next.human = next
        .human
        .as_ref()
        .map(|human| update_actor(human, human_jump, &next.obstacles, &tuning.physics));
    for (before, after) in [(&state.bot, &next.bot), (&state.human, &next.human)] {
        if let (Some(before), Some(after)) = (before, after) {
            if after.dead && !before.dead {
                log::info!("{:?} actor hit a platform edge", after.role);
            }
        }
    }

    // ── 6. Spike contact ─────────────────────────────────────────────────────
    next.bot = next.bot.as_ref().map(|a| check_spikes(a, &next.obstacles));
    next.human = next.human.as_ref().map(|a| check_spikes(a, &next.obstacles));

    // ── 7. Score & status ────────────────────────────────────────────────────
    let human_alive = next.human.as_ref().is_some_and(|h| !h.dead);
    if next.mode.has_human() && human_alive {
        next.score += 1;
    }

    let over = match next.mode {
        Mode::HumanOnly | Mode::Both => !human_alive,
        Mode::BotOnly => next.bot.as_ref().map_or(true, |b| b.dead),
    };
    if over {
        log::info!(
            "Game over after {} frames (score {}, {} obstacles cleared)",
            next.frame,
            next.score,
            next.cleared
        );
        next.status = GameStatus::GameOver;
    }

    next
}

fn check_spikes(actor: &Actor, obstacles: &[Obstacle]) -> Actor {
    if actor.dead {
        return actor.clone();
    }
    let hit = touches_spike(&actor.rect, obstacles);
    if hit {
        log::info!("{:?} actor ran into a spike", actor.role);
    }
    Actor {
        dead: hit,
        ..actor.clone()
    }
}

// ── Headless play ────────────────────────────────────────────────────────────

/// Run a bot-only session at the nominal frame period until the bot dies or
/// `max_frames` elapse. Used for tuning the heuristic without a terminal.
pub fn run_bot_session(
    level: Level,
    tuning: &Tuning,
    rng: &mut impl Rng,
    max_frames: u64,
) -> GameSession {
    let dt_ms = tuning.frame_ms as f32;
    let mut state = init_session(Mode::BotOnly, level, tuning, rng);
    while state.status == GameStatus::Playing && state.frame < max_frames {
        state = tick(&state, false, dt_ms, tuning, rng);
    }
    state
}

// ── Rendering view ───────────────────────────────────────────────────────────

/// Drawing order: ground, scrolling obstacles in spawn order, bot, human.
pub fn sprites(state: &GameSession) -> Vec<Sprite> {
    let obstacles = state.obstacles.iter().map(|o| match o.kind {
        ObstacleKind::Spike => Sprite::Spike { rect: o.rect },
        ObstacleKind::Platform => Sprite::Platform {
            rect: o.rect,
            ground: o.is_ground(),
        },
    });
    let actors = state
        .bot
        .iter()
        .chain(state.human.iter())
        .map(|a| Sprite::Actor {
            rect: a.rect,
            role: a.role,
            dead: a.dead,
        });
    obstacles.chain(actors).collect()
}
