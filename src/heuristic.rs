//! The bot: a per-frame decision table over the first two incoming obstacles,
//! checked against a short physics lookahead before it acts.
//!
//! Distances use one convention:
//!
//! * `gap(a, b) = b.left - a.right`, the free space from `a`'s leading edge
//!   to `b`'s trailing edge. Positive while `b` is still ahead of `a`.
//!   Negative when the two overlap.
//! * `behind(o) = actor.left - o.right`, how far `o` has moved past the
//!   actor. Positive once it is entirely behind.
//!
//! A trigger `t` fires on the first frame its distance drops below `t`, so at
//! the default scroll speed the jump happens somewhere in `[t - 5.8, t)`. Each
//! default trigger keeps that whole window inside the gaps a single jump
//! survives: a lone spike is cleared from about 6 to 116 px, and a jump hits
//! the underside of a platform whose left edge is about 53 px behind to 23 px
//! ahead of the actor's leading edge.

use crate::config::{HeuristicTuning, PhysicsTuning, Tuning};
use crate::entities::{Actor, IncomingQueue, Obstacle, ObstacleId, ObstacleKind};
use crate::geometry::Rect;
use crate::physics::{advance_obstacle, touches_spike, update_actor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Decision {
    /// Nothing to do yet.
    Wait,
    /// Drop the first `n` queue entries without jumping.
    Pass(usize),
    /// Jump and drop the first `n` queue entries.
    Jump(usize),
}

pub fn gap(a: &Rect, b: &Rect) -> f32 {
    b.left() - a.right()
}

pub fn behind(actor: &Rect, obstacle: &Rect) -> f32 {
    actor.left() - obstacle.right()
}

/// Airspace just above and ahead of the actor. A platform in here would be
/// hit from below by a jump.
pub fn overhead_probe(actor: &Rect, tuning: &HeuristicTuning) -> Rect {
    let probe = &tuning.overhead_probe;
    Rect::new(
        actor.x + probe.offset_x,
        actor.top() - probe.height / 2.0,
        probe.width,
        probe.height,
    )
}

/// Whether any scrolling platform sits in the overhead probe.
pub fn platform_overhead(
    actor: &Rect,
    obstacles: &[Obstacle],
    tuning: &HeuristicTuning,
) -> bool {
    let probe = overhead_probe(actor, tuning);
    obstacles
        .iter()
        .any(|o| o.kind == ObstacleKind::Platform && o.scrolls && o.rect.overlaps(&probe))
}

// ── Decision ──────────────────────────────────────────────────────────────────

/// Decide whether the bot jumps this frame.
///
/// The table proposes an action. When that action has no survivable
/// continuation over the lookahead window and the opposite one does, the bot
/// takes the opposite action and leaves the queue untouched.
pub fn decide(
    actor: &Actor,
    obstacles: &[Obstacle],
    queue: &mut IncomingQueue,
    tuning: &Tuning,
) -> bool {
    let mut proposed = queue.clone();
    let jump = consult_table(actor, obstacles, &mut proposed, &tuning.heuristic);

    let horizon = tuning.heuristic.lookahead_frames;
    let frame_ms = tuning.frame_ms as f32;
    let survives = |first: bool| {
        has_escape(actor, obstacles, first, &tuning.physics, frame_ms, horizon)
    };

    if !actor.grounded || horizon == 0 || survives(jump) || !survives(!jump) {
        *queue = proposed;
        return jump;
    }

    // Ids with no live obstacle still go.
    queue.retain(|id| obstacles.iter().any(|o| o.id == *id));
    log::debug!("bot overrides table (jump: {})", !jump);
    !jump
}

/// The decision table alone. Consumed obstacles are removed from the front
/// of `queue`; ids with no live obstacle are dropped first. Airborne actors
/// never act.
pub fn consult_table(
    actor: &Actor,
    obstacles: &[Obstacle],
    queue: &mut IncomingQueue,
    tuning: &HeuristicTuning,
) -> bool {
    queue.retain(|id| obstacles.iter().any(|o| o.id == *id));
    if !actor.grounded {
        return false;
    }

    let decision = match (find(obstacles, queue.get(0)), find(obstacles, queue.get(1))) {
        (None, _) => Decision::Wait,
        (Some(first), _)
            if first.kind == ObstacleKind::Spike && gap(&actor.rect, &first.rect) < 0.0 =>
        {
            // Already under or past the actor; too late to act on it.
            Decision::Pass(1)
        }
        (Some(first), None) => single(&actor.rect, first, obstacles, tuning),
        (Some(first), Some(second)) => pair(&actor.rect, first, second, obstacles, tuning),
    };

    let (jump, consumed) = match decision {
        Decision::Wait => (false, 0),
        Decision::Pass(n) => (false, n),
        Decision::Jump(n) => (true, n),
    };

    for _ in 0..consumed {
        if let Some(id) = queue.pop_front() {
            log::debug!("bot consumed obstacle #{id} (jump: {jump})");
        }
    }
    jump
}

fn find(obstacles: &[Obstacle], id: Option<ObstacleId>) -> Option<&Obstacle> {
    let id = id?;
    obstacles.iter().find(|o| o.id == id)
}

fn single(
    actor: &Rect,
    first: &Obstacle,
    obstacles: &[Obstacle],
    tuning: &HeuristicTuning,
) -> Decision {
    match first.kind {
        ObstacleKind::Spike
            if gap(actor, &first.rect) < tuning.single_spike_trigger
                && !platform_overhead(actor, obstacles, tuning) =>
        {
            Decision::Jump(1)
        }
        ObstacleKind::Platform if behind(actor, &first.rect) > tuning.single_platform_pass => {
            Decision::Pass(1)
        }
        _ => Decision::Wait,
    }
}

fn pair(
    actor: &Rect,
    first: &Obstacle,
    second: &Obstacle,
    obstacles: &[Obstacle],
    tuning: &HeuristicTuning,
) -> Decision {
    let d1 = gap(&first.rect, &second.rect);
    let d2 = gap(actor, &first.rect);
    let walk_under = first.kind == ObstacleKind::Platform && d1 > tuning.late_jump_gap;

    if d1 >= tuning.cluster_gap || walk_under {
        // Handle the first obstacle on its own.
        return match first.kind {
            ObstacleKind::Spike
                if d2 < tuning.spaced_spike_trigger
                    && !platform_overhead(actor, obstacles, tuning) =>
            {
                Decision::Jump(1)
            }
            ObstacleKind::Platform if behind(actor, &first.rect) > tuning.spaced_platform_pass => {
                Decision::Pass(1)
            }
            _ => Decision::Wait,
        };
    }

    // Clustered: one jump clears both. Overlapping pairs jump like a
    // platform-first pair.
    let trigger = if first.kind == ObstacleKind::Platform || d1 < 0.0 {
        tuning.clustered_platform_trigger
    } else if d1 > tuning.late_jump_gap {
        tuning.late_trigger
    } else {
        tuning.early_trigger
    };
    if d2 >= trigger {
        return Decision::Wait;
    }
    // The second one stays queued unless this jump carries past its far edge.
    if second.rect.right() - actor.right() < tuning.jump_reach {
        Decision::Jump(2)
    } else {
        Decision::Jump(1)
    }
}

// ── Lookahead ─────────────────────────────────────────────────────────────────

/// Whether some sequence of later jumps keeps `actor` alive for `horizon`
/// frames after `first_jump` is applied now. The obstacles keep scrolling at
/// `frame_ms` per frame and nothing new spawns.
pub fn has_escape(
    actor: &Actor,
    obstacles: &[Obstacle],
    first_jump: bool,
    physics: &PhysicsTuning,
    frame_ms: f32,
    horizon: u32,
) -> bool {
    let mut world = obstacles.to_vec();
    let mut frontier = vec![actor.clone()];

    for step in 0..horizon {
        if step > 0 {
            world = world.iter().map(|o| advance_obstacle(o, frame_ms)).collect();
        }

        let mut next: Vec<Actor> = Vec::new();
        for state in &frontier {
            let choices: &[bool] = match (step, state.grounded) {
                (0, _) if first_jump => &[true],
                (0, _) | (_, false) => &[false],
                (_, true) => &[false, true],
            };
            for &jump in choices {
                let moved = update_actor(state, jump, &world, physics);
                if moved.dead || touches_spike(&moved.rect, &world) {
                    continue;
                }
                if !next.iter().any(|seen| same_motion(seen, &moved)) {
                    next.push(moved);
                }
            }
        }

        if next.is_empty() {
            return false;
        }
        frontier = next;
    }
    true
}

fn same_motion(a: &Actor, b: &Actor) -> bool {
    a.grounded == b.grounded
        && (a.rect.y - b.rect.y).abs() < 0.01
        && (a.vy - b.vy).abs() < 0.01
}
