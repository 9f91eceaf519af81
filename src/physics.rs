//! Actor motion, platform collision and obstacle scrolling.
//!
//! Actor integration is per frame (not scaled by delta time), so jump arcs
//! are tied to the target tick rate. Obstacles move by elapsed milliseconds.

use crate::config::PhysicsTuning;
use crate::entities::{Actor, Obstacle, ObstacleKind, Role};
use crate::geometry::Rect;

/// Outcome of resolving an actor against the platforms it overlaps.
#[derive(Clone, Debug, PartialEq)]
pub enum GroundContact {
    /// Standing on a platform; `snapped` is the corrected actor rectangle.
    Supported { snapped: Rect },
    /// Hit a platform's underside or leading edge.
    Fatal,
    Airborne,
}

pub fn spawn_actor(role: Role, physics: &PhysicsTuning) -> Actor {
    Actor {
        rect: Rect::new(
            physics.actor_start_x,
            physics.actor_start_y,
            physics.actor_size,
            physics.actor_size,
        ),
        vy: 0.0,
        grounded: false,
        dead: false,
        role,
    }
}

/// Checks platforms in collection order; the first one that supports the
/// actor wins. Spikes are ignored here.
pub fn resolve_ground(
    actor: &Rect,
    obstacles: &[Obstacle],
    physics: &PhysicsTuning,
) -> GroundContact {
    for platform in obstacles.iter().filter(|o| o.kind == ObstacleKind::Platform) {
        if !platform.rect.overlaps(actor) {
            continue;
        }
        if physics.in_contact_band(actor.bottom() - platform.rect.top()) {
            return GroundContact::Supported {
                snapped: actor.with_bottom(platform.rect.top() + physics.contact_min),
            };
        }
        let head = platform.rect.bottom() - actor.top();
        let front = actor.right() - platform.rect.left();
        if physics.in_contact_band(head) || physics.in_contact_band(front) {
            return GroundContact::Fatal;
        }
    }
    GroundContact::Airborne
}

/// Advance one actor by one frame. Dead actors are returned unchanged.
/// Pure and silent, so the bot's lookahead can call it freely.
pub fn update_actor(
    actor: &Actor,
    jump_requested: bool,
    obstacles: &[Obstacle],
    physics: &PhysicsTuning,
) -> Actor {
    if actor.dead {
        return actor.clone();
    }

    let (rect, grounded) = match resolve_ground(&actor.rect, obstacles, physics) {
        GroundContact::Supported { snapped } => (snapped, true),
        GroundContact::Airborne => (actor.rect, false),
        GroundContact::Fatal => {
            return Actor {
                dead: true,
                ..actor.clone()
            };
        }
    };

    let mut vy = actor.vy;
    let mut grounded = grounded;
    let jumped = jump_requested && grounded;

    if jumped {
        vy = physics.jump_velocity;
        grounded = false;
    }

    if grounded && !jump_requested {
        vy = 0.0;
    }

    // The take-off frame moves at the full impulse.
    if !grounded && !jumped && vy < physics.max_fall_speed {
        vy = (vy + physics.gravity).min(physics.max_fall_speed);
    }

    Actor {
        rect: rect.translate(0.0, vy),
        vy,
        grounded,
        ..actor.clone()
    }
}

/// Scroll an obstacle left by `speed * dt_ms`. The ground never moves.
pub fn advance_obstacle(obstacle: &Obstacle, dt_ms: f32) -> Obstacle {
    if !obstacle.scrolls {
        return obstacle.clone();
    }
    Obstacle {
        rect: obstacle.rect.translate(-obstacle.speed * dt_ms, 0.0),
        ..obstacle.clone()
    }
}

/// Strict overlap with any spike.
pub fn touches_spike(actor: &Rect, obstacles: &[Obstacle]) -> bool {
    obstacles
        .iter()
        .any(|o| o.kind == ObstacleKind::Spike && o.rect.overlaps(actor))
}

pub fn is_off_screen(obstacle: &Obstacle) -> bool {
    obstacle.scrolls && obstacle.rect.right() < 0.0
}
