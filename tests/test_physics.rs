use spike_runner::config::PhysicsTuning;
use spike_runner::entities::*;
use spike_runner::geometry::Rect;
use spike_runner::physics::*;

fn physics() -> PhysicsTuning {
    PhysicsTuning::default()
}

/// Static floor whose top edge is at y = 300.
fn ground() -> Obstacle {
    Obstacle {
        id: 0,
        kind: ObstacleKind::Platform,
        rect: Rect::new(250.0, 400.0, 500.0, 200.0),
        speed: 0.0,
        scrolls: false,
    }
}

fn platform(x: f32, y: f32) -> Obstacle {
    Obstacle {
        id: 1,
        kind: ObstacleKind::Platform,
        rect: Rect::new(x, y, 50.0, 10.0),
        speed: 0.175,
        scrolls: true,
    }
}

fn actor_at(x: f32, y: f32) -> Actor {
    Actor {
        rect: Rect::new(x, y, 20.0, 20.0),
        vy: 0.0,
        grounded: false,
        dead: false,
        role: Role::Human,
    }
}

/// Resting on the ground: bottom edge one pixel into the floor.
fn standing_actor() -> Actor {
    Actor {
        grounded: true,
        ..actor_at(250.0, 291.0)
    }
}

// ── spawn_actor ───────────────────────────────────────────────────────────────

#[test]
fn actors_spawn_at_start_position() {
    let a = spawn_actor(Role::Bot, &physics());
    assert_eq!(a.rect, Rect::new(250.0, 250.0, 20.0, 20.0));
    assert_eq!(a.vy, 0.0);
    assert!(!a.dead);
    assert_eq!(a.role, Role::Bot);
}

// ── update_actor ──────────────────────────────────────────────────────────────

#[test]
fn grounded_actor_stays_put() {
    let obstacles = vec![ground()];
    let mut a = standing_actor();
    for _ in 0..10 {
        a = update_actor(&a, false, &obstacles, &physics());
        assert_eq!(a.vy, 0.0);
        assert_eq!(a.rect.y, 291.0);
        assert!(a.grounded);
    }
}

#[test]
fn gravity_accumulates_until_cap() {
    let p = physics();
    let mut a = actor_at(250.0, -1000.0);
    for _ in 0..40 {
        let next = update_actor(&a, false, &[], &p);
        if a.vy + p.gravity < p.max_fall_speed {
            assert!((next.vy - (a.vy + p.gravity)).abs() < 1e-4);
        }
        assert!(next.vy <= p.max_fall_speed);
        assert!(next.vy > a.vy || next.vy == p.max_fall_speed);
        a = next;
    }
    assert_eq!(a.vy, p.max_fall_speed);
}

#[test]
fn airborne_actor_integrates_velocity() {
    let a = actor_at(250.0, 100.0);
    let next = update_actor(&a, false, &[], &physics());
    assert!((next.vy - 0.7).abs() < 1e-6);
    assert!((next.rect.y - 100.7).abs() < 1e-4);
    assert_eq!(next.rect.x, 250.0);
}

#[test]
fn jump_sets_exact_impulse() {
    let obstacles = vec![ground()];
    let mut a = standing_actor();
    a.vy = 3.0;
    let next = update_actor(&a, true, &obstacles, &physics());
    assert_eq!(next.vy, -10.0);
    assert!(!next.grounded);
    assert_eq!(next.rect.y, 281.0);
}

#[test]
fn jump_needs_ground() {
    let a = actor_at(250.0, 100.0);
    let next = update_actor(&a, true, &[], &physics());
    assert!(next.vy > 0.0);
}

#[test]
fn falling_actor_lands_on_ground() {
    let obstacles = vec![ground()];
    let mut a = spawn_actor(Role::Human, &physics());
    for _ in 0..60 {
        a = update_actor(&a, false, &obstacles, &physics());
    }
    assert!(a.grounded);
    assert!(!a.dead);
    assert_eq!(a.vy, 0.0);
    assert_eq!(a.rect.bottom(), 301.0);
}

#[test]
fn dead_actor_is_frozen() {
    let mut a = actor_at(250.0, 100.0);
    a.dead = true;
    a.vy = 4.0;
    let next = update_actor(&a, true, &[ground()], &physics());
    assert_eq!(next, a);
}

// ── resolve_ground ────────────────────────────────────────────────────────────

#[test]
fn snap_is_idempotent() {
    let obstacles = vec![ground()];
    let sunk = actor_at(250.0, 295.0); // bottom 305, 5px into the floor
    let first = match resolve_ground(&sunk.rect, &obstacles, &physics()) {
        GroundContact::Supported { snapped } => snapped,
        other => panic!("expected support, got {other:?}"),
    };
    assert_eq!(first.bottom(), 301.0);

    let second = match resolve_ground(&first, &obstacles, &physics()) {
        GroundContact::Supported { snapped } => snapped,
        other => panic!("expected support, got {other:?}"),
    };
    assert_eq!(first, second);
}

#[test]
fn too_deep_is_not_support() {
    // bottom 320 is 20px into the floor, outside the contact band
    let a = actor_at(250.0, 310.0);
    assert_eq!(
        resolve_ground(&a.rect, &[ground()], &physics()),
        GroundContact::Airborne
    );
}

#[test]
fn no_overlap_is_airborne() {
    let a = actor_at(250.0, 200.0);
    assert_eq!(
        resolve_ground(&a.rect, &[ground()], &physics()),
        GroundContact::Airborne
    );
}

#[test]
fn head_hit_on_platform_underside_is_fatal() {
    // platform spans y 245..255, actor top at 250
    let obstacles = vec![platform(250.0, 250.0)];
    let a = actor_at(250.0, 260.0);
    assert_eq!(
        resolve_ground(&a.rect, &obstacles, &physics()),
        GroundContact::Fatal
    );
    let next = update_actor(&a, false, &obstacles, &physics());
    assert!(next.dead);
}

#[test]
fn running_into_platform_front_is_fatal() {
    // platform spans x 265..315; actor right edge at 270
    let obstacles = vec![platform(290.0, 250.0)];
    let a = actor_at(260.0, 250.0);
    assert_eq!(
        resolve_ground(&a.rect, &obstacles, &physics()),
        GroundContact::Fatal
    );
}

#[test]
fn landing_on_platform_top_supports() {
    // platform top at 245, actor bottom at 250
    let obstacles = vec![platform(250.0, 250.0)];
    let a = actor_at(250.0, 240.0);
    match resolve_ground(&a.rect, &obstacles, &physics()) {
        GroundContact::Supported { snapped } => assert_eq!(snapped.bottom(), 246.0),
        other => panic!("expected support, got {other:?}"),
    }
}

#[test]
fn spikes_are_not_ground() {
    let spike = Obstacle {
        id: 2,
        kind: ObstacleKind::Spike,
        rect: Rect::new(250.0, 290.0, 20.0, 20.0),
        speed: 0.175,
        scrolls: true,
    };
    let a = actor_at(250.0, 275.0); // bottom 285, 5px into the spike
    assert_eq!(
        resolve_ground(&a.rect, &[spike], &physics()),
        GroundContact::Airborne
    );
}

// ── touches_spike ─────────────────────────────────────────────────────────────

#[test]
fn spike_contact_needs_overlap() {
    let spike = Obstacle {
        id: 2,
        kind: ObstacleKind::Spike,
        rect: Rect::new(270.0, 290.0, 20.0, 20.0), // left edge 260
        speed: 0.175,
        scrolls: true,
    };
    let actor = standing_actor().rect; // right edge 260
    assert!(!touches_spike(&actor, &[ground(), spike.clone()]));
    assert!(touches_spike(&actor.translate(1.0, 0.0), &[spike.clone()]));
    // cleared it from above
    assert!(!touches_spike(&actor.translate(20.0, -21.0), &[spike]));
    assert!(!touches_spike(&actor, &[platform(255.0, 290.0)]));
}

// ── advance_obstacle ──────────────────────────────────────────────────────────

#[test]
fn obstacle_moves_by_speed_times_dt() {
    let o = platform(500.0, 250.0);
    let moved = advance_obstacle(&o, 33.0);
    assert_eq!(moved.rect.x, 500.0 - 0.175 * 33.0);
    assert_eq!(moved.rect.y, o.rect.y);
    // The input is untouched.
    assert_eq!(o.rect.x, 500.0);
}

#[test]
fn zero_dt_does_not_move() {
    let o = platform(321.0, 250.0);
    assert_eq!(advance_obstacle(&o, 0.0), o);
}

#[test]
fn ground_never_scrolls() {
    let g = ground();
    assert_eq!(advance_obstacle(&g, 1000.0), g);
}

#[test]
fn off_screen_once_right_edge_passes_zero() {
    assert!(!is_off_screen(&platform(0.0, 250.0)));
    assert!(is_off_screen(&platform(-26.0, 250.0)));
    let mut g = ground();
    g.rect.x = -1000.0;
    assert!(!is_off_screen(&g));
}
