use spike_runner::config::Tuning;
use spike_runner::entities::*;
use spike_runner::geometry::Rect;
use spike_runner::spawner::Spawner;

fn make_session() -> GameSession {
    let tuning = Tuning::default();
    GameSession {
        mode: Mode::HumanOnly,
        level: Level::Normal,
        status: GameStatus::Playing,
        human: Some(Actor {
            rect: Rect::new(250.0, 291.0, 20.0, 20.0),
            vy: 0.0,
            grounded: true,
            dead: false,
            role: Role::Human,
        }),
        bot: None,
        obstacles: Vec::new(),
        incoming: IncomingQueue::new(),
        spawner: Spawner::with_timers(
            10,
            10,
            tuning.spawner.normal.clone(),
            tuning.obstacles.clone(),
        ),
        score: 0,
        frame: 0,
        next_id: 1,
        cleared: 0,
    }
}

// ── Mode ──────────────────────────────────────────────────────────────────────

#[test]
fn mode_from_selector() {
    assert_eq!(Mode::try_from(0usize), Ok(Mode::BotOnly));
    assert_eq!(Mode::try_from(1usize), Ok(Mode::HumanOnly));
    assert_eq!(Mode::try_from(2usize), Ok(Mode::Both));
    assert_eq!(Mode::try_from(3usize), Err(InvalidMode::OutOfRange(3)));
}

#[test]
fn mode_parses_names_and_selectors() {
    assert_eq!("bot".parse::<Mode>(), Ok(Mode::BotOnly));
    assert_eq!("Human".parse::<Mode>(), Ok(Mode::HumanOnly));
    assert_eq!("2".parse::<Mode>(), Ok(Mode::Both));
    assert_eq!("0".parse::<Mode>(), Ok(Mode::BotOnly));
    assert_eq!("7".parse::<Mode>(), Err(InvalidMode::OutOfRange(7)));
    assert_eq!(
        "spectator".parse::<Mode>(),
        Err(InvalidMode::Unknown("spectator".to_string()))
    );
}

#[test]
fn invalid_mode_names_the_choices() {
    let err = "-1".parse::<Mode>().unwrap_err();
    assert!(err.to_string().contains("bot, human, both"));
    assert_eq!(
        InvalidMode::OutOfRange(3).to_string(),
        "mode selector 3 is not one of 0, 1, 2"
    );
}

#[test]
fn mode_index_matches_selector() {
    for mode in Mode::ALL {
        assert_eq!(Mode::try_from(mode.index()), Ok(mode));
    }
}

#[test]
fn mode_participants() {
    assert!(Mode::BotOnly.has_bot() && !Mode::BotOnly.has_human());
    assert!(!Mode::HumanOnly.has_bot() && Mode::HumanOnly.has_human());
    assert!(Mode::Both.has_bot() && Mode::Both.has_human());
}

#[test]
fn mode_labels_match_menu() {
    assert_eq!(Mode::BotOnly.label(), "AI Only");
    assert_eq!(Mode::HumanOnly.label(), "Player Only");
    assert_eq!(Mode::Both.label(), "AI and Player");
}

// ── IncomingQueue ─────────────────────────────────────────────────────────────

#[test]
fn queue_is_fifo() {
    let mut q = IncomingQueue::new();
    q.push(3);
    q.push(1);
    q.push(2);
    assert_eq!(q.pop_front(), Some(3));
    assert_eq!(q.pop_front(), Some(1));
    assert_eq!(q.pop_front(), Some(2));
    assert_eq!(q.pop_front(), None);
}

#[test]
fn queue_ignores_duplicates() {
    let mut q = IncomingQueue::new();
    q.push(7);
    q.push(8);
    q.push(7);
    assert_eq!(q.len(), 2);
    assert_eq!(q.iter().collect::<Vec<_>>(), vec![7, 8]);
}

#[test]
fn queue_retain_keeps_order() {
    let mut q = IncomingQueue::new();
    for id in 1..=5 {
        q.push(id);
    }
    q.retain(|id| id % 2 == 1);
    assert_eq!(q.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
    assert_eq!(q.front(), Some(1));
    assert_eq!(q.get(2), Some(5));
    assert_eq!(q.get(3), None);
}

// ── Obstacle ──────────────────────────────────────────────────────────────────

#[test]
fn only_static_platforms_are_ground() {
    let mut o = Obstacle {
        id: 0,
        kind: ObstacleKind::Platform,
        rect: Rect::new(250.0, 400.0, 500.0, 200.0),
        speed: 0.0,
        scrolls: false,
    };
    assert!(o.is_ground());
    o.scrolls = true;
    assert!(!o.is_ground());
    o.kind = ObstacleKind::Spike;
    o.scrolls = false;
    assert!(!o.is_ground());
}

// ── GameSession ───────────────────────────────────────────────────────────────

#[test]
fn session_clone_is_independent() {
    let original = make_session();
    let mut cloned = original.clone();

    cloned.score = 999;
    cloned.incoming.push(4);
    if let Some(human) = cloned.human.as_mut() {
        human.dead = true;
    }

    assert_eq!(original.score, 0);
    assert!(original.incoming.is_empty());
    assert!(!original.human.as_ref().map_or(true, |h| h.dead));
}

#[test]
fn session_obstacle_lookup_by_id() {
    let mut s = make_session();
    s.obstacles.push(Obstacle {
        id: 42,
        kind: ObstacleKind::Spike,
        rect: Rect::new(400.0, 290.0, 20.0, 20.0),
        speed: 0.175,
        scrolls: true,
    });
    assert_eq!(s.obstacle(42).map(|o| o.kind), Some(ObstacleKind::Spike));
    assert!(s.obstacle(43).is_none());
}
