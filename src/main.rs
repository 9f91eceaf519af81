mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use spike_runner::compute::{init_session, run_bot_session, tick};
use spike_runner::config::{load_tuning, Tuning};
use spike_runner::entities::{GameSession, GameStatus, Level, Mode};
use spike_runner::screen::{click, transition, Screen, UiAction};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "spike_runner")]
#[command(about = "Side-scrolling spike runner for a human, a bot, or both")]
struct Cli {
    /// Mode preselected in the main menu: bot, human, both (or 0, 1, 2)
    #[arg(long, default_value = "bot")]
    mode: Mode,
    #[arg(long, value_enum, default_value_t = CliLevel::Normal)]
    level: CliLevel,
    /// JSON tuning file; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for obstacle spawning (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs here (RUST_LOG selects the filter, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Run a bot-only session for at most this many frames without a
    /// terminal and print a summary
    #[arg(long)]
    headless: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliLevel {
    Easy,
    Normal,
    Hard,
}

impl From<CliLevel> for Level {
    fn from(level: CliLevel) -> Self {
        match level {
            CliLevel::Easy => Level::Easy,
            CliLevel::Normal => Level::Normal,
            CliLevel::Hard => Level::Hard,
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        // stderr shares the terminal with the game, so stay quiet unless asked.
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"))
                .init();
        }
    }
    Ok(())
}

// ── Input mapping ─────────────────────────────────────────────────────────────

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Menu and game-over input. Keys work everywhere; mouse clicks go through
/// the screen's buttons.
fn ui_action(screen: Screen, event: &Event) -> Result<Option<UiAction>> {
    let action = match event {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) => {
            if is_quit(code, *modifiers) {
                return Ok(Some(UiAction::Quit));
            }
            match (screen, code) {
                (Screen::MainMenu { .. }, KeyCode::Enter | KeyCode::Char('s' | 'S')) => {
                    Some(UiAction::StartGame)
                }
                (Screen::MainMenu { .. }, KeyCode::Tab | KeyCode::Char('m' | 'M')) => {
                    Some(UiAction::CycleMode)
                }
                (Screen::GameOver { .. }, KeyCode::Enter | KeyCode::Char('c' | 'C')) => {
                    Some(UiAction::Continue)
                }
                _ => None,
            }
        }
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => {
            let (width, height) = terminal::size()?;
            click(screen, width, height, *column, *row)
        }
        _ => None,
    };
    Ok(action)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Plays one session to its end. Returns the final state and `true` when
/// the player asked to quit the program.
fn play<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut state: GameSession,
    tuning: &Tuning,
    rng: &mut StdRng,
) -> Result<(GameSession, bool)> {
    let frame = Duration::from_millis(tuning.frame_ms);
    let mut last_tick: Option<Instant> = None;

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut jump = false;
        while let Ok(event) = rx.try_recv() {
            if let Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                modifiers,
                ..
            }) = event
            {
                if is_quit(&code, modifiers) {
                    return Ok((state, true));
                }
                if matches!(
                    code,
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W')
                ) {
                    jump = true;
                }
            }
        }

        let dt_ms = last_tick.map_or(tuning.frame_ms as f32, |t| {
            t.elapsed().as_secs_f32() * 1000.0
        });
        last_tick = Some(frame_start);

        state = tick(&state, jump, dt_ms, tuning, rng);

        let (width, height) = terminal::size()?;
        display::render_game(out, &state, width, height)?;

        if state.status == GameStatus::GameOver {
            return Ok((state, false));
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    cli: &Cli,
    tuning: &Tuning,
    rng: &mut StdRng,
) -> Result<()> {
    let level = Level::from(cli.level);
    let mut screen = Screen::MainMenu { mode: cli.mode };
    let mut last_session: Option<GameSession> = None;

    while !screen.is_terminal() {
        if let Screen::Playing { mode } = screen {
            let session = init_session(mode, level, tuning, rng);
            let (finished, quit) = play(out, rx, session, tuning, rng)?;
            last_session = Some(finished);
            let action = if quit {
                UiAction::Quit
            } else {
                UiAction::SessionEnded
            };
            screen = transition(screen, action);
            continue;
        }

        let (width, height) = terminal::size()?;
        match (&last_session, screen) {
            (Some(session), Screen::GameOver { .. }) => {
                display::render_game_over(out, session, screen, width, height)?
            }
            _ => display::render_menu(out, screen, level, width, height)?,
        }

        // Block until something happens; redraw on anything else (resize etc.)
        let Ok(event) = rx.recv() else {
            break;
        };
        if let Some(action) = ui_action(screen, &event)? {
            screen = transition(screen, action);
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn run_headless(cli: &Cli, tuning: &Tuning, rng: &mut StdRng, max_frames: u64) {
    let level = Level::from(cli.level);
    let state = run_bot_session(level, tuning, rng, max_frames);
    let outcome = if state.status == GameStatus::GameOver {
        "bot died"
    } else {
        "frame limit reached"
    };
    println!(
        "{:?}: {} after {} frames, {} obstacles cleared",
        level, outcome, state.frame, state.cleared
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    // Configuration problems are reported before the terminal changes mode.
    let tuning = match &cli.config {
        Some(path) => load_tuning(path)
            .with_context(|| format!("cannot start with tuning file {}", path.display()))?,
        None => Tuning::default(),
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if let Some(max_frames) = cli.headless {
        run_headless(&cli, &tuning, &mut rng, max_frames);
        return Ok(());
    }

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Blocking event reads live on their own thread so the game loop never
    // waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(err) => {
                log::error!("Terminal event read failed: {err}");
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &cli, &tuning, &mut rng);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
