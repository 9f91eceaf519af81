//! Rendering layer: all terminal output lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! session or screen. No game logic happens here; the 500x500 logical world
//! is projected onto whatever terminal size is available.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use spike_runner::compute::sprites;
use spike_runner::config::{WORLD_HEIGHT, WORLD_WIDTH};
use spike_runner::entities::{GameSession, Level, Mode, Role, Sprite};
use spike_runner::geometry::Rect;
use spike_runner::screen::{buttons, Screen};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUMAN: Color = Color::Green;
const C_BOT: Color = Color::Cyan;
const C_DEAD: Color = Color::DarkRed;
const C_SPIKE: Color = Color::Red;
const C_PLATFORM: Color = Color::Yellow;
const C_GROUND: Color = Color::DarkGrey;
const C_BUTTON: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Terminal cells the world is drawn into (inside the border).
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn for_terminal(width: u16, height: u16) -> Self {
        // Row 0 HUD, row 1 top border, row h-2 bottom border, row h-1 hint.
        Self {
            left: 1,
            top: 2,
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(4).max(1),
        }
    }

    fn column(&self, x: f32) -> i32 {
        self.left as i32 + (x / WORLD_WIDTH * self.cols as f32).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        self.top as i32 + (y / WORLD_HEIGHT * self.rows as f32).floor() as i32
    }

    /// Cells covered by `rect`, clipped to the viewport. At least one cell
    /// wide and tall so small sprites never vanish.
    fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let min_col = self.left as i32;
        let max_col = (self.left + self.cols) as i32;
        let min_row = self.top as i32;
        let max_row = (self.top + self.rows) as i32;

        let c0 = self.column(rect.left());
        let c1 = self.column(rect.right()).max(c0 + 1);
        let r0 = self.row(rect.top());
        let r1 = self.row(rect.bottom()).max(r0 + 1);

        let (c0, c1) = (c0.max(min_col), c1.min(max_col));
        let (r0, r1) = (r0.max(min_row), r1.min(max_row));
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as u16, r0 as u16, c1 as u16, r1 as u16))
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame of play.
pub fn render_game<W: Write>(
    out: &mut W,
    state: &GameSession,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, state, width)?;

    let view = Viewport::for_terminal(width, height);
    for sprite in sprites(state) {
        draw_sprite(out, &view, &sprite)?;
    }

    draw_hint(out, height, "SPACE / ↑ : Jump   Q : Quit")?;
    finish(out, height)
}

pub fn render_menu<W: Write>(
    out: &mut W,
    screen: Screen,
    level: Level,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let title = "▲  SPIKE  RUNNER  ▲";
    print_centered(out, width / 2, (height / 2).saturating_sub(5), title, Color::Cyan)?;
    let level_line = format!("Level: {:?}", level);
    print_centered(
        out,
        width / 2,
        (height / 2).saturating_sub(4),
        &level_line,
        Color::DarkGrey,
    )?;

    draw_buttons(out, screen, width, height)?;
    draw_hint(
        out,
        height,
        "Click a button   ENTER : Start   M : Mode   Q : Quit",
    )?;
    finish(out, height)
}

/// Game-over overlay drawn on top of the final frame.
pub fn render_game_over<W: Write>(
    out: &mut W,
    state: &GameSession,
    screen: Screen,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    render_game(out, state, width, height)?;

    let result_line = match state.mode {
        Mode::BotOnly => format!("Bot survived {} frames", state.frame),
        Mode::HumanOnly | Mode::Both => format!("Final Score: {}", state.score),
    };
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════════╗", Color::Red),
        ("║      GAME  OVER      ║", Color::Red),
        ("╚══════════════════════╝", Color::Red),
        (result_line.as_str(), Color::Yellow),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16);
    for (i, (msg, color)) in lines.iter().enumerate() {
        print_centered(out, cx, start_row + i as u16, msg, *color)?;
    }

    draw_buttons(out, screen, width, height)?;
    draw_hint(out, height, "C / ENTER : Continue   Q : Quit")?;
    finish(out, height)
}

// ── Frame furniture ───────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, state: &GameSession, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    if state.mode.has_human() {
        out.queue(Print(format!("Score: {:>6}", state.score)))?;
    } else {
        out.queue(Print(format!("Frame: {:>6}", state.frame)))?;
    }

    let mode_str = format!("[ {} ]", state.mode.label());
    let mx = (width / 2).saturating_sub(mode_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(mx, 0))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(&mode_str))?;

    let level_str = format!("{:?}", state.level);
    let level_color = match state.level {
        Level::Easy => Color::Green,
        Level::Normal => Color::Yellow,
        Level::Hard => Color::Red,
    };
    let lx = width.saturating_sub(level_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(level_color))?;
    out.queue(Print(&level_str))?;

    Ok(())
}

fn draw_hint<W: Write>(out: &mut W, height: u16, hint: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

fn finish<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()
}

fn print_centered<W: Write>(
    out: &mut W,
    cx: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = cx.saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_buttons<W: Write>(
    out: &mut W,
    screen: Screen,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_BUTTON))?;
    for button in buttons(screen, width, height) {
        let (col, row) = button.origin();
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(&button.label))?;
    }
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(out: &mut W, view: &Viewport, sprite: &Sprite) -> std::io::Result<()> {
    let (rect, glyph, color) = match sprite {
        Sprite::Platform { rect, ground: true } => (rect, "▓", C_GROUND),
        Sprite::Platform { rect, ground: false } => (rect, "═", C_PLATFORM),
        Sprite::Spike { rect } => (rect, "▲", C_SPIKE),
        Sprite::Actor { rect, dead: true, .. } => (rect, "x", C_DEAD),
        Sprite::Actor { rect, role: Role::Human, .. } => (rect, "█", C_HUMAN),
        Sprite::Actor { rect, role: Role::Bot, .. } => (rect, "▒", C_BOT),
    };

    let Some((c0, r0, c1, r1)) = view.cells(rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    let line = glyph.repeat((c1 - c0) as usize);
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}
