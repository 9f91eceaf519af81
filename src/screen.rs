//! Screen navigation as an explicit state machine, plus menu buttons.
//!
//! ```text
//! MainMenu ──StartGame──▶ Playing ──SessionEnded──▶ GameOver ──Continue──▶ MainMenu
//!     └──────────────── Quit (from any screen) ──────────────▶ Quit
//! ```

use crate::entities::Mode;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    MainMenu { mode: Mode },
    Playing { mode: Mode },
    GameOver { mode: Mode },
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    StartGame,
    CycleMode,
    SessionEnded,
    Continue,
    Quit,
}

impl Screen {
    pub fn is_terminal(self) -> bool {
        self == Screen::Quit
    }
}

/// Next mode in menu order, wrapping after the last.
pub fn cycle_mode(mode: Mode) -> Mode {
    Mode::ALL[(mode.index() + 1) % Mode::ALL.len()]
}

/// Actions that make no sense on the current screen leave it unchanged.
pub fn transition(screen: Screen, action: UiAction) -> Screen {
    let next = match (screen, action) {
        (Screen::Quit, _) => Screen::Quit,
        (_, UiAction::Quit) => Screen::Quit,
        (Screen::MainMenu { mode }, UiAction::StartGame) => Screen::Playing { mode },
        (Screen::MainMenu { mode }, UiAction::CycleMode) => Screen::MainMenu {
            mode: cycle_mode(mode),
        },
        (Screen::Playing { mode }, UiAction::SessionEnded) => Screen::GameOver { mode },
        (Screen::GameOver { mode }, UiAction::Continue) => Screen::MainMenu { mode },
        (unchanged, _) => unchanged,
    };
    if next != screen {
        log::info!("Screen {:?} -> {:?}", screen, next);
    }
    next
}

// ── Buttons ───────────────────────────────────────────────────────────────────

/// A clickable label. `rect` is in terminal cells (column, row).
#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub label: String,
    pub rect: Rect,
    pub action: UiAction,
}

impl Button {
    /// Center the label on `(cx, row)`; the hit box is one row tall.
    pub fn centered(label: impl Into<String>, cx: u16, row: u16, action: UiAction) -> Self {
        let label = label.into();
        let width = label.chars().count().max(1) as f32;
        let left = (cx as f32 - (width / 2.0).floor()).max(0.0);
        Self {
            rect: Rect::new(left + width / 2.0, row as f32 + 0.5, width, 1.0),
            label,
            action,
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> bool {
        self.rect.contains_point(column as f32, row as f32)
    }

    /// Top-left cell, for drawing.
    pub fn origin(&self) -> (u16, u16) {
        (self.rect.left() as u16, self.rect.top() as u16)
    }
}

/// Buttons visible on `screen` for a `width` x `height` terminal.
pub fn buttons(screen: Screen, width: u16, height: u16) -> Vec<Button> {
    let cx = width / 2;
    let cy = height / 2;
    match screen {
        Screen::MainMenu { mode } => vec![
            Button::centered("[ Start Game ]", cx, cy.saturating_sub(2), UiAction::StartGame),
            Button::centered(
                format!("< {} >", mode.label()),
                cx,
                cy,
                UiAction::CycleMode,
            ),
            Button::centered("[ Quit ]", cx, cy + 2, UiAction::Quit),
        ],
        Screen::GameOver { .. } => vec![
            Button::centered("[ Continue ]", cx, cy + 2, UiAction::Continue),
            Button::centered("[ Quit ]", cx, cy + 3, UiAction::Quit),
        ],
        Screen::Playing { .. } | Screen::Quit => Vec::new(),
    }
}

/// The action of the first button under the click, if any.
pub fn click(screen: Screen, width: u16, height: u16, column: u16, row: u16) -> Option<UiAction> {
    buttons(screen, width, height)
        .into_iter()
        .find(|b| b.hit(column, row))
        .map(|b| b.action)
}
