//! Side-scrolling spike runner: a human, a rule-based bot, or both jump
//! over advancing spikes and platforms.
//!
//! The library holds the whole simulation and the screen state machine;
//! the binary adds the terminal front end.

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod heuristic;
pub mod physics;
pub mod screen;
pub mod spawner;
