//! Terminal Asteroids
//!
//! `sim` is the frame-stepped game core and knows nothing about terminals.
//! `app`, `event` and `ui` drive it from crossterm input and draw it with
//! ratatui.

pub mod app;
pub mod config;
pub mod event;
pub mod sim;
pub mod ui;
