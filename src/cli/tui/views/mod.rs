//! TUI views

pub mod calendar;
pub mod editor;
