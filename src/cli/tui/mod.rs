//! Interactive calendar
//!
//! A month grid of every derived content ID, coloured by status, with an
//! editor dialog for the record behind each ID. Edits live for the session
//! only.

mod app;
mod event;
mod ui;
mod utils;
mod views;

use anyhow::Result;
use chrono::Local;

use super::Output;
use crate::domain::Schedule;
use app::App;
use event::EventHandler;
use ui::TerminalGuard;

/// Launch the TUI
pub fn run(output: &Output, schedule: Schedule) -> Result<()> {
    output.verbose_ctx(
        "tui",
        &format!("Opening {} with {} records", schedule.month(), schedule.catalog().len()),
    );

    let mut app = App::new(schedule, Local::now().date_naive());

    // Restored on drop, including when the loop panics
    let mut guard = TerminalGuard::enter()?;
    let events = EventHandler::new(250);

    app.run(guard.terminal(), events)
}
