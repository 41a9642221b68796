//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Calendar | Derive and list scheduled IDs | `sites`, `derive`, `calendar` |
//! | Catalog | Inspect and preview record edits | `show`, `rename`, `set-status` |
//! | Interactive | Month grid with editor | `tui` |
//!
//! ## Output Formats
//!
//! All commands except `tui` support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! cadence --verbose calendar --month 2025-01
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod calendar;
mod catalog;
mod output;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
