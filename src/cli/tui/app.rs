//! TUI application state and logic

use anyhow::Result;
use chrono::{Datelike, Days, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::views;
use crate::domain::{CalendarEntry, EditDraft, Month, Schedule, SiteFilter};

/// Ticks a status message stays visible
const STATUS_TICKS: u8 = 16;

/// Editor field with focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorField {
    #[default]
    Title,
    Description,
    Notes,
    Status,
    Id,
    Cascade,
}

impl EditorField {
    pub const ALL: [EditorField; 6] = [
        EditorField::Title,
        EditorField::Description,
        EditorField::Notes,
        EditorField::Status,
        EditorField::Id,
        EditorField::Cascade,
    ];

    fn next(self) -> Self {
        match self {
            EditorField::Title => EditorField::Description,
            EditorField::Description => EditorField::Notes,
            EditorField::Notes => EditorField::Status,
            EditorField::Status => EditorField::Id,
            EditorField::Id => EditorField::Cascade,
            EditorField::Cascade => EditorField::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            EditorField::Title => EditorField::Cascade,
            EditorField::Description => EditorField::Title,
            EditorField::Notes => EditorField::Description,
            EditorField::Status => EditorField::Notes,
            EditorField::Id => EditorField::Status,
            EditorField::Cascade => EditorField::Id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EditorField::Title => "Title",
            EditorField::Description => "Description",
            EditorField::Notes => "Notes",
            EditorField::Status => "Status",
            EditorField::Id => "Content ID",
            EditorField::Cascade => "Recalculate sequence",
        }
    }
}

/// Open editor dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    pub draft: EditDraft,
    pub field: EditorField,
    pub site_name: Option<String>,
    pub error: Option<String>,
}

impl Editor {
    /// Current text of a text field
    pub fn text(&self, field: EditorField) -> String {
        let record = &self.draft.record;
        match field {
            EditorField::Title => record.title.clone(),
            EditorField::Description => record.description.clone().unwrap_or_default(),
            EditorField::Notes => record.notes.clone().unwrap_or_default(),
            EditorField::Id => self.draft.id_text.clone(),
            EditorField::Status => record.status.label().to_string(),
            EditorField::Cascade => String::from(if self.draft.cascade { "[x]" } else { "[ ]" }),
        }
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String)) {
        let mut value = self.text(self.field);
        edit(&mut value);
        match self.field {
            EditorField::Title => self.draft.set_title(value),
            EditorField::Description => self.draft.set_description(value),
            EditorField::Notes => self.draft.set_notes(value),
            EditorField::Id => self.draft.id_text = value,
            EditorField::Status | EditorField::Cascade => {}
        }
        self.error = None;
    }
}

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing(Box<Editor>),
}

/// Application state
pub struct App {
    /// Calendar session state
    schedule: Schedule,

    /// Selected day
    selected: NaiveDate,

    /// Selected entry within the day
    entry_index: usize,

    /// Input mode
    input_mode: InputMode,

    /// Status message and remaining ticks
    status_message: Option<(String, u8)>,

    /// Whether to quit
    should_quit: bool,
}

impl App {
    /// Create a new application with `today` selected if it is in the shown month
    pub fn new(schedule: Schedule, today: NaiveDate) -> Self {
        let selected = if Month::containing(today) == schedule.month() {
            today
        } else {
            schedule.month().first_day()
        };

        Self {
            schedule,
            selected,
            entry_index: 0,
            input_mode: InputMode::Normal,
            status_message: None,
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit() {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize => {}
                Event::Tick => self.tick(),
            }
        }

        Ok(())
    }

    /// Draw the UI
    fn draw(&self, frame: &mut Frame) {
        views::calendar::draw(frame, self);
        if let InputMode::Editing(editor) = &self.input_mode {
            views::editor::draw(frame, editor);
        }
    }

    fn tick(&mut self) {
        if let Some((_, ticks)) = &mut self.status_message {
            *ticks = ticks.saturating_sub(1);
            if *ticks == 0 {
                self.status_message = None;
            }
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), STATUS_TICKS));
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Editing(_) => self.handle_editor_key(key),
        }
    }

    /// Handle keys in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('h') | KeyCode::Left => self.move_days(-1),
            KeyCode::Char('l') | KeyCode::Right => self.move_days(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_days(-7),
            KeyCode::Char('j') | KeyCode::Down => self.move_days(7),

            KeyCode::Char('[') => self.move_month(-1),
            KeyCode::Char(']') => self.move_month(1),

            KeyCode::Char('f') => {
                self.schedule.cycle_filter();
                self.entry_index = 0;
                let label = match self.schedule.filter() {
                    SiteFilter::All => "All sites".to_string(),
                    SiteFilter::Only(id) => self
                        .schedule
                        .site(id)
                        .map(|s| s.name.clone())
                        .unwrap_or_else(|| format!("Site {}", id)),
                };
                self.set_status(format!("Showing: {}", label));
            }

            KeyCode::Tab => {
                let count = self.selected_entries().len();
                if count > 0 {
                    self.entry_index = (self.entry_index + 1) % count;
                }
            }

            KeyCode::Enter => self.open_editor(),

            KeyCode::Char('?') => self.set_status(
                "arrows/hjkl:day [/]:month f:filter tab:entry enter:edit q:quit",
            ),

            _ => {}
        }
    }

    /// Handle keys while the editor is open
    fn handle_editor_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.set_status("Edit cancelled");
                return;
            }
            KeyCode::Char('s') if ctrl => {
                self.save_editor();
                return;
            }
            _ => {}
        }

        let InputMode::Editing(editor) = &mut self.input_mode else {
            return;
        };

        match key.code {
            KeyCode::Char('r') if ctrl => {
                editor.draft.toggle_cascade();
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                editor.field = editor.field.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                editor.field = editor.field.prev();
            }
            KeyCode::Left if editor.field == EditorField::Status => {
                let status = editor.draft.record.status.prev();
                editor.draft.set_status(status);
            }
            KeyCode::Right | KeyCode::Char(' ') if editor.field == EditorField::Status => {
                let status = editor.draft.record.status.next();
                editor.draft.set_status(status);
            }
            KeyCode::Char(' ') if editor.field == EditorField::Cascade => {
                editor.draft.toggle_cascade();
            }
            KeyCode::Backspace => {
                editor.edit_text(|value| {
                    value.pop();
                });
            }
            KeyCode::Char(c) if !ctrl => {
                editor.edit_text(|value| value.push(c));
            }
            _ => {}
        }
    }

    fn open_editor(&mut self) {
        let entries = self.selected_entries();
        let Some(entry) = entries.get(self.entry_index).or_else(|| entries.first()) else {
            self.set_status("No update scheduled on this day");
            return;
        };

        let draft = self.schedule.open(entry);
        self.input_mode = InputMode::Editing(Box::new(Editor {
            draft,
            field: EditorField::Title,
            site_name: Some(entry.site_name.clone()),
            error: None,
        }));
    }

    fn save_editor(&mut self) {
        let InputMode::Editing(editor) = &mut self.input_mode else {
            return;
        };

        match self.schedule.save(&editor.draft) {
            Ok(id) => {
                self.input_mode = InputMode::Normal;
                self.set_status(format!("Saved {}", id));
            }
            Err(e) => {
                editor.error = Some(e.to_string());
            }
        }
    }

    /// Moves the selection by whole days, following it across months
    fn move_days(&mut self, delta: i64) {
        let moved = if delta >= 0 {
            self.selected.checked_add_days(Days::new(delta.unsigned_abs()))
        } else {
            self.selected.checked_sub_days(Days::new(delta.unsigned_abs()))
        };

        if let Some(date) = moved {
            self.select(date);
        }
    }

    /// Shows another month, keeping the day of month where possible
    fn move_month(&mut self, delta: i32) {
        let month = self.schedule.month().offset(delta);
        let day = self.selected.day().min(month.num_days());
        let date = month.first_day().with_day(day).unwrap_or(month.first_day());
        self.select(date);
    }

    fn select(&mut self, date: NaiveDate) {
        self.selected = date;
        self.entry_index = 0;
        let month = Month::containing(date);
        if month != self.schedule.month() {
            self.schedule.show_month(month);
        }
    }

    // Public accessors for views

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn entry_index(&self) -> usize {
        self.entry_index
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_ref().map(|(m, _)| m.as_str())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Entries on the selected day
    pub fn selected_entries(&self) -> Vec<CalendarEntry> {
        self.schedule.entries_on(self.selected)
    }
}
