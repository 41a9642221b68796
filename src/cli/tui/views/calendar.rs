//! Calendar view: month grid of derived content IDs

use chrono::{Datelike, NaiveDate};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::cli::tui::app::{App, InputMode};
use crate::cli::tui::utils::{status_color, truncate_str};
use crate::domain::{ContentStatus, SiteFilter, WEEKDAY_NAMES};

/// Draw the month grid
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Month header
            Constraint::Length(1), // Weekday names
            Constraint::Min(10),   // Grid
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);
    draw_weekdays(frame, chunks[1]);
    draw_grid(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let schedule = app.schedule();
    let filter = match schedule.filter() {
        SiteFilter::All => "All sites".to_string(),
        SiteFilter::Only(id) => schedule
            .site(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("Site {}", id)),
    };

    let line = Line::from(vec![
        Span::styled(
            schedule.month().label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("   {}   policy: {}", filter, schedule.policy())),
    ]);

    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn draw_weekdays(frame: &mut Frame, area: Rect) {
    let columns = Layout::horizontal([Constraint::Ratio(1, 7); 7]).split(area);

    for (name, column) in WEEKDAY_NAMES.iter().zip(columns.iter()) {
        let label = Paragraph::new(*name)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(label, *column);
    }
}

fn draw_grid(frame: &mut Frame, app: &App, area: Rect) {
    let weeks = app.schedule().month().weeks();
    let rows = Layout::vertical(vec![Constraint::Ratio(1, weeks.len() as u32); weeks.len()])
        .split(area);

    for (week, row) in weeks.iter().zip(rows.iter()) {
        let cells = Layout::horizontal([Constraint::Ratio(1, 7); 7]).split(*row);
        for (day, cell) in week.iter().zip(cells.iter()) {
            if let Some(date) = day {
                draw_day(frame, app, *date, *cell);
            }
        }
    }
}

fn draw_day(frame: &mut Frame, app: &App, date: NaiveDate, area: Rect) {
    let selected = date == app.selected();
    let schedule = app.schedule();

    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(date.day().to_string())
        .borders(Borders::ALL)
        .border_style(border_style);

    let width = area.width.saturating_sub(2) as usize;
    let lines: Vec<Line> = schedule
        .entries_on(date)
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let status = schedule.status_of(&entry.content_id);
            let mut style = Style::default().fg(status_color(status));
            if status == ContentStatus::Complete {
                style = style.add_modifier(Modifier::BOLD);
            }
            if selected && i == app.entry_index() {
                style = style.add_modifier(Modifier::REVERSED);
            }

            let text = format!("{} {}", entry.content_id, entry.site_name);
            Line::styled(truncate_str(&text, width), style)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.input_mode() {
        InputMode::Normal => match app.status_message() {
            Some(msg) => (msg.to_string(), Style::default().fg(Color::Yellow)),
            None => (selected_summary(app), Style::default()),
        },
        InputMode::Editing(_) => (
            "Ctrl-S save  Ctrl-R recalculate  Esc cancel".to_string(),
            Style::default().fg(Color::Yellow),
        ),
    };

    let paragraph = Paragraph::new(content)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// One line describing the selected entry
fn selected_summary(app: &App) -> String {
    let date = app.selected();
    let entries = app.selected_entries();
    let Some(entry) = entries.get(app.entry_index()) else {
        return format!("{}  no updates  [?] help", date.format("%a %Y-%m-%d"));
    };

    let schedule = app.schedule();
    let title = schedule
        .catalog()
        .get(&entry.content_id)
        .map(|r| r.title.as_str())
        .unwrap_or("");

    format!(
        "{}  {} {} ({})  {}",
        date.format("%a %Y-%m-%d"),
        entry.content_id,
        entry.site_name,
        schedule.status_of(&entry.content_id).label(),
        title
    )
}
