//! Editor dialog for one content record

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::cli::tui::app::{Editor, EditorField};
use crate::cli::tui::utils::{centered, status_color};

/// Draw the editor on top of the calendar
pub fn draw(frame: &mut Frame, editor: &Editor) {
    let area = centered(frame.area(), 64, 18);

    let title = match &editor.site_name {
        Some(site) => format!(" Edit {} ({}) ", editor.draft.original_id(), site),
        None => format!(" Edit {} ", editor.draft.original_id()),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines: Vec<Line> = Vec::new();
    for field in EditorField::ALL {
        lines.push(field_line(editor, field));
        lines.push(Line::default());
    }

    if let Some(date) = editor.draft.record.date {
        lines.push(Line::styled(
            format!("Scheduled {}", date.format("%A %Y-%m-%d")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(error) = &editor.error {
        lines.push(Line::styled(
            error.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn field_line(editor: &Editor, field: EditorField) -> Line<'static> {
    let focused = editor.field == field;

    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let value_style = match field {
        EditorField::Status => Style::default().fg(status_color(editor.draft.record.status)),
        EditorField::Id if editor.draft.is_renamed() => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    };

    let mut value = editor.text(field);
    if focused {
        match field {
            EditorField::Status => value = format!("< {} >", value),
            EditorField::Cascade => {}
            _ => value.push('_'),
        }
    }

    Line::from(vec![
        Span::styled(format!("{:<22}", field.label()), label_style),
        Span::styled(value, value_style),
    ])
}
