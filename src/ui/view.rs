// Rendering for the two session modes.
//
// Pure functions of the Session: nothing here mutates state.

use crate::state::{Browser, Mode, Session, View};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};

const PLACEHOLDER: &str = "Enter directory path";

fn border_style() -> Style {
    Style::default().fg(Color::Indexed(240))
}

fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Indexed(229))
        .bg(Color::Indexed(57))
}

/// Draw the whole screen for the current session mode
pub fn draw(frame: &mut Frame, session: &Session) {
    match session.mode() {
        Mode::AwaitingDirectory { input, last_error } => {
            draw_prompt(frame, input, last_error.as_deref())
        }
        Mode::Browsing(browser) => match &browser.view {
            View::Table => draw_table(frame, browser, session),
            View::Changes { .. } => draw_changes(frame, browser),
        },
    }
}

fn split_with_footer(area: Rect, body_height: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(body_height), Constraint::Min(1)])
        .split(area);
    (chunks[0], chunks[1])
}

fn draw_prompt(frame: &mut Frame, input: &str, last_error: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(frame.area());

    frame.render_widget(Paragraph::new("Enter the directory path:"), chunks[0]);

    let field = if input.is_empty() {
        Line::from(Span::styled(
            PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(input.to_string())
    };
    let field_width = chunks[1].width.min(52);
    let field_area = Rect {
        width: field_width,
        ..chunks[1]
    };
    frame.render_widget(
        Paragraph::new(field).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style()),
        ),
        field_area,
    );

    // Cursor sits after the typed text, inside the border
    let typed = (input.chars().count() as u16).min(field_width.saturating_sub(2));
    let cursor_x = field_area.x + 1 + typed;
    frame.set_cursor_position((cursor_x, field_area.y + 1));

    let mut footer = vec![Line::from("Press Enter to continue, or Esc to quit.")];
    if let Some(error) = last_error {
        footer.push(Line::from(""));
        footer.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    frame.render_widget(Paragraph::new(footer).wrap(Wrap { trim: false }), chunks[2]);
}

fn draw_table(frame: &mut Frame, browser: &Browser, session: &Session) {
    let rows: Vec<Row> = session
        .rules()
        .rules()
        .enumerate()
        .map(|(index, rule)| {
            Row::new(vec![
                Cell::from((index + 1).to_string()),
                Cell::from(rule.filename),
                Cell::from(browser.counts.count(rule.filename).to_string()),
            ])
        })
        .collect();

    let header = Row::new(vec!["Option", "File Name", "Total Number"]).style(
        Style::default().add_modifier(Modifier::UNDERLINED),
    );

    let selected_style = if browser.table_focused {
        highlight_style()
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(20),
            Constraint::Length(15),
        ],
    )
    .header(header)
    .row_highlight_style(selected_style)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(format!(" {} ", browser.root)),
    );

    let mut state = TableState::default().with_selected(Some(browser.selected));
    // Header plus five rows plus borders
    let (body, footer) = split_with_footer(frame.area(), session.rules().len() as u16 + 3);
    frame.render_stateful_widget(table, body, &mut state);
    frame.render_widget(
        Paragraph::new(
            "Press '1'-'5' to select, 'enter' to modify selected file, 'q' to quit.",
        ),
        footer,
    );
}

fn draw_changes(frame: &mut Frame, browser: &Browser) {
    let View::Changes { history, aborted } = &browser.view else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style());

    let mut lines: Vec<Line> = if history.is_empty() {
        vec![Line::from("No changes made.")]
    } else {
        history
            .iter()
            .enumerate()
            .map(|(index, record)| {
                if Some(index) == history.highlight() {
                    Line::from(Span::styled(
                        record.to_string(),
                        highlight_style().add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(record.to_string())
                }
            })
            .collect()
    };

    if let Some(error) = aborted {
        lines.push(Line::from(Span::styled(
            format!("Pass stopped early: {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    let footer = if history.is_empty() {
        "Press 'b' to go back."
    } else {
        "Press '↑' and '↓' to move highlight, 'b' to go back."
    };

    let (body, footer_area) = split_with_footer(frame.area(), lines.len() as u16 + 2);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        body,
    );
    frame.render_widget(Paragraph::new(footer), footer_area);
}
