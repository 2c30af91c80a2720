//! UI rendering using ratatui

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::app::{App, Mode};

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for the selected row
const HIGHLIGHT: Color = Color::Yellow;
/// Error color
const ERROR: Color = Color::Red;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query input bar
            Constraint::Min(5),    // Result list
            Constraint::Length(1), // Pagination footer
            Constraint::Length(1), // Status line
        ])
        .split(area);

    render_input_bar(frame, app, chunks[0]);
    render_results(frame, app, chunks[1]);
    render_pagination(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
}

/// Render the query input bar
fn render_input_bar(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode == Mode::Input;
    let border_style = if editing {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(SECONDARY)
    };
    let title = if editing {
        " Search book title [Enter to search] "
    } else {
        " Search book title [/ to edit] "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let input = Paragraph::new(app.input.as_str()).block(block);
    frame.render_widget(input, area);

    if editing {
        // Place the cursor after the typed text
        frame.set_cursor_position((area.x + 1 + cursor_column(&app.input), area.y + 1));
    }
}

/// Cursor column for the input bar, counted in characters rather than
/// bytes so multi-byte input does not drift the cursor.
fn cursor_column(input: &str) -> u16 {
    input.chars().count().min(usize::from(u16::MAX)) as u16
}

/// Render the result list
fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.state();

    let items: Vec<ListItem> = state
        .results
        .iter()
        .map(|book| {
            let cover_marker = if book.cover_id.is_some() { "▣ " } else { "□ " };
            let line = Line::from(vec![
                Span::styled(cover_marker, Style::default().fg(SECONDARY)),
                Span::styled(
                    book.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(book.author_line(), Style::default().fg(SECONDARY)),
            ]);
            ListItem::new(line)
        })
        .collect();

    let block = Block::default()
        .title(" Results ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SECONDARY));

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(HIGHLIGHT)
            .add_modifier(Modifier::BOLD),
    );

    let mut list_state = ListState::default();
    if !state.results.is_empty() {
        list_state.select(Some(app.selected_index));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Render the pagination footer
fn render_pagination(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.state();
    let text = if state.query.is_empty() {
        String::new()
    } else {
        format!(
            " Page {} / {} ({} matches)",
            state.page(),
            state.total_pages(),
            state.num_found
        )
    };
    let footer = Paragraph::new(text).style(Style::default().fg(ACCENT));
    frame.render_widget(footer, area);
}

/// Render the status line
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.state();

    let (text, style) = if state.loading {
        ("Loading...".to_string(), Style::default().fg(ACCENT))
    } else if let Some(err) = &state.error {
        (format!("Error: {err}"), Style::default().fg(ERROR))
    } else if state.no_results() {
        ("No results found.".to_string(), Style::default().fg(SECONDARY))
    } else {
        (
            " n/→ next page  p/← prev page  / edit query  c clear  q quit".to_string(),
            Style::default().fg(SECONDARY),
        )
    };

    let status = Paragraph::new(text).style(style);
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_column_counts_chars_not_bytes() {
        assert_eq!(cursor_column(""), 0);
        assert_eq!(cursor_column("dune"), 4);
        // "Génie" is 6 bytes but 5 characters
        assert_eq!("Génie".len(), 6);
        assert_eq!(cursor_column("Génie"), 5);
    }
}
