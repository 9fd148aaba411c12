//! Layout rendering (status bar, key hints)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{InputFocus, Screen, Session, UiState};

pub fn render_top_bar(frame: &mut Frame, area: Rect, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Current screen
            Constraint::Length(30), // Photo status
        ])
        .split(area);

    let ingredient_count = session.ingredients.len();
    let status = match session.screen {
        Screen::Results if session.is_fetching_more => format!(
            "{} suggestions for {} ingredients, loading more...",
            session.suggestions.len(),
            ingredient_count
        ),
        Screen::Results | Screen::Recipe | Screen::LoadingRecipe => format!(
            "{} suggestions for {} ingredients",
            session.suggestions.len(),
            ingredient_count
        ),
        Screen::Input | Screen::Suggesting => format!("{} ingredients", ingredient_count),
    };

    let title_style = if session.screen.is_busy() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Green)
    };

    let screen = Paragraph::new(status)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(session.screen.title())
                .title_style(title_style.add_modifier(Modifier::BOLD))
                .padding(Padding::horizontal(1))
                .border_style(title_style),
        );
    frame.render_widget(screen, chunks[0]);

    let photo_text = match &session.image {
        Some(image) => format!("📷 {}", image.file_name),
        None => "No photo".to_string(),
    };
    let photo = Paragraph::new(photo_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Photo "));
    frame.render_widget(photo, chunks[1]);
}

pub fn render_key_hints(frame: &mut Frame, area: Rect, screen: Screen, ui_state: &UiState) {
    let hints: &[(&str, &str)] = match screen {
        Screen::Input if ui_state.input_focus == InputFocus::PhotoPath => {
            &[("Enter", "attach"), ("Esc", "cancel")]
        }
        Screen::Input => &[
            ("Enter", "add / search"),
            ("Del", "remove"),
            ("Ctrl+O", "photo"),
            ("Ctrl+X", "clear photo"),
            ("F1", "help"),
            ("Ctrl+Q", "quit"),
        ],
        Screen::Suggesting | Screen::LoadingRecipe => &[("H", "help"), ("Q", "quit")],
        Screen::Results => &[
            ("↑/↓", "move"),
            ("Enter", "recipe"),
            ("M", "more"),
            ("Esc", "back"),
            ("R", "start over"),
            ("H", "help"),
            ("Q", "quit"),
        ],
        Screen::Recipe => &[
            ("↑/↓", "scroll"),
            ("Esc", "back"),
            ("R", "start over"),
            ("H", "help"),
            ("Q", "quit"),
        ],
    };

    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (key, action) in hints {
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }
    spans.pop();

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(footer, area);
}
