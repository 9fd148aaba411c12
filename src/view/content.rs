//! Main content area rendering (ingredient entry, suggestion list, recipe)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{InputFocus, RecipeDetail, Screen, Session, UiState};
use super::utils::{calculate_num_width, render_scrollable_list, spinner_frame, truncate_string};

pub fn render_main_content(frame: &mut Frame, area: Rect, session: &Session, ui_state: &UiState) {
    match session.screen {
        Screen::Input => render_input(frame, area, session, ui_state),
        Screen::Suggesting => {
            let message = if session.image.is_some() {
                "Looking at your ingredients and photo for dish ideas"
            } else {
                "Looking for dishes you can make"
            };
            render_busy(frame, area, message, ui_state.tick);
        }
        Screen::Results => render_results(frame, area, session, ui_state),
        Screen::LoadingRecipe => {
            let message = match &session.pending_dish {
                Some(dish) => format!("Writing the recipe for {}", dish.name),
                None => "Writing the recipe".to_string(),
            };
            render_busy(frame, area, &message, ui_state.tick);
        }
        Screen::Recipe => match &session.selected_recipe {
            Some(recipe) => render_recipe(frame, area, recipe, ui_state.recipe_scroll),
            None => render_busy(frame, area, "Recipe unavailable", ui_state.tick),
        },
    }
}

fn render_input(frame: &mut Frame, area: Rect, session: &Session, ui_state: &UiState) {
    let photo_prompt = ui_state.input_focus == InputFocus::PhotoPath;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                  // Ingredient input
            Constraint::Length(if photo_prompt { 3 } else { 0 }),  // Photo path prompt
            Constraint::Min(0),                                     // Ingredient list
        ])
        .split(area);

    let focused = Style::default().fg(Color::Green);
    let (input_text, input_style) = if session.input_buffer.is_empty() {
        ("Type an ingredient and press Enter...", Style::default().fg(Color::DarkGray))
    } else {
        (session.input_buffer.as_str(), Style::default().fg(Color::White))
    };
    let input = Paragraph::new(input_text).style(input_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Add ingredient ")
            .padding(Padding::horizontal(1))
            .border_style(if photo_prompt { Style::default() } else { focused }),
    );
    frame.render_widget(input, chunks[0]);

    if photo_prompt {
        let prompt = Paragraph::new(ui_state.photo_path.as_str())
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Photo path (jpg, png, webp, gif, heic) ")
                    .padding(Padding::horizontal(1))
                    .border_style(focused),
            );
        frame.render_widget(prompt, chunks[1]);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Ingredients ({}) ", session.ingredients.len()))
        .padding(Padding::horizontal(1));

    if session.ingredients.is_empty() {
        let hint = Paragraph::new(
            "Add what you have in the kitchen, one ingredient at a time.\n\
             Press Enter on an empty line to find dishes.\n\
             Ctrl+O attaches a photo of your fridge or pantry.",
        )
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
        frame.render_widget(hint, chunks[2]);
        return;
    }

    let items: Vec<ListItem> = session
        .ingredients
        .iter()
        .enumerate()
        .map(|(i, ingredient)| {
            let style = if i == ui_state.ingredient_selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!("• {}", ingredient.name)).style(style)
        })
        .collect();

    render_scrollable_list(frame, chunks[2], items, ui_state.ingredient_selected, block);
}

fn render_busy(frame: &mut Frame, area: Rect, message: &str, tick: usize) {
    let text = format!("\n{} {}...", spinner_frame(tick), message);
    let busy = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(busy, area);
}

fn render_results(frame: &mut Frame, area: Rect, session: &Session, ui_state: &UiState) {
    let content_width = area.width.saturating_sub(4) as usize;
    let num_width = calculate_num_width(session.suggestions.len());
    let description_width = content_width.saturating_sub(num_width + 1);

    let mut items: Vec<ListItem> = session
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, dish)| {
            let is_selected = i == ui_state.suggestion_selected;
            let name_style = if is_selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            };
            let indent = " ".repeat(num_width + 1);
            ListItem::new(Text::from(vec![
                Line::from(vec![
                    Span::styled(
                        format!("{:>width$} ", i + 1, width = num_width),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(dish.name.clone(), name_style),
                ]),
                Line::from(vec![
                    Span::raw(indent.clone()),
                    Span::styled(
                        truncate_string(&dish.description, description_width),
                        Style::default().fg(Color::Gray),
                    ),
                ]),
                Line::from(vec![
                    Span::raw(indent),
                    Span::styled(
                        format!("⏱ {}  ·  {}", dish.prep_time, dish.difficulty),
                        Style::default().fg(Color::Cyan),
                    ),
                ]),
            ]))
        })
        .collect();

    let footer = if session.is_fetching_more {
        Span::styled(
            format!("{} Loading more...", spinner_frame(ui_state.tick)),
            Style::default().fg(Color::Yellow),
        )
    } else if session.has_reached_end {
        Span::styled("No more suggestions", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled("M for more ideas", Style::default().fg(Color::DarkGray))
    };
    items.push(ListItem::new(Line::from(footer)));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Dishes ")
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Green));

    render_scrollable_list(frame, area, items, ui_state.suggestion_selected, block);
}

fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

fn recipe_lines(recipe: &RecipeDetail) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(section_header("Ingredients"));
    lines.extend(recipe.ingredients.iter().map(|i| Line::from(format!("  • {}", i))));
    lines.push(Line::default());

    lines.push(section_header("Instructions"));
    let num_width = calculate_num_width(recipe.instructions.len());
    lines.extend(recipe.instructions.iter().enumerate().map(|(i, step)| {
        Line::from(vec![
            Span::styled(
                format!("  {:>width$}. ", i + 1, width = num_width.saturating_sub(1)),
                Style::default().fg(Color::Green),
            ),
            Span::raw(step.clone()),
        ])
    }));
    lines.push(Line::default());

    lines.push(section_header("Substitutions"));
    for substitution in &recipe.substitutions {
        lines.push(Line::from(Span::styled(
            format!("  {}", substitution.original),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        lines.extend(substitution.alternatives.iter().map(|alt| {
            Line::from(vec![
                Span::styled(format!("    → {}", alt.name), Style::default().fg(Color::Cyan)),
                Span::styled(format!(": {}", alt.effect), Style::default().fg(Color::Gray)),
            ])
        }));
    }
    lines.push(Line::default());

    lines.push(section_header("Tips"));
    lines.extend(recipe.tips.iter().map(|tip| Line::from(format!("  • {}", tip))));
    lines.push(Line::default());

    lines.push(section_header("Video"));
    lines.push(Line::from(Span::styled(
        format!("  {}", recipe.video_link()),
        Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
    )));

    if let Some(sources) = &recipe.sources {
        lines.push(Line::default());
        lines.push(section_header("Sources"));
        lines.extend(sources.iter().map(|source| {
            Line::from(vec![
                Span::raw(format!("  {} ", source.title)),
                Span::styled(source.uri.clone(), Style::default().fg(Color::DarkGray)),
            ])
        }));
    }

    lines
}

fn recipe_block(name: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", name))
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Green))
}

/// Largest scroll offset that still fills the recipe area. Counted in
/// wrapped rows, the same unit `Paragraph::scroll` uses.
pub fn recipe_scroll_limit(recipe: &RecipeDetail, area: Rect) -> u16 {
    let inner = recipe_block(&recipe.name).inner(area);
    if inner.width == 0 {
        return 0;
    }
    let rows = Paragraph::new(recipe_lines(recipe))
        .wrap(Wrap { trim: false })
        .line_count(inner.width);
    u16::try_from(rows.saturating_sub(inner.height as usize)).unwrap_or(u16::MAX)
}

fn render_recipe(frame: &mut Frame, area: Rect, recipe: &RecipeDetail, scroll: u16) {
    let scroll = scroll.min(recipe_scroll_limit(recipe, area));
    let recipe_view = Paragraph::new(recipe_lines(recipe))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(recipe_block(&recipe.name));
    frame.render_widget(recipe_view, area);
}
