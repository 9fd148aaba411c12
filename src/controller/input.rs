//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{InputFocus, Screen};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Ctrl+Q quits from anywhere, including text fields
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error().await;
            }
            return Ok(());
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('h') | KeyCode::Char('H')
            ) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        match model.screen().await {
            Screen::Input => {
                // Typing owns every printable key on this screen
                if model.input_focus().await == InputFocus::PhotoPath {
                    match key.code {
                        KeyCode::Enter => {
                            // Closes the prompt now so later keys go to the ingredient field
                            let path = model.take_photo_path().await;
                            drop(model);
                            let controller = self.clone();
                            tokio::spawn(async move {
                                controller.attach_photo(path).await;
                            });
                        }
                        KeyCode::Esc => model.close_photo_prompt().await,
                        KeyCode::Backspace => model.backspace_input().await,
                        KeyCode::Char(c) => model.append_input(c).await,
                        _ => {}
                    }
                    return Ok(());
                }

                match key.code {
                    KeyCode::Char('o') | KeyCode::Char('O')
                        if key.modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        model.open_photo_prompt().await;
                    }
                    KeyCode::Char('x') | KeyCode::Char('X')
                        if key.modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        model.clear_image().await;
                    }
                    KeyCode::Char(c) => model.append_input(c).await,
                    KeyCode::Backspace => model.backspace_input().await,
                    KeyCode::Enter => {
                        if model.input_buffer_is_empty().await {
                            drop(model);
                            let controller = self.clone();
                            tokio::spawn(async move {
                                controller.submit().await;
                            });
                        } else {
                            model.commit_ingredient().await;
                        }
                    }
                    KeyCode::Up => model.move_selection_up().await,
                    KeyCode::Down => model.move_selection_down().await,
                    KeyCode::Delete => {
                        model.remove_selected_ingredient().await;
                    }
                    KeyCode::F(1) => model.show_help_popup().await,
                    _ => {}
                }
                return Ok(());
            }
            Screen::Results => match key.code {
                KeyCode::Up => {
                    model.move_selection_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.move_selection_down().await;
                    // Fetch the next page in the background when nearing the end
                    if model.should_load_more_suggestions().await {
                        let controller = self.clone();
                        tokio::spawn(async move {
                            controller.load_more_suggestions().await;
                        });
                    }
                    return Ok(());
                }
                KeyCode::Enter => {
                    let selected = model.selected_suggestion().await;
                    drop(model);
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.select_dish(selected).await;
                    });
                    return Ok(());
                }
                KeyCode::Char('m') | KeyCode::Char('M') => {
                    drop(model);
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.load_more_suggestions().await;
                    });
                    return Ok(());
                }
                KeyCode::Esc | KeyCode::Backspace => {
                    drop(model);
                    self.navigate_back().await;
                    return Ok(());
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    drop(model);
                    self.reset().await;
                    return Ok(());
                }
                _ => {}
            },
            Screen::Recipe => match key.code {
                KeyCode::Up => {
                    model.move_selection_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.move_selection_down().await;
                    return Ok(());
                }
                KeyCode::PageUp => {
                    model.page_recipe(false).await;
                    return Ok(());
                }
                KeyCode::PageDown => {
                    model.page_recipe(true).await;
                    return Ok(());
                }
                KeyCode::Esc | KeyCode::Backspace => {
                    drop(model);
                    self.navigate_back().await;
                    return Ok(());
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    drop(model);
                    self.reset().await;
                    return Ok(());
                }
                _ => {}
            },
            Screen::Suggesting | Screen::LoadingRecipe => {}
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::F(1) => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}
