mod config;
mod controller;
mod image;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use anyhow::{Context, Result};
use std::time::Duration;
use tokio::sync::Mutex;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use view::AppView;
use config::AiConfig;
use controller::AppController;
use model::{AppModel, GeminiRecipeClient};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== recipe-rs starting ===");

    // Fail before touching the terminal so the message stays readable
    let config = AiConfig::from_env()?;
    tracing::info!(model = %config.model, api_base = %config.api_base, "AI service configured");

    let client = GeminiRecipeClient::new(&config).context("Failed to build the AI service client")?;

    let mut app_model = AppModel::new();
    app_model.set_client(Arc::new(client));

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone());

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("recipe-rs shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Get current state
        let (session, ui_state, should_quit) = {
            let model_guard = model.lock().await;
            model_guard.tick().await;

            (
                model_guard.get_session().await,
                model_guard.get_ui_state().await,
                model_guard.should_quit().await,
            )
        };

        if should_quit {
            break;
        }

        let mut viewport = Rect::default();
        terminal.draw(|f| {
            viewport = f.area();
            AppView::render(f, &session, &ui_state);
        })?;
        model
            .lock()
            .await
            .set_recipe_scroll_limit(AppView::recipe_scroll_limit(viewport, &session))
            .await;

        // Short poll keeps the spinner moving while requests are in flight
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }
    }

    Ok(())
}
