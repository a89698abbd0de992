//! Terminal UI for the Connect Four client

mod app;
mod input;
mod ui;

use std::io::{self, Stdout};

use anyhow::Result;
use connect_four_client::{ClientConfig, HttpBoardClient, SessionController};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::Duration;
use tracing::{debug, error, info, instrument};

use app::{App, NewGameForm};
use input::Action;

type Tui = Terminal<CrosstermBackend<Stdout>>;
type Controller = SessionController<HttpBoardClient>;

/// Run the TUI client
pub async fn run_tui(config: ClientConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create("connect_four_client.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,connect_four_client=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(server_url = %config.server_url(), "Starting Connect Four TUI");

    let client = HttpBoardClient::new(config.server_url(), config.request_timeout())?;
    let mut controller = SessionController::new(client, config.notifications());
    let mut app = App::new(NewGameForm::from(&config));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_loop(&mut terminal, &mut controller, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    info!("TUI exited");
    res
}

fn redraw(terminal: &mut Tui, app: &App, controller: &Controller) -> Result<()> {
    let model = controller.render();
    terminal.draw(|f| ui::draw(f, app, &model, controller.notifications()))?;
    Ok(())
}

/// Reads keys and forwards intents until the user quits.
///
/// Each intent is awaited before the next key is read, so at most one
/// request is ever outstanding.
#[instrument(skip_all)]
async fn run_loop(terminal: &mut Tui, controller: &mut Controller, app: &mut App) -> Result<()> {
    app.set_busy(true);
    redraw(terminal, app, controller)?;
    let outcome = controller.load_board().await;
    app.set_busy(false);
    info!(?outcome, "Initial board load finished");

    loop {
        controller.notifications_mut().clear_expired();
        app.clamp_cursor(controller.render().width);
        redraw(terminal, app, controller)?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Skip key release events (crossterm fires both press and release on some platforms).
        if key.kind == KeyEventKind::Release {
            continue;
        }
        let Some(action) = input::action_for_key(key.code) else {
            continue;
        };
        debug!(?action, "Key action");

        let intent = match action {
            Action::Quit => {
                info!("User quit");
                return Ok(());
            }
            Action::CursorLeft => {
                app.cursor_left();
                continue;
            }
            Action::CursorRight => {
                app.cursor_right(controller.render().width);
                continue;
            }
            Action::Adjust(field, increase) => {
                app.form_mut().adjust(field, increase);
                continue;
            }
            Action::DropAtCursor => connect_four_client::Intent::Move(app.cursor()),
            Action::NewGame => app.form().intent(),
            Action::Session(intent) => intent,
        };

        app.set_busy(true);
        redraw(terminal, app, controller)?;
        let outcome = controller.dispatch(intent).await;
        app.set_busy(false);
        info!(?intent, ?outcome, "Intent handled");
    }
}
