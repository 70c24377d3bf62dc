use anyhow::Context;
use gh_client::{connect, GitHubClient, TokenResolver};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use review_deck::{GitHubGateway, ReviewSource, ReviewStore, StoreSettings};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use swipe_config::AppConfig;
use tokio::runtime::Runtime;

mod app;
mod browser;
mod keymap;
mod logger;
mod view_models;
mod views;

use app::App;

fn main() -> anyhow::Result<()> {
    let log_file = logger::init()?;
    log::info!("Starting pr-swipe, logging to {}", log_file.display());

    let config = AppConfig::load();
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;

    // Authentication gates the deck: no profile, no queue
    let client = runtime
        .block_on(connect(&TokenResolver::new(), config.host.as_deref()))
        .context("Failed to connect to GitHub")?;
    let user = runtime
        .block_on(client.current_user())
        .context("Not authenticated; run `gh auth login` or set GITHUB_TOKEN")?;
    log::info!("Authenticated as {} on {}", user.login, config.effective_host());

    let source = ReviewSource::from(&config);
    let gateway = GitHubGateway::from_config(client, &config);
    let store = ReviewStore::new(
        Arc::new(gateway),
        runtime.handle().clone(),
        StoreSettings::from(&config),
    );
    let mut app = App::new(
        store,
        keymap::default_keymap(),
        user.login,
        source,
        runtime.handle().clone(),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start();
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("pr-swipe stopped: {:#}", err);
    }

    log::info!("Exiting pr-swipe");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    while app.is_running() {
        app.tick();

        let vm = app.view_model();
        terminal.draw(|frame| {
            let area = frame.area();
            views::render(&vm, area, frame);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(&key);
                }
            }
        }
    }

    Ok(())
}
