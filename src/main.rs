use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use lazypost::app::{App, AppEvent, Command};
use lazypost::client::{HttpClient, HttpResponse};
use lazypost::config::{Cli, LOG_LEVEL_ENV};
use lazypost::{clipboard, ui};

const IDLE_POLL: Duration = Duration::from_millis(50);

type Completion = Result<HttpResponse, String>;

fn init_tracing_subscriber(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new("info"))
        .add_directive("reqwest=warn".parse()?)
        .add_directive("hyper=warn".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install log subscriber: {err}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing_subscriber(&cli.log_path())?;

    let client = HttpClient::new(cli.timeout())?;
    let mut app = App::new();
    if let Some(method) = &cli.method {
        if !app.select_method(method) {
            anyhow::bail!("unknown HTTP method: {method}");
        }
    }
    if let Some(url) = &cli.url {
        app.set_url(url);
    }
    info!(timeout = ?cli.timeout(), "starting lazypost");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = %format!("{err:#}"), "event loop failed");
    }
    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    client: HttpClient,
) -> Result<()> {
    let (completion_sender, mut completion_receiver) = mpsc::unbounded_channel::<Completion>();

    let size = terminal.size()?;
    app.handle_event(AppEvent::Resize(size.width, size.height));
    let mut last_tick = Instant::now();

    loop {
        // Apply finished requests before drawing
        while let Ok(result) = completion_receiver.try_recv() {
            app.handle_event(AppEvent::RequestComplete(result));
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        let timeout = match app.tick_interval() {
            Some(interval) => interval.saturating_sub(last_tick.elapsed()).min(IDLE_POLL),
            None => IDLE_POLL,
        };

        let command = if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_event(AppEvent::Key(key)),
                Event::Resize(width, height) => app.handle_event(AppEvent::Resize(width, height)),
                _ => None,
            }
        } else {
            None
        };

        if let Some(interval) = app.tick_interval() {
            if last_tick.elapsed() >= interval {
                app.handle_event(AppEvent::Tick);
                last_tick = Instant::now();
            }
        } else {
            last_tick = Instant::now();
        }

        match command {
            Some(Command::Quit) => {
                info!("quit requested");
                return Ok(());
            }
            Some(Command::Dispatch(spec)) => {
                let client = client.clone();
                let sender = completion_sender.clone();
                tokio::spawn(async move {
                    let result = client
                        .execute(spec)
                        .await
                        .map_err(|err| format!("{err:#}"));
                    // The receiver only goes away when the app is quitting.
                    let _ = sender.send(result);
                });
            }
            Some(Command::CopyToClipboard(text)) => match clipboard::copy(&text) {
                Ok(()) => info!(bytes = text.len(), "copied to clipboard"),
                Err(err) => warn!(error = %format!("{err:#}"), "clipboard copy failed"),
            },
            None => {}
        }
    }
}
