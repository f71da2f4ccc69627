pub mod app;
pub mod event;
pub mod layout;
pub mod widgets;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::app::{AppContext, Result};
use crate::config::Config;

use self::app::{App, Command};
use self::event::{AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const INPUT_POLL_RATE: Duration = Duration::from_millis(50);

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config).await;
    restore_terminal(&mut terminal)?;
    result
}

/// Leave raw mode and the alternate screen before a panic message is printed.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Single consumer loop: draw, wait for the next event, apply it, run its commands.
async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _input = EventHandler::new(INPUT_POLL_RATE).spawn(tx.clone());

    let mut app = App::new(
        config.feed.list_title(),
        ctx.converter.clone(),
        config.reader.tick_interval(),
    );

    let size = terminal.size()?;
    app.update(AppEvent::Resize(size.width, size.height));
    if dispatch(app.update(AppEvent::Start), &ctx, &tx) {
        return Ok(());
    }

    loop {
        terminal.draw(|frame| layout::render(frame, &app, &config.colors))?;

        let Some(event) = rx.recv().await else {
            break;
        };

        if dispatch(app.update(event), &ctx, &tx) {
            break;
        }
    }

    Ok(())
}

/// Start every command in the background. Returns true once `Quit` is seen.
fn dispatch(commands: Vec<Command>, ctx: &Arc<AppContext>, tx: &UnboundedSender<AppEvent>) -> bool {
    for command in commands {
        match command {
            Command::Quit => return true,
            Command::FetchList => {
                let ctx = ctx.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = ctx.feed.fetch_top_entries().await;
                    let _ = tx.send(AppEvent::ListFetched(result));
                });
            }
            Command::FetchContent { url, generation } => {
                let ctx = ctx.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = ctx.fetcher.fetch_raw(&url).await;
                    let _ = tx.send(AppEvent::ContentFetched { generation, result });
                });
            }
            Command::ScheduleTick(delay) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(AppEvent::Tick);
                });
            }
            Command::OpenInBrowser(url) => {
                if let Err(e) = open::that(&url) {
                    tracing::warn!("Failed to open {} in browser: {}", url, e);
                }
            }
        }
    }
    false
}
