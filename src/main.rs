use toolcat::adapters::ReqwestHttpClient;
use toolcat::app::{App, AppAction, AppMessage};
use toolcat::catalog::CatalogClient;
use toolcat::cli::{parse_args, run_cli_command};
use toolcat::debug::SharedClient;
use toolcat::logging::{default_log_path, init_tracing};
use toolcat::startup::{default_preferences, start_debug_system, StartupConfig};
use toolcat::terminal::{setup_panic_hook, TerminalManager};
use toolcat::ui;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// How often pending network log events are pulled into the panel.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

type Catalog = Arc<CatalogClient<Arc<SharedClient>>>;

/// Load tools and categories in the background.
fn spawn_refresh(catalog: &Catalog, tx: &mpsc::UnboundedSender<AppMessage>) {
    let (c, t) = (Arc::clone(catalog), tx.clone());
    tokio::spawn(async move {
        let message = match c.list_tools().await {
            Ok(tools) => AppMessage::ToolsLoaded(tools),
            Err(e) => AppMessage::failed("tools", &e),
        };
        let _ = t.send(message);
    });

    let (c, t) = (Arc::clone(catalog), tx.clone());
    tokio::spawn(async move {
        let message = match c.list_categories().await {
            Ok(categories) => AppMessage::CategoriesLoaded(categories),
            Err(e) => AppMessage::failed("categories", &e),
        };
        let _ = t.send(message);
    });
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    catalog: Catalog,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let (message_tx, mut message_rx) = mpsc::unbounded_channel::<AppMessage>();
    let mut event_stream = EventStream::new();
    let mut tick = tokio::time::interval(TICK_INTERVAL);

    app.begin_refresh(2);
    spawn_refresh(&catalog, &message_tx);

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = tick.tick() => {
                app.tick();
            }

            Some(message) = message_rx.recv() => {
                app.handle_message(message);
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match app.handle_key(key) {
                            AppAction::Quit => return Ok(()),
                            AppAction::Refresh => {
                                app.begin_refresh(2);
                                spawn_refresh(&catalog, &message_tx);
                            }
                            AppAction::None => {}
                        }
                    }
                    Some(Ok(Event::FocusGained)) => app.set_focused(true),
                    Some(Ok(Event::FocusLost)) => app.set_focused(false),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("Terminal event error: {}", e);
                    }
                    None => return Ok(()),
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // --version and --help exit here, before the terminal is touched
    let options = run_cli_command(parse_args(std::env::args()))?;
    let config = options.apply(StartupConfig::from_env());

    init_tracing(default_log_path());
    setup_panic_hook();

    let http = ReqwestHttpClient::with_origin(config.base_url.clone());
    let shared = Arc::new(SharedClient::new(Arc::new(http)));
    let debug_system = start_debug_system(&config, default_preferences(), &shared).await;
    if let Some(addr) = debug_system.server_addr {
        tracing::info!("Network debug dashboard at http://{}", addr);
    }

    let catalog = Arc::new(CatalogClient::new(Arc::clone(&shared)));
    let mut app = App::new(debug_system.ctx, config.export_dir.clone());

    let mut term_manager = TerminalManager::new()?;
    let result = run_app(term_manager.terminal(), &mut app, catalog).await;
    term_manager.restore();

    if let Some(handle) = debug_system.server_handle {
        handle.abort();
    }

    result
}
