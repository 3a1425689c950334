use std::sync::Arc;

use chitchat::adapters::{ReqwestHttpClient, TungsteniteTransport};
use chitchat::api::ChatApi;
use chitchat::app::{App, AppMessage};
use chitchat::auth::{CredentialsManager, Session};
use chitchat::cli::{parse_args, run_signup, version_line, CliCommand, USAGE};
use chitchat::config::ClientConfig;
use chitchat::logging::{default_log_path, init_logging};
use chitchat::terminal::{setup_panic_hook, TerminalManager};
use chitchat::ui;

use color_eyre::eyre::{eyre, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::{error, info};

fn main() -> Result<()> {
    let command = parse_args(std::env::args());
    match &command {
        CliCommand::Version => {
            println!("{}", version_line());
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Invalid(message) => {
            eprintln!("error: {}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
        _ => {}
    }

    color_eyre::install()?;

    if let Some(path) = default_log_path() {
        // Logging is best effort; the client works without it
        if let Err(e) = init_logging(&path) {
            eprintln!("Warning: {}", e);
        }
    }

    let config = ClientConfig::from_env()?;
    let store = CredentialsManager::new()
        .ok_or_else(|| eyre!("could not determine the home directory"))?;
    let runtime = tokio::runtime::Runtime::new()?;

    let http = ReqwestHttpClient::with_timeout(config.request_timeout())
        .map_err(|e| eyre!("failed to build HTTP client: {}", e))?;
    let api = ChatApi::new(&config, Arc::new(http));

    match command {
        CliCommand::Logout => {
            store.clear()?;
            println!("Signed out.");
            Ok(())
        }
        CliCommand::Signup => runtime.block_on(run_signup(&api)),
        CliCommand::RunTui { token } => {
            let token = match Session::resolve_token(token, &store) {
                Ok(token) => token,
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    std::process::exit(1);
                }
            };
            runtime.block_on(run(config, api, store, token))
        }
        CliCommand::Version | CliCommand::Help | CliCommand::Invalid(_) => Ok(()),
    }
}

/// Establish the session, connect the socket and run the chat screen.
async fn run(
    config: ClientConfig,
    api: ChatApi,
    store: CredentialsManager,
    token: String,
) -> Result<()> {
    let session = match Session::establish(&api, &token).await {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "Could not establish session");
            if e.requires_reauth() {
                // The stored token is dead; do not offer it again
                let _ = store.clear();
            }
            return Err(eyre!(e.user_message()));
        }
    };

    let transport = TungsteniteTransport::connect(config.ws_client_config())
        .await
        .map_err(|e| eyre!(e.user_message()))?;

    let mut app = App::new(session, api, Arc::new(transport), config.remote_policy);
    app.start();

    setup_panic_hook();
    let result = {
        let mut manager = TerminalManager::new()?;
        let result = run_app(manager.terminal(), &mut app).await;
        manager.restore();
        result
    };

    app.shutdown().await;
    info!("Exited cleanly");
    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                    // Fold a burst of pushes into one redraw
                    if let Some(rx) = message_rx.as_mut() {
                        app.drain_messages(rx);
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
