use crate::api::AnswerService;
use crate::config::Config;
use crate::ui::app::App;
use crate::ui::binder::QueryBinder;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::header::Header;
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Run the interactive UI until the user quits.
pub async fn run(config: &Config, service: Arc<dyn AnswerService>) -> anyhow::Result<()> {
    let header = Header::new(config.session.user_id.clone(), server_host(config));
    let mut app = App::new(QueryBinder::new(service, config.query.supersede));

    let (mut terminal, guard) = setup_terminal()?;
    let mut events = EventHandler::new(config.ui.tick_rate());
    tracing::info!(tick_rate_ms = config.ui.tick_rate_ms, "UI started");

    let result = event_loop(&mut terminal, &mut app, &header, events.receiver()).await;

    drop(guard);
    tracing::info!("UI stopped");
    result
}

/// Draw, then wait for either a terminal event or a query completion.
///
/// Generic over the backend so it can be driven headless.
pub async fn event_loop<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    header: &Header,
    events: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> anyhow::Result<()>
where
    B: Backend,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    loop {
        terminal.draw(|frame| draw(frame, app, header))?;
        if app.should_quit() {
            break;
        }

        tokio::select! {
            event = events.recv() => match event {
                Some(AppEvent::Key(key)) => handle_key(app, key),
                Some(AppEvent::Paste(text)) => app.on_paste(&text),
                Some(AppEvent::Tick) => app.on_tick(),
                // The next draw picks up the new size.
                Some(AppEvent::Resize(_, _)) => {}
                None => break,
            },
            _ = app.binder_mut().next_completion() => {}
        }
    }
    Ok(())
}

fn server_host(config: &Config) -> String {
    config
        .server
        .endpoint()
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| config.server.base_url.clone())
}
