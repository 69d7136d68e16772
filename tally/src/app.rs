use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tally_api::{endpoints::Amount, Client};
use tally_auth::{Session, Settings};

use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::commands::{executor, handlers, AppCommand};
use crate::input::KeyEvent;
use crate::preferences::PreferencesStore;
use crate::state::AppState;

pub struct App {
    settings: Settings,
    session: Session,
}

impl App {
    pub fn new(settings: Settings, session: Session) -> Self {
        Self { settings, session }
    }

    /// Run the UI until the user quits. Returns a message to print once the
    /// terminal is restored.
    pub async fn run(&self) -> Result<Option<String>> {
        tracing::info!("tally starting for {}", self.session.user_id);

        let preferences = match PreferencesStore::new() {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!("Preferences disabled: {}", e);
                None
            }
        };

        let mut ui_state = AppState::new(
            self.session.user_id.clone(),
            Amount::from_major(self.settings.monthly_budget),
        );
        if let Some(store) = &preferences {
            match store.load().await {
                Ok(Some(saved)) => ui_state.apply_preferences(saved),
                Ok(None) => tracing::debug!("No saved preferences"),
                Err(e) => tracing::warn!("Failed to load preferences: {}", e),
            }
        }

        let mut terminal = self.init()?;

        let (data_tx, mut data_rx) = tokio::sync::mpsc::unbounded_channel();
        let mut task_manager = BackgroundTaskManager::new();

        let api_client = Arc::new(
            Client::new(self.settings.api_base(), &self.session.token)
                .with_timeout(Duration::from_secs(self.settings.request_timeout_secs)),
        );
        let data_loader = DataLoader::new(
            api_client,
            self.session.user_id.clone(),
            preferences,
            data_tx,
        );

        let mut event_stream = EventStream::new();

        // The dashboard is the landing screen
        executor::execute_command(
            AppCommand::Refresh,
            &mut ui_state,
            &mut task_manager,
            &data_loader,
        );

        tracing::info!("Entering main event loop");

        let mut interval = tokio::time::interval(Duration::from_millis(100));
        loop {
            terminal.draw(|f| {
                crate::ui::render_app(f, &ui_state);
            })?;

            tokio::select! {
                _ = interval.tick() => {
                    if let Some(throbber_state) = ui_state.loading_state() {
                        throbber_state.calc_next();
                    }
                    ui_state.notifications.prune_at(Instant::now());
                }
                Some(Ok(event)) = event_stream.next() => {
                    match event {
                        Event::Key(key) if matches!(key.kind, KeyEventKind::Press) => {
                            tracing::debug!("Key press: {:?}", key);
                            if let Some(command) = handlers::handle_key_input(KeyEvent::from(key), &ui_state) {
                                tracing::info!("Executing command: {:?}", command);
                                executor::execute_command(
                                    command,
                                    &mut ui_state,
                                    &mut task_manager,
                                    &data_loader,
                                );
                            }
                        }
                        _ => {
                            // Ignore other events
                        }
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Received data event: {:?}", data_event);
                    crate::state::reducer::reduce_data_event(&mut ui_state, data_event);
                }
            }

            // Check if we should quit
            if ui_state.should_quit {
                tracing::info!("Quit requested, exiting event loop");
                break;
            }
        }

        tracing::info!("Cleaning up application");

        // Cancel all background data loading tasks
        task_manager.cancel_all();

        self.exit(terminal)?;

        if ui_state.clear_session {
            tally_auth::sign_out()?;
            tracing::info!("Stored session removed");
        }

        Ok(ui_state.exit_message.take())
    }

    fn init(&self) -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn exit(
        &self,
        mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}
