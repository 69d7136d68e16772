use crate::app_core::{AppCore, DataEventHandler};
use crate::commands::executor;
use crate::events::{AppCommand, BackgroundJob, DataEvent};
use crate::input::{Key, KeyEvent};
use crate::state::AppState;
use crate::ui::screens::ScreenKind;
use tally_api::endpoints::Amount;

pub const TEST_USER: &str = "tester@example.com";

/// Mock data event handler for tests (no real async tasks)
///
/// Commands run through `execute_command_sync`; the background jobs they
/// request are recorded instead of spawned.
#[derive(Default)]
pub struct MockDataHandler {
    pub jobs: Vec<BackgroundJob>,
}

impl MockDataHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataEventHandler for MockDataHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        let jobs = executor::execute_command_sync(command, state);
        self.jobs.extend(jobs);
    }
}

pub struct TestApp {
    core: AppCore<MockDataHandler>,
}

impl TestApp {
    /// Create a new test app on the dashboard with a 1000.00 monthly budget
    pub fn new() -> Self {
        let state = AppState::new(TEST_USER, Amount::from_cents(100_000));
        Self {
            core: AppCore::new(state, MockDataHandler::new()),
        }
    }

    /// Send a single key event
    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key));
    }

    /// Send a key event with modifiers
    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
    }

    /// Send multiple keys in sequence
    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Type text one character at a time
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(Key::Char(c));
        }
    }

    pub fn execute(&mut self, command: AppCommand) {
        self.core.execute(command);
    }

    /// Inject a data event (simulate an API response)
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    /// Get read-only access to current state
    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        self.core.state_mut()
    }

    /// Every job requested so far, oldest first
    pub fn jobs(&self) -> &[BackgroundJob] {
        &self.core.handler().jobs
    }

    pub fn last_job(&self) -> Option<&BackgroundJob> {
        self.jobs().last()
    }

    /// Forget recorded jobs
    pub fn take_jobs(&mut self) -> Vec<BackgroundJob> {
        std::mem::take(&mut self.core.handler_mut().jobs)
    }

    /// Message of the newest notification
    pub fn last_notification(&self) -> Option<String> {
        self.state()
            .notifications
            .latest()
            .map(|n| n.message.clone())
    }

    pub fn assert_screen(&self, expected: ScreenKind) {
        assert_eq!(
            self.state().current_kind(),
            expected,
            "Expected different screen. Current: {:?}",
            self.state().current_screen()
        );
    }

    /// Assert that the app should quit
    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    /// Assert that the app should NOT quit
    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
