//! Wires user actions to the session manager and task sync, and keeps the
//! visible view in step with the session state.

use tracing::warn;

use crate::api::{ApiError, TaskService};
use crate::session::{LoginOutcome, RegisterOutcome, SessionManager, SessionState};
use crate::state::{AppState, TaskFocus, View};
use crate::storage::KeyValueStore;
use crate::sync::{AddOutcome, FetchOutcome, TaskEntry, TaskSync};

pub struct Controller<S, A> {
    pub state: AppState,
    session: SessionManager<S>,
    tasks: TaskSync,
    api: A,
}

impl<S, A> Controller<S, A>
where
    S: KeyValueStore,
    A: TaskService,
{
    pub fn new(api: A, store: S) -> Self {
        Self {
            state: AppState::default(),
            session: SessionManager::new(store),
            tasks: TaskSync::new(),
            api,
        }
    }

    pub fn session(&self) -> &SessionManager<S> {
        &self.session
    }

    #[cfg(test)]
    pub(crate) fn api(&self) -> &A {
        &self.api
    }

    pub fn entries(&self) -> &[TaskEntry] {
        self.tasks.entries()
    }

    /// Shows the panel matching the session state, fetching tasks when
    /// logged in.
    pub async fn update_view(&mut self) {
        match self.session.state() {
            SessionState::Authenticated(session) => {
                self.state.view = View::Tasks;
                self.state.welcome_user = Some(session.username);
                self.refresh().await;
            }
            SessionState::Unauthenticated => self.show_auth(),
        }
    }

    fn show_auth(&mut self) {
        self.state.view = View::Auth;
        self.state.welcome_user = None;
        self.state.task_focus = TaskFocus::default();
        self.tasks.clear();
    }

    pub async fn refresh(&mut self) {
        let outcome = self.tasks.fetch_tasks(&self.api, &mut self.session).await;
        self.after_fetch(outcome);
    }

    fn after_fetch(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::SessionEnded => self.show_auth(),
            FetchOutcome::Rendered(count) => {
                self.state.status = format!("{count} task(s)");
            }
            FetchOutcome::Failed => self.state.status = "Could not load tasks".into(),
            FetchOutcome::Skipped => {}
        }
    }

    pub async fn register(&mut self) {
        let username = self.state.auth.register_username.value.clone();
        let password = self.state.auth.register_password.value.clone();
        match self.session.register(&self.api, &username, &password).await {
            Ok(RegisterOutcome::Skipped) => {}
            Ok(RegisterOutcome::Replied(text)) => self.state.auth_message = text,
            Err(err) => self.request_failed("register", err),
        }
    }

    pub async fn login(&mut self) {
        let username = self.state.auth.login_username.value.clone();
        let password = self.state.auth.login_password.value.clone();
        match self.session.login(&self.api, &username, &password).await {
            Ok(LoginOutcome::Skipped) => {}
            Ok(LoginOutcome::LoggedIn(session)) => {
                self.state.status = format!("Logged in as {}", session.username);
                self.update_view().await;
            }
            Ok(LoginOutcome::Denied(error)) => self.state.auth_message = error,
            Err(err) => self.request_failed("login", err),
        }
    }

    pub async fn logout(&mut self) {
        self.session.logout();
        self.state.status = "Logged out".into();
        self.update_view().await;
    }

    pub async fn add_task(&mut self) {
        let outcome = self
            .tasks
            .add_task(&self.api, &mut self.session, &mut self.state.task_input.value)
            .await;
        if let AddOutcome::Submitted(fetch) = outcome {
            self.after_fetch(fetch);
        }
    }

    /// Enter on the focused element.
    pub async fn activate(&mut self) {
        match self.state.view {
            View::Auth if self.state.auth.focus.in_register_form() => self.register().await,
            View::Auth => self.login().await,
            View::Tasks => match self.state.task_focus {
                TaskFocus::Input | TaskFocus::AddButton => self.add_task().await,
                TaskFocus::LogoutButton => self.logout().await,
            },
        }
    }

    fn request_failed(&mut self, action: &str, err: ApiError) {
        warn!(action, error = %err, "request failed");
        self.state.status = format!("{action} failed: {err}");
    }
}
