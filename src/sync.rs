use tracing::{debug, info, warn};

use crate::api::TaskService;
use crate::models::TaskFetch;
use crate::session::SessionManager;
use crate::storage::KeyValueStore;

pub const LOAD_ERROR_TEXT: &str = "Error loading tasks.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEntry {
    Task(String),
    LoadError,
}

impl TaskEntry {
    pub fn text(&self) -> &str {
        match self {
            TaskEntry::Task(description) => description,
            TaskEntry::LoadError => LOAD_ERROR_TEXT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// No session; nothing was sent.
    Skipped,
    Rendered(usize),
    /// The server refused the token and the session was cleared.
    SessionEnded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Skipped,
    Submitted(FetchOutcome),
}

/// The rendered task list, always the result of the last completed fetch.
#[derive(Debug, Default)]
pub struct TaskSync {
    entries: Vec<TaskEntry>,
}

impl TaskSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TaskEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub async fn fetch_tasks<S, A>(
        &mut self,
        api: &A,
        session: &mut SessionManager<S>,
    ) -> FetchOutcome
    where
        S: KeyValueStore,
        A: TaskService + ?Sized,
    {
        let Some(current) = session.current_session() else {
            return FetchOutcome::Skipped;
        };
        match api.list_tasks(&current.token).await {
            Ok(TaskFetch::Tasks(tasks)) => {
                debug!(count = tasks.len(), "tasks fetched");
                self.entries = tasks
                    .into_iter()
                    .map(|task| TaskEntry::Task(task.description))
                    .collect();
                FetchOutcome::Rendered(self.entries.len())
            }
            Ok(TaskFetch::Rejected(message)) => {
                info!(%message, "token rejected, ending session");
                session.logout();
                self.entries.clear();
                FetchOutcome::SessionEnded
            }
            Err(err) => {
                warn!(error = %err, "failed to load tasks");
                self.entries = vec![TaskEntry::LoadError];
                FetchOutcome::Failed
            }
        }
    }

    /// Submits `input` as a new task, clears it, then re-fetches whatever the
    /// create request answered.
    pub async fn add_task<S, A>(
        &mut self,
        api: &A,
        session: &mut SessionManager<S>,
        input: &mut String,
    ) -> AddOutcome
    where
        S: KeyValueStore,
        A: TaskService + ?Sized,
    {
        let description = input.trim();
        if description.is_empty() {
            return AddOutcome::Skipped;
        }
        let Some(current) = session.current_session() else {
            return AddOutcome::Skipped;
        };
        if let Err(err) = api.create_task(&current.token, description).await {
            debug!(error = %err, "create task result ignored");
        }
        input.clear();
        AddOutcome::Submitted(self.fetch_tasks(api, session).await)
    }
}
