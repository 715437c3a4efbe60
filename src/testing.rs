use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, TaskService};
use crate::models::{Credentials, LoginReply, ServerReply, Task, TaskFetch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Register(Credentials),
    Login(Credentials),
    ListTasks { token: String },
    CreateTask { token: String, description: String },
}

/// Scripted in-process service. `None` entries answer with `ApiError::Unexpected`.
#[derive(Default)]
pub struct FakeService {
    calls: Mutex<Vec<Call>>,
    register: Mutex<VecDeque<Option<ServerReply>>>,
    login: Mutex<VecDeque<Option<LoginReply>>>,
    list: Mutex<VecDeque<Option<TaskFetch>>>,
    create: Mutex<VecDeque<Option<()>>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_register_message(self, message: &str) -> Self {
        self.register.lock().unwrap().push_back(Some(ServerReply {
            message: Some(message.into()),
            error: None,
        }));
        self
    }

    pub fn with_register_error(self, error: &str) -> Self {
        self.register.lock().unwrap().push_back(Some(ServerReply {
            message: None,
            error: Some(error.into()),
        }));
        self
    }

    pub fn with_login_token(self, token: &str) -> Self {
        self.login.lock().unwrap().push_back(Some(LoginReply::Granted {
            token: token.into(),
        }));
        self
    }

    pub fn with_login_denied(self, error: &str) -> Self {
        self.login.lock().unwrap().push_back(Some(LoginReply::Denied {
            error: Some(error.into()),
        }));
        self
    }

    pub fn with_login_failure(self) -> Self {
        self.login.lock().unwrap().push_back(None);
        self
    }

    pub fn with_tasks(self, descriptions: &[&str]) -> Self {
        let tasks = descriptions
            .iter()
            .map(|d| Task {
                description: (*d).to_string(),
                ..Default::default()
            })
            .collect();
        self.list
            .lock()
            .unwrap()
            .push_back(Some(TaskFetch::Tasks(tasks)));
        self
    }

    pub fn with_rejected_token(self, message: &str) -> Self {
        self.list
            .lock()
            .unwrap()
            .push_back(Some(TaskFetch::Rejected(message.into())));
        self
    }

    pub fn with_list_failure(self) -> Self {
        self.list.lock().unwrap().push_back(None);
        self
    }

    pub fn with_create_failure(self) -> Self {
        self.create.lock().unwrap().push_back(None);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TaskService for FakeService {
    async fn register(&self, credentials: &Credentials) -> Result<ServerReply, ApiError> {
        self.record(Call::Register(credentials.clone()));
        match self.register.lock().unwrap().pop_front() {
            Some(Some(reply)) => Ok(reply),
            Some(None) => Err(ApiError::Unexpected),
            None => Ok(ServerReply::default()),
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginReply, ApiError> {
        self.record(Call::Login(credentials.clone()));
        match self.login.lock().unwrap().pop_front() {
            Some(Some(reply)) => Ok(reply),
            Some(None) => Err(ApiError::Unexpected),
            None => Ok(LoginReply::Denied { error: None }),
        }
    }

    async fn list_tasks(&self, token: &str) -> Result<TaskFetch, ApiError> {
        self.record(Call::ListTasks {
            token: token.into(),
        });
        match self.list.lock().unwrap().pop_front() {
            Some(Some(fetch)) => Ok(fetch),
            Some(None) => Err(ApiError::Unexpected),
            None => Ok(TaskFetch::Tasks(Vec::new())),
        }
    }

    async fn create_task(&self, token: &str, description: &str) -> Result<(), ApiError> {
        self.record(Call::CreateTask {
            token: token.into(),
            description: description.into(),
        });
        match self.create.lock().unwrap().pop_front() {
            Some(None) => Err(ApiError::Unexpected),
            _ => Ok(()),
        }
    }
}
