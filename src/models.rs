use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Username and password as typed into a form, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Returns `None` when either value is empty after trimming.
    pub fn parse(username: &str, password: &str) -> Option<Self> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Task {
    #[serde(default, deserialize_with = "description_text")]
    pub description: String,
    /// Server-assigned fields (`_id`, `completed`, ...) kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Strings as-is, `null` as empty, anything else as its JSON text.
fn description_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTask<'a> {
    pub description: &'a str,
}

/// Body of the register and login endpoints.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct ServerReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ServerReply {
    /// `message` when present and non-empty, otherwise `error`.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or(self.error.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenReply {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginReply {
    Granted { token: String },
    Denied { error: Option<String> },
}

/// What the task listing endpoint answered with.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskFetch {
    Tasks(Vec<Task>),
    /// `{message}` object: the token is missing, invalid or expired.
    Rejected(String),
}

impl TaskFetch {
    /// Interprets a decoded body. Anything that is neither a list nor an
    /// object carrying a non-empty `message` yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(_) => serde_json::from_value(value).ok().map(TaskFetch::Tasks),
            Value::Object(mut obj) => match obj.remove("message") {
                Some(Value::String(message)) if !message.is_empty() => {
                    Some(TaskFetch::Rejected(message))
                }
                _ => None,
            },
            _ => None,
        }
    }
}
