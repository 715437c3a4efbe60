#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Auth,
    Tasks,
}

#[derive(Debug, Clone, Default)]
pub struct InputField {
    pub label: String,
    pub value: String,
    pub is_secret: bool,
}

impl InputField {
    fn new(label: &str, is_secret: bool) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            is_secret,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthFocus {
    #[default]
    RegisterUsername,
    RegisterPassword,
    RegisterButton,
    LoginUsername,
    LoginPassword,
    LoginButton,
}

impl AuthFocus {
    pub fn next(self) -> Self {
        match self {
            AuthFocus::RegisterUsername => AuthFocus::RegisterPassword,
            AuthFocus::RegisterPassword => AuthFocus::RegisterButton,
            AuthFocus::RegisterButton => AuthFocus::LoginUsername,
            AuthFocus::LoginUsername => AuthFocus::LoginPassword,
            AuthFocus::LoginPassword => AuthFocus::LoginButton,
            AuthFocus::LoginButton => AuthFocus::RegisterUsername,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            AuthFocus::RegisterUsername => AuthFocus::LoginButton,
            AuthFocus::RegisterPassword => AuthFocus::RegisterUsername,
            AuthFocus::RegisterButton => AuthFocus::RegisterPassword,
            AuthFocus::LoginUsername => AuthFocus::RegisterButton,
            AuthFocus::LoginPassword => AuthFocus::LoginUsername,
            AuthFocus::LoginButton => AuthFocus::LoginPassword,
        }
    }

    pub fn in_register_form(self) -> bool {
        matches!(
            self,
            AuthFocus::RegisterUsername | AuthFocus::RegisterPassword | AuthFocus::RegisterButton
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFocus {
    #[default]
    Input,
    AddButton,
    LogoutButton,
}

impl TaskFocus {
    pub fn next(self) -> Self {
        match self {
            TaskFocus::Input => TaskFocus::AddButton,
            TaskFocus::AddButton => TaskFocus::LogoutButton,
            TaskFocus::LogoutButton => TaskFocus::Input,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            TaskFocus::Input => TaskFocus::LogoutButton,
            TaskFocus::AddButton => TaskFocus::Input,
            TaskFocus::LogoutButton => TaskFocus::AddButton,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthForms {
    pub register_username: InputField,
    pub register_password: InputField,
    pub login_username: InputField,
    pub login_password: InputField,
    pub focus: AuthFocus,
}

impl Default for AuthForms {
    fn default() -> Self {
        Self {
            register_username: InputField::new("Username", false),
            register_password: InputField::new("Password", true),
            login_username: InputField::new("Username", false),
            login_password: InputField::new("Password", true),
            focus: AuthFocus::default(),
        }
    }
}

impl AuthForms {
    pub fn focused_field_mut(&mut self) -> Option<&mut InputField> {
        match self.focus {
            AuthFocus::RegisterUsername => Some(&mut self.register_username),
            AuthFocus::RegisterPassword => Some(&mut self.register_password),
            AuthFocus::LoginUsername => Some(&mut self.login_username),
            AuthFocus::LoginPassword => Some(&mut self.login_password),
            AuthFocus::RegisterButton | AuthFocus::LoginButton => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    pub auth: AuthForms,
    pub task_input: InputField,
    pub task_focus: TaskFocus,
    /// Server text from the last register/login attempt.
    pub auth_message: Option<String>,
    pub welcome_user: Option<String>,
    pub status: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::Auth,
            auth: AuthForms::default(),
            task_input: InputField::new("New task", false),
            task_focus: TaskFocus::default(),
            auth_message: None,
            welcome_user: None,
            status: "Ready".into(),
        }
    }
}

impl AppState {
    /// The text field keystrokes go to in the current view, if any.
    pub fn focused_field_mut(&mut self) -> Option<&mut InputField> {
        match self.view {
            View::Auth => self.auth.focused_field_mut(),
            View::Tasks => match self.task_focus {
                TaskFocus::Input => Some(&mut self.task_input),
                TaskFocus::AddButton | TaskFocus::LogoutButton => None,
            },
        }
    }

    pub fn focus_next(&mut self) {
        match self.view {
            View::Auth => self.auth.focus = self.auth.focus.next(),
            View::Tasks => self.task_focus = self.task_focus.next(),
        }
    }

    pub fn focus_prev(&mut self) {
        match self.view {
            View::Auth => self.auth.focus = self.auth.focus.prev(),
            View::Tasks => self.task_focus = self.task_focus.prev(),
        }
    }
}
