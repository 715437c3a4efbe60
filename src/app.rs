use crate::{api::TaskService, controller::Controller, state::View, storage::KeyValueStore, ui};
use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io;

pub struct App<S, A> {
    pub controller: Controller<S, A>,
}

impl<S, A> App<S, A>
where
    S: KeyValueStore,
    A: TaskService,
{
    pub fn new(controller: Controller<S, A>) -> Self {
        Self { controller }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    async fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.controller.update_view().await;
        let mut reader = EventStream::new();
        loop {
            terminal.draw(|f| {
                ui::draw(f, &self.controller.state, self.controller.entries())
            })?;
            match reader.next().await {
                Some(Ok(evt)) => {
                    if self.handle_event(evt).await {
                        break;
                    }
                }
                Some(Err(err)) => return Err(err.into()),
                None => break,
            }
        }
        Ok(())
    }

    /// Returns `true` when the application should quit.
    pub async fn handle_event(&mut self, evt: Event) -> bool {
        match evt {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key).await,
            _ => false,
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Tab => self.controller.state.focus_next(),
            KeyCode::BackTab => self.controller.state.focus_prev(),
            KeyCode::Enter => self.controller.activate().await,
            KeyCode::F(5) if self.controller.state.view == View::Tasks => {
                self.controller.refresh().await
            }
            KeyCode::Backspace => {
                if let Some(field) = self.controller.state.focused_field_mut() {
                    field.value.pop();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = self.controller.state.focused_field_mut() {
                    field.value.push(c);
                }
            }
            _ => {}
        }
        false
    }
}
