use crate::state::{AppState, AuthFocus, InputField, TaskFocus, View};
use crate::sync::TaskEntry;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame<'_>, state: &AppState, entries: &[TaskEntry]) {
    let size = f.size();
    match state.view {
        View::Auth => draw_auth(f, size, state),
        View::Tasks => draw_tasks(f, size, state, entries),
    }
}

fn draw_auth(f: &mut Frame<'_>, area: Rect, state: &AppState) {
    let panel = centered_rect(80, 80, area);
    f.render_widget(Clear, panel);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Task list: sign in");
    f.render_widget(block, panel);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(6),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(shrink(panel, 1));

    let forms = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(layout[0]);

    let auth = &state.auth;
    let register = Paragraph::new(vec![
        field_line(&auth.register_username, auth.focus == AuthFocus::RegisterUsername),
        field_line(&auth.register_password, auth.focus == AuthFocus::RegisterPassword),
        Line::from(""),
        button_line("Register", auth.focus == AuthFocus::RegisterButton),
    ])
    .block(Block::default().borders(Borders::ALL).title("Register"));
    f.render_widget(register, forms[0]);

    let login = Paragraph::new(vec![
        field_line(&auth.login_username, auth.focus == AuthFocus::LoginUsername),
        field_line(&auth.login_password, auth.focus == AuthFocus::LoginPassword),
        Line::from(""),
        button_line("Login", auth.focus == AuthFocus::LoginButton),
    ])
    .block(Block::default().borders(Borders::ALL).title("Login"));
    f.render_widget(login, forms[1]);

    let message = Paragraph::new(state.auth_message.clone().unwrap_or_default())
        .block(Block::default().borders(Borders::ALL).title("Message"))
        .wrap(Wrap { trim: true });
    f.render_widget(message, layout[1]);

    let help = action_line(vec![
        ("Tab", "Next field"),
        ("Enter", "Submit form"),
        ("Esc", "Quit"),
    ]);
    f.render_widget(Paragraph::new(help).alignment(Alignment::Center), layout[2]);

    draw_status(f, layout[4], state);
}

fn draw_tasks(f: &mut Frame<'_>, area: Rect, state: &AppState, entries: &[TaskEntry]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    let username = state.welcome_user.as_deref().unwrap_or_default();
    let banner = Paragraph::new(heading_line(&format!("Welcome, {username}!")))
        .block(Block::default().borders(Borders::ALL).title("Tasks"));
    f.render_widget(banner, chunks[0]);

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(12),
            ]
            .as_ref(),
        )
        .split(chunks[1]);
    let input = Paragraph::new(field_line(
        &state.task_input,
        state.task_focus == TaskFocus::Input,
    ))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(input, row[0]);
    let add = Paragraph::new(button_line("Add", state.task_focus == TaskFocus::AddButton))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(add, row[1]);
    let logout = Paragraph::new(button_line(
        "Logout",
        state.task_focus == TaskFocus::LogoutButton,
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(logout, row[2]);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| match entry {
            TaskEntry::Task(description) => ListItem::new(format!("• {description}")),
            TaskEntry::LoadError => ListItem::new(entry.text().to_string())
                .style(Style::default().fg(Color::Red)),
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("My tasks ({})", entries.len())),
    );
    f.render_widget(list, chunks[2]);

    let help = action_line(vec![
        ("Tab", "Focus"),
        ("Enter", "Add / activate"),
        ("F5", "Refresh"),
        ("Esc", "Quit"),
    ]);
    f.render_widget(Paragraph::new(help).alignment(Alignment::Center), chunks[3]);

    draw_status(f, chunks[4], state);
}

fn draw_status(f: &mut Frame<'_>, area: Rect, state: &AppState) {
    let status = Paragraph::new(state.status.clone())
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, area);
}

fn field_line(field: &InputField, focused: bool) -> Line<'static> {
    let prefix = if focused { "> " } else { "  " };
    let value = if field.is_secret {
        "*".repeat(field.value.chars().count())
    } else {
        field.value.clone()
    };
    let mut spans = vec![Span::raw(format!("{prefix}{}: ", field.label)), Span::raw(value)];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn button_line(label: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default()
            .bg(Color::Green)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(Span::styled(format!("[ {label} ]"), style))
}

fn action_line(items: Vec<(&str, &str)>) -> Line<'static> {
    let mut spans: Vec<Span> = Vec::new();
    for (idx, (key, label)) in items.into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default()
                .bg(Color::Blue)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {label}"),
            Style::default().fg(Color::Gray),
        ));
    }
    Line::from(spans)
}

fn heading_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);
    let vertical = popup_layout[1];
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical);
    horizontal[1]
}

fn shrink(area: Rect, padding: u16) -> Rect {
    Rect {
        x: area.x.saturating_add(padding),
        y: area.y.saturating_add(padding),
        width: area
            .width
            .saturating_sub(padding.saturating_mul(2).min(area.width)),
        height: area
            .height
            .saturating_sub(padding.saturating_mul(2).min(area.height)),
    }
}
