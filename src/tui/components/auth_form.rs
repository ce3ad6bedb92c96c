//! Pieces shared by the login, sign-up and recovery screens: the centered
//! card, labelled fields with inline errors, and single-line field editing.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding};

use crate::tui::event::TuiEvent;

pub const FORM_WIDTH: u16 = 52;

/// Center a `FORM_WIDTH` x `height` card in `area`.
pub fn card_area(area: Rect, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [card] = Layout::horizontal([Constraint::Length(FORM_WIDTH)])
        .flex(Flex::Center)
        .areas(row);
    card
}

pub fn card_block(hint: &'static str) -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" SkillSwap ")
        .title_bottom(Line::from(hint).centered())
        .padding(Padding::new(2, 2, 1, 0))
}

pub fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD))).centered()
}

/// Label, value and error row (blank when there is no error).
pub fn field_lines(
    label: &str,
    value: String,
    focused: bool,
    error: Option<&'static str>,
) -> Vec<Line<'static>> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if focused { "› " } else { "  " };
    let error_line = match error {
        Some(message) => Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::Red),
        )),
        None => Line::default(),
    };
    vec![
        Line::from(Span::styled(format!("{marker}{label}"), label_style)),
        Line::from(format!("  {value}")),
        error_line,
    ]
}

pub fn masked(secret: &str) -> String {
    "•".repeat(secret.chars().count())
}

/// Primary button, or a progress label while a request is in flight.
pub fn button(label: &'static str, busy_label: &'static str, busy: bool) -> Line<'static> {
    let span = if busy {
        Span::styled(busy_label, Style::default().fg(Color::Yellow))
    } else {
        Span::styled(label, Style::default().fg(Color::Black).bg(Color::Cyan))
    };
    Line::from(span).centered()
}

pub fn link(text: String) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::Magenta))).centered()
}

/// The field value after an editing key, or `None` for keys that don't edit.
pub fn edited(current: &str, event: &TuiEvent) -> Option<String> {
    match event {
        TuiEvent::InputChar(c) => {
            let mut value = current.to_string();
            value.push(*c);
            Some(value)
        }
        TuiEvent::Paste(text) => Some(format!("{current}{}", text.trim())),
        TuiEvent::Backspace if !current.is_empty() => {
            let mut value = current.to_string();
            value.pop();
            Some(value)
        }
        _ => None,
    }
}
