//! # Sign-up Page
//!
//! Name, e-mail, password and confirmation. After a successful submit the
//! card shows the success notice until core redirects back to login.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::Page;
use crate::core::action::Action;
use crate::core::forms::{Field, error_for};
use crate::core::state::RegisterState;
use crate::tui::component::Component;
use crate::tui::components::auth_form::{
    button, card_area, card_block, edited, field_lines, heading, link, masked,
};
use crate::tui::event::TuiEvent;

const FORM_HEIGHT: u16 = 22;

fn step(focus: Field, forward: bool) -> Field {
    let fields = RegisterState::FIELDS;
    let index = fields.iter().position(|f| *f == focus).unwrap_or(0);
    let next = if forward {
        (index + 1) % fields.len()
    } else {
        (index + fields.len() - 1) % fields.len()
    };
    fields[next]
}

pub fn action_for(register: &RegisterState, event: &TuiEvent) -> Option<Action> {
    if register.is_loading || register.success.is_some() {
        return None;
    }
    match event {
        TuiEvent::Tab | TuiEvent::CursorDown => {
            Some(Action::FocusRegisterField(step(register.focus, true)))
        }
        TuiEvent::CursorUp => Some(Action::FocusRegisterField(step(register.focus, false))),
        TuiEvent::Submit => Some(Action::SubmitRegister),
        TuiEvent::Escape => Some(Action::Navigate(Page::Login)),
        _ => edited(register.value(register.focus), event).map(|value| Action::RegisterInput {
            field: register.focus,
            value,
        }),
    }
}

pub struct RegisterView<'a> {
    pub register: &'a RegisterState,
}

impl<'a> RegisterView<'a> {
    pub fn new(register: &'a RegisterState) -> Self {
        Self { register }
    }
}

fn label(field: Field) -> &'static str {
    match field {
        Field::Name => "Nome completo",
        Field::Email => "E-mail",
        Field::Password => "Senha",
        Field::ConfirmPassword => "Confirmar Senha",
    }
}

impl Component for RegisterView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let form = card_area(area, FORM_HEIGHT);
        let register = self.register;

        let mut lines = vec![heading("Criar conta"), Line::default()];
        for field in RegisterState::FIELDS {
            let value = match field {
                Field::Password | Field::ConfirmPassword => masked(register.value(field)),
                _ => register.value(field).to_string(),
            };
            lines.extend(field_lines(
                label(field),
                value,
                register.focus == field,
                error_for(&register.errors, field),
            ));
        }
        match register.success {
            Some(notice) => lines.push(
                Line::from(Span::styled(notice, Style::default().fg(Color::Green))).centered(),
            ),
            None => lines.push(button("[ Cadastrar ]", "Cadastrando...", register.is_loading)),
        }
        lines.push(Line::default());
        lines.push(link("Já tem uma conta? Esc para entrar".to_string()));

        let block = card_block(" Tab/↑↓ trocar campo · Enter cadastrar ");
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            form,
        );
    }
}
