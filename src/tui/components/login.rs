//! # Login Page
//!
//! Centered e-mail/password form. Field values and errors live in core
//! `LoginState`; this module renders them and turns key presses into
//! `LoginInput` / `FocusLoginField` / `SubmitLogin` actions. `Ctrl+R` and
//! `Ctrl+F` open the sign-up and password recovery screens.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::Page;
use crate::core::action::Action;
use crate::core::forms::{Field, error_for};
use crate::core::state::LoginState;
use crate::tui::component::Component;
use crate::tui::components::auth_form::{
    button, card_area, card_block, edited, field_lines, heading, link, masked,
};
use crate::tui::event::TuiEvent;

const FORM_HEIGHT: u16 = 17;

/// Map a key press on the login page to a core action.
pub fn action_for(login: &LoginState, event: &TuiEvent) -> Option<Action> {
    if login.is_loading {
        return None;
    }
    let current = match login.focus {
        Field::Password => &login.form.password,
        _ => &login.form.email,
    };

    match event {
        TuiEvent::Tab | TuiEvent::CursorDown | TuiEvent::CursorUp => {
            let next = if login.focus == Field::Email {
                Field::Password
            } else {
                Field::Email
            };
            Some(Action::FocusLoginField(next))
        }
        TuiEvent::Submit => Some(Action::SubmitLogin),
        TuiEvent::Control('r') => Some(Action::Navigate(Page::Register)),
        TuiEvent::Control('f') => Some(Action::Navigate(Page::ForgotPassword)),
        _ => edited(current, event).map(|value| Action::LoginInput {
            field: login.focus,
            value,
        }),
    }
}

pub struct LoginView<'a> {
    pub login: &'a LoginState,
}

impl<'a> LoginView<'a> {
    pub fn new(login: &'a LoginState) -> Self {
        Self { login }
    }

    fn field(&self, field: Field, label: &str, value: String) -> Vec<Line<'static>> {
        field_lines(
            label,
            value,
            self.login.focus == field,
            error_for(&self.login.errors, field),
        )
    }
}

impl Component for LoginView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let form = card_area(area, FORM_HEIGHT);

        let mut lines = vec![heading("Entre na sua conta"), Line::default()];
        lines.extend(self.field(Field::Email, "E-mail", self.login.form.email.clone()));
        lines.extend(self.field(Field::Password, "Senha", masked(&self.login.form.password)));
        lines.push(button("[ Entrar ]", "Entrando...", self.login.is_loading));
        lines.push(Line::default());
        lines.push(link("Esqueceu sua senha? Ctrl+F".to_string()));
        lines.push(link("Não tem uma conta? Ctrl+R Cadastre-se".to_string()));

        let block = card_block(" Tab trocar campo · Enter entrar ");
        frame.render_widget(Paragraph::new(lines).block(block), form);
    }
}
