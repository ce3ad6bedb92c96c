//! # Password Recovery Page
//!
//! A single e-mail field. Once the (simulated) link is sent the card
//! switches to a confirmation with resend and back-to-login shortcuts.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::Page;
use crate::core::action::Action;
use crate::core::forms::{Field, error_for};
use crate::core::state::RecoveryState;
use crate::tui::component::Component;
use crate::tui::components::auth_form::{
    button, card_area, card_block, edited, field_lines, heading, link,
};
use crate::tui::event::TuiEvent;

const FORM_HEIGHT: u16 = 15;

pub fn action_for(recovery: &RecoveryState, event: &TuiEvent) -> Option<Action> {
    if recovery.is_loading {
        return None;
    }
    if recovery.sent {
        return match event {
            TuiEvent::Submit => Some(Action::ResendRecovery),
            TuiEvent::Escape => Some(Action::Navigate(Page::Login)),
            _ => None,
        };
    }
    match event {
        TuiEvent::Submit => Some(Action::SubmitRecovery),
        TuiEvent::Escape => Some(Action::Navigate(Page::Login)),
        TuiEvent::Control('r') => Some(Action::Navigate(Page::Register)),
        _ => edited(&recovery.form.email, event).map(Action::RecoveryInput),
    }
}

pub struct ForgotPasswordView<'a> {
    pub recovery: &'a RecoveryState,
}

impl<'a> ForgotPasswordView<'a> {
    pub fn new(recovery: &'a RecoveryState) -> Self {
        Self { recovery }
    }

    fn request_lines(&self) -> Vec<Line<'static>> {
        let recovery = self.recovery;
        let mut lines = vec![
            Line::from(Span::styled(
                "Digite seu e-mail para receber o link de recuperação",
                Style::default().fg(Color::Gray),
            ))
            .centered(),
            Line::default(),
        ];
        lines.extend(field_lines(
            "E-mail",
            recovery.form.email.clone(),
            true,
            error_for(&recovery.errors, Field::Email),
        ));
        lines.push(button(
            "[ Enviar Link de Recuperação ]",
            "Enviando...",
            recovery.is_loading,
        ));
        lines.push(Line::default());
        lines.push(link("← Voltar para o login (Esc)".to_string()));
        lines.push(link("Não tem uma conta? Ctrl+R Cadastre-se".to_string()));
        lines
    }

    fn sent_lines(&self) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                "E-mail enviado com sucesso! Verifique sua caixa de entrada.",
                Style::default().fg(Color::Green),
            ))
            .centered(),
            Line::from(Span::styled(
                format!("Enviamos o link para {}", self.recovery.form.email),
                Style::default().fg(Color::Gray),
            ))
            .centered(),
            Line::default(),
            link("↻ Reenviar e-mail (Enter)".to_string()),
            link("← Voltar para o login (Esc)".to_string()),
        ]
    }
}

impl Component for ForgotPasswordView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let form = card_area(area, FORM_HEIGHT);

        let mut lines = vec![heading("Recuperar Senha"), Line::default()];
        if self.recovery.sent {
            lines.extend(self.sent_lines());
        } else {
            lines.extend(self.request_lines());
        }

        let block = card_block(" Enter enviar · Esc voltar ");
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            form,
        );
    }
}
