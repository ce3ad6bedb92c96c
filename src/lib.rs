//! SkillSwap library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Top-level pages reachable from the navigation bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Login,
    Register,
    ForgotPassword,
    Messages,
    Matches,
    Network,
    History,
    Reviews,
    Achievements,
}

impl Page {
    /// Pages shown as tabs once signed in, in display order.
    pub const TABS: [Page; 6] = [
        Page::Messages,
        Page::Matches,
        Page::Network,
        Page::History,
        Page::Reviews,
        Page::Achievements,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Login => "Entrar",
            Page::Register => "Criar conta",
            Page::ForgotPassword => "Recuperar senha",
            Page::Messages => "Mensagens",
            Page::Matches => "Matches",
            Page::Network => "Rede",
            Page::History => "Histórico",
            Page::Reviews => "Avaliações",
            Page::Achievements => "Conquistas",
        }
    }

    /// Login, registration and password recovery: the only pages open
    /// before sign-in.
    pub fn is_auth(self) -> bool {
        matches!(self, Page::Login | Page::Register | Page::ForgotPassword)
    }
}
