//! # Form Drafts
//!
//! Login, registration and password-recovery drafts. Each form is a plain
//! struct of named fields with a single `validate()` that returns every
//! problem found, decoupled from rendering.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

pub const MIN_PASSWORD_LEN: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"))
}

/// `something@something.something`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Look up the first error for `field`.
pub fn error_for(errors: &[FieldError], field: Field) -> Option<&'static str> {
    errors.iter().find(|e| e.field == field).map(|e| e.message)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.email.trim().is_empty() {
            errors.push(FieldError::new(Field::Email, "E-mail é obrigatório"));
        } else if !is_valid_email(&self.email) {
            errors.push(FieldError::new(Field::Email, "E-mail inválido"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new(Field::Password, "Senha é obrigatória"));
        }
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new(Field::Name, "Nome é obrigatório"));
        }

        if self.email.trim().is_empty() {
            errors.push(FieldError::new(Field::Email, "E-mail é obrigatório"));
        } else if !is_valid_email(&self.email) {
            errors.push(FieldError::new(Field::Email, "E-mail inválido"));
        }

        if self.password.is_empty() {
            errors.push(FieldError::new(Field::Password, "Senha é obrigatória"));
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                Field::Password,
                "Senha deve ter pelo menos 6 caracteres",
            ));
        }

        if self.password != self.confirm_password {
            errors.push(FieldError::new(
                Field::ConfirmPassword,
                "As senhas não coincidem",
            ));
        }

        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> Vec<FieldError> {
        if self.email.is_empty() {
            vec![FieldError::new(Field::Email, "Por favor, insira seu e-mail")]
        } else if !is_valid_email(&self.email) {
            vec![FieldError::new(Field::Email, "Por favor, insira um e-mail válido")]
        } else {
            Vec::new()
        }
    }
}
