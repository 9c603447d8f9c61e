use crate::emit::EmitError;
use crate::fonts::FontError;
use crate::mail::MailError;
use crate::tokens::TokenError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error(transparent)]
    Font(#[from] FontError),
    #[error(transparent)]
    Mail(#[from] MailError),
}
