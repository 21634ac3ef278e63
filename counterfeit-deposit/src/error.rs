use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("numeric instability after draw {draw}: {detail}")]
    NumericInstability { draw: u64, detail: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;

pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> ModelError {
    ModelError::InvalidParameter { name, reason: reason.into() }
}
