//! Desk error types

use shared::ValidationError;
use staff_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Filter panel is not open")]
    PanelClosed,

    #[error("Unknown {field}: {value}")]
    UnknownOption { field: &'static str, value: String },

    #[error("Page {0} is out of range")]
    PageOutOfRange(u32),

    #[error("Listing controller has stopped")]
    ListingStopped,
}

pub type DeskResult<T> = Result<T, DeskError>;
