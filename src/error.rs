use druid::PlatformError;
use thiserror::Error;

/// Errors that stop the viewer before the event loop starts
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
