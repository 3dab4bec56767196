//! Error types
//!
//! The simulation itself never fails; everything here comes from the
//! collaborators around it (settings files, the terminal).

use thiserror::Error;

/// Errors raised outside the simulation core
#[derive(Error, Debug)]
pub enum Error {
    /// Terminal or filesystem I/O failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for [`crate::Settings`]
    #[error("could not parse settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// Settings parsed but describe an unplayable game
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
