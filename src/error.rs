use std::io;
use std::process::ExitStatus;

use reqwest::StatusCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not reach the stream list: {0}")]
    Network(#[from] reqwest::Error),
    #[error("status code error: {status}")]
    HttpStatus { status: StatusCode },
    #[error("Invalid stream list URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("The stream list could not be parsed: {0}")]
    Parse(String),
    #[error("No streams could be fetched.")]
    EmptyResult,
    #[error("stream has no file with type: {format} (available: {available})")]
    FormatNotFound { format: String, available: String },
    #[error("Player {player:?} could not be launched: {source}")]
    PlayerLaunch { player: String, source: io::Error },
    #[error("Player exited abnormally: {0}")]
    PlayerExit(ExitStatus),
    #[error("Standard input was closed before a stream was chosen.")]
    InputClosed,
    #[error("I/O error on the terminal: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit status reported for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Network(_)
            | Error::HttpStatus { .. }
            | Error::InvalidUrl(_)
            | Error::Parse(_) => 5,
            Error::FormatNotFound { .. } | Error::PlayerLaunch { .. } | Error::PlayerExit(_) => 6,
            Error::EmptyResult => 7,
            Error::InputClosed | Error::Io(_) => 8,
        }
    }

    pub fn is_playback(&self) -> bool {
        self.exit_code() == 6
    }
}
