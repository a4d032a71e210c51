use crate::app::event::InputError;
use crate::configuration::settings::SettingsError;
use crate::connection::ConnectionError;
use crate::reporter::error::ReportError;
use thiserror::Error;

/// Problems that stop a run before any report is sent.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("failed to read test events: {0}")]
    Input(#[from] InputError),
    #[error("failed to set up reporting: {0}")]
    Setup(#[from] ReportError),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
}
