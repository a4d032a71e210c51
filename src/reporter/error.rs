use crate::app::ticket::TicketError;
use crate::connection::ConnectionError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot append to {path}: {source}")]
    Log {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Ticket(#[from] TicketError),
    #[error("no credentials for the issue tracker")]
    MissingCredentials,
    #[error("comment template: {0}")]
    Template(#[from] liquid::Error),
    #[error("cannot encode payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("cannot build request: {0}")]
    Request(#[from] http::Error),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
}
