use super::{ConnectionError, Request, Response, SendMessage};
use bytes::Bytes;

/// Logs every request instead of sending it and answers `200 OK`.
#[derive(Debug, Default)]
pub struct DryRun;

impl SendMessage<Request, Result<Response, ConnectionError>> for DryRun {
    fn send(&self, data: Request) -> Result<Response, ConnectionError> {
        info!(
            "[dry-run] {} {} {}",
            data.method(),
            data.uri(),
            String::from_utf8_lossy(data.body())
        );
        Ok(Response::new(Bytes::new()))
    }
}
