pub mod dry_run;
pub mod http;
#[cfg(test)]
pub mod recording;

use ::http::Request as HttpRequest;
use ::http::Response as HttpResponse;
use bytes::Bytes;
use thiserror::Error;

pub type Request = HttpRequest<Vec<u8>>;
pub type Response = HttpResponse<Bytes>;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("request to {uri} failed: {source}")]
    Transport {
        uri: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("cannot build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("malformed response: {0}")]
    Response(#[from] ::http::Error),
    #[cfg(test)]
    #[error("{0}")]
    Refused(String),
}

/// Delivers a message and returns what the other side answered.
pub trait SendMessage<T, R> {
    fn send(&self, data: T) -> R;
}

/// Anything that can carry a tracker request.
pub trait Transport: SendMessage<Request, Result<Response, ConnectionError>> {}

impl<T> Transport for T where T: SendMessage<Request, Result<Response, ConnectionError>> {}
