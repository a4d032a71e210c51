use super::{ConnectionError, Request, Response, SendMessage};
use bytes::Bytes;
use http::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: String,
    pub uri: String,
    pub authorization: String,
    pub content_type: String,
    pub body: Value,
    pub raw_body: String,
}

/// In-memory transport that keeps every request it accepts.
#[derive(Debug)]
pub struct Recording {
    requests: Mutex<Vec<Recorded>>,
    succeed: usize,
    status: u16,
}

impl Recording {
    pub fn new() -> Self {
        Self::failing_after(usize::MAX)
    }

    /// Accepts `succeed` requests, then refuses every connection.
    pub fn failing_after(succeed: usize) -> Self {
        Self {
            requests: Mutex::new(vec![]),
            succeed,
            status: 201,
        }
    }

    pub fn answering(status: u16) -> Self {
        Self {
            status,
            ..Self::new()
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

impl SendMessage<Request, Result<Response, ConnectionError>> for Recording {
    fn send(&self, data: Request) -> Result<Response, ConnectionError> {
        let header = |name: HeaderName| {
            data.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_owned()
        };
        let recorded = Recorded {
            method: data.method().to_string(),
            uri: data.uri().to_string(),
            authorization: header(AUTHORIZATION),
            content_type: header(CONTENT_TYPE),
            body: serde_json::from_slice(data.body()).unwrap(),
            raw_body: String::from_utf8(data.body().clone()).unwrap(),
        };
        let mut requests = self.requests.lock().unwrap();
        if requests.len() >= self.succeed {
            return Err(ConnectionError::Refused("connection refused".to_owned()));
        }
        requests.push(recorded);
        let response: Response = ::http::Response::builder()
            .status(self.status)
            .body(Bytes::new())
            .unwrap();
        Ok(response)
    }
}
