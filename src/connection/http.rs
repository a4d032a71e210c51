use super::{ConnectionError, Request, Response, SendMessage};
use reqwest::blocking::Client;
use std::time::Duration;

pub fn build_client(timeout: Option<Duration>) -> Result<Client, ConnectionError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(ConnectionError::Client)
}

impl SendMessage<Request, Result<Response, ConnectionError>> for Client {
    fn send(&self, data: Request) -> Result<Response, ConnectionError> {
        let (parts, body) = data.into_parts();
        let uri = parts.uri.to_string();
        let transport = |source| ConnectionError::Transport {
            uri: uri.clone(),
            source,
        };
        let response = self
            .request(parts.method, uri.as_str())
            .headers(parts.headers)
            .body(body)
            .send()
            .map_err(transport)?;
        let status = response.status();
        let body = response.bytes().map_err(transport)?;
        let response: Response = ::http::Response::builder().status(status).body(body)?;
        Ok(response)
    }
}
