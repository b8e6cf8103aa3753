//! Blocking HTTP transport for the client core.

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};
use ureq::typestate::{WithBody, WithoutBody};
use ureq::RequestBuilder;

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// 4xx/5xx responses are returned as data; the core decides what they mean.
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn without_body(builder: RequestBuilder<WithoutBody>) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    builder.call()
}

fn with_body(
    builder: RequestBuilder<WithBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = request.path.as_str();
        let headers = request.headers.as_slice();
        let body = request.body.as_deref();
        tracing::debug!(method = %request.method, %url, "sending request");

        let result = match request.method {
            HttpMethod::Get => without_body(with_headers(self.agent.get(url), headers)),
            HttpMethod::Delete => without_body(with_headers(self.agent.delete(url), headers)),
            HttpMethod::Post => with_body(with_headers(self.agent.post(url), headers), body),
            HttpMethod::Put => with_body(with_headers(self.agent.put(url), headers), body),
            HttpMethod::Patch => with_body(with_headers(self.agent.patch(url), headers), body),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        tracing::debug!(status, "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
