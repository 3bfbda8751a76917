//! HTTP transport abstraction.
//!
//! Production traffic goes through a blocking ureq agent; tests substitute a
//! recording mock. The transport reports every received HTTP status as a
//! response — mapping non-success statuses to errors is the dispatcher's
//! job, since the auth and API endpoints map them differently.

use crate::error::{Error, Result};
use serde_json::Value;
use std::sync::Arc;

/// HTTP verbs the API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// POST/PUT/DELETE must carry the CSRF prevention header.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

/// One wire-level request, fully assembled by the dispatcher.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    /// URL-encoded form fields (the ticket endpoint).
    Form(Vec<(String, String)>),
    /// JSON payload for mutating API calls.
    Json(Value),
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Trait for the HTTP layer to allow mocking and abstraction.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Production transport backed by a blocking ureq agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Build an agent, optionally disabling TLS certificate verification.
    pub fn new(verify_tls: bool) -> Result<Self> {
        let agent = if verify_tls {
            ureq::AgentBuilder::new().build()
        } else {
            let connector = native_tls::TlsConnector::builder()
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true)
                .build()
                .map_err(|e| Error::Tls {
                    message: e.to_string(),
                })?;
            ureq::AgentBuilder::new()
                .tls_connector(Arc::new(connector))
                .build()
        };
        Ok(Self { agent })
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut req = self.agent.request(request.method.as_str(), &request.url);
        for (name, value) in &request.headers {
            req = req.set(name, value);
        }
        for (key, value) in &request.query {
            req = req.query(key, value);
        }

        let result = match &request.body {
            Some(RequestBody::Form(fields)) => {
                let pairs: Vec<(&str, &str)> = fields
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                req.send_form(&pairs)
            }
            Some(RequestBody::Json(value)) => req.send_json(value.clone()),
            None => req.call(),
        };

        match result {
            Ok(resp) => {
                let status = resp.status();
                let body = resp.into_string().map_err(|e| Error::Transport {
                    message: e.to_string(),
                })?;
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                Ok(HttpResponse { status, body })
            }
            Err(e) => Err(Error::Transport {
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Recording transport for tests: hands out canned responses in order
    /// and remembers every request it saw.
    #[derive(Clone, Default)]
    pub(crate) struct MockTransport {
        responses: Arc<Mutex<VecDeque<HttpResponse>>>,
        requests: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn push_response(&self, status: u16, body: &str) {
            self.responses.lock().unwrap().push_back(HttpResponse {
                status,
                body: body.to_string(),
            });
        }

        /// Queue a successful ticket-endpoint response.
        pub(crate) fn push_login_ok(&self, ticket: &str, csrf_token: &str) {
            let body = serde_json::json!({
                "data": {
                    "ticket": ticket,
                    "CSRFPreventionToken": csrf_token,
                }
            });
            self.push_response(200, &body.to_string());
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for MockTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| Error::Transport {
                    message: "mock transport: no response queued".to_string(),
                })
        }
    }

    #[test]
    fn test_mock_replays_in_order() {
        let mock = MockTransport::new();
        mock.push_response(200, "first");
        mock.push_response(500, "second");

        let req = HttpRequest {
            method: Method::Get,
            url: "https://pve.example:8006/api2/json/nodes".to_string(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        };
        assert_eq!(mock.execute(&req).unwrap().body, "first");
        assert_eq!(mock.execute(&req).unwrap().status, 500);
        assert_eq!(mock.requests().len(), 2);
    }
}
