//! Session-aware request pipeline.
//!
//! The client owns the credentials and the current session ticket, renews
//! the ticket before it expires, and dispatches authenticated requests.
//! Renewal is polling-on-use: every `request` re-checks the ticket age
//! inline, so no background timer is needed and the cost is one timestamp
//! comparison per call.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::params::Params;
use crate::resources::{Cluster, Node};
use crate::session::Session;
use crate::transport::{HttpRequest, Method, RequestBody, Transport, UreqTransport};
use chrono::Utc;
use serde_json::Value;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

const API_PREFIX: &str = "/api2/json";
const TICKET_PATH: &str = "/access/ticket";
const AUTH_COOKIE: &str = "PVEAuthCookie";
const CSRF_HEADER: &str = "CSRFPreventionToken";

/// Synchronous Proxmox VE API client.
///
/// Construction logs in immediately; afterwards the session is renewed
/// transparently whenever a request finds the ticket within the renewal
/// buffer of its expiry. Requests themselves are never retried — a failed
/// renewal or API call surfaces directly to the caller.
pub struct Client {
    config: ClientConfig,
    transport: Box<dyn Transport>,
    // Single-writer session state. The lock serializes the check-then-renew
    // sequence so concurrent callers cannot race duplicate logins.
    session: Mutex<Option<Session>>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Connect to a Proxmox node and log in.
    ///
    /// The first login is unconditional; the expiry check only governs
    /// renewals on later requests.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let transport = UreqTransport::new(config.verify_tls)?;
        Self::with_transport(config, Box::new(transport))
    }

    /// Create a client over any transport. Logs in before returning.
    pub fn with_transport(config: ClientConfig, transport: Box<dyn Transport>) -> Result<Self> {
        let client = Self {
            config,
            transport,
            session: Mutex::new(None),
        };
        let session = client.login()?;
        *client.session_lock() = Some(session);
        Ok(client)
    }

    /// Cluster-scoped API calls.
    pub fn cluster(&self) -> Cluster<'_> {
        Cluster::new(self)
    }

    /// API calls scoped to one named node.
    pub fn node(&self, name: impl Into<String>) -> Node<'_> {
        Node::new(self, name)
    }

    /// Perform one authenticated API call and unwrap the response envelope.
    ///
    /// `path` excludes the `/api2/json` prefix. Query parameters are applied
    /// only for GET; `body` is serialized to JSON only for mutating verbs.
    /// A renewal login may run first as a side effect, but the request
    /// itself executes exactly once, with no retry after any failure.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        body: Option<&Params>,
    ) -> Result<Value> {
        let (ticket, csrf_token) = self.ensure_valid()?;

        let mut headers = vec![("Cookie".to_string(), format!("{}={}", AUTH_COOKIE, ticket))];
        if method.is_mutating() {
            headers.push((CSRF_HEADER.to_string(), csrf_token));
        }

        let query = if method == Method::Get && !params.is_empty() {
            params.to_query()
        } else {
            Vec::new()
        };

        let body = match body {
            Some(params) if method.is_mutating() => Some(RequestBody::Json(params.to_json())),
            _ => None,
        };

        debug!(method = method.as_str(), path, "dispatching API request");
        let request = HttpRequest {
            method,
            url: format!("{}{}{}", self.config.base_url, API_PREFIX, path),
            headers,
            query,
            body,
        };
        let response = self.transport.execute(&request)?;
        if !is_success(response.status) {
            return Err(Error::Api {
                status: response.status,
                body: response.body,
            });
        }
        unwrap_envelope(&response.body)
    }

    /// GET without query parameters.
    pub fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::Get, path, &Params::new(), None)
    }

    /// POST with a JSON body.
    pub fn post(&self, path: &str, body: &Params) -> Result<Value> {
        self.request(Method::Post, path, &Params::new(), Some(body))
    }

    /// Renew the session if it is at or past its renewal threshold, then
    /// return the ticket and CSRF token to attach to the next request.
    ///
    /// On a failed renewal the previous session is left in place untouched.
    fn ensure_valid(&self) -> Result<(String, String)> {
        let mut guard = self.session_lock();
        match guard.as_ref() {
            Some(session)
                if !session.needs_renewal(
                    Utc::now(),
                    self.config.ticket_lifetime_secs,
                    self.config.renewal_buffer_secs,
                ) =>
            {
                Ok((session.ticket.clone(), session.csrf_token.clone()))
            }
            _ => {
                debug!("session ticket missing or near expiry, renewing");
                let session = self.login()?;
                let snapshot = (session.ticket.clone(), session.csrf_token.clone());
                *guard = Some(session);
                Ok(snapshot)
            }
        }
    }

    /// Request a fresh ticket from the authentication endpoint.
    ///
    /// Does not touch the stored session; callers replace it atomically
    /// with the returned value.
    fn login(&self) -> Result<Session> {
        debug!(realm = %self.config.realm, "requesting new session ticket");
        let request = HttpRequest {
            method: Method::Post,
            url: format!("{}{}{}", self.config.base_url, API_PREFIX, TICKET_PATH),
            headers: Vec::new(),
            query: Vec::new(),
            body: Some(RequestBody::Form(vec![
                ("username".to_string(), self.config.qualified_username()),
                ("password".to_string(), self.config.password.clone()),
            ])),
        };
        let response = self.transport.execute(&request)?;
        if !is_success(response.status) {
            return Err(Error::Authentication {
                body: response.body,
            });
        }

        let data = unwrap_envelope(&response.body)?;
        let ticket = data
            .get("ticket")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("login response missing data.ticket"))?
            .to_string();
        let csrf_token = data
            .get("CSRFPreventionToken")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("login response missing data.CSRFPreventionToken"))?
            .to_string();
        Ok(Session::new(ticket, csrf_token))
    }

    // Recover from lock poisoning: the session is a plain value and stays
    // consistent even if a holder panicked mid-update.
    fn session_lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[cfg(test)]
    fn session_snapshot(&self) -> Option<Session> {
        self.session_lock().clone()
    }

    #[cfg(test)]
    fn age_session(&self, secs: i64) {
        if let Some(session) = self.session_lock().as_mut() {
            session.created_at -= chrono::Duration::seconds(secs);
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn malformed(context: &str) -> Error {
    Error::MalformedResponse {
        context: context.to_string(),
    }
}

/// Pull the `data` field out of a response envelope.
///
/// An empty body and an envelope without `data` both mean "no data", not an
/// error; a non-empty body that is not a JSON object is malformed.
fn unwrap_envelope(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    let value: Value = serde_json::from_str(body)
        .map_err(|e| malformed(&format!("response body is not valid JSON: {}", e)))?;
    match value {
        Value::Object(mut map) => Ok(map.remove("data").unwrap_or(Value::Null)),
        other => Err(malformed(&format!(
            "expected envelope object, got: {}",
            other
        ))),
    }
}
