use chrono::{DateTime, Duration, Utc};

/// An established API session.
///
/// The three fields are only ever replaced together, on a successful login;
/// a half-updated session never exists. Created empty (as `None` in the
/// client) and populated by the construction-time login.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Opaque token from the ticket endpoint, sent as a cookie value.
    pub ticket: String,
    /// Anti-forgery token, sent as a header on mutating verbs only.
    pub csrf_token: String,
    /// Wall-clock time the ticket was issued.
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(ticket: String, csrf_token: String) -> Self {
        Self {
            ticket,
            csrf_token,
            created_at: Utc::now(),
        }
    }

    /// Instant at which the ticket should be renewed: issue time plus the
    /// server-side validity window, minus the early-renewal buffer.
    pub fn renewal_time(&self, lifetime_secs: u64, buffer_secs: u64) -> DateTime<Utc> {
        self.created_at + Duration::seconds(lifetime_secs as i64)
            - Duration::seconds(buffer_secs as i64)
    }

    /// True once `now` has reached the renewal threshold.
    pub fn needs_renewal(&self, now: DateTime<Utc>, lifetime_secs: u64, buffer_secs: u64) -> bool {
        now >= self.renewal_time(lifetime_secs, buffer_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new("PVE:ticket".to_string(), "csrf".to_string())
    }

    #[test]
    fn test_renewal_time_arithmetic() {
        let s = session();
        assert_eq!(
            s.renewal_time(7200, 300),
            s.created_at + Duration::seconds(6900)
        );
    }

    #[test]
    fn test_fresh_session_does_not_need_renewal() {
        let s = session();
        assert!(!s.needs_renewal(s.created_at, 7200, 300));
        assert!(!s.needs_renewal(s.created_at + Duration::seconds(6899), 7200, 300));
    }

    #[test]
    fn test_renewal_due_at_and_after_threshold() {
        let s = session();
        // The threshold itself counts as due.
        assert!(s.needs_renewal(s.created_at + Duration::seconds(6900), 7200, 300));
        assert!(s.needs_renewal(s.created_at + Duration::seconds(7200), 7200, 300));
    }
}
