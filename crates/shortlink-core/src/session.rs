//! Mock authentication and the anonymous-attempt counter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{ATTEMPT_WINDOW_MS, FREE_ATTEMPT_LIMIT, MOCK_TOKEN, MOCK_USER_NAME};

#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("name must not be empty")]
    EmptyName,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub email: String,
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Any non-empty credentials sign in as the canned demo user.
pub fn login(credentials: &Credentials) -> Result<AuthResponse, AuthError> {
    if credentials.email.is_empty() {
        return Err(AuthError::EmptyEmail);
    }
    if credentials.password.is_empty() {
        return Err(AuthError::EmptyPassword);
    }
    Ok(AuthResponse {
        token: MOCK_TOKEN.to_owned(),
        user: User {
            email: credentials.email.clone(),
            name: MOCK_USER_NAME.to_owned(),
        },
    })
}

pub fn register(data: &RegisterData) -> Result<AuthResponse, AuthError> {
    if data.name.is_empty() {
        return Err(AuthError::EmptyName);
    }
    if data.email.is_empty() {
        return Err(AuthError::EmptyEmail);
    }
    if data.password.is_empty() {
        return Err(AuthError::EmptyPassword);
    }
    Ok(AuthResponse {
        token: MOCK_TOKEN.to_owned(),
        user: User {
            email: data.email.clone(),
            name: data.name.clone(),
        },
    })
}

/// Bounded counter of anonymous shortenings with an explicit reset deadline.
/// A value type: `record` returns the successor state, callers persist it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct AttemptWindow {
    pub count: u32,
    #[serde(rename = "resetTime")]
    pub reset_at_ms: f64,
}

impl AttemptWindow {
    /// Fresh window: zero attempts, resetting 24 h from `now_ms`.
    pub fn start(now_ms: f64) -> Self {
        Self {
            count: 0,
            reset_at_ms: now_ms + ATTEMPT_WINDOW_MS,
        }
    }

    /// Count one attempt. Past the deadline the window restarts at one.
    #[must_use]
    pub fn record(self, now_ms: f64) -> Self {
        if now_ms > self.reset_at_ms {
            Self {
                count: 1,
                reset_at_ms: now_ms + ATTEMPT_WINDOW_MS,
            }
        } else {
            Self {
                count: self.count + 1,
                ..self
            }
        }
    }

    pub fn exhausted(&self) -> bool {
        self.count > FREE_ATTEMPT_LIMIT
    }

    pub fn remaining(&self) -> u32 {
        FREE_ATTEMPT_LIMIT.saturating_sub(self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        let err = login(&Credentials {
            email: String::new(),
            password: "pw".into(),
        });
        assert_eq!(err, Err(AuthError::EmptyEmail));
        let err = login(&Credentials {
            email: "a@b.c".into(),
            password: String::new(),
        });
        assert_eq!(err, Err(AuthError::EmptyPassword));
        let ok = login(&Credentials {
            email: "a@b.c".into(),
            password: "pw".into(),
        })
        .unwrap();
        assert_eq!(ok.token, MOCK_TOKEN);
        assert_eq!(ok.user.email, "a@b.c");
    }

    #[test]
    fn register_echoes_the_submitted_name() {
        let ok = register(&RegisterData {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "pw".into(),
        })
        .unwrap();
        assert_eq!(ok.user.name, "Ada");
    }

    #[test]
    fn attempts_accumulate_within_the_window() {
        let w = AttemptWindow::start(0.0).record(100.0).record(200.0);
        assert_eq!(w.count, 2);
        assert_eq!(w.remaining(), 1);
        assert!(!w.exhausted());
    }

    #[test]
    fn fourth_attempt_exhausts_the_window() {
        let mut w = AttemptWindow::start(0.0);
        for i in 1..=3 {
            w = w.record(i as f64);
            assert!(!w.exhausted());
        }
        w = w.record(4.0);
        assert!(w.exhausted());
        assert_eq!(w.remaining(), 0);
    }

    #[test]
    fn window_resets_after_the_deadline() {
        let w = AttemptWindow::start(0.0).record(1.0).record(2.0).record(3.0);
        let after = w.record(ATTEMPT_WINDOW_MS + 1.0);
        assert_eq!(after.count, 1);
        assert_eq!(after.reset_at_ms, ATTEMPT_WINDOW_MS + 1.0 + ATTEMPT_WINDOW_MS);
    }

    #[test]
    fn attempt_window_round_trips_through_its_json_blob() {
        let w = AttemptWindow {
            count: 2,
            reset_at_ms: 123.0,
        };
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains("resetTime"));
        let back: AttemptWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);
    }
}
