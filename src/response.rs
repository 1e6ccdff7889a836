//! Executor responses and their caller-facing projection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque set of state keys an executor changed while handling a call.
///
/// The gateway only asks whether it is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateDelta(BTreeSet<String>);

impl StateDelta {
    /// Creates an empty delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a changed key.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.0.insert(key.into())
    }

    /// Returns the number of changed keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no state changed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the changed keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<K> for StateDelta {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// The executor's answer to one envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    /// The call succeeded.
    Ok {
        /// Executor-defined result payload.
        result: Value,
        /// Keys changed by the call.
        #[serde(default)]
        state_delta: StateDelta,
    },
    /// The call failed.
    Err {
        /// Executor-defined error code.
        code: String,
        /// Human-readable error message.
        message: String,
    },
}

impl Response {
    /// Convenience constructor for a successful response.
    pub fn ok(result: Value, state_delta: StateDelta) -> Self {
        Response::Ok {
            result,
            state_delta,
        }
    }

    /// Convenience constructor for a failed response.
    pub fn err(code: impl Into<String>, message: impl Into<String>) -> Self {
        Response::Err {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Outcome status reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The executor completed the request.
    Success,
    /// The request failed.
    Error,
}

/// Caller-facing result of [`Gateway::submit`](crate::Gateway::submit).
///
/// Serializes as `{"status": "success", "result": .., "state_changed": ..}`
/// or `{"status": "error", "error_code": .., "error_msg": ..}`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use syscall_gate::{CallerResult, Response, StateDelta, Status};
///
/// let delta: StateDelta = ["counter"].into_iter().collect();
/// let result = CallerResult::from(Response::ok(json!(3), delta));
///
/// assert_eq!(result.status(), Status::Success);
/// assert_eq!(
///     serde_json::to_value(&result).unwrap(),
///     json!({"status": "success", "result": 3, "state_changed": true})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CallerResult {
    /// The executor completed the request.
    Success {
        /// Executor-defined result payload.
        result: Value,
        /// Whether the call changed any state.
        state_changed: bool,
    },
    /// The request failed.
    Error {
        /// Error code, verbatim from the executor.
        error_code: String,
        /// Error message, verbatim from the executor.
        error_msg: String,
    },
}

impl CallerResult {
    /// Returns the outcome status.
    pub fn status(&self) -> Status {
        match self {
            CallerResult::Success { .. } => Status::Success,
            CallerResult::Error { .. } => Status::Error,
        }
    }

    /// Returns `true` for [`CallerResult::Success`].
    pub fn is_success(&self) -> bool {
        self.status() == Status::Success
    }
}

impl From<Response> for CallerResult {
    fn from(response: Response) -> Self {
        match response {
            Response::Ok {
                result,
                state_delta,
            } => CallerResult::Success {
                result,
                state_changed: !state_delta.is_empty(),
            },
            Response::Err { code, message } => CallerResult::Error {
                error_code: code,
                error_msg: message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_delta_reports_no_change() {
        let result = CallerResult::from(Response::ok(json!("v"), StateDelta::new()));
        assert_eq!(
            result,
            CallerResult::Success {
                result: json!("v"),
                state_changed: false
            }
        );
    }

    #[test]
    fn non_empty_delta_reports_change() {
        let mut delta = StateDelta::new();
        delta.insert("x");
        let result = CallerResult::from(Response::ok(Value::Null, delta));

        assert!(matches!(
            result,
            CallerResult::Success {
                state_changed: true,
                ..
            }
        ));
    }

    #[test]
    fn error_is_surfaced_verbatim() {
        let result = CallerResult::from(Response::err("EPERM", "no permission"));
        assert_eq!(result.status(), Status::Error);
        assert_eq!(
            result,
            CallerResult::Error {
                error_code: "EPERM".to_string(),
                error_msg: "no permission".to_string(),
            }
        );
    }

    #[test]
    fn error_serializes_with_snake_case_fields() {
        let result = CallerResult::from(Response::err("E1", "boom"));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"status": "error", "error_code": "E1", "error_msg": "boom"})
        );
    }

    #[test]
    fn response_deserializes_without_delta() {
        let response: Response =
            serde_json::from_value(json!({"status": "ok", "result": 1})).unwrap();
        assert_eq!(response, Response::ok(json!(1), StateDelta::new()));
    }

    #[test]
    fn state_delta_deduplicates_keys() {
        let delta: StateDelta = ["a", "b", "a"].into_iter().collect();
        assert_eq!(delta.len(), 2);
        assert_eq!(delta.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
