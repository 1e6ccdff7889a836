//! Translation of caller intent into typed requests.
//!
//! [`translate`] is a total function: every `(action_name, params)` pair maps
//! to exactly one [`Request`]. Recognized actions pull their fields out of
//! `params` with defaults; anything else falls back to [`DeepCompute`] with
//! the action name recorded as `input_data.problem`.
//!
//! Privilege flags are fixed here and never read from `params`.

use std::fmt;

use serde_json::Value;

use crate::request::{
    DeepCompute, ExecModule, Params, QueryRegistry, ReadState, Request, WILDCARD_QUERY,
};

/// Key under which the fallback records an unrecognized action name.
pub const PROBLEM_KEY: &str = "problem";

/// Actions with a dedicated request schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// `read` → [`ReadState`]
    Read,
    /// `compute` → [`DeepCompute`]
    Compute,
    /// `exec` → [`ExecModule`]
    Exec,
    /// `query_registry` → [`QueryRegistry`]
    QueryRegistry,
}

impl Action {
    /// Every recognized action.
    pub const ALL: [Action; 4] = [
        Action::Read,
        Action::Compute,
        Action::Exec,
        Action::QueryRegistry,
    ];

    /// Looks up a recognized action by exact, case-sensitive name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "read" => Some(Action::Read),
            "compute" => Some(Action::Compute),
            "exec" => Some(Action::Exec),
            "query_registry" => Some(Action::QueryRegistry),
            _ => None,
        }
    }

    /// The caller-facing name of this action.
    pub fn name(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Compute => "compute",
            Action::Exec => "exec",
            Action::QueryRegistry => "query_registry",
        }
    }

    /// Parameters this action's schema treats as required.
    ///
    /// [`translate`] still defaults them when absent; this list only drives
    /// the gateway's strict parameter policy.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Action::Read => &["key"],
            Action::Exec => &["module", "op"],
            Action::Compute | Action::QueryRegistry => &[],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Translates a caller operation into a [`Request`].
///
/// Never fails and has no side effects. Field values are carried over as
/// supplied, without coercion; missing fields become `null`, empty maps, or
/// the documented default.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use syscall_gate::{translate, Params, Request};
///
/// let params: Params = json!({"key": "x"}).as_object().cloned().unwrap();
/// match translate("read", params) {
///     Request::ReadState(read) => assert_eq!(read.key(), Some("x")),
///     other => panic!("unexpected request: {:?}", other),
/// }
///
/// // Unknown actions become a compute request describing the problem.
/// let params: Params = json!({"authorized": true}).as_object().cloned().unwrap();
/// let request = translate("frobnicate", params);
/// assert!(!request.is_authorized());
/// ```
pub fn translate(action_name: &str, mut params: Params) -> Request {
    match Action::parse(action_name) {
        Some(Action::Read) => Request::ReadState(ReadState::new(take_field(&mut params, "key"))),
        Some(Action::Compute) => Request::DeepCompute(DeepCompute::unauthorized(params)),
        Some(Action::Exec) => {
            let module = take_field(&mut params, "module");
            let operation = take_field(&mut params, "op");
            let args = match params.remove("params") {
                Some(Value::Object(args)) => args,
                _ => Params::new(),
            };
            Request::ExecModule(ExecModule::new(module, operation, args))
        }
        Some(Action::QueryRegistry) => {
            let query = match params.remove("query") {
                None | Some(Value::Null) => Value::String(WILDCARD_QUERY.to_string()),
                Some(query) => query,
            };
            Request::QueryRegistry(QueryRegistry::new(query))
        }
        None => {
            // The action name wins over a caller-supplied `problem` key.
            params.insert(
                PROBLEM_KEY.to_string(),
                Value::String(action_name.to_string()),
            );
            Request::DeepCompute(DeepCompute::unauthorized(params))
        }
    }
}

/// Returns the required fields of `action_name` that are absent or `null`.
///
/// Unrecognized actions have no schema and never miss anything.
pub fn missing_fields(action_name: &str, params: &Params) -> Vec<&'static str> {
    let Some(action) = Action::parse(action_name) else {
        return Vec::new();
    };

    action
        .required_fields()
        .iter()
        .copied()
        .filter(|field| matches!(params.get(*field), None | Some(Value::Null)))
        .collect()
}

/// Moves a field out of `params` untouched, `null` if absent.
fn take_field(params: &mut Params, key: &str) -> Value {
    params.remove(key).unwrap_or(Value::Null)
}
