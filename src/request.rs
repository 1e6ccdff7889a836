//! Closed set of typed requests understood by the executor.
//!
//! Every payload type here has private fields and `pub(crate)` constructors.
//! The only way to obtain a [`Request`] from outside the crate is
//! [`translate`](crate::translate), so a caller cannot build a variant it did
//! not ask for, or flip a privilege flag on one it did.
//!
//! None of these types implement `Deserialize`, since that would be a second
//! construction path.
//!
//! ```compile_fail
//! use syscall_gate::{Authorization, DeepCompute, Params};
//!
//! // Payload fields are private:
//! let forged = DeepCompute {
//!     task_type: "compute".to_string(),
//!     input_data: Params::new(),
//!     constraints: Params::new(),
//!     authorized: Authorization::Unauthorized,
//! };
//! ```

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Untrusted key/value bag supplied by the caller.
pub type Params = Map<String, Value>;

/// Task type stamped on every [`DeepCompute`] request.
pub const COMPUTE_TASK: &str = "compute";

/// Registry query used when the caller does not supply one.
pub const WILDCARD_QUERY: &str = "*";

/// Fieldless discriminant of a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyscallKind {
    /// Read one key of executor-owned state.
    ReadState,
    /// Ask the executor to work out a general task.
    DeepCompute,
    /// Run an operation of a registered module.
    ExecModule,
    /// Look up entries in the module registry.
    QueryRegistry,
}

impl fmt::Display for SyscallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyscallKind::ReadState => write!(f, "READ_STATE"),
            SyscallKind::DeepCompute => write!(f, "DEEP_COMPUTE"),
            SyscallKind::ExecModule => write!(f, "EXEC_MODULE"),
            SyscallKind::QueryRegistry => write!(f, "QUERY_REGISTRY"),
        }
    }
}

/// Privilege flag carried by privileged-looking requests.
///
/// The type has a single inhabitant, so a request built by this crate can
/// never claim authorization. It serializes as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Authorization {
    /// The caller holds no authorization.
    #[default]
    Unauthorized,
}

impl Authorization {
    /// Always `false`.
    pub fn is_authorized(self) -> bool {
        match self {
            Authorization::Unauthorized => false,
        }
    }
}

impl Serialize for Authorization {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.is_authorized())
    }
}

/// One unit of caller intent, in executor terms.
///
/// Serializes as `{"syscall": "READ_STATE", "args": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "syscall", content = "args", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    /// See [`ReadState`].
    ReadState(ReadState),
    /// See [`DeepCompute`].
    DeepCompute(DeepCompute),
    /// See [`ExecModule`].
    ExecModule(ExecModule),
    /// See [`QueryRegistry`].
    QueryRegistry(QueryRegistry),
}

impl Request {
    /// Returns the syscall kind of this request.
    pub fn kind(&self) -> SyscallKind {
        match self {
            Request::ReadState(_) => SyscallKind::ReadState,
            Request::DeepCompute(_) => SyscallKind::DeepCompute,
            Request::ExecModule(_) => SyscallKind::ExecModule,
            Request::QueryRegistry(_) => SyscallKind::QueryRegistry,
        }
    }

    /// Returns `true` if any privilege flag on the request is set.
    ///
    /// Always `false` for requests built by this crate.
    pub fn is_authorized(&self) -> bool {
        match self {
            Request::DeepCompute(compute) => compute.authorized.is_authorized(),
            Request::ReadState(_) | Request::ExecModule(_) | Request::QueryRegistry(_) => false,
        }
    }
}

/// Read a single state key.
///
/// The key is kept exactly as the caller sent it: a JSON string, a number,
/// or `null` when absent. Interpreting non-string keys is the executor's
/// decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadState {
    key: Value,
}

impl ReadState {
    pub(crate) fn new(key: Value) -> Self {
        Self { key }
    }

    /// The requested key, if the caller supplied it as a string.
    pub fn key(&self) -> Option<&str> {
        self.key.as_str()
    }

    /// The requested key as supplied, `null` if absent.
    pub fn key_value(&self) -> &Value {
        &self.key
    }
}

/// General-purpose compute request, also used for unrecognized actions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeepCompute {
    task_type: String,
    input_data: Params,
    constraints: Params,
    authorized: Authorization,
}

impl DeepCompute {
    /// Builds an unauthorized compute request with no constraints.
    pub(crate) fn unauthorized(input_data: Params) -> Self {
        Self {
            task_type: COMPUTE_TASK.to_string(),
            input_data,
            constraints: Params::new(),
            authorized: Authorization::Unauthorized,
        }
    }

    /// Task type, always [`COMPUTE_TASK`].
    pub fn task_type(&self) -> &str {
        &self.task_type
    }

    /// Caller-supplied input data.
    pub fn input_data(&self) -> &Params {
        &self.input_data
    }

    /// Constraints on the computation.
    pub fn constraints(&self) -> &Params {
        &self.constraints
    }

    /// Privilege flag, always [`Authorization::Unauthorized`].
    pub fn authorized(&self) -> Authorization {
        self.authorized
    }
}

/// Run one operation of a registered module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecModule {
    module: Value,
    operation: Value,
    params: Params,
}

impl ExecModule {
    pub(crate) fn new(module: Value, operation: Value, params: Params) -> Self {
        Self {
            module,
            operation,
            params,
        }
    }

    /// Target module name, if supplied as a string.
    pub fn module(&self) -> Option<&str> {
        self.module.as_str()
    }

    /// Target module as supplied, `null` if absent.
    pub fn module_value(&self) -> &Value {
        &self.module
    }

    /// Operation to run on the module, if supplied as a string.
    pub fn operation(&self) -> Option<&str> {
        self.operation.as_str()
    }

    /// Operation as supplied, `null` if absent.
    pub fn operation_value(&self) -> &Value {
        &self.operation
    }

    /// Arguments for the operation.
    pub fn params(&self) -> &Params {
        &self.params
    }
}

/// Query the module registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRegistry {
    query: Value,
}

impl QueryRegistry {
    pub(crate) fn new(query: Value) -> Self {
        Self { query }
    }

    /// Registry query, if it is a string. [`WILDCARD_QUERY`] by default.
    pub fn query(&self) -> Option<&str> {
        self.query.as_str()
    }

    /// Registry query as supplied.
    pub fn query_value(&self) -> &Value {
        &self.query
    }
}
