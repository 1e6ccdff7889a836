//! Capability-enforced syscall boundary for an unprivileged caller.
//!
//! The caller never touches state, spawns work, or reaches compute providers
//! itself. It submits an operation name and a parameter bag; everything else
//! happens on the privileged side of the boundary, behind an [`Executor`].
//!
//! - **Request codec**: [`translate`] maps any `(action, params)` pair to a
//!   closed [`Request`]. It is total and pure, and the requests it builds
//!   can never claim authorization.
//! - **Gateway**: [`Gateway::submit`] stamps the request with the caller's
//!   fixed [`Identity`], hands the [`Envelope`] to the executor, and projects
//!   the [`Response`] into a [`CallerResult`].
//! - **Capabilities**: [`Executor::syscall`] borrows a [`SyscallCap`],
//!   which only the gateway can mint and lends for a single call, so holding
//!   an executor is not a way around the gateway.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use syscall_gate::{
//!     CallerResult, Envelope, Executor, Gateway, Params, Request, Response, StateDelta,
//!     SyscallCap,
//! };
//!
//! struct Kernel;
//!
//! impl Executor for Kernel {
//!     fn syscall(&self, _cap: &SyscallCap, envelope: &mut Envelope) -> Response {
//!         match envelope.request() {
//!             Request::ReadState(read) => Response::ok(json!(read.key()), StateDelta::new()),
//!             _ => Response::err("ENOSYS", "not implemented"),
//!         }
//!     }
//! }
//!
//! let gateway = Gateway::new(Kernel);
//! let params: Params = json!({"key": "x"}).as_object().cloned().unwrap();
//!
//! assert_eq!(
//!     gateway.submit("read", params),
//!     CallerResult::Success { result: json!("x"), state_changed: false }
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod capability;
mod codec;
mod config;
mod envelope;
mod error;
mod executor;
mod gateway;
mod identity;
mod logging;
mod request;
mod response;

pub use capability::SyscallCap;
pub use codec::{missing_fields, translate, Action, PROBLEM_KEY};
pub use config::{GatewayConfig, ParamPolicy};
pub use envelope::Envelope;
pub use error::{CapabilityDenied, ConfigError, Error, ForbiddenPath};
pub use executor::Executor;
pub use gateway::{Gateway, GatewayBuilder, INVALID_PARAMS_CODE};
pub use identity::{Identity, USERSPACE_PID};
pub use request::{
    Authorization, DeepCompute, ExecModule, Params, QueryRegistry, ReadState, Request,
    SyscallKind, COMPUTE_TASK, WILDCARD_QUERY,
};
pub use response::{CallerResult, Response, StateDelta, Status};
