use serde::Serialize;

use crate::identity::Identity;
use crate::request::{Params, Request};

/// A request stamped with the caller's identity, as seen by the executor.
///
/// The gateway builds one envelope per [`submit`](crate::Gateway::submit),
/// lends it mutably to the executor, and drops it once the executor answers.
/// `context` starts empty and belongs to the executor's own bookkeeping.
///
/// Envelopes cannot be assembled outside this crate:
///
/// ```compile_fail
/// use syscall_gate::{Envelope, Identity, Params, Request};
///
/// fn forge(request: Request) -> Envelope {
///     Envelope { request, identity: Identity::pid(0), context: Params::new() }
/// }
/// ```
///
/// Nor duplicated by the executor to outlive the call:
///
/// ```compile_fail
/// use syscall_gate::{Envelope, Executor, Response, SyscallCap};
///
/// struct Keeper;
///
/// impl Executor for Keeper {
///     fn syscall(&self, _cap: &SyscallCap, envelope: &mut Envelope) -> Response {
///         let _kept: Envelope = envelope.clone(); // Error: Envelope is not Clone
///         Response::err("E", "unreachable")
///     }
/// }
/// ```
#[derive(Debug, PartialEq, Serialize)]
pub struct Envelope {
    request: Request,
    identity: Identity,
    context: Params,
}

impl Envelope {
    pub(crate) fn new(request: Request, identity: Identity) -> Self {
        Self {
            request,
            identity,
            context: Params::new(),
        }
    }

    /// The translated caller request.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Identity of the caller that submitted the request.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Executor scratch space for this call.
    pub fn context(&self) -> &Params {
        &self.context
    }

    /// Mutable executor scratch space for this call.
    pub fn context_mut(&mut self) -> &mut Params {
        &mut self.context
    }
}
