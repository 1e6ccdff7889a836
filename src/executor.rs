use std::sync::Arc;

use crate::capability::SyscallCap;
use crate::envelope::Envelope;
use crate::response::Response;

/// The privileged side of the boundary.
///
/// An executor performs every real effect: state access, module execution,
/// external compute. This crate never looks inside; it only hands over one
/// [`Envelope`] per call and expects exactly one [`Response`] back.
///
/// `syscall` borrows a [`SyscallCap`], which only the
/// [`Gateway`](crate::Gateway) can mint and which lives only for one call.
/// Code holding an executor but no gateway has no way to call it:
///
/// ```compile_fail
/// use syscall_gate::{Envelope, Executor, Response};
///
/// fn bypass<E: Executor>(executor: &E, envelope: &mut Envelope) -> Response {
///     executor.syscall(&syscall_gate::SyscallCap::new(), envelope) // private constructor
/// }
/// ```
///
/// Implementations must be `Send + Sync`: a single gateway may be shared by
/// many callers, and the executor decides on its own how to serialize
/// access to whatever it guards.
pub trait Executor: Send + Sync {
    /// Handles one envelope and returns its response.
    ///
    /// The call is synchronous and blocks the submitting caller until it
    /// returns. The envelope's context may be used for bookkeeping; it is
    /// dropped after this call.
    fn syscall(&self, cap: &SyscallCap, envelope: &mut Envelope) -> Response;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn syscall(&self, cap: &SyscallCap, envelope: &mut Envelope) -> Response {
        (**self).syscall(cap, envelope)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn syscall(&self, cap: &SyscallCap, envelope: &mut Envelope) -> Response {
        (**self).syscall(cap, envelope)
    }
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
    fn syscall(&self, cap: &SyscallCap, envelope: &mut Envelope) -> Response {
        (**self).syscall(cap, envelope)
    }
}
