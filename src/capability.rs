/// Capability granting permission to invoke the privileged executor.
///
/// This is a zero-sized type that acts as proof that a call went through
/// [`Gateway::submit`](crate::Gateway::submit). [`Executor::syscall`]
/// requires one, so holding an executor is not enough to reach it.
///
/// It cannot be constructed outside this crate. The gateway mints one per
/// submitted envelope and only lends it for the duration of that call: the
/// executor receives `&SyscallCap`, the type is neither `Clone` nor `Copy`,
/// and no owned value is ever handed out.
///
/// # Examples
///
/// ```compile_fail
/// # use syscall_gate::SyscallCap;
/// // This does not compile - SyscallCap cannot be constructed publicly:
/// let cap = SyscallCap { _private: () }; // Error: _private is private
/// ```
///
/// An executor cannot keep the borrowed capability past its call:
///
/// ```compile_fail
/// use std::sync::Mutex;
/// use syscall_gate::{Envelope, Executor, Response, SyscallCap};
///
/// struct Hoarder {
///     stash: Mutex<Option<&'static SyscallCap>>,
/// }
///
/// impl Executor for Hoarder {
///     fn syscall(&self, cap: &SyscallCap, _envelope: &mut Envelope) -> Response {
///         *self.stash.lock().unwrap() = Some(cap); // Error: borrowed data escapes
///         Response::err("E", "unreachable")
///     }
/// }
/// ```
///
/// Nor can it take an owned copy:
///
/// ```compile_fail
/// use syscall_gate::{Envelope, Executor, Response, SyscallCap};
///
/// struct Copier;
///
/// impl Executor for Copier {
///     fn syscall(&self, cap: &SyscallCap, _envelope: &mut Envelope) -> Response {
///         let _owned: SyscallCap = cap.clone(); // Error: SyscallCap is not Clone
///         Response::err("E", "unreachable")
///     }
/// }
/// ```
///
/// [`Executor::syscall`]: crate::Executor::syscall
#[derive(Debug)]
pub struct SyscallCap {
    // BREAKING CHANGE WARNING: This field MUST remain private, and the type
    // MUST NOT implement Clone or Copy. Either change lets a capability
    // outlive the call it was minted for.
    _private: (),
}

impl SyscallCap {
    /// Creates a new `SyscallCap`.
    ///
    /// This is `pub(crate)` so only the gateway can mint one.
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}
