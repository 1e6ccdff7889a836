use std::fmt;

use crate::identity::Identity;
use crate::request::SyscallKind;

/// Identity-bound logger for one gateway call.
///
/// `SyscallLog` is created by the gateway for each submission and tags every
/// event with the caller identity and the syscall kind. Parameters and
/// results are never logged, only their shape.
#[derive(Debug)]
pub(crate) struct SyscallLog<'a> {
    identity: &'a Identity,
    kind: Option<SyscallKind>,
}

impl<'a> SyscallLog<'a> {
    pub(crate) fn new(identity: &'a Identity) -> Self {
        Self {
            identity,
            kind: None,
        }
    }

    /// Returns a logger that also tags events with `kind`.
    pub(crate) fn with_kind(&self, kind: SyscallKind) -> Self {
        Self {
            identity: self.identity,
            kind: Some(kind),
        }
    }

    pub(crate) fn debug(&self, args: fmt::Arguments<'_>) {
        match self.kind {
            Some(kind) => tracing::debug!(identity = %self.identity, kind = %kind, "{}", args),
            None => tracing::debug!(identity = %self.identity, "{}", args),
        }
    }

    pub(crate) fn warn(&self, args: fmt::Arguments<'_>) {
        match self.kind {
            Some(kind) => tracing::warn!(identity = %self.identity, kind = %kind, "{}", args),
            None => tracing::warn!(identity = %self.identity, "{}", args),
        }
    }
}
