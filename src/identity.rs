use std::fmt;

use serde::{Deserialize, Serialize};

/// Pid assigned to the user-space caller when no identity is configured.
pub const USERSPACE_PID: u64 = 1001;

/// Opaque identity token of the unprivileged caller.
///
/// An `Identity` is fixed when the [`Gateway`](crate::Gateway) is built and
/// stamped on every envelope it submits. Callers never pass it per call, so
/// they cannot claim another caller's identity.
///
/// # Examples
///
/// ```
/// use syscall_gate::Identity;
///
/// let baby = Identity::pid(1001);
/// assert_eq!(baby.to_string(), "pid:1001");
///
/// let named = Identity::named("shell");
/// assert_eq!(named.to_string(), "name:shell");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity {
    token: Token,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
enum Token {
    Pid(u64),
    Named(String),
}

impl Identity {
    /// Creates a numeric identity.
    pub fn pid(pid: u64) -> Self {
        Self {
            token: Token::Pid(pid),
        }
    }

    /// Creates a string identity.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            token: Token::Named(name.into()),
        }
    }

    /// Returns the numeric token, if this is a pid identity.
    pub fn as_pid(&self) -> Option<u64> {
        match self.token {
            Token::Pid(pid) => Some(pid),
            Token::Named(_) => None,
        }
    }

    /// Returns the string token, if this is a named identity.
    pub fn as_name(&self) -> Option<&str> {
        match &self.token {
            Token::Pid(_) => None,
            Token::Named(name) => Some(name),
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::pid(USERSPACE_PID)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Token::Pid(pid) => write!(f, "pid:{}", pid),
            Token::Named(name) => write!(f, "name:{}", name),
        }
    }
}
