use std::fmt;

/// Errors that can occur in the syscall gate crate.
#[derive(Debug)]
pub enum Error {
    /// A structurally forbidden direct operation was attempted
    CapabilityDenied(CapabilityDenied),
    /// Gateway configuration could not be loaded
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapabilityDenied(d) => write!(f, "Capability denied: {}", d),
            Error::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::CapabilityDenied(d) => Some(d),
            Error::Config(e) => Some(e),
        }
    }
}

impl From<CapabilityDenied> for Error {
    fn from(d: CapabilityDenied) -> Self {
        Error::CapabilityDenied(d)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

/// A direct path to privileged effects that the caller never holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForbiddenPath {
    /// Reading or writing executor-owned state without a syscall
    DirectStateAccess,
    /// Spawning a process or task
    ProcessSpawn,
    /// Calling an external compute provider directly
    DirectCompute,
}

impl ForbiddenPath {
    /// Every forbidden path.
    pub const ALL: [ForbiddenPath; 3] = [
        ForbiddenPath::DirectStateAccess,
        ForbiddenPath::ProcessSpawn,
        ForbiddenPath::DirectCompute,
    ];

    fn denial_message(self) -> &'static str {
        match self {
            ForbiddenPath::DirectStateAccess => {
                "caller has no direct state access; submit a READ_STATE request"
            }
            ForbiddenPath::ProcessSpawn => "caller cannot spawn processes; no spawn permission",
            ForbiddenPath::DirectCompute => {
                "caller cannot invoke compute providers; submit a DEEP_COMPUTE request"
            }
        }
    }
}

impl fmt::Display for ForbiddenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForbiddenPath::DirectStateAccess => write!(f, "direct state access"),
            ForbiddenPath::ProcessSpawn => write!(f, "process spawn"),
            ForbiddenPath::DirectCompute => write!(f, "direct compute"),
        }
    }
}

/// Failure signalled when a caller reaches for a forbidden direct path.
///
/// This is a programming error in the caller, not a recoverable condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityDenied {
    /// The path that was attempted
    pub path: ForbiddenPath,
    /// Human-readable message explaining the denial
    pub message: String,
}

impl CapabilityDenied {
    /// Creates the denial for `path`.
    pub fn new(path: ForbiddenPath) -> Self {
        Self {
            path,
            message: path.denial_message().to_string(),
        }
    }
}

impl fmt::Display for CapabilityDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl std::error::Error for CapabilityDenied {}

/// Error returned when a [`GatewayConfig`](crate::GatewayConfig) cannot be parsed.
#[derive(Debug)]
pub struct ConfigError {
    source: serde_json::Error,
}

impl ConfigError {
    pub(crate) fn new(source: serde_json::Error) -> Self {
        Self { source }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid gateway config: {}", self.source)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denial_names_the_path() {
        let denied = CapabilityDenied::new(ForbiddenPath::ProcessSpawn);
        assert_eq!(denied.path, ForbiddenPath::ProcessSpawn);
        assert!(denied.to_string().starts_with("process spawn: "));
    }

    #[test]
    fn every_path_has_a_message() {
        for path in ForbiddenPath::ALL {
            assert!(!CapabilityDenied::new(path).message.is_empty());
        }
    }

    #[test]
    fn error_wraps_denial() {
        let err: Error = CapabilityDenied::new(ForbiddenPath::DirectCompute).into();
        assert!(matches!(
            err,
            Error::CapabilityDenied(CapabilityDenied {
                path: ForbiddenPath::DirectCompute,
                ..
            })
        ));
        assert!(err.to_string().starts_with("Capability denied: direct compute"));
    }
}
