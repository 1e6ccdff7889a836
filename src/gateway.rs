use std::convert::Infallible;
use std::fmt;

use crate::{
    capability::SyscallCap,
    codec::{self, Action},
    config::{GatewayConfig, ParamPolicy},
    envelope::Envelope,
    error::{CapabilityDenied, Error, ForbiddenPath},
    executor::Executor,
    identity::Identity,
    logging::SyscallLog,
    request::Params,
    response::{CallerResult, Response},
};

/// Error code returned when the strict parameter policy rejects a call.
pub const INVALID_PARAMS_CODE: &str = "EINVAL";

/// The only entry point an unprivileged caller has.
///
/// A `Gateway` owns the caller's [`Identity`] and the [`Executor`] it talks
/// to. Every operation goes through [`submit`](Self::submit): the operation
/// is translated into a typed request, wrapped in an [`Envelope`], handed to
/// the executor with a freshly minted [`SyscallCap`], and the executor's
/// [`Response`] is projected into a [`CallerResult`].
///
/// There is no accessor for the executor and no other method that reaches
/// it. The gateway keeps no state between calls, so one instance can be
/// shared by reference across threads.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use syscall_gate::{
///     CallerResult, Envelope, Executor, Gateway, Identity, Params, Response, StateDelta,
///     SyscallCap,
/// };
///
/// struct Echo;
///
/// impl Executor for Echo {
///     fn syscall(&self, _cap: &SyscallCap, envelope: &mut Envelope) -> Response {
///         Response::ok(json!(envelope.identity().to_string()), StateDelta::new())
///     }
/// }
///
/// let gateway = Gateway::builder(Echo).identity(Identity::pid(1001)).build();
/// let result = gateway.submit("read", Params::new());
///
/// assert_eq!(
///     result,
///     CallerResult::Success { result: json!("pid:1001"), state_changed: false }
/// );
/// ```
pub struct Gateway<E> {
    identity: Identity,
    param_policy: ParamPolicy,
    executor: E,
}

impl<E: Executor> Gateway<E> {
    /// Creates a gateway with the default configuration.
    pub fn new(executor: E) -> Self {
        Self::from_config(executor, GatewayConfig::default())
    }

    /// Creates a gateway from a loaded configuration.
    pub fn from_config(executor: E, config: GatewayConfig) -> Self {
        Self {
            identity: config.identity,
            param_policy: config.param_policy,
            executor,
        }
    }

    /// Creates a gateway from a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `json` is not a valid
    /// [`GatewayConfig`]. The executor is dropped in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use syscall_gate::{Envelope, Error, Executor, Gateway, Identity, Response, SyscallCap};
    ///
    /// struct Deny;
    ///
    /// impl Executor for Deny {
    ///     fn syscall(&self, _cap: &SyscallCap, _envelope: &mut Envelope) -> Response {
    ///         Response::err("EPERM", "denied")
    ///     }
    /// }
    ///
    /// let gateway = Gateway::from_json_config(Deny, r#"{"identity": "shell"}"#)?;
    /// assert_eq!(gateway.identity(), &Identity::named("shell"));
    ///
    /// let err = Gateway::from_json_config(Deny, r#"{"identity": 1, "root": true}"#).unwrap_err();
    /// assert!(matches!(err, Error::Config(_)));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn from_json_config(executor: E, json: &str) -> Result<Self, Error> {
        let config = GatewayConfig::from_json(json)?;
        Ok(Self::from_config(executor, config))
    }

    /// Starts building a gateway around `executor`.
    pub fn builder(executor: E) -> GatewayBuilder<E> {
        GatewayBuilder {
            executor,
            config: GatewayConfig::default(),
        }
    }

    /// Submits one caller operation and returns its result.
    ///
    /// Exactly one executor call is made per invocation, except when the
    /// strict parameter policy rejects the operation before translation.
    /// Executor failures are returned as [`CallerResult::Error`] with the
    /// executor's code and message unchanged; this method never panics on
    /// their behalf and never returns the executor's own types.
    pub fn submit(&self, action_name: &str, params: Params) -> CallerResult {
        let log = SyscallLog::new(&self.identity);

        if let Some(rejection) = self.check_params(&log, action_name, &params) {
            return rejection;
        }

        let request = codec::translate(action_name, params);
        let log = log.with_kind(request.kind());
        log.debug(format_args!("submitting syscall"));

        let mut envelope = Envelope::new(request, self.identity.clone());
        let response = self.executor.syscall(&SyscallCap::new(), &mut envelope);
        drop(envelope);

        match &response {
            Response::Ok { state_delta, .. } => log.debug(format_args!(
                "syscall completed ({} state key(s) changed)",
                state_delta.len()
            )),
            Response::Err { code, .. } => log.warn(format_args!("syscall failed with {}", code)),
        }

        CallerResult::from(response)
    }

    /// Applies the missing-parameter policy, returning a local rejection.
    fn check_params(
        &self,
        log: &SyscallLog<'_>,
        action_name: &str,
        params: &Params,
    ) -> Option<CallerResult> {
        if self.param_policy == ParamPolicy::Permissive {
            return None;
        }

        let missing = codec::missing_fields(action_name, params);
        if missing.is_empty() {
            return None;
        }

        // Only recognized actions have required fields.
        let action = Action::parse(action_name).map_or("unknown", Action::name);
        log.warn(format_args!(
            "rejected {} before submission: missing {}",
            action,
            missing.join(", ")
        ));

        Some(CallerResult::Error {
            error_code: INVALID_PARAMS_CODE.to_string(),
            error_msg: format!("missing required parameter(s): {}", missing.join(", ")),
        })
    }
}

impl<E> Gateway<E> {
    /// Returns the identity stamped on every envelope.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Returns the configured missing-parameter policy.
    pub fn param_policy(&self) -> ParamPolicy {
        self.param_policy
    }

    /// Symbolic guard for a direct path the caller does not hold.
    ///
    /// The caller has no capability for any [`ForbiddenPath`], so this
    /// always returns `Err(CapabilityDenied)` and performs no action. The
    /// `Ok` type is uninhabited: success is not representable. The executor
    /// is never consulted.
    ///
    /// # Errors
    ///
    /// Always returns `CapabilityDenied` for `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use syscall_gate::{Envelope, Executor, ForbiddenPath, Gateway, Response, SyscallCap};
    ///
    /// struct Unreachable;
    ///
    /// impl Executor for Unreachable {
    ///     fn syscall(&self, _cap: &SyscallCap, _envelope: &mut Envelope) -> Response {
    ///         unreachable!("forbidden paths never reach the executor")
    ///     }
    /// }
    ///
    /// let gateway = Gateway::new(Unreachable);
    /// let denied = gateway.attempt(ForbiddenPath::ProcessSpawn).unwrap_err();
    /// assert_eq!(denied.path, ForbiddenPath::ProcessSpawn);
    /// ```
    // BREAKING CHANGE WARNING: This method MUST unconditionally return Err.
    // Letting any path succeed gives the caller a capability outside the
    // syscall boundary.
    pub fn attempt(&self, path: ForbiddenPath) -> Result<Infallible, CapabilityDenied> {
        let denied = CapabilityDenied::new(path);
        SyscallLog::new(&self.identity).warn(format_args!("capability denied: {}", denied));
        Err(denied)
    }
}

impl<E> fmt::Debug for Gateway<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("identity", &self.identity)
            .field("param_policy", &self.param_policy)
            .finish_non_exhaustive()
    }
}

/// Builder for a [`Gateway`].
///
/// # Examples
///
/// ```
/// use syscall_gate::{Envelope, Executor, Gateway, Identity, ParamPolicy, Response, SyscallCap};
///
/// struct Deny;
///
/// impl Executor for Deny {
///     fn syscall(&self, _cap: &SyscallCap, _envelope: &mut Envelope) -> Response {
///         Response::err("EPERM", "denied")
///     }
/// }
///
/// let gateway = Gateway::builder(Deny)
///     .identity(Identity::named("shell"))
///     .param_policy(ParamPolicy::Strict)
///     .build();
///
/// assert_eq!(gateway.identity(), &Identity::named("shell"));
/// assert_eq!(gateway.param_policy(), ParamPolicy::Strict);
/// ```
pub struct GatewayBuilder<E> {
    executor: E,
    config: GatewayConfig,
}

impl<E: Executor> GatewayBuilder<E> {
    /// Sets the caller identity.
    pub fn identity(mut self, identity: Identity) -> Self {
        self.config.identity = identity;
        self
    }

    /// Sets the missing-parameter policy.
    pub fn param_policy(mut self, policy: ParamPolicy) -> Self {
        self.config.param_policy = policy;
        self
    }

    /// Replaces all settings with `config`.
    pub fn config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the gateway. Identity and policy are fixed from here on.
    pub fn build(self) -> Gateway<E> {
        Gateway::from_config(self.executor, self.config)
    }
}
