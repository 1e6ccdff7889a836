mod common;

use std::thread;

use common::{params, StubExecutor};
use serde_json::{json, Value};
use syscall_gate::{
    CallerResult, Envelope, Executor, ForbiddenPath, Gateway, Identity, Params, Request,
    Response, StateDelta, Status, SyscallCap, SyscallKind,
};

fn ok_stub() -> StubExecutor {
    StubExecutor::answering(Response::ok(Value::Null, StateDelta::new()))
}

#[test]
fn read_submits_read_state() {
    let executor = ok_stub();
    let gateway = Gateway::new(&executor);

    gateway.submit("read", params(json!({"key": "x"})));

    match executor.last_request() {
        Request::ReadState(read) => assert_eq!(read.key(), Some("x")),
        other => panic!("expected ReadState, got {:?}", other),
    }
}

#[test]
fn compute_submits_unauthorized_deep_compute() {
    let executor = ok_stub();
    let gateway = Gateway::new(&executor);

    gateway.submit("compute", params(json!({"a": 1})));

    assert_eq!(
        serde_json::to_value(executor.last_request()).unwrap(),
        json!({
            "syscall": "DEEP_COMPUTE",
            "args": {
                "task_type": "compute",
                "input_data": {"a": 1},
                "constraints": {},
                "authorized": false
            }
        })
    );
}

#[test]
fn unknown_action_submits_problem_to_deep_compute() {
    let executor = ok_stub();
    let gateway = Gateway::new(&executor);

    gateway.submit("frobnicate", params(json!({"foo": 1})));

    assert_eq!(
        serde_json::to_value(executor.last_request()).unwrap(),
        json!({
            "syscall": "DEEP_COMPUTE",
            "args": {
                "task_type": "compute",
                "input_data": {"problem": "frobnicate", "foo": 1},
                "constraints": {},
                "authorized": false
            }
        })
    );
}

#[test]
fn exec_and_query_registry_map_to_their_syscalls() {
    let executor = ok_stub();
    let gateway = Gateway::new(&executor);

    gateway.submit(
        "exec",
        params(json!({"module": "notes", "op": "append", "params": {"text": "hi"}})),
    );
    gateway.submit("query_registry", Params::new());

    let kinds: Vec<SyscallKind> = executor.requests().iter().map(Request::kind).collect();
    assert_eq!(kinds, vec![SyscallKind::ExecModule, SyscallKind::QueryRegistry]);

    match &executor.requests()[0] {
        Request::ExecModule(exec) => {
            assert_eq!(exec.module(), Some("notes"));
            assert_eq!(exec.operation(), Some("append"));
            assert_eq!(exec.params(), &params(json!({"text": "hi"})));
        }
        other => panic!("expected ExecModule, got {:?}", other),
    }
}

#[test]
fn caller_cannot_escalate_through_params() {
    let executor = ok_stub();
    let gateway = Gateway::new(&executor);
    let hostile = params(json!({
        "authorized": true,
        "authorization": true,
        "constraints": {"root": true},
        "task_type": "admin"
    }));

    for action in ["read", "compute", "exec", "query_registry", "sudo"] {
        gateway.submit(action, hostile.clone());
    }

    for request in executor.requests() {
        assert!(!request.is_authorized());
        if let Request::DeepCompute(compute) = request {
            assert_eq!(compute.task_type(), "compute");
            assert!(compute.constraints().is_empty());
        }
    }
}

#[test]
fn success_reports_state_change() {
    let delta: StateDelta = ["notes/1", "notes/2"].into_iter().collect();
    let executor = StubExecutor::answering(Response::ok(json!({"written": 2}), delta));
    let gateway = Gateway::new(&executor);

    let result = gateway.submit("exec", params(json!({"module": "notes", "op": "write"})));

    assert_eq!(result.status(), Status::Success);
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"status": "success", "result": {"written": 2}, "state_changed": true})
    );
}

#[test]
fn executor_error_is_surfaced_verbatim() {
    let executor = StubExecutor::answering(Response::err("E_QUOTA", "token balance exhausted"));
    let gateway = Gateway::new(&executor);

    let result = gateway.submit("compute", Params::new());

    assert_eq!(
        result,
        CallerResult::Error {
            error_code: "E_QUOTA".to_string(),
            error_msg: "token balance exhausted".to_string(),
        }
    );
}

#[test]
fn each_submit_makes_exactly_one_executor_call() {
    let executor = ok_stub();
    let gateway = Gateway::new(&executor);

    for i in 0..5 {
        gateway.submit("read", params(json!({"key": i})));
    }

    assert_eq!(executor.calls(), 5);
}

#[test]
fn forbidden_paths_are_denied_without_reaching_executor() {
    let executor = ok_stub();
    let gateway = Gateway::new(&executor);

    for path in ForbiddenPath::ALL {
        let denied = gateway.attempt(path).unwrap_err();
        assert_eq!(denied.path, path);
        assert!(!denied.message.is_empty());
    }

    assert_eq!(executor.calls(), 0);
}

/// Echoes the caller identity and the read key back as the result.
struct EchoExecutor;

impl Executor for EchoExecutor {
    fn syscall(&self, _cap: &SyscallCap, envelope: &mut Envelope) -> Response {
        let key = match envelope.request() {
            Request::ReadState(read) => read.key().map(str::to_string),
            _ => None,
        };
        Response::ok(
            json!({"identity": envelope.identity().to_string(), "key": key}),
            StateDelta::new(),
        )
    }
}

#[test]
fn concurrent_callers_share_one_gateway() {
    let gateway = Gateway::builder(EchoExecutor)
        .identity(Identity::named("baby"))
        .build();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let gateway = &gateway;
                scope.spawn(move || {
                    let key = format!("k{}", i);
                    let result = gateway.submit("read", params(json!({"key": key})));
                    (key, result)
                })
            })
            .collect();

        for handle in handles {
            let (key, result) = handle.join().unwrap();
            assert_eq!(
                result,
                CallerResult::Success {
                    result: json!({"identity": "name:baby", "key": key}),
                    state_changed: false,
                }
            );
        }
    });
}

#[test]
fn boxed_and_shared_executors_are_accepted() {
    let boxed: Box<dyn Executor> = Box::new(EchoExecutor);
    let gateway = Gateway::new(boxed);
    assert!(gateway.submit("read", Params::new()).is_success());

    let shared = std::sync::Arc::new(EchoExecutor);
    let gateway = Gateway::new(std::sync::Arc::clone(&shared));
    assert!(gateway.submit("read", Params::new()).is_success());
}

/// Forwards the lent capability and envelope to an inner executor.
struct Delegating<'a> {
    inner: &'a StubExecutor,
}

impl Executor for Delegating<'_> {
    fn syscall(&self, cap: &SyscallCap, envelope: &mut Envelope) -> Response {
        self.inner.syscall(cap, envelope)
    }
}

#[test]
fn delegation_reaches_inner_executor_only_through_submit() {
    let inner = ok_stub();
    let gateway = Gateway::new(Delegating { inner: &inner });

    for _ in 0..3 {
        assert!(gateway.submit("read", params(json!({"key": "x"}))).is_success());
    }
    gateway.attempt(ForbiddenPath::DirectStateAccess).unwrap_err();

    assert_eq!(inner.calls(), 3);
}
