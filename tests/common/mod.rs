//! Stub executors shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::Value;
use syscall_gate::{Envelope, Executor, Params, Request, Response, SyscallCap};

/// Answers every call with a fixed response and records what it saw.
pub struct StubExecutor {
    response: Response,
    requests: Mutex<Vec<Request>>,
    calls: AtomicUsize,
}

impl StubExecutor {
    pub fn answering(response: Response) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Request {
        self.requests().pop().expect("executor was called")
    }
}

impl Executor for StubExecutor {
    fn syscall(&self, _cap: &SyscallCap, envelope: &mut Envelope) -> Response {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push(envelope.request().clone());
        self.response.clone()
    }
}

/// Builds a parameter bag from a JSON object literal.
pub fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}
