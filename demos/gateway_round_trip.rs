//! Round trip through the syscall gateway.
//!
//! This example shows the complete boundary flow:
//! 1. The process entry point owns the executor and builds one Gateway
//! 2. The caller submits operations by name with a parameter bag
//! 3. The executor alone touches state and answers with a Response
//! 4. The caller only ever sees a CallerResult
//!
//! Run with: `cargo run --example gateway_round_trip`

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde_json::{json, Value};
use syscall_gate::{
    Envelope, Error, Executor, ForbiddenPath, Gateway, Params, Request, Response, StateDelta,
    SyscallCap,
};

/// A toy privileged side holding a key/value store and a module registry.
struct Kernel {
    state: Mutex<BTreeMap<String, Value>>,
    modules: Vec<&'static str>,
}

impl Kernel {
    fn new() -> Self {
        let mut state = BTreeMap::new();
        state.insert("greeting".to_string(), json!("hello"));
        Self {
            state: Mutex::new(state),
            modules: vec!["notes", "timer"],
        }
    }
}

impl Executor for Kernel {
    fn syscall(&self, _cap: &SyscallCap, envelope: &mut Envelope) -> Response {
        envelope
            .context_mut()
            .insert("handled_by".to_string(), json!("kernel"));

        let Ok(mut state) = self.state.lock() else {
            return Response::err("EFAULT", "state lock poisoned");
        };

        match envelope.request() {
            Request::ReadState(read) => match read.key().and_then(|k| state.get(k)) {
                Some(value) => Response::ok(value.clone(), StateDelta::new()),
                None => Response::err("ENOENT", "no such key"),
            },
            Request::ExecModule(exec) if exec.module() == Some("notes") => {
                let key = format!("notes/{}", state.len());
                state.insert(key.clone(), Value::Object(exec.params().clone()));
                Response::ok(json!({"stored": key}), [key].into_iter().collect())
            }
            Request::ExecModule(_) => Response::err("ENOSYS", "unknown module"),
            Request::QueryRegistry(query) => {
                let matches: Vec<_> = self
                    .modules
                    .iter()
                    .filter(|m| matches!(query.query(), Some(q) if q == "*" || q == **m))
                    .collect();
                Response::ok(json!(matches), StateDelta::new())
            }
            Request::DeepCompute(compute) => Response::ok(
                json!({"echo": compute.input_data()}),
                StateDelta::new(),
            ),
        }
    }
}

fn params(value: Value) -> Params {
    value.as_object().cloned().unwrap_or_default()
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    println!("=== Syscall Gateway Round Trip ===\n");

    let gateway = Gateway::from_json_config(Kernel::new(), r#"{"identity": 1001}"#)?;
    println!("Gateway: {:?}\n", gateway);

    let operations = [
        ("read", json!({"key": "greeting"})),
        ("read", json!({"key": "missing"})),
        ("exec", json!({"module": "notes", "op": "append", "params": {"text": "hi"}})),
        ("query_registry", json!({})),
        ("compute", json!({"a": 1, "authorized": true})),
        ("frobnicate", json!({"foo": 1})),
    ];

    for (action, args) in operations {
        let result = gateway.submit(action, params(args));
        println!(
            "{:<15} -> {}",
            action,
            serde_json::to_string(&result).unwrap_or_default()
        );
    }

    println!("\n--- Forbidden Paths ---");
    for path in ForbiddenPath::ALL {
        match gateway.attempt(path) {
            Ok(never) => match never {},
            Err(denied) => println!("{}", denied),
        }
    }

    println!("\n=== Key Takeaways ===");
    println!("1. Callers only name an action; the codec picks the request type");
    println!("2. Privilege flags are fixed by the codec, never read from params");
    println!("3. Only the gateway can mint the SyscallCap the executor requires");

    Ok(())
}
