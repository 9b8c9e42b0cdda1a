use anyhow::{Context, Result, bail};
use methodical::{InvocationError, Object, Value};
use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::rc::Rc;

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn helper_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_methodical"))
}

pub fn schema_path(repo_root: &Path) -> PathBuf {
    repo_root.join("schema/interface_descriptor.schema.json")
}

/// Run a command, failing with captured output when it exits non-zero.
pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Run a command with `input` piped to stdin; the exit status is not checked.
pub fn run_with_stdin(mut cmd: Command, input: &str) -> Result<Output> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn command: {:?}", cmd))?;
    child
        .stdin
        .take()
        .context("stdin not captured")?
        .write_all(input.as_bytes())?;
    Ok(child.wait_with_output()?)
}

/// Arguments seen by each invocation of a [`recorder`] callable.
pub type CallLog = Rc<RefCell<Vec<Vec<Value>>>>;

/// Callable that records the arguments of every call.
pub fn recorder() -> (Value, CallLog) {
    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let function = Value::function(move |_, args| {
        sink.borrow_mut().push(args.to_vec());
        Ok(Value::Undefined)
    });
    (function, log)
}

/// Callable that always fails with `message`.
pub fn failing(message: &'static str) -> Value {
    Value::function(move |_, _| Err(InvocationError::thrown(message)))
}

pub fn noop_function() -> Value {
    Value::function(|_, _| Ok(Value::Undefined))
}

/// Plain object whose listed members are fresh callables.
pub fn object_with(methods: &[&str]) -> Object {
    let object = Object::new();
    for method in methods {
        object.set(*method, noop_function());
    }
    object
}
