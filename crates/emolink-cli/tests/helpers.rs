#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{self, Cursor, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use emolink_cli::cli::Deps;

/// Fixed clock so generated tokens are deterministic.
pub const NOW_MS: i64 = 1_700_000_000_000;

/// A shared buffer that implements Write for capturing output.
#[derive(Clone)]
pub struct SharedBuf(pub Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn new() -> Self {
        SharedBuf(Arc::new(Mutex::new(Vec::new())))
    }

    pub fn to_string(&self) -> String {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf).to_string()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

static CONFIG_DIRS: AtomicUsize = AtomicUsize::new(0);

/// A fresh, empty XDG_CONFIG_HOME so tests never see the user's config.
fn scratch_config_home() -> PathBuf {
    let n = CONFIG_DIRS.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("emolink_cli_test_{}_{}", std::process::id(), n))
}

pub struct TestDepsBuilder {
    stdin_data: Vec<u8>,
    is_tty: bool,
    is_stdout_tty: bool,
    env: HashMap<String, String>,
    now_ms: i64,
    clipboard: Arc<Mutex<Vec<String>>>,
    clipboard_error: Option<String>,
    sleeps: Arc<Mutex<Vec<std::time::Duration>>>,
}

impl TestDepsBuilder {
    pub fn new() -> Self {
        let mut env = HashMap::new();
        env.insert(
            "XDG_CONFIG_HOME".to_string(),
            scratch_config_home().to_string_lossy().to_string(),
        );
        TestDepsBuilder {
            stdin_data: Vec::new(),
            is_tty: false,
            is_stdout_tty: false,
            env,
            now_ms: NOW_MS,
            clipboard: Arc::new(Mutex::new(Vec::new())),
            clipboard_error: None,
            sleeps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn stdin(mut self, data: &[u8]) -> Self {
        self.stdin_data = data.to_vec();
        self
    }

    pub fn is_tty(mut self, v: bool) -> Self {
        self.is_tty = v;
        self
    }

    pub fn is_stdout_tty(mut self, v: bool) -> Self {
        self.is_stdout_tty = v;
        self
    }

    pub fn env(mut self, key: &str, val: &str) -> Self {
        self.env.insert(key.to_string(), val.to_string());
        self
    }

    pub fn now_ms(mut self, v: i64) -> Self {
        self.now_ms = v;
        self
    }

    /// Write `contents` as config.toml under this builder's XDG_CONFIG_HOME.
    pub fn config(self, contents: &str) -> Self {
        let dir = PathBuf::from(&self.env["XDG_CONFIG_HOME"]).join("emolink");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), contents).unwrap();
        self
    }

    pub fn clipboard_error(mut self, msg: &str) -> Self {
        self.clipboard_error = Some(msg.to_string());
        self
    }

    /// Texts handed to the clipboard, in order.
    pub fn clipboard_log(&self) -> Arc<Mutex<Vec<String>>> {
        self.clipboard.clone()
    }

    /// Durations passed to `sleep`, in order.
    pub fn sleep_log(&self) -> Arc<Mutex<Vec<std::time::Duration>>> {
        self.sleeps.clone()
    }

    pub fn build(self) -> (Deps, SharedBuf, SharedBuf) {
        let stdout = SharedBuf::new();
        let stderr = SharedBuf::new();
        let stdout_clone = stdout.clone();
        let stderr_clone = stderr.clone();

        let is_tty = self.is_tty;
        let is_stdout_tty = self.is_stdout_tty;
        let env = self.env;
        let now_ms = self.now_ms;
        let clipboard = self.clipboard;
        let clipboard_error = self.clipboard_error;
        let sleeps = self.sleeps;

        let deps = Deps {
            stdin: Box::new(Cursor::new(self.stdin_data)),
            stdout: Box::new(stdout_clone),
            stderr: Box::new(stderr_clone),
            is_tty: Box::new(move || is_tty),
            is_stdout_tty: Box::new(move || is_stdout_tty),
            getenv: Box::new(move |key: &str| env.get(key).cloned()),
            now_ms: Box::new(move || now_ms),
            sleep: Box::new(move |d: std::time::Duration| sleeps.lock().unwrap().push(d)),
            copy_to_clipboard: Box::new(move |text: &str| {
                if let Some(ref msg) = clipboard_error {
                    return Err(msg.clone());
                }
                clipboard.lock().unwrap().push(text.to_string());
                Ok(())
            }),
        };

        (deps, stdout, stderr)
    }
}

/// Helper to build args vec from a slice of &str.
pub fn args(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| s.to_string()).collect()
}
