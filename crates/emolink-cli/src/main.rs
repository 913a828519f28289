use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

use emolink_cli::cli;
use emolink_cli::logging::{init_logging, LOG_ENV};

#[cfg(target_os = "macos")]
const CLIPBOARD_COMMANDS: &[&[&str]] = &[&["pbcopy"]];
#[cfg(target_os = "linux")]
const CLIPBOARD_COMMANDS: &[&[&str]] = &[
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
];
#[cfg(target_os = "windows")]
const CLIPBOARD_COMMANDS: &[&[&str]] = &[&["clip.exe"]];
#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const CLIPBOARD_COMMANDS: &[&[&str]] = &[];

/// Pipe `text` into the first clipboard helper that starts.
fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let mut last_err = String::from("clipboard not supported on this platform");
    for argv in CLIPBOARD_COMMANDS {
        let mut child = match Command::new(argv[0])
            .args(&argv[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                last_err = format!("{}: {}", argv[0], e);
                continue;
            }
        };
        if let Some(ref mut stdin) = child.stdin {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| e.to_string())?;
        }
        // Close the pipe before waiting
        child.stdin.take();
        let status = child.wait().map_err(|e| e.to_string())?;
        return if status.success() {
            Ok(())
        } else {
            Err(format!("{} exited with {}", argv[0], status))
        };
    }
    Err(last_err)
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

fn main() {
    init_logging(std::env::var(LOG_ENV).ok().as_deref());

    let mut deps = cli::Deps {
        stdin: Box::new(io::stdin()),
        stdout: Box::new(io::stdout()),
        stderr: Box::new(io::stderr()),
        is_tty: Box::new(|| is_terminal::is_terminal(io::stdin())),
        is_stdout_tty: Box::new(|| is_terminal::is_terminal(io::stdout())),
        getenv: Box::new(|key: &str| std::env::var(key).ok()),
        now_ms: Box::new(now_ms),
        sleep: Box::new(|d: std::time::Duration| std::thread::sleep(d)),
        copy_to_clipboard: Box::new(copy_to_clipboard),
    };

    let args: Vec<String> = std::env::args().collect();
    let code = cli::run(&args, &mut deps);
    std::process::exit(code);
}
