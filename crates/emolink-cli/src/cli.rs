use std::io::{Read, Write};
use std::time::Duration;

use crate::color::{color_func, ARG, CMD, HEADING, OPT};
use crate::completion::{BASH_COMPLETION, FISH_COMPLETION, ZSH_COMPLETION};
use crate::compose::{run_compose, run_preview};
use crate::config::load_config;
use crate::open::run_open;
use crate::templates::run_templates;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub type GetenvFn = Box<dyn Fn(&str) -> Option<String>>;
pub type ClipboardFn = Box<dyn Fn(&str) -> Result<(), String>>;

/// Injectable dependencies for testing.
pub struct Deps {
    pub stdin: Box<dyn Read>,
    pub stdout: Box<dyn Write>,
    pub stderr: Box<dyn Write>,
    pub is_tty: Box<dyn Fn() -> bool>,
    pub is_stdout_tty: Box<dyn Fn() -> bool>,
    pub getenv: GetenvFn,
    /// Wall clock in milliseconds since the Unix epoch.
    pub now_ms: Box<dyn Fn() -> i64>,
    pub sleep: Box<dyn Fn(Duration)>,
    pub copy_to_clipboard: ClipboardFn,
}

/// Parsed global and command-specific flags.
#[derive(Default)]
pub struct ParsedArgs {
    pub args: Vec<String>,

    // Global
    pub base_url: String,
    pub json: bool,

    // Compose / preview
    pub template: String,
    pub to: String,
    pub message: String,
    pub from: String,
    pub qr: bool,
    pub copy: bool,
    pub share: bool,

    // Open
    pub play: bool,
}

#[derive(Debug)]
pub enum CliError {
    ShowHelp,
    Error(String),
}

/// Main entry point. Returns exit code.
pub fn run(args: &[String], deps: &mut Deps) -> i32 {
    if args.len() < 2 {
        print_usage(deps);
        return 2;
    }

    let command = &args[1];
    let remaining = &args[2..];

    match command.as_str() {
        "--version" | "-v" | "version" => {
            let _ = writeln!(deps.stdout, "emolink {}", VERSION);
            0
        }
        "--help" | "-h" => {
            print_help(deps);
            0
        }
        "help" => run_help(remaining, deps),
        "completion" => run_completion(remaining, deps),
        "compose" | "new" => run_compose(remaining, deps),
        "preview" => run_preview(remaining, deps),
        "open" => run_open(remaining, deps),
        "templates" => run_templates(remaining, deps),
        _ => {
            let _ = writeln!(deps.stderr, "error: unknown command {:?}", command);
            print_usage(deps);
            2
        }
    }
}

fn run_help(args: &[String], deps: &mut Deps) -> i32 {
    if args.is_empty() {
        print_help(deps);
        return 0;
    }
    match args[0].as_str() {
        "compose" | "new" => print_compose_help(deps),
        "preview" => print_preview_help(deps),
        "open" => print_open_help(deps),
        "templates" => print_templates_help(deps),
        _ => {
            let _ = writeln!(deps.stderr, "error: unknown command {:?}", args[0]);
            return 2;
        }
    }
    0
}

fn run_completion(args: &[String], deps: &mut Deps) -> i32 {
    if args.len() != 1 {
        let _ = writeln!(
            deps.stderr,
            "error: specify a shell (supported: bash, zsh, fish)"
        );
        return 2;
    }
    let script = match args[0].as_str() {
        "bash" => BASH_COMPLETION,
        "zsh" => ZSH_COMPLETION,
        "fish" => FISH_COMPLETION,
        _ => {
            let _ = writeln!(
                deps.stderr,
                "error: unsupported shell {:?} (supported: bash, zsh, fish)",
                args[0]
            );
            return 2;
        }
    };
    let _ = write!(deps.stdout, "{}", script);
    0
}

fn take_value(args: &[String], i: &mut usize, flag: &str) -> Result<String, CliError> {
    *i += 1;
    match args.get(*i) {
        Some(v) => Ok(v.clone()),
        None => Err(CliError::Error(format!("{} requires a value", flag))),
    }
}

/// Parse command-specific flags from args.
pub fn parse_flags(args: &[String]) -> Result<ParsedArgs, CliError> {
    let mut pa = ParsedArgs::default();
    let mut positional = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if !arg.starts_with('-') || arg == "-" {
            positional.push(arg.clone());
            i += 1;
            continue;
        }

        match arg.as_str() {
            "--help" | "-h" => return Err(CliError::ShowHelp),
            "--json" => pa.json = true,
            "--base-url" => pa.base_url = take_value(args, &mut i, "--base-url")?,
            "--template" | "-t" => pa.template = take_value(args, &mut i, "--template")?,
            "--to" => pa.to = take_value(args, &mut i, "--to")?,
            "--message" | "-m" => pa.message = take_value(args, &mut i, "--message")?,
            "--from" => pa.from = take_value(args, &mut i, "--from")?,
            "--qr" | "-Q" => pa.qr = true,
            "--copy" | "-c" => pa.copy = true,
            "--share" => pa.share = true,
            "--play" | "-p" => pa.play = true,
            _ => return Err(CliError::Error(format!("unknown flag: {}", arg))),
        }
        i += 1;
    }

    pa.args = positional;
    Ok(pa)
}

/// Fill in defaults: flag, then env, then config file, then built-in.
pub fn resolve_globals(pa: &mut ParsedArgs, deps: &mut Deps) {
    let config = load_config(&*deps.getenv, &mut deps.stderr);

    if pa.base_url.is_empty() {
        pa.base_url = (deps.getenv)("EMOLINK_BASE_URL")
            .filter(|v| !v.is_empty())
            .or(config.base_url)
            .unwrap_or_else(|| emolink_core::DEFAULT_BASE_URL.into());
    }
    if pa.template.is_empty() {
        if let Some(t) = config.template {
            pa.template = t;
        }
    }
    if pa.from.is_empty() {
        if let Some(s) = config.sender {
            pa.from = s;
        }
    }
}

/// Report an error on `w`, as `{"error": ...}` in JSON mode.
pub fn write_error(w: &mut dyn Write, json_mode: bool, msg: &str) {
    if json_mode {
        let _ = writeln!(w, "{}", serde_json::json!({ "error": msg }));
    } else {
        let _ = writeln!(w, "error: {}", msg);
    }
}

// --- Help text ---

fn print_usage(deps: &mut Deps) {
    let c = color_func((deps.is_stdout_tty)());
    let _ = write!(
        deps.stderr,
        "{} — countdown greeting cards in a link\n\nRun '{}' for usage.\n",
        c(CMD, "emolink"),
        c(CMD, "emolink help")
    );
}

pub fn print_help(deps: &mut Deps) {
    let c = color_func((deps.is_stdout_tty)());
    let _ = write!(
        deps.stderr,
        "{} — countdown greeting cards in a link\n\n\
{}\n  {} {} {}\n\n\
{}\n\
  {}      Build a shareable card link\n\
  {}      Show a card without building a link\n\
  {}         Open a card link in the terminal\n\
  {}    List card templates\n\
  {}      Show version\n\
  {}         Show this help\n\
  {}   Output shell completion script\n\n\
{}\n\
  {} {}     Page URL links point at (default: {})\n\
  {}               Output as JSON\n\
  {}           Show help\n\
  {}        Show version\n\n\
{}\n\
  {} {} {} birthday {} Sarah\n\
  {} {} 'https://emolink.app/?card=eyJ0ZW1w...'\n",
        c(CMD, "emolink"),
        c(HEADING, "USAGE"),
        c(CMD, "emolink"),
        c(CMD, "<command>"),
        c(ARG, "[options]"),
        c(HEADING, "COMMANDS"),
        c(CMD, "compose"),
        c(CMD, "preview"),
        c(CMD, "open"),
        c(CMD, "templates"),
        c(CMD, "version"),
        c(CMD, "help"),
        c(CMD, "completion"),
        c(HEADING, "GLOBAL OPTIONS"),
        c(OPT, "--base-url"),
        c(ARG, "<url>"),
        emolink_core::DEFAULT_BASE_URL,
        c(OPT, "--json"),
        c(OPT, "-h, --help"),
        c(OPT, "-v, --version"),
        c(HEADING, "EXAMPLES"),
        c(CMD, "emolink"),
        c(CMD, "compose"),
        c(OPT, "-t"),
        c(OPT, "--to"),
        c(CMD, "emolink"),
        c(CMD, "open"),
    );
}

pub fn print_compose_help(deps: &mut Deps) {
    let c = color_func((deps.is_stdout_tty)());
    let _ = write!(
        deps.stderr,
        "{} {} — Build a shareable card link\n\n\
{}\n  {} {} {}\n\n\
{}\n\
  {} {}   Template id (see '{}')\n\
  {} {}          Receiver's name\n\
  {} {}    Message text ({} reads stdin)\n\
  {} {}        Your name\n\
  {}           Render the link as a QR code\n\
  {}         Copy the link to the clipboard\n\
  {}             Also print a WhatsApp share link\n\
  {} {}     Page URL links point at\n\
  {}               Output as JSON\n\
  {}           Show help\n\n\
{}\n\
  Blank fields fall back to \"{}\", \"{}\" and \"{}\".\n\n\
{}\n\
  {} {} {} proposal {} Sam {} 'Will you?' {} Alex\n",
        c(CMD, "emolink"),
        c(CMD, "compose"),
        c(HEADING, "USAGE"),
        c(CMD, "emolink"),
        c(CMD, "compose"),
        c(ARG, "[options]"),
        c(HEADING, "OPTIONS"),
        c(OPT, "-t, --template"),
        c(ARG, "<id>"),
        c(CMD, "emolink templates"),
        c(OPT, "--to"),
        c(ARG, "<name>"),
        c(OPT, "-m, --message"),
        c(ARG, "<text>"),
        c(ARG, "-"),
        c(OPT, "--from"),
        c(ARG, "<name>"),
        c(OPT, "-Q, --qr"),
        c(OPT, "-c, --copy"),
        c(OPT, "--share"),
        c(OPT, "--base-url"),
        c(ARG, "<url>"),
        c(OPT, "--json"),
        c(OPT, "-h, --help"),
        c(HEADING, "DEFAULTS"),
        emolink_core::DEFAULT_RECEIVER,
        emolink_core::DEFAULT_MESSAGE,
        emolink_core::DEFAULT_SENDER,
        c(HEADING, "EXAMPLES"),
        c(CMD, "emolink"),
        c(CMD, "compose"),
        c(OPT, "-t"),
        c(OPT, "--to"),
        c(OPT, "-m"),
        c(OPT, "--from"),
    );
}

pub fn print_preview_help(deps: &mut Deps) {
    let c = color_func((deps.is_stdout_tty)());
    let _ = write!(
        deps.stderr,
        "{} {} — Show a card without building a link\n\n\
{}\n  {} {} {}\n\n\
{}\n\
  Accepts the same card options as '{}'.\n\
  {}         Run the countdown before the card\n",
        c(CMD, "emolink"),
        c(CMD, "preview"),
        c(HEADING, "USAGE"),
        c(CMD, "emolink"),
        c(CMD, "preview"),
        c(ARG, "[options]"),
        c(HEADING, "OPTIONS"),
        c(CMD, "emolink compose"),
        c(OPT, "-p, --play"),
    );
}

pub fn print_open_help(deps: &mut Deps) {
    let c = color_func((deps.is_stdout_tty)());
    let _ = write!(
        deps.stderr,
        "{} {} — Open a card link in the terminal\n\n\
{}\n  {} {} {} {}\n\n\
{}\n\
  {}         Run the countdown and reveal\n\
  {}               Print the decoded card as JSON\n\
  {}           Show help\n\n\
{}\n\
  Accepts a full link, a '?card=' query string, or a bare token.\n",
        c(CMD, "emolink"),
        c(CMD, "open"),
        c(HEADING, "USAGE"),
        c(CMD, "emolink"),
        c(CMD, "open"),
        c(ARG, "<link-or-token>"),
        c(ARG, "[options]"),
        c(HEADING, "OPTIONS"),
        c(OPT, "-p, --play"),
        c(OPT, "--json"),
        c(OPT, "-h, --help"),
        c(HEADING, "INPUT"),
    );
}

pub fn print_templates_help(deps: &mut Deps) {
    let c = color_func((deps.is_stdout_tty)());
    let _ = write!(
        deps.stderr,
        "{} {} — List card templates\n\n\
{}\n  {} {} {}\n\n\
{}\n\
  {}               Output as JSON\n\
  {}           Show help\n",
        c(CMD, "emolink"),
        c(CMD, "templates"),
        c(HEADING, "USAGE"),
        c(CMD, "emolink"),
        c(CMD, "templates"),
        c(ARG, "[options]"),
        c(HEADING, "OPTIONS"),
        c(OPT, "--json"),
        c(OPT, "-h, --help"),
    );
}
