use std::io::{Read, Write};

use emolink_core::{catalog, generate, is_local_base, preview, share_text, whatsapp_url};
use emolink_core::{ComposeError, ComposeForm};
use tracing::debug;

use crate::cli::{
    parse_flags, print_compose_help, print_preview_help, resolve_globals, write_error, CliError,
    Deps, ParsedArgs,
};
use crate::color::{color_func, DIM, SUCCESS, URL, WARN};
use crate::open::{play_sequence, render_card};
use crate::qr::render_link_qr;

fn parse_card_flags(
    args: &[String],
    deps: &mut Deps,
    print_help: fn(&mut Deps),
) -> Result<ParsedArgs, i32> {
    let mut pa = match parse_flags(args) {
        Ok(pa) => pa,
        Err(CliError::ShowHelp) => {
            print_help(deps);
            return Err(0);
        }
        Err(CliError::Error(e)) => {
            write_error(&mut deps.stderr, false, &e);
            return Err(2);
        }
    };
    resolve_globals(&mut pa, deps);

    if let Some(extra) = pa.args.first() {
        write_error(
            &mut deps.stderr,
            pa.json,
            &format!("unexpected argument {:?}", extra),
        );
        return Err(2);
    }
    Ok(pa)
}

/// Build the form from flags. `--message -` reads the message from stdin.
fn read_form(pa: &ParsedArgs, deps: &mut Deps) -> Result<ComposeForm, String> {
    let message = if pa.message == "-" {
        if (deps.is_tty)() {
            let _ = writeln!(deps.stderr, "Enter your message (Ctrl+D to finish):");
        }
        let mut data = String::new();
        deps.stdin
            .read_to_string(&mut data)
            .map_err(|e| format!("read stdin: {}", e))?;
        data.trim_end_matches(['\r', '\n']).to_string()
    } else {
        pa.message.clone()
    };

    Ok(ComposeForm {
        template: (!pa.template.is_empty()).then(|| pa.template.clone()),
        receiver: pa.to.clone(),
        message,
        sender: pa.from.clone(),
    })
}

fn compose_error_message(e: &ComposeError) -> String {
    match e {
        ComposeError::NoTemplate => format!(
            "{} (--template one of: {})",
            e,
            catalog::ids().collect::<Vec<_>>().join(", ")
        ),
        ComposeError::EncodeFailed => e.to_string(),
    }
}

fn warn_unknown_template(form: &ComposeForm, deps: &mut Deps) {
    if let Some(t) = form.template.as_deref() {
        if catalog::find(t).is_none() {
            let c = color_func((deps.is_tty)());
            let _ = writeln!(
                deps.stderr,
                "{} unknown template {:?}; the card will use the {} theme",
                c(WARN, "warning:"),
                t,
                catalog::DEFAULT_TEMPLATE_ID
            );
        }
    }
}

pub fn run_compose(args: &[String], deps: &mut Deps) -> i32 {
    let pa = match parse_card_flags(args, deps, print_compose_help) {
        Ok(pa) => pa,
        Err(code) => return code,
    };

    let form = match read_form(&pa, deps) {
        Ok(f) => f,
        Err(e) => {
            write_error(&mut deps.stderr, pa.json, &e);
            return 2;
        }
    };
    warn_unknown_template(&form, deps);

    let link = match generate(&form, &pa.base_url, (deps.now_ms)()) {
        Ok(link) => link,
        Err(e) => {
            write_error(&mut deps.stderr, pa.json, &compose_error_message(&e));
            return match e {
                ComposeError::NoTemplate => 2,
                ComposeError::EncodeFailed => 1,
            };
        }
    };
    debug!(token_len = link.token.len(), "card link generated");

    let is_tty = (deps.is_tty)();
    let c = color_func(is_tty);
    let share = pa
        .share
        .then(|| whatsapp_url(&share_text(&form.receiver, &link.url)));

    if pa.json {
        let mut out = serde_json::json!({
            "token": link.token,
            "url": link.url,
            "payload": link.payload,
        });
        if let Some(ref s) = share {
            out["share_url"] = serde_json::Value::String(s.clone());
        }
        let _ = writeln!(deps.stdout, "{}", out);
    } else {
        let u = color_func((deps.is_stdout_tty)());
        let _ = writeln!(deps.stdout, "{}", u(URL, &link.url));
        if let Some(ref s) = share {
            let _ = writeln!(deps.stdout, "{}", s);
        }
    }

    if is_local_base(&pa.base_url) {
        let _ = writeln!(
            deps.stderr,
            "{} {} is a local address; the link only opens on this machine. \
             Host the page somewhere public and pass --base-url.",
            c(WARN, "note:"),
            pa.base_url
        );
    }

    if pa.copy {
        match (deps.copy_to_clipboard)(&link.url) {
            Ok(()) => {
                let _ = writeln!(
                    deps.stderr,
                    "{} Copied link to clipboard.",
                    c(SUCCESS, "\u{2713}")
                );
            }
            Err(e) => {
                let _ = writeln!(
                    deps.stderr,
                    "{} {}",
                    c(WARN, "warning: clipboard:"),
                    c(DIM, &e)
                );
            }
        }
    }

    if pa.qr && !pa.json && is_tty {
        match render_link_qr(&link.url) {
            Some(qr) => {
                let _ = write!(deps.stderr, "\n{}", qr);
            }
            None => {
                let _ = writeln!(deps.stderr, "{} link too long for a QR code", c(WARN, "warning:"));
            }
        }
    }

    0
}

pub fn run_preview(args: &[String], deps: &mut Deps) -> i32 {
    let pa = match parse_card_flags(args, deps, print_preview_help) {
        Ok(pa) => pa,
        Err(code) => return code,
    };

    let form = match read_form(&pa, deps) {
        Ok(f) => f,
        Err(e) => {
            write_error(&mut deps.stderr, pa.json, &e);
            return 2;
        }
    };
    warn_unknown_template(&form, deps);

    let view = match preview(&form, (deps.now_ms)()) {
        Ok(v) => v,
        Err(e) => {
            write_error(&mut deps.stderr, pa.json, &compose_error_message(&e));
            return 2;
        }
    };

    if pa.json {
        let _ = writeln!(deps.stdout, "{}", serde_json::json!(view));
        return 0;
    }

    if pa.play {
        play_sequence(&view, deps);
    }
    let color = (deps.is_stdout_tty)();
    let _ = write!(deps.stdout, "{}", render_card(&view, color));
    0
}
