use std::io::Write;

use emolink_core::catalog::{MusicStyle, DEFAULT_TEMPLATE_ID, TEMPLATES};

use crate::cli::{parse_flags, print_templates_help, write_error, CliError, Deps};
use crate::color::{color_func, CMD, DIM, HEADING};

fn music_label(style: MusicStyle) -> &'static str {
    match style {
        MusicStyle::Happy => "happy",
        MusicStyle::Romantic => "romantic",
        MusicStyle::Soft => "soft",
    }
}

pub fn run_templates(args: &[String], deps: &mut Deps) -> i32 {
    let pa = match parse_flags(args) {
        Ok(pa) => pa,
        Err(CliError::ShowHelp) => {
            print_templates_help(deps);
            return 0;
        }
        Err(CliError::Error(e)) => {
            write_error(&mut deps.stderr, false, &e);
            return 2;
        }
    };

    if pa.json {
        match serde_json::to_string(TEMPLATES) {
            Ok(s) => {
                let _ = writeln!(deps.stdout, "{}", s);
                return 0;
            }
            Err(e) => {
                write_error(&mut deps.stderr, true, &format!("serialize templates: {}", e));
                return 1;
            }
        }
    }

    let c = color_func((deps.is_stdout_tty)());
    let _ = writeln!(deps.stdout, "{}", c(HEADING, "TEMPLATES"));
    for t in TEMPLATES {
        let mut extras = vec![music_label(t.music)];
        if t.hearts {
            extras.push("hearts");
        }
        if t.id == DEFAULT_TEMPLATE_ID {
            extras.push("default");
        }
        let _ = writeln!(
            deps.stdout,
            "  {} {:<12} {:<18} {}",
            t.emoji,
            c(CMD, t.id),
            t.title,
            c(DIM, &format!("{} ({})", t.description, extras.join(", ")))
        );
    }
    0
}
