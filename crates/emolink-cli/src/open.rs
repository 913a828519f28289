use std::io::{Read, Write};
use std::time::Duration;

use emolink_core::effects::{Effect, Phase, CONFETTI_INTERVAL_MS, COUNTDOWN_STEP_MS};
use emolink_core::reveal::{CardView, COUNTDOWN_CAPTION, REPLAY_LABEL};
use emolink_core::{resolve_view, View};
use tracing::{debug, trace};

use crate::cli::{parse_flags, print_open_help, write_error, CliError, Deps};
use crate::color::{color_func, DIM, HEADING, LABEL, WARN};

const BROKEN_LINK: &str = "this card link is broken or incomplete";
const NO_CARD: &str = "no card found in this link";

pub fn run_open(args: &[String], deps: &mut Deps) -> i32 {
    let pa = match parse_flags(args) {
        Ok(pa) => pa,
        Err(CliError::ShowHelp) => {
            print_open_help(deps);
            return 0;
        }
        Err(CliError::Error(e)) => {
            write_error(&mut deps.stderr, false, &e);
            return 2;
        }
    };

    let input = match pa.args.as_slice() {
        [one] if one == "-" => match read_link(deps) {
            Ok(s) => s,
            Err(e) => {
                write_error(&mut deps.stderr, pa.json, &e);
                return 2;
            }
        },
        [one] => one.clone(),
        [] => {
            write_error(&mut deps.stderr, pa.json, "specify a card link or token");
            return 2;
        }
        _ => {
            write_error(&mut deps.stderr, pa.json, "specify exactly one card link");
            return 2;
        }
    };

    let card = match resolve_view(&input) {
        View::Reveal(card) => card,
        View::Composer { broken_link } => {
            let msg = if broken_link { BROKEN_LINK } else { NO_CARD };
            debug!(broken_link, "open fell back to composer");
            write_error(&mut deps.stderr, pa.json, msg);
            if !pa.json {
                let c = color_func((deps.is_tty)());
                let _ = writeln!(
                    deps.stderr,
                    "{}",
                    c(DIM, "Make your own with 'emolink compose'.")
                );
            }
            return 1;
        }
    };

    if pa.json {
        let _ = writeln!(
            deps.stdout,
            "{}",
            serde_json::Value::Object(card.into_fields())
        );
        return 0;
    }

    let view = CardView::from_card(&card);
    if pa.play {
        play_sequence(&view, deps);
    }
    let color = (deps.is_stdout_tty)();
    let _ = write!(deps.stdout, "{}", render_card(&view, color));
    0
}

fn read_link(deps: &mut Deps) -> Result<String, String> {
    let mut data = String::new();
    deps.stdin
        .read_to_string(&mut data)
        .map_err(|e| format!("read stdin: {}", e))?;
    let data = data.trim().to_string();
    if data.is_empty() {
        return Err("input is empty".into());
    }
    Ok(data)
}

/// Run one countdown/reveal session on stderr, paced by `deps.sleep`.
///
/// The session runs on its own clock starting at zero, so pacing is
/// independent of wall time and a no-op sleep runs it instantly.
pub(crate) fn play_sequence(view: &CardView, deps: &mut Deps) {
    let c = color_func((deps.is_tty)());
    let mut fx = view.effects();
    let mut clock = 0u64;
    let mut hearts = 0usize;

    let _ = writeln!(deps.stderr, "{}", c(DIM, COUNTDOWN_CAPTION));
    let mut pending = fx.start(clock);

    loop {
        for effect in pending.drain(..) {
            match effect {
                Effect::Count { value } => {
                    let _ = writeln!(deps.stderr, "  {}", c(HEADING, &value.to_string()));
                }
                Effect::Reveal => {
                    let _ = writeln!(deps.stderr);
                }
                Effect::Heart => hearts += 1,
                Effect::Finished => {}
                other => trace!(effect = ?other, at_ms = clock, "effect"),
            }
        }

        let step = match fx.phase() {
            Phase::Countdown => COUNTDOWN_STEP_MS,
            Phase::Reveal => CONFETTI_INTERVAL_MS,
            _ => break,
        };
        (deps.sleep)(Duration::from_millis(step));
        clock += step;
        pending = fx.poll(clock);
    }

    if hearts > 0 {
        let _ = writeln!(deps.stderr, "{}", c(WARN, &"\u{2764}".repeat(hearts)));
    }
    fx.stop();
}

/// Plain-text rendering of the reveal card.
pub(crate) fn render_card(view: &CardView, color: bool) -> String {
    let c = color_func(color);
    let mut out = String::new();
    out.push_str(&format!("  {}\n", view.template.emoji));
    out.push_str(&format!("  {}\n\n", c(LABEL, view.template.title)));
    out.push_str(&format!("  {}\n", view.salutation()));
    out.push_str(&format!("  {}\n\n", view.quoted_message()));
    out.push_str(&format!("  {}\n", c(DIM, "With love,")));
    out.push_str(&format!("  {}\n", c(LABEL, &view.sender)));
    if color {
        out.push_str(&format!(
            "\n  {}\n",
            c(DIM, &format!("{} with 'emolink open --play'", REPLAY_LABEL))
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use emolink_core::{CardPayload, DecodedCard};

    fn view() -> CardView {
        CardView::from_card(&DecodedCard::from(CardPayload {
            template: "birthday".into(),
            receiver: "Sarah".into(),
            message: "Happy day!".into(),
            sender: "John".into(),
            timestamp: 0,
        }))
    }

    #[test]
    fn plain_card_layout() {
        let out = render_card(&view(), false);
        assert_eq!(
            out,
            "  🎂\n  Happy Birthday!\n\n  Dear Sarah,\n  \"Happy day!\"\n\n  With love,\n  John\n"
        );
    }

    #[test]
    fn colored_card_mentions_replay() {
        let out = render_card(&view(), true);
        assert!(out.contains(REPLAY_LABEL));
        assert!(out.contains("\x1b["));
    }
}
