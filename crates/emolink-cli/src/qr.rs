use qrcode::types::Color;
use qrcode::QrCode;

/// Render a link as a QR code using Unicode half-block characters.
///
/// Each character cell holds two vertical modules (▀/▄/█/space), so the code
/// comes out roughly square in a terminal. Returns `None` if the link is too
/// long to fit in a QR code.
pub fn render_link_qr(link: &str) -> Option<String> {
    let code = QrCode::new(link.as_bytes()).ok()?;
    Some(render_half_blocks(&code))
}

fn render_half_blocks(code: &QrCode) -> String {
    let width = code.width();
    let modules = code.to_colors();
    let quiet = 1usize;
    let total = width + 2 * quiet;

    let is_dark = |r: usize, c: usize| -> bool {
        let inside = (quiet..quiet + width).contains(&r) && (quiet..quiet + width).contains(&c);
        inside && modules[(r - quiet) * width + (c - quiet)] == Color::Dark
    };

    let mut out = String::with_capacity(total * (total / 2 + 1) * 3);
    for row in (0..total).step_by(2) {
        for col in 0..total {
            let top = is_dark(row, col);
            let bottom = row + 1 < total && is_dark(row + 1, col);
            out.push(match (top, bottom) {
                (true, true) => '\u{2588}',
                (true, false) => '\u{2580}',
                (false, true) => '\u{2584}',
                (false, false) => ' ',
            });
        }
        out.push('\n');
    }
    out
}
