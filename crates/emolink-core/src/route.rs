use crate::codec;
use crate::link::extract_token;
use crate::types::DecodedCard;

/// Which screen a page load lands on.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// No usable card. `broken_link` is set when a token was present but
    /// failed to decode, so the composer can say so.
    Composer { broken_link: bool },
    Reveal(DecodedCard),
}

/// Route a page location (full URL, query string or bare token).
pub fn resolve_view(location: &str) -> View {
    match extract_token(location) {
        None => View::Composer { broken_link: false },
        Some(token) => match codec::decode(&token) {
            Some(card) => View::Reveal(card),
            None => View::Composer { broken_link: true },
        },
    }
}
