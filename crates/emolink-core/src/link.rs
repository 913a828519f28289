use url::{form_urlencoded, Url};

use crate::types::CARD_PARAM;

const WHATSAPP_SHARE_URL: &str = "https://wa.me/";

/// Strip the query string and fragment from a page URL, leaving
/// scheme + host + path.
pub fn page_base(base_url: &str) -> &str {
    let end = base_url.find(['?', '#']).unwrap_or(base_url.len());
    &base_url[..end]
}

/// Build a shareable link: `<base>?card=<token>`.
///
/// Any query or fragment already on `base_url` is dropped so the card
/// parameter is never duplicated. Tokens are URL-safe and need no escaping.
pub fn build_card_link(base_url: &str, token: &str) -> String {
    format!("{}?{}={}", page_base(base_url), CARD_PARAM, token)
}

/// Pull the card token out of a link, a bare query string, or a bare token.
///
/// Accepts:
///   - https://host/path?card=<token>
///   - ?card=<token>
///   - <token>
///
/// Returns `None` when no non-empty token is present.
pub fn extract_token(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let query = match input.find('?') {
        Some(idx) => &input[idx + 1..],
        None if input.contains("://") => return None,
        None => return Some(input.to_string()),
    };
    let query = match query.find('#') {
        Some(idx) => &query[..idx],
        None => query,
    };

    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == CARD_PARAM)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Links built on a local page only open on the author's machine.
pub fn is_local_base(base_url: &str) -> bool {
    match Url::parse(base_url) {
        Ok(url) => {
            url.scheme() == "file" || matches!(url.host_str(), Some("localhost" | "127.0.0.1"))
        }
        Err(_) => false,
    }
}

/// WhatsApp "click to chat" URL prefilled with `text`.
pub fn whatsapp_url(text: &str) -> String {
    match Url::parse_with_params(WHATSAPP_SHARE_URL, &[("text", text)]) {
        Ok(url) => url.to_string(),
        Err(_) => WHATSAPP_SHARE_URL.to_string(),
    }
}
