//! Card token codec.
//!
//! A token is the compact JSON of a [`CardPayload`], UTF-8 encoded, base64'd
//! with the standard alphabet and then made URL-safe (`+`→`-`, `/`→`_`,
//! trailing `=` dropped). That is exactly the unpadded URL-safe alphabet, so
//! encoding goes through `URL_SAFE_NO_PAD` directly.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde_json::Value;
use tracing::{debug, warn};

use crate::types::{CardPayload, DecodedCard, LinkError};

/// Standard alphabet, canonical padding required, non-zero trailing bits
/// tolerated the way browser `atob` tolerates them.
const RESTORED: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

pub fn try_encode(payload: &CardPayload) -> Result<String, LinkError> {
    let json = serde_json::to_vec(payload).map_err(|e| LinkError::Serialize(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Encode a card into a URL-safe token.
///
/// Returns an empty string if serialization fails. Callers must not build a
/// link from an empty token.
pub fn encode(payload: &CardPayload) -> String {
    match try_encode(payload) {
        Ok(token) => token,
        Err(e) => {
            warn!(error = %e, "card encoding failed");
            String::new()
        }
    }
}

/// Undo the URL-safety transform and restore `=` padding.
fn restore_standard(token: &str) -> String {
    let mut b64: String = token
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    while b64.len() % 4 != 0 {
        b64.push('=');
    }
    b64
}

pub fn try_decode(token: &str) -> Result<DecodedCard, LinkError> {
    if token.is_empty() {
        return Err(LinkError::Empty);
    }

    let bytes = RESTORED
        .decode(restore_standard(token))
        .map_err(|e| LinkError::Base64(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| LinkError::Utf8(e.to_string()))?;

    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(fields)) => Ok(DecodedCard::from_fields(fields)),
        Ok(_) => Err(LinkError::NotAnObject),
        Err(e) => Err(LinkError::Json(e.to_string())),
    }
}

/// Decode a token taken from an untrusted link.
///
/// Every failure collapses to `None`; the reason is only logged.
pub fn decode(token: &str) -> Option<DecodedCard> {
    match try_decode(token) {
        Ok(card) => Some(card),
        Err(e) => {
            debug!(error = %e, len = token.len(), "card token rejected");
            None
        }
    }
}

/// Decode a parameter that may be absent altogether.
pub fn decode_param(token: Option<&str>) -> Option<DecodedCard> {
    token.and_then(decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(template: &str, receiver: &str, message: &str, sender: &str) -> CardPayload {
        CardPayload {
            template: template.into(),
            receiver: receiver.into(),
            message: message.into(),
            sender: sender.into(),
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn roundtrip_ascii() {
        let p = card("birthday", "Sarah", "Happy day!", "John");
        let token = encode(&p);
        let decoded = decode(&token).expect("decode");
        assert_eq!(decoded, DecodedCard::from(&p));
        assert_eq!(decoded.to_payload(), Some(p));
    }

    #[test]
    fn roundtrip_emoji() {
        let p = card("proposal", "Jöhn 🍕", "Happy Birthday! 🎉", "Alice 💝");
        let decoded = decode(&encode(&p)).expect("decode");
        assert_eq!(decoded.to_payload(), Some(p));
    }

    #[test]
    fn roundtrip_empty_fields() {
        let p = card("", "", "", "");
        let token = encode(&p);
        assert!(!token.is_empty());
        assert_eq!(decode(&token).and_then(|c| c.to_payload()), Some(p));
    }

    #[test]
    fn token_has_no_padding_or_reserved_chars() {
        let p = card("apology", "??>>", "~~~ÿÿÿ", "/+=");
        let token = encode(&p);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn restore_pads_to_multiple_of_four() {
        assert_eq!(restore_standard("e30"), "e30=");
        assert_eq!(restore_standard("eyJhIjoxfQ"), "eyJhIjoxfQ==");
        assert_eq!(restore_standard("WzFd"), "WzFd");
        assert_eq!(restore_standard("a-b_"), "a+b/");
    }

    #[test]
    fn empty_is_invalid() {
        assert_eq!(try_decode(""), Err(LinkError::Empty));
        assert!(decode("").is_none());
        assert!(decode_param(None).is_none());
        assert!(decode_param(Some("")).is_none());
    }

    #[test]
    fn bad_alphabet_is_invalid() {
        assert!(matches!(
            try_decode("!!!not-base64!!!"),
            Err(LinkError::Base64(_))
        ));
        assert!(decode("not-valid-base64!!").is_none());
    }

    #[test]
    fn remainder_one_is_invalid() {
        assert!(matches!(try_decode("eyJhI"), Err(LinkError::Base64(_))));
    }

    #[test]
    fn non_utf8_is_invalid() {
        // 0xff 0xfe 0x7b
        assert!(matches!(try_decode("__57"), Err(LinkError::Utf8(_))));
    }

    #[test]
    fn non_object_json_is_invalid() {
        // [1]
        assert_eq!(try_decode("WzFd"), Err(LinkError::NotAnObject));
        // null
        assert_eq!(try_decode("bnVsbA"), Err(LinkError::NotAnObject));
        // "x"
        assert_eq!(try_decode("Ingi"), Err(LinkError::NotAnObject));
    }

    #[test]
    fn bad_json_is_invalid() {
        // {"a":
        let token = URL_SAFE_NO_PAD.encode(b"{\"a\":");
        assert!(matches!(try_decode(&token), Err(LinkError::Json(_))));
    }

    #[test]
    fn object_with_missing_fields_is_returned_as_is() {
        // {"a":1}
        let decoded = decode("eyJhIjoxfQ").expect("decode");
        assert_eq!(decoded.fields().len(), 1);
        assert_eq!(decoded.fields()["a"], 1);
        assert!(decoded.template().is_none());
        assert!(decoded.to_payload().is_none());
    }

    #[test]
    fn accepts_standard_alphabet_characters() {
        let p = card("proposal", "Jöhn 🍕", "Happy Birthday! 🎉", "Alice 💝");
        let token = encode(&p);
        assert!(token.contains('-'));
        let standard = token.replace('-', "+").replace('_', "/");
        assert_eq!(decode(&standard), decode(&token));
    }

    #[test]
    fn accepts_explicit_padding() {
        assert!(decode("e30=").is_some());
        assert!(decode("e3=0").is_none());
    }
}
