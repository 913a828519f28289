pub mod catalog;
pub mod codec;
pub mod compose;
pub mod effects;
pub mod link;
pub mod reveal;
pub mod route;
pub mod types;

pub use codec::{decode, decode_param, encode, try_decode, try_encode};
pub use compose::{generate, preview, share_text, ComposeError, ComposeForm, GeneratedLink};
pub use effects::{Effect, EffectsController, Phase};
pub use link::{build_card_link, extract_token, is_local_base, whatsapp_url};
pub use reveal::CardView;
pub use route::{resolve_view, View};
pub use types::*;
