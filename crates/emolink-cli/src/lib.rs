pub use emolink_core as card;

pub mod cli;
pub mod color;
pub mod completion;
pub mod compose;
pub mod config;
pub mod logging;
pub mod open;
pub mod qr;
pub mod templates;
