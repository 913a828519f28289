use serde::Serialize;

use crate::catalog::{self, Template};
use crate::effects::EffectsController;
use crate::types::DecodedCard;

pub const COUNTDOWN_CAPTION: &str = "Get ready for something special...";
pub const REPLAY_LABEL: &str = "Watch Experience Again";

/// What the reveal screen shows for one card.
///
/// Built from a [`DecodedCard`] so links with missing or mistyped fields still
/// render: absent text becomes empty, an unknown template falls back to the
/// catalog default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    /// Template id exactly as carried by the link, possibly empty.
    pub template_id: String,
    pub template: &'static Template,
    pub receiver: String,
    pub message: String,
    pub sender: String,
    pub timestamp: Option<i64>,
}

impl CardView {
    pub fn from_card(card: &DecodedCard) -> Self {
        let template_id = card.template().unwrap_or_default().to_string();
        Self {
            template: catalog::lookup(&template_id),
            template_id,
            receiver: card.receiver().unwrap_or_default().to_string(),
            message: card.message().unwrap_or_default().to_string(),
            sender: card.sender().unwrap_or_default().to_string(),
            timestamp: card.timestamp(),
        }
    }

    /// Fresh effects session for this card.
    pub fn effects(&self) -> EffectsController {
        EffectsController::for_template(&self.template_id)
    }

    pub fn salutation(&self) -> String {
        format!("Dear {},", self.receiver)
    }

    pub fn quoted_message(&self) -> String {
        format!("\"{}\"", self.message)
    }

    /// Card body, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.template.emoji.to_string(),
            self.template.title.to_string(),
            self.salutation(),
            self.quoted_message(),
            "With love,".to_string(),
            self.sender.clone(),
        ]
    }
}
