use serde::Serialize;

/// Background melody played at reveal time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicStyle {
    Happy,
    Romantic,
    Soft,
}

/// Presentation metadata for one card template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub title: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    /// Gradient stops for the card background, first to last.
    pub gradient: [&'static str; 3],
    pub accent: &'static str,
    pub music: MusicStyle,
    /// Float hearts alongside the confetti.
    pub hearts: bool,
}

pub const DEFAULT_TEMPLATE_ID: &str = "birthday";

pub static TEMPLATES: &[Template] = &[
    Template {
        id: "birthday",
        title: "Happy Birthday!",
        emoji: "🎂",
        description: "Celebrate their special day with joy",
        gradient: ["pink-400", "red-400", "yellow-400"],
        accent: "pink-600",
        music: MusicStyle::Happy,
        hearts: true,
    },
    Template {
        id: "proposal",
        title: "Will You?",
        emoji: "💍",
        description: "Ask the big question beautifully",
        gradient: ["purple-400", "pink-400", "red-400"],
        accent: "purple-600",
        music: MusicStyle::Romantic,
        hearts: true,
    },
    Template {
        id: "apology",
        title: "I'm Sorry",
        emoji: "💙",
        description: "Say sorry from the heart",
        gradient: ["blue-400", "indigo-400", "purple-400"],
        accent: "blue-600",
        music: MusicStyle::Soft,
        hearts: false,
    },
    Template {
        id: "graduation",
        title: "Happy Graduation!",
        emoji: "🎓",
        description: "Celebrate a huge milestone",
        gradient: ["blue-600", "indigo-600", "purple-600"],
        accent: "blue-600",
        music: MusicStyle::Happy,
        hearts: false,
    },
    Template {
        id: "anniversary",
        title: "Happy Anniversary!",
        emoji: "🍷",
        description: "Toast to your beautiful journey",
        gradient: ["red-400", "pink-500", "purple-500"],
        accent: "red-600",
        music: MusicStyle::Romantic,
        hearts: false,
    },
];

/// Exact lookup. `None` for identifiers not in the catalog.
pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Lookup with fallback to the default template, as the reveal view does.
pub fn lookup(id: &str) -> &'static Template {
    find(id).unwrap_or_else(default_template)
}

pub fn default_template() -> &'static Template {
    &TEMPLATES[0]
}

pub fn ids() -> impl Iterator<Item = &'static str> {
    TEMPLATES.iter().map(|t| t.id)
}
