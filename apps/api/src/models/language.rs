use serde::{Deserialize, Serialize};

/// The two supported languages.
///
/// Used both for the application chrome language (stored on the library) and
/// for a resume's content language (fixed at creation). The two are stored
/// independently and changing one never rewrites the other.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    pub fn direction(self) -> TextDirection {
        match self {
            Language::Ar => TextDirection::Rtl,
            Language::En => TextDirection::Ltr,
        }
    }

    /// Content locale stamped into a new resume's metadata.
    pub fn content_locale(self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Ar => "ar-SA",
        }
    }

    /// Default font family for a new resume written in this language.
    pub fn default_font(self) -> &'static str {
        match self {
            Language::En => "EB Garamond",
            Language::Ar => "IBM Plex Sans Arabic",
        }
    }

    /// Resolves a stored content locale back to its language.
    pub fn from_locale(locale: &str) -> Option<Self> {
        match locale.split(['-', '_']).next()? {
            "en" => Some(Language::En),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

/// Root document attributes the presentation layer applies for the current
/// chrome language. Derived, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentAttributes {
    pub dir: TextDirection,
    pub lang: String,
}

impl From<Language> for DocumentAttributes {
    fn from(language: Language) -> Self {
        Self {
            dir: language.direction(),
            lang: language.code().to_string(),
        }
    }
}
