use serde::{Deserialize, Serialize};

/// Top-level screen shown to the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Landing,
    Onboarding,
    Editor,
}

impl Screen {
    /// First matching rule wins: landing until it has been seen, then
    /// onboarding until it is completed and a working document exists, then
    /// the editor.
    pub fn select(
        has_seen_landing: bool,
        has_completed_onboarding: bool,
        has_working_document: bool,
    ) -> Self {
        if !has_seen_landing {
            Screen::Landing
        } else if !has_completed_onboarding || !has_working_document {
            Screen::Onboarding
        } else {
            Screen::Editor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseen_landing_always_wins() {
        for completed in [false, true] {
            for working in [false, true] {
                assert_eq!(Screen::select(false, completed, working), Screen::Landing);
            }
        }
    }

    #[test]
    fn test_onboarding_until_completed_with_document() {
        assert_eq!(Screen::select(true, false, false), Screen::Onboarding);
        assert_eq!(Screen::select(true, false, true), Screen::Onboarding);
        assert_eq!(Screen::select(true, true, false), Screen::Onboarding);
    }

    #[test]
    fn test_editor_when_all_set() {
        assert_eq!(Screen::select(true, true, true), Screen::Editor);
    }
}
