use chrono::Utc;

use crate::document::locale::{default_resume_title, default_section_title};
use crate::document::new_id;
use crate::models::language::Language;
use crate::models::resume::{
    BasicInfo, Entry, Resume, ResumeMetadata, Section, SectionType, Theme, LOCAL_USER_ID,
};

pub const DEFAULT_LINE_HEIGHT: f32 = 1.4;
pub const DEFAULT_COLOR: &str = "#0F172A";

/// Scaffold sections of a blank resume, in display order.
const BLANK_LAYOUT: [SectionType; 4] = [
    SectionType::Summary,
    SectionType::WorkExperience,
    SectionType::Education,
    SectionType::Skill,
];

pub fn default_metadata(language: Language) -> ResumeMetadata {
    ResumeMetadata {
        locale: language.content_locale().to_string(),
        theme: Theme::Light,
        font_family: language.default_font().to_string(),
        line_height: DEFAULT_LINE_HEIGHT,
        accent_color: DEFAULT_COLOR.to_string(),
        primary_color: DEFAULT_COLOR.to_string(),
    }
}

/// Builds a fresh resume in `language`: a SUMMARY section holding one empty
/// entry, followed by empty WORK_EXPERIENCE, EDUCATION and SKILL sections.
pub fn create_blank(language: Language) -> Resume {
    let id = new_id();
    let now = Utc::now();

    let sections = BLANK_LAYOUT
        .iter()
        .enumerate()
        .map(|(position, &section_type)| {
            let title = default_section_title(section_type, language);
            let mut section = Section::new(new_id(), id, section_type, title, position as u32);
            if section_type == SectionType::Summary {
                let mut entry = Entry::placeholder(new_id(), section.id, 0);
                entry.title = title.to_string();
                section.entries.push(entry);
            }
            section
        })
        .collect();

    Resume {
        id,
        user_id: LOCAL_USER_ID.to_string(),
        title: default_resume_title(language).to_string(),
        created_at: now,
        updated_at: now,
        basic_info: BasicInfo::default(),
        metadata: default_metadata(language),
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::positions::is_dense;
    use std::collections::HashSet;

    #[test]
    fn test_blank_has_four_sections_in_fixed_order() {
        let resume = create_blank(Language::En);
        let types: Vec<SectionType> = resume.sections.iter().map(|s| s.section_type).collect();
        assert_eq!(types, BLANK_LAYOUT.to_vec());
        assert!(is_dense(&resume.sections));
    }

    #[test]
    fn test_blank_summary_has_one_empty_entry() {
        let resume = create_blank(Language::En);
        let summary = &resume.sections[0];
        assert_eq!(summary.entries.len(), 1);
        let entry = &summary.entries[0];
        assert_eq!(entry.position, 0);
        assert_eq!(entry.title, "Summary");
        assert!(entry.description.is_empty());
        assert!(entry.bullets.is_empty());
        assert!(resume.sections[1..].iter().all(|s| s.entries.is_empty()));
    }

    #[test]
    fn test_blank_english_defaults() {
        let resume = create_blank(Language::En);
        assert_eq!(resume.title, "My Resume");
        assert_eq!(resume.user_id, LOCAL_USER_ID);
        assert_eq!(resume.metadata.locale, "en-US");
        assert_eq!(resume.metadata.font_family, "EB Garamond");
        assert_eq!(resume.metadata.theme, Theme::Light);
        assert_eq!(resume.created_at, resume.updated_at);
        let titles: Vec<&str> = resume
            .sections
            .iter()
            .map(|s| s.title_override.as_str())
            .collect();
        assert_eq!(titles, vec!["Summary", "Experience", "Education", "Skills"]);
    }

    #[test]
    fn test_blank_arabic_defaults() {
        let resume = create_blank(Language::Ar);
        assert_eq!(resume.title, "سيرتي الذاتية");
        assert_eq!(resume.metadata.locale, "ar-SA");
        assert_eq!(resume.metadata.font_family, "IBM Plex Sans Arabic");
        let titles: Vec<&str> = resume
            .sections
            .iter()
            .map(|s| s.title_override.as_str())
            .collect();
        assert_eq!(titles, vec!["الملخص", "الخبرات", "التعليم", "المهارات"]);
    }

    #[test]
    fn test_blank_back_references_point_at_containers() {
        let resume = create_blank(Language::En);
        for section in &resume.sections {
            assert_eq!(section.resume_id, resume.id);
            for entry in &section.entries {
                assert_eq!(entry.section_id, section.id);
            }
        }
    }

    #[test]
    fn test_blank_ids_are_unique() {
        let a = create_blank(Language::En);
        let b = create_blank(Language::En);
        let mut seen = HashSet::new();
        for id in a.all_ids().into_iter().chain(b.all_ids()) {
            assert!(seen.insert(id), "duplicate id {id}");
        }
    }
}
