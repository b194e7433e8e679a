use crate::models::language::Language;
use crate::models::resume::SectionType;

pub fn default_resume_title(language: Language) -> &'static str {
    match language {
        Language::En => "My Resume",
        Language::Ar => "سيرتي الذاتية",
    }
}

/// Locale-appropriate display name for a section type.
pub fn default_section_title(section_type: SectionType, language: Language) -> &'static str {
    match (section_type, language) {
        (SectionType::Summary, Language::En) => "Summary",
        (SectionType::Summary, Language::Ar) => "الملخص",
        (SectionType::WorkExperience, Language::En) => "Experience",
        (SectionType::WorkExperience, Language::Ar) => "الخبرات",
        (SectionType::Education, Language::En) => "Education",
        (SectionType::Education, Language::Ar) => "التعليم",
        (SectionType::Skill, Language::En) => "Skills",
        (SectionType::Skill, Language::Ar) => "المهارات",
        (SectionType::Project, Language::En) => "Projects",
        (SectionType::Project, Language::Ar) => "المشاريع",
        (SectionType::Certification, Language::En) => "Certifications",
        (SectionType::Certification, Language::Ar) => "الشهادات",
        (SectionType::Language, Language::En) => "Languages",
        (SectionType::Language, Language::Ar) => "اللغات",
        (SectionType::Volunteer, Language::En) => "Volunteering",
        (SectionType::Volunteer, Language::Ar) => "العمل التطوعي",
        (SectionType::Award, Language::En) => "Awards",
        (SectionType::Award, Language::Ar) => "الجوائز",
        (SectionType::Custom, Language::En) => "Custom Section",
        (SectionType::Custom, Language::Ar) => "قسم مخصص",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_section_titles_arabic() {
        assert_eq!(default_section_title(SectionType::Summary, Language::Ar), "الملخص");
        assert_eq!(
            default_section_title(SectionType::WorkExperience, Language::Ar),
            "الخبرات"
        );
        assert_eq!(default_section_title(SectionType::Education, Language::Ar), "التعليم");
        assert_eq!(default_section_title(SectionType::Skill, Language::Ar), "المهارات");
    }

    #[test]
    fn test_resume_titles() {
        assert_eq!(default_resume_title(Language::En), "My Resume");
        assert_eq!(default_resume_title(Language::Ar), "سيرتي الذاتية");
    }
}
