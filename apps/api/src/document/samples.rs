//! Built-in sample resumes, one per content language.
//!
//! Templates are built once and never handed out. `instantiate_sample` clones
//! the template and re-keys every id, so each instance is independent of the
//! template and of every other instance.

use std::sync::OnceLock;

use chrono::Utc;
use uuid::Uuid;

use crate::document::blank::default_metadata;
use crate::document::locale::default_section_title;
use crate::document::new_id;
use crate::document::positions::repack;
use crate::models::language::Language;
use crate::models::resume::{BasicInfo, Entry, Link, Resume, Section, SectionType, LOCAL_USER_ID};

static SAMPLE_EN: OnceLock<Resume> = OnceLock::new();
static SAMPLE_AR: OnceLock<Resume> = OnceLock::new();

/// Deep-copies the built-in template for `language` and gives it fresh ids and
/// timestamps, so once saved it is indistinguishable from a user-authored
/// document.
pub fn instantiate_sample(language: Language) -> Resume {
    let mut resume = template(language).clone();
    rekey(&mut resume);
    let now = Utc::now();
    resume.created_at = now;
    resume.updated_at = now;
    resume
}

fn template(language: Language) -> &'static Resume {
    match language {
        Language::En => SAMPLE_EN.get_or_init(build_english),
        Language::Ar => SAMPLE_AR.get_or_init(build_arabic),
    }
}

/// Allocates new ids for the resume and all of its children and restamps the
/// back-references to match.
fn rekey(resume: &mut Resume) {
    resume.id = new_id();
    for section in &mut resume.sections {
        section.id = new_id();
        section.resume_id = resume.id;
        for entry in &mut section.entries {
            entry.id = new_id();
            entry.section_id = section.id;
        }
    }
}

struct EntrySeed<'a> {
    title: &'a str,
    subtitle: Option<&'a str>,
    org: Option<&'a str>,
    location: Option<&'a str>,
    start: Option<&'a str>,
    end: Option<&'a str>,
    current: bool,
    description: &'a str,
    bullets: &'a [&'a str],
    project_url: Option<&'a str>,
    tech: &'a [&'a str],
}

impl Default for EntrySeed<'_> {
    fn default() -> Self {
        Self {
            title: "",
            subtitle: None,
            org: None,
            location: None,
            start: None,
            end: None,
            current: false,
            description: "",
            bullets: &[],
            project_url: None,
            tech: &[],
        }
    }
}

impl EntrySeed<'_> {
    fn into_entry(self) -> Entry {
        let owned = |s: Option<&str>| s.map(str::to_string);
        Entry {
            title: self.title.to_string(),
            subtitle: owned(self.subtitle),
            company_or_org: owned(self.org),
            location: owned(self.location),
            start_date: owned(self.start),
            end_date: owned(self.end),
            is_current: self.current,
            description: self.description.to_string(),
            bullets: self.bullets.iter().map(|b| b.to_string()).collect(),
            project_url: owned(self.project_url),
            tech_stack: self.tech.iter().map(|t| t.to_string()).collect(),
            ..Entry::placeholder(Uuid::nil(), Uuid::nil(), 0)
        }
    }
}

fn section(language: Language, section_type: SectionType, seeds: Vec<EntrySeed<'_>>) -> Section {
    let title = default_section_title(section_type, language);
    let mut section = Section::new(Uuid::nil(), Uuid::nil(), section_type, title, 0);
    section.entries = seeds.into_iter().map(EntrySeed::into_entry).collect();
    repack(&mut section.entries);
    section
}

fn assemble(language: Language, title: &str, basic_info: BasicInfo, mut sections: Vec<Section>) -> Resume {
    repack(&mut sections);
    let now = Utc::now();
    Resume {
        id: Uuid::nil(),
        user_id: LOCAL_USER_ID.to_string(),
        title: title.to_string(),
        created_at: now,
        updated_at: now,
        basic_info,
        metadata: default_metadata(language),
        sections,
    }
}

fn link(label: &str, url: &str) -> Link {
    Link {
        label: label.to_string(),
        url: url.to_string(),
    }
}

fn build_english() -> Resume {
    let lang = Language::En;
    let basic_info = BasicInfo {
        name: "Sarah Al-Harbi".to_string(),
        email: "sarah.alharbi@example.com".to_string(),
        phone: Some("+966 50 123 4567".to_string()),
        location: Some("Riyadh, Saudi Arabia".to_string()),
        headline: Some("Senior Software Engineer".to_string()),
        links: vec![
            link("LinkedIn", "https://linkedin.com/in/sarah-alharbi"),
            link("GitHub", "https://github.com/sarah-alharbi"),
        ],
    };
    let sections = vec![
        section(
            lang,
            SectionType::Summary,
            vec![EntrySeed {
                title: "Summary",
                description: "Software engineer with 7 years of experience building payment \
                              and logistics platforms. Focused on reliable backend systems, \
                              clear APIs and mentoring growing teams.",
                ..Default::default()
            }],
        ),
        section(
            lang,
            SectionType::WorkExperience,
            vec![
                EntrySeed {
                    title: "Senior Software Engineer",
                    org: Some("Tamkeen Payments"),
                    location: Some("Riyadh"),
                    start: Some("2021-03"),
                    current: true,
                    bullets: &[
                        "Led the migration of the settlement engine to an event-driven design, cutting reconciliation time by 60%",
                        "Designed the merchant onboarding API used by more than 4,000 businesses",
                        "Mentored five engineers through the company's first formal review cycle",
                    ],
                    tech: &["Rust", "PostgreSQL", "Kafka"],
                    ..Default::default()
                },
                EntrySeed {
                    title: "Software Engineer",
                    org: Some("Masar Logistics"),
                    location: Some("Jeddah"),
                    start: Some("2018-06"),
                    end: Some("2021-02"),
                    bullets: &[
                        "Built route planning services handling 25,000 daily deliveries",
                        "Reduced API p95 latency from 800ms to 120ms through query and cache redesign",
                    ],
                    tech: &["Go", "Redis", "Docker"],
                    ..Default::default()
                },
            ],
        ),
        section(
            lang,
            SectionType::Education,
            vec![EntrySeed {
                title: "B.Sc. Computer Science",
                org: Some("King Saud University"),
                location: Some("Riyadh"),
                start: Some("2014-09"),
                end: Some("2018-05"),
                description: "Graduated with first-class honours.",
                ..Default::default()
            }],
        ),
        section(
            lang,
            SectionType::Skill,
            vec![
                EntrySeed {
                    title: "Languages",
                    tech: &["Rust", "Go", "TypeScript", "SQL"],
                    ..Default::default()
                },
                EntrySeed {
                    title: "Infrastructure",
                    tech: &["Kubernetes", "Terraform", "AWS"],
                    ..Default::default()
                },
            ],
        ),
        section(
            lang,
            SectionType::Project,
            vec![EntrySeed {
                title: "Open Ledger",
                subtitle: Some("Double-entry bookkeeping library"),
                description: "An open source ledger library used in several fintech prototypes.",
                project_url: Some("https://github.com/sarah-alharbi/open-ledger"),
                tech: &["Rust"],
                ..Default::default()
            }],
        ),
    ];
    assemble(lang, "Sample Resume", basic_info, sections)
}

fn build_arabic() -> Resume {
    let lang = Language::Ar;
    let basic_info = BasicInfo {
        name: "سارة الحربي".to_string(),
        email: "sarah.alharbi@example.com".to_string(),
        phone: Some("+966 50 123 4567".to_string()),
        location: Some("الرياض، المملكة العربية السعودية".to_string()),
        headline: Some("مهندسة برمجيات أولى".to_string()),
        links: vec![link("لينكدإن", "https://linkedin.com/in/sarah-alharbi")],
    };
    let sections = vec![
        section(
            lang,
            SectionType::Summary,
            vec![EntrySeed {
                title: "الملخص",
                description: "مهندسة برمجيات بخبرة سبع سنوات في بناء منصات المدفوعات \
                              والخدمات اللوجستية، مع تركيز على الأنظمة الخلفية الموثوقة \
                              وتطوير الفرق.",
                ..Default::default()
            }],
        ),
        section(
            lang,
            SectionType::WorkExperience,
            vec![
                EntrySeed {
                    title: "مهندسة برمجيات أولى",
                    org: Some("تمكين للمدفوعات"),
                    location: Some("الرياض"),
                    start: Some("2021-03"),
                    current: true,
                    bullets: &[
                        "قيادة نقل محرك التسويات إلى تصميم قائم على الأحداث وتقليل وقت المطابقة بنسبة 60%",
                        "تصميم واجهة تسجيل التجار المستخدمة من أكثر من 4000 منشأة",
                    ],
                    tech: &["Rust", "PostgreSQL"],
                    ..Default::default()
                },
                EntrySeed {
                    title: "مهندسة برمجيات",
                    org: Some("مسار للخدمات اللوجستية"),
                    location: Some("جدة"),
                    start: Some("2018-06"),
                    end: Some("2021-02"),
                    bullets: &["بناء خدمات تخطيط المسارات لأكثر من 25000 شحنة يومياً"],
                    tech: &["Go", "Redis"],
                    ..Default::default()
                },
            ],
        ),
        section(
            lang,
            SectionType::Education,
            vec![EntrySeed {
                title: "بكالوريوس علوم الحاسب",
                org: Some("جامعة الملك سعود"),
                location: Some("الرياض"),
                start: Some("2014-09"),
                end: Some("2018-05"),
                description: "مرتبة الشرف الأولى.",
                ..Default::default()
            }],
        ),
        section(
            lang,
            SectionType::Skill,
            vec![EntrySeed {
                title: "لغات البرمجة",
                tech: &["Rust", "Go", "TypeScript", "SQL"],
                ..Default::default()
            }],
        ),
    ];
    assemble(lang, "سيرة نموذجية", basic_info, sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::positions::is_dense;
    use std::collections::HashSet;

    #[test]
    fn test_sample_locale_matches_language() {
        assert_eq!(instantiate_sample(Language::En).metadata.locale, "en-US");
        let ar = instantiate_sample(Language::Ar);
        assert_eq!(ar.metadata.locale, "ar-SA");
        assert_eq!(ar.metadata.font_family, "IBM Plex Sans Arabic");
        assert_eq!(ar.sections[0].title_override, "الملخص");
    }

    #[test]
    fn test_two_samples_have_distinct_ids() {
        let a = instantiate_sample(Language::Ar);
        let b = instantiate_sample(Language::Ar);
        assert_ne!(a.id, b.id);

        let a_ids: HashSet<Uuid> = a.all_ids().into_iter().collect();
        assert!(b.all_ids().iter().all(|id| !a_ids.contains(id)));
        assert!(!a_ids.contains(&Uuid::nil()));
    }

    #[test]
    fn test_samples_share_no_mutable_structure() {
        let mut a = instantiate_sample(Language::Ar);
        let b = instantiate_sample(Language::Ar);

        let bullets_before = b.sections[1].entries[0].bullets.clone();
        a.sections[1].entries[0].bullets.push("إضافة".to_string());
        a.sections[1].entries[0].bullets[0].clear();

        assert_eq!(b.sections[1].entries[0].bullets, bullets_before);
        assert_eq!(
            instantiate_sample(Language::Ar).sections[1].entries[0].bullets,
            bullets_before
        );
    }

    #[test]
    fn test_sample_positions_dense_and_back_references_restamped() {
        for language in [Language::En, Language::Ar] {
            let resume = instantiate_sample(language);
            assert!(is_dense(&resume.sections));
            for section in &resume.sections {
                assert_eq!(section.resume_id, resume.id);
                assert!(is_dense(&section.entries));
                for entry in &section.entries {
                    assert_eq!(entry.section_id, section.id);
                }
            }
        }
    }

    #[test]
    fn test_sample_timestamps_are_fresh() {
        let before = Utc::now();
        let resume = instantiate_sample(Language::En);
        assert!(resume.created_at >= before);
        assert_eq!(resume.created_at, resume.updated_at);
    }
}
