//! Structural edit commands against a resume.
//!
//! Every command leaves section positions and, within each section, entry
//! positions dense, keeps the cached back-references pointing at the real
//! containers, and refreshes `updated_at`.

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::document::locale::default_section_title;
use crate::document::new_id;
use crate::document::positions::{insert_at, is_dense, move_to, remove_at, sort_and_repack};
use crate::models::language::Language;
use crate::models::resume::{Entry, Link, Resume, Section, SectionType, Theme};

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("section {0} not found")]
    SectionNotFound(Uuid),

    #[error("entry {entry_id} not found in section {section_id}")]
    EntryNotFound { section_id: Uuid, entry_id: Uuid },

    #[error("invalid value: {0}")]
    Invalid(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Patches
// ────────────────────────────────────────────────────────────────────────────

/// Partial update for an entry. Absent fields are left alone; for nullable
/// fields an empty string clears the value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub company_or_org: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: Option<bool>,
    pub description: Option<String>,
    pub bullets: Option<Vec<String>>,
    pub project_url: Option<String>,
    pub tech_stack: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPatch {
    pub title_override: Option<String>,
    pub collapsed: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfoPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub headline: Option<String>,
    pub links: Option<Vec<Link>>,
}

/// Visual settings. The content locale is not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataPatch {
    pub theme: Option<Theme>,
    pub font_family: Option<String>,
    pub line_height: Option<f32>,
    pub accent_color: Option<String>,
    pub primary_color: Option<String>,
}

fn nullable(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// The content language the resume was created in. Unknown locales fall back
/// to English titles.
pub fn content_language(resume: &Resume) -> Language {
    Language::from_locale(&resume.metadata.locale).unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Adds an empty section titled for the resume's content language. `None`
/// appends. Returns the new section id.
pub fn add_section(resume: &mut Resume, section_type: SectionType, position: Option<u32>) -> Uuid {
    let title = default_section_title(section_type, content_language(resume));
    let section = Section::new(new_id(), resume.id, section_type, title, 0);
    let id = section.id;
    insert_at(&mut resume.sections, position, section);
    resume.touch();
    id
}

pub fn remove_section(resume: &mut Resume, section_id: Uuid) -> Result<Section, EditError> {
    let index = section_index(resume, section_id)?;
    let removed = remove_at(&mut resume.sections, index)
        .ok_or(EditError::SectionNotFound(section_id))?;
    resume.touch();
    Ok(removed)
}

pub fn move_section(resume: &mut Resume, section_id: Uuid, to: u32) -> Result<u32, EditError> {
    let index = section_index(resume, section_id)?;
    let position = move_to(&mut resume.sections, index, to)
        .ok_or(EditError::SectionNotFound(section_id))?;
    resume.touch();
    Ok(position)
}

pub fn update_section(
    resume: &mut Resume,
    section_id: Uuid,
    patch: SectionPatch,
) -> Result<(), EditError> {
    let section = resume
        .section_mut(section_id)
        .ok_or(EditError::SectionNotFound(section_id))?;
    if let Some(title) = patch.title_override {
        section.title_override = title;
    }
    if let Some(collapsed) = patch.collapsed {
        section.collapsed = collapsed;
    }
    resume.touch();
    Ok(())
}

fn section_index(resume: &Resume, section_id: Uuid) -> Result<usize, EditError> {
    resume
        .sections
        .iter()
        .position(|s| s.id == section_id)
        .ok_or(EditError::SectionNotFound(section_id))
}

// ────────────────────────────────────────────────────────────────────────────
// Entries
// ────────────────────────────────────────────────────────────────────────────

/// Adds an empty entry to a section. `None` appends. Returns the new entry id.
pub fn add_entry(
    resume: &mut Resume,
    section_id: Uuid,
    position: Option<u32>,
) -> Result<Uuid, EditError> {
    let section = resume
        .section_mut(section_id)
        .ok_or(EditError::SectionNotFound(section_id))?;
    let entry = Entry::placeholder(new_id(), section.id, 0);
    let id = entry.id;
    insert_at(&mut section.entries, position, entry);
    resume.touch();
    Ok(id)
}

pub fn remove_entry(
    resume: &mut Resume,
    section_id: Uuid,
    entry_id: Uuid,
) -> Result<Entry, EditError> {
    let section = resume
        .section_mut(section_id)
        .ok_or(EditError::SectionNotFound(section_id))?;
    let index = entry_index(section, entry_id)?;
    let removed = remove_at(&mut section.entries, index).ok_or(EditError::EntryNotFound {
        section_id,
        entry_id,
    })?;
    resume.touch();
    Ok(removed)
}

pub fn move_entry(
    resume: &mut Resume,
    section_id: Uuid,
    entry_id: Uuid,
    to: u32,
) -> Result<u32, EditError> {
    let section = resume
        .section_mut(section_id)
        .ok_or(EditError::SectionNotFound(section_id))?;
    let index = entry_index(section, entry_id)?;
    let position = move_to(&mut section.entries, index, to).ok_or(EditError::EntryNotFound {
        section_id,
        entry_id,
    })?;
    resume.touch();
    Ok(position)
}

pub fn update_entry(
    resume: &mut Resume,
    section_id: Uuid,
    entry_id: Uuid,
    patch: EntryPatch,
) -> Result<(), EditError> {
    let section = resume
        .section_mut(section_id)
        .ok_or(EditError::SectionNotFound(section_id))?;
    let entry = section
        .entry_mut(entry_id)
        .ok_or(EditError::EntryNotFound {
            section_id,
            entry_id,
        })?;

    if let Some(title) = patch.title {
        entry.title = title;
    }
    if let Some(subtitle) = patch.subtitle {
        entry.subtitle = nullable(subtitle);
    }
    if let Some(org) = patch.company_or_org {
        entry.company_or_org = nullable(org);
    }
    if let Some(location) = patch.location {
        entry.location = nullable(location);
    }
    if let Some(start) = patch.start_date {
        entry.start_date = nullable(start);
    }
    if let Some(end) = patch.end_date {
        entry.end_date = nullable(end);
    }
    if let Some(is_current) = patch.is_current {
        entry.is_current = is_current;
    }
    if let Some(description) = patch.description {
        entry.description = description;
    }
    if let Some(bullets) = patch.bullets {
        entry.bullets = bullets;
    }
    if let Some(url) = patch.project_url {
        entry.project_url = nullable(url);
    }
    if let Some(tech) = patch.tech_stack {
        entry.tech_stack = tech;
    }
    resume.touch();
    Ok(())
}

fn entry_index(section: &Section, entry_id: Uuid) -> Result<usize, EditError> {
    section
        .entries
        .iter()
        .position(|e| e.id == entry_id)
        .ok_or(EditError::EntryNotFound {
            section_id: section.id,
            entry_id,
        })
}

// ────────────────────────────────────────────────────────────────────────────
// Document-level fields
// ────────────────────────────────────────────────────────────────────────────

pub fn set_title(resume: &mut Resume, title: String) -> Result<(), EditError> {
    if title.trim().is_empty() {
        return Err(EditError::Invalid("title must not be empty".to_string()));
    }
    resume.title = title;
    resume.touch();
    Ok(())
}

pub fn update_basic_info(resume: &mut Resume, patch: BasicInfoPatch) {
    let info = &mut resume.basic_info;
    if let Some(name) = patch.name {
        info.name = name;
    }
    if let Some(email) = patch.email {
        info.email = email;
    }
    if let Some(phone) = patch.phone {
        info.phone = nullable(phone);
    }
    if let Some(location) = patch.location {
        info.location = nullable(location);
    }
    if let Some(headline) = patch.headline {
        info.headline = nullable(headline);
    }
    if let Some(links) = patch.links {
        info.links = links;
    }
    resume.touch();
}

pub fn update_metadata(resume: &mut Resume, patch: MetadataPatch) -> Result<(), EditError> {
    if let Some(line_height) = patch.line_height {
        if !(line_height.is_finite() && line_height > 0.0) {
            return Err(EditError::Invalid(format!(
                "line height must be positive, got {line_height}"
            )));
        }
    }
    let meta = &mut resume.metadata;
    if let Some(theme) = patch.theme {
        meta.theme = theme;
    }
    if let Some(font) = patch.font_family {
        meta.font_family = font;
    }
    if let Some(line_height) = patch.line_height {
        meta.line_height = line_height;
    }
    if let Some(color) = patch.accent_color {
        meta.accent_color = color;
    }
    if let Some(color) = patch.primary_color {
        meta.primary_color = color;
    }
    resume.touch();
    Ok(())
}

/// True when sibling positions are dense and every back-reference matches its
/// container.
pub fn is_well_formed(resume: &Resume) -> bool {
    is_dense(&resume.sections)
        && resume.sections.iter().all(|section| {
            section.resume_id == resume.id
                && is_dense(&section.entries)
                && section.entries.iter().all(|e| e.section_id == section.id)
        })
}

/// Restores the structural invariants on a document that came from outside
/// the editor: orders siblings by stored position, repacks to `0..n-1`, and
/// restamps back-references from containment.
pub fn normalize(resume: &mut Resume) {
    sort_and_repack(&mut resume.sections);
    for section in &mut resume.sections {
        section.resume_id = resume.id;
        sort_and_repack(&mut section.entries);
        for entry in &mut section.entries {
            entry.section_id = section.id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::create_blank;

    fn assert_dense(resume: &Resume) {
        assert!(is_dense(&resume.sections), "sections not dense");
        for section in &resume.sections {
            assert!(is_dense(&section.entries), "entries not dense in {}", section.id);
        }
        assert!(is_well_formed(resume));
    }

    #[test]
    fn test_add_section_uses_content_language_title() {
        let mut resume = create_blank(Language::Ar);
        let id = add_section(&mut resume, SectionType::Project, Some(1));
        let section = resume.section(id).unwrap();
        assert_eq!(section.title_override, "المشاريع");
        assert_eq!(section.position, 1);
        assert_eq!(section.resume_id, resume.id);
        assert_eq!(resume.sections.len(), 5);
        assert_dense(&resume);
    }

    #[test]
    fn test_remove_section_repacks() {
        let mut resume = create_blank(Language::En);
        let second = resume.sections[1].id;
        let removed = remove_section(&mut resume, second).unwrap();
        assert_eq!(removed.section_type, SectionType::WorkExperience);
        assert_eq!(resume.sections.len(), 3);
        assert_dense(&resume);
        assert_eq!(
            remove_section(&mut resume, second),
            Err(EditError::SectionNotFound(second))
        );
    }

    #[test]
    fn test_move_section_resequences() {
        let mut resume = create_blank(Language::En);
        let skills = resume.sections[3].id;
        assert_eq!(move_section(&mut resume, skills, 0).unwrap(), 0);
        assert_eq!(resume.sections[0].section_type, SectionType::Skill);
        assert_eq!(resume.sections[1].section_type, SectionType::Summary);
        assert_dense(&resume);
    }

    #[test]
    fn test_entry_lifecycle_keeps_density() {
        let mut resume = create_blank(Language::En);
        let experience = resume.sections[1].id;

        let a = add_entry(&mut resume, experience, None).unwrap();
        let b = add_entry(&mut resume, experience, None).unwrap();
        let c = add_entry(&mut resume, experience, Some(0)).unwrap();
        let order: Vec<Uuid> = resume.section(experience).unwrap().entries.iter().map(|e| e.id).collect();
        assert_eq!(order, vec![c, a, b]);
        assert_dense(&resume);

        move_entry(&mut resume, experience, c, 2).unwrap();
        remove_entry(&mut resume, experience, a).unwrap();
        let order: Vec<Uuid> = resume.section(experience).unwrap().entries.iter().map(|e| e.id).collect();
        assert_eq!(order, vec![b, c]);
        assert_dense(&resume);

        for entry in &resume.section(experience).unwrap().entries {
            assert_eq!(entry.section_id, experience);
        }
    }

    #[test]
    fn test_entry_in_wrong_section_is_not_found() {
        let mut resume = create_blank(Language::En);
        let summary_entry = resume.sections[0].entries[0].id;
        let education = resume.sections[2].id;
        let err = remove_entry(&mut resume, education, summary_entry).unwrap_err();
        assert_eq!(
            err,
            EditError::EntryNotFound {
                section_id: education,
                entry_id: summary_entry
            }
        );
    }

    #[test]
    fn test_update_entry_patch() {
        let mut resume = create_blank(Language::En);
        let experience = resume.sections[1].id;
        let id = add_entry(&mut resume, experience, None).unwrap();

        let patch = EntryPatch {
            title: Some("Backend Engineer".to_string()),
            company_or_org: Some("Acme".to_string()),
            end_date: Some("2023-01".to_string()),
            bullets: Some(vec!["Shipped things".to_string()]),
            ..Default::default()
        };
        update_entry(&mut resume, experience, id, patch).unwrap();

        let current = EntryPatch {
            is_current: Some(true),
            company_or_org: Some("  ".to_string()),
            ..Default::default()
        };
        update_entry(&mut resume, experience, id, current).unwrap();

        let entry = resume.section(experience).unwrap().entry(id).unwrap();
        assert_eq!(entry.title, "Backend Engineer");
        assert!(entry.company_or_org.is_none());
        assert!(entry.is_current);
        assert_eq!(entry.end_date.as_deref(), Some("2023-01"));
        assert_eq!(entry.bullets, vec!["Shipped things".to_string()]);
    }

    #[test]
    fn test_current_flag_and_end_date_stored_as_given() {
        let mut resume = create_blank(Language::En);
        let experience = resume.sections[1].id;
        let id = add_entry(&mut resume, experience, None).unwrap();

        let patch = EntryPatch {
            is_current: Some(true),
            end_date: Some("2024-06".to_string()),
            ..Default::default()
        };
        update_entry(&mut resume, experience, id, patch).unwrap();

        let entry = resume.section(experience).unwrap().entry(id).unwrap();
        assert!(entry.is_current);
        assert_eq!(entry.end_date.as_deref(), Some("2024-06"));
    }

    #[test]
    fn test_edits_refresh_updated_at() {
        let mut resume = create_blank(Language::En);
        let before = resume.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        update_basic_info(
            &mut resume,
            BasicInfoPatch {
                name: Some("Layla".to_string()),
                ..Default::default()
            },
        );
        assert!(resume.updated_at > before);
        assert_eq!(resume.basic_info.name, "Layla");
    }

    #[test]
    fn test_metadata_patch_leaves_locale_alone() {
        let mut resume = create_blank(Language::Ar);
        update_metadata(
            &mut resume,
            MetadataPatch {
                theme: Some(Theme::Dark),
                line_height: Some(1.6),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(resume.metadata.locale, "ar-SA");
        assert_eq!(resume.metadata.theme, Theme::Dark);

        let bad = update_metadata(
            &mut resume,
            MetadataPatch {
                line_height: Some(0.0),
                ..Default::default()
            },
        );
        assert!(matches!(bad, Err(EditError::Invalid(_))));
    }

    #[test]
    fn test_set_title_rejects_blank() {
        let mut resume = create_blank(Language::En);
        assert!(set_title(&mut resume, "   ".to_string()).is_err());
        set_title(&mut resume, "Platform CV".to_string()).unwrap();
        assert_eq!(resume.title, "Platform CV");
    }

    #[test]
    fn test_normalize_repairs_positions_and_back_references() {
        let mut resume = create_blank(Language::En);
        resume.sections[0].position = 9;
        resume.sections[2].position = 4;
        resume.sections[0].entries[0].section_id = Uuid::nil();
        resume.sections[1].resume_id = Uuid::nil();
        let summary = resume.sections[0].id;

        assert!(!is_well_formed(&resume));
        normalize(&mut resume);

        assert_dense(&resume);
        assert_eq!(resume.sections.last().unwrap().id, summary);
        for section in &resume.sections {
            assert_eq!(section.resume_id, resume.id);
            for entry in &section.entries {
                assert_eq!(entry.section_id, section.id);
            }
        }
    }
}
