use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed local identity. There is no multi-user concept.
pub const LOCAL_USER_ID: &str = "local-user";

/// Root document aggregate. Owns its sections by containment.
///
/// `Clone` is a deep copy: every field is owned, so a cloned resume shares no
/// mutable structure with its source. Moving a resume between the library and
/// the working document always goes through a clone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub basic_info: BasicInfo,
    pub metadata: ResumeMetadata,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Visual and locale settings. `locale` is set once at creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeMetadata {
    pub locale: String,
    pub theme: Theme,
    pub font_family: String,
    pub line_height: f32,
    pub accent_color: String,
    pub primary_color: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionType {
    Summary,
    WorkExperience,
    Education,
    Skill,
    Project,
    Certification,
    Language,
    Volunteer,
    Award,
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: Uuid,
    /// Cached back-reference to the owning resume. Containment is authoritative.
    pub resume_id: Uuid,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub title_override: String,
    pub position: u32,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// One item within a section. Only `id` and `position` carry meaning on an
/// empty entry; every other field may be blank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    /// Cached back-reference to the owning section. Containment is authoritative.
    pub section_id: Uuid,
    pub position: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub company_or_org: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub project_url: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

impl Entry {
    /// A blank placeholder row.
    pub fn placeholder(id: Uuid, section_id: Uuid, position: u32) -> Self {
        Self {
            id,
            section_id,
            position,
            title: String::new(),
            subtitle: None,
            company_or_org: None,
            location: None,
            start_date: None,
            end_date: None,
            is_current: false,
            description: String::new(),
            bullets: Vec::new(),
            project_url: None,
            tech_stack: Vec::new(),
        }
    }
}

impl Section {
    pub fn new(
        id: Uuid,
        resume_id: Uuid,
        section_type: SectionType,
        title_override: impl Into<String>,
        position: u32,
    ) -> Self {
        Self {
            id,
            resume_id,
            section_type,
            title_override: title_override.into(),
            position,
            collapsed: false,
            entries: Vec::new(),
        }
    }

    pub fn entry(&self, entry_id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }

    pub fn entry_mut(&mut self, entry_id: Uuid) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == entry_id)
    }
}

impl Resume {
    pub fn section(&self, section_id: Uuid) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn section_mut(&mut self, section_id: Uuid) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    /// Marks the document as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Every id held by this document: its own, its sections', its entries'.
    #[cfg(test)]
    pub fn all_ids(&self) -> Vec<Uuid> {
        let mut ids = vec![self.id];
        for section in &self.sections {
            ids.push(section.id);
            ids.extend(section.entries.iter().map(|e| e.id));
        }
        ids
    }
}
