pub mod language;
pub mod library;
pub mod resume;
