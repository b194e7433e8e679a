// Document Model: builds structurally valid resumes (blank or from a built-in
// sample) and owns the structural edit commands that keep positions dense.
// All resume, section, and entry ids come from `new_id`.

pub mod blank;
pub mod editor;
pub mod locale;
pub mod positions;
pub mod samples;

use uuid::Uuid;

pub use blank::create_blank;
pub use samples::instantiate_sample;

/// Allocates a fresh document id. The single allocation path for resumes,
/// sections, and entries.
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}
