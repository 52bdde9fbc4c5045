//! Domain model for per-store inspection checklists.

mod checklist;
mod error;
mod session;

pub use checklist::{ChecklistEntry, ChecklistStatus, EntryUpdate, PhotoMarker};
pub use error::{InspectionError, ParseChecklistStatusError};
pub use session::InspectionSession;
