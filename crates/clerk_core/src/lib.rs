//! Clerk core: pure normalization and extraction for personnel rows.
//!
//! Everything in this crate is deterministic and side-effect free: raw
//! spreadsheet text goes in, form-ready values come out. IO, retries and
//! the portal wire format live in `clerk_engine`.
mod category;
mod education;
mod org;
mod plan;
mod record;

pub use category::{normalize_job_category, JobCategory};
pub use education::{normalize_education, title_case};
pub use org::{extract_org_components, OrgKeywords, OrgPathComponents};
pub use plan::{build_entry_plan, EntryPlan};
pub use record::{normalize_nip, EmployeeRow, SpmtReference};
