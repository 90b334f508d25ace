use crate::category::{normalize_job_category, JobCategory};
use crate::education::normalize_education;
use crate::org::{extract_org_components, OrgKeywords, OrgPathComponents};
use crate::record::{normalize_nip, EmployeeRow, SpmtReference};

/// Form-ready values derived from one spreadsheet row.
///
/// This is everything the form-filling layer needs that requires
/// normalization; fields the forms take verbatim (dates, certificate
/// numbers) stay on the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPlan {
    /// Cleaned employee identifier.
    pub nip: String,
    /// Education program in picklist vocabulary.
    pub education: String,
    /// Institution name, upper-cased the way the picklist search expects.
    pub institution: String,
    /// Which of the position form branches to drive.
    pub job_category: JobCategory,
    /// Position name, passed through trimmed.
    pub job_name: String,
    /// The three cascading organizational selections.
    pub org: OrgPathComponents,
    /// Decree number and its document reference code.
    pub decree: SpmtReference,
}

/// Derive the entry plan for one row. Pure and deterministic: the same
/// row and keyword lists always produce the same plan.
pub fn build_entry_plan(row: &EmployeeRow, keywords: &OrgKeywords) -> EntryPlan {
    EntryPlan {
        nip: normalize_nip(&row.nip),
        education: normalize_education(&row.major),
        institution: row.institution.trim().to_uppercase(),
        job_category: normalize_job_category(&row.job_type),
        job_name: row.job_name.trim().to_string(),
        org: extract_org_components(&row.org_path, keywords),
        decree: SpmtReference::parse(&row.spmt_number),
    }
}
