/// Closed set of position categories the personnel forms accept.
///
/// `Lainnya` is the catch-all for anything the keyword checks do not
/// recognize; the form layer treats it as "no dedicated branch".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobCategory {
    Pelaksana,
    Fungsional,
    Struktural,
    Lainnya,
}

impl JobCategory {
    /// The exact vocabulary word the target forms use for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobCategory::Pelaksana => "Pelaksana",
            JobCategory::Fungsional => "Fungsional",
            JobCategory::Struktural => "Struktural",
            JobCategory::Lainnya => "lainnya",
        }
    }
}

/// Map a free-text position type onto the closed category set.
///
/// Containment checks run case-insensitively in fixed priority order:
/// "pelaksana", then "fungsional", then "struktural". The first keyword
/// found wins; anything else is `Lainnya`. Never fails.
pub fn normalize_job_category(raw: &str) -> JobCategory {
    let lowered = raw.to_lowercase();
    if lowered.contains("pelaksana") {
        return JobCategory::Pelaksana;
    }
    if lowered.contains("fungsional") {
        return JobCategory::Fungsional;
    }
    if lowered.contains("struktural") {
        return JobCategory::Struktural;
    }
    JobCategory::Lainnya
}
