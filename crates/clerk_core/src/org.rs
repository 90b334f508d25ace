//! Organizational-path extraction.
//!
//! A path like "Seksi Pengendalian Bidang Ketertiban Dinas X" has no
//! structural delimiters; the hierarchy is implied by recognized keyword
//! tokens. The split is anchored on those tokens: the top-level
//! organization from the right, the unit from the left of what remains.

/// Ordered keyword lists that anchor the organizational-path split.
///
/// Priority is declaration order, not textual position: the first keyword
/// in the list that occurs anywhere in the text wins, and only then does
/// that keyword's position matter. The lists are deliberately `Vec`s, not
/// sets, so additions and reorderings stay visible and testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgKeywords {
    /// Tokens that begin a top-level organization name (matched from the
    /// right, since the top-level name ends the path).
    pub top_level: Vec<String>,
    /// Tokens that begin a unit name (matched from the left of the
    /// remainder once the top-level organization is removed).
    pub unit: Vec<String>,
}

impl Default for OrgKeywords {
    fn default() -> Self {
        Self {
            top_level: ["Dinas", "Satuan", "Kecamatan"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            unit: [
                "Bidang",
                "SMPN",
                "Kelurahan",
                "Seksi",
                "Sekretariat",
                "UPT",
                "Puskesmas",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// The three hierarchical components of an organizational path. Any of
/// them may be empty; each non-empty component is a contiguous, trimmed
/// slice of the input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrgPathComponents {
    pub sub_unit: String,
    pub unit: String,
    pub top_org: String,
}

/// Split an organizational path into sub-unit, unit and top-level
/// organization.
///
/// Top-level keywords are tried in list order; the first one that occurs
/// anchors at its right-most occurrence and everything from there is the
/// top-level organization. Unit keywords are then tried in list order
/// within the remainder; the first one that occurs anchors at its
/// left-most occurrence and everything from there is the unit. Whatever
/// precedes the unit (or the whole remainder) is the sub-unit. Matching
/// is case-sensitive. Never fails; unmatched components come back empty.
pub fn extract_org_components(raw: &str, keywords: &OrgKeywords) -> OrgPathComponents {
    let mut top_org = String::new();
    let mut top_idx = None;
    for keyword in &keywords.top_level {
        if let Some(idx) = raw.rfind(keyword.as_str()) {
            top_idx = Some(idx);
            top_org = raw[idx..].trim().to_string();
            break;
        }
    }

    let remainder = match top_idx {
        Some(idx) => raw[..idx].trim(),
        None => raw,
    };

    let mut unit = String::new();
    let mut unit_idx = None;
    for keyword in &keywords.unit {
        if let Some(idx) = remainder.find(keyword.as_str()) {
            unit_idx = Some(idx);
            unit = remainder[idx..].trim().to_string();
            break;
        }
    }

    let sub_unit = match unit_idx {
        Some(idx) => remainder[..idx].trim().to_string(),
        None => remainder.trim().to_string(),
    };

    OrgPathComponents {
        sub_unit,
        unit,
        top_org,
    }
}
