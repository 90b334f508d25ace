use serde::Deserialize;

/// One spreadsheet row, addressed by the sheet's header names.
///
/// Every field is raw text exactly as the sheet carries it; cleanup and
/// normalization happen in [`crate::build_entry_plan`] and the ingestion
/// layer. The header names are the ones the source sheets use and must
/// not be "translated".
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct EmployeeRow {
    #[serde(rename = "NIP Baru")]
    pub nip: String,
    #[serde(rename = "Tahun Lulus")]
    pub graduation_year: String,
    #[serde(rename = "No. Ijazah")]
    pub certificate_number: String,
    #[serde(rename = "Tanggal Ijazah")]
    pub certificate_date: String,
    #[serde(rename = "Kepala Sekolah")]
    pub headmaster: String,
    #[serde(rename = "Jurusan")]
    pub major: String,
    #[serde(rename = "Lembaga")]
    pub institution: String,
    #[serde(rename = "No.SPMT")]
    pub spmt_number: String,
    #[serde(rename = "Tanggal SPMT")]
    pub spmt_date: String,
    #[serde(rename = "TMT SPMT")]
    pub spmt_effective_date: String,
    #[serde(rename = "JENIS JABATAN NAMA")]
    pub job_type: String,
    #[serde(rename = "JABATAN NAMA")]
    pub job_name: String,
    #[serde(rename = "Unor")]
    pub org_path: String,
}

/// Clean a NIP cell that may carry a spreadsheet float artifact.
///
/// Numeric cells round-trip through some exporters as "…1001.0"; the
/// fractional zeros are stripped so the identifier matches what the
/// personnel system stores. Anything that is not an all-digit value with
/// an all-zero fraction is returned trimmed but otherwise untouched.
pub fn normalize_nip(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some((integer, fraction)) = trimmed.split_once('.') {
        let integer_digits = !integer.is_empty() && integer.chars().all(|c| c.is_ascii_digit());
        let fraction_zeros = !fraction.is_empty() && fraction.chars().all(|c| c == '0');
        if integer_digits && fraction_zeros {
            return integer.to_string();
        }
    }
    trimmed.to_string()
}

/// A decree (SPMT) number and the file reference code embedded in it.
///
/// Numbers look like "800/SPMT.123/2024"; the second `/`-separated
/// segment names the decree document on disk. Numbers with fewer than
/// two segments have no code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpmtReference {
    pub number: String,
    pub file_code: Option<String>,
}

impl SpmtReference {
    /// Split a raw decree number into the reference.
    pub fn parse(raw: &str) -> Self {
        let number = raw.trim().to_string();
        let mut segments = number.split('/');
        let _first = segments.next();
        let file_code = segments.next().map(|code| code.to_string());
        Self { number, file_code }
    }
}
