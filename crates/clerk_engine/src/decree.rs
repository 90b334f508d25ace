use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;

/// Pattern for decree document names carrying the given file code:
/// `SPMT_PPPK_T1_<batch>_<code>_<anything>`. The code is matched
/// literally; metacharacters in it are escaped.
pub fn decree_file_regex(code: &str) -> Regex {
    let pattern = format!(r"^SPMT_PPPK_T1_\d+_{}_", regex::escape(code));
    // Escaping makes the pattern valid for any code.
    Regex::new(&pattern).expect("decree pattern is valid after escaping")
}

/// Find the decree document for a file code in a flat folder.
///
/// Names are compared in lexicographic order so reruns pick the same file
/// when several match. No match is `Ok(None)`; only the directory listing
/// itself can fail.
pub fn find_decree_file(dir: &Path, code: &str) -> io::Result<Option<PathBuf>> {
    let pattern = decree_file_regex(code);

    let mut matches: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if pattern.is_match(&name) {
            matches.push((name, entry.path()));
        }
    }

    matches.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(matches.into_iter().next().map(|(_, path)| path))
}
