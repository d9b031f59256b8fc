//! Batch file splitting. A batch is a plain-text file with profiles
//! separated by a literal `===PROFILE===` line.

/// Delimiter line between profiles in an uploaded batch file.
pub const PROFILE_DELIMITER: &str = "===PROFILE===";

/// Splits batch file content into individual profile texts.
/// Chunks are trimmed; empty chunks (leading delimiter, blank sections,
/// trailing newline) are dropped. Order is preserved.
pub fn split_profiles(content: &str) -> Vec<String> {
    content
        .split(PROFILE_DELIMITER)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(String::from)
        .collect()
}
