//! Input normalization.

/// Lowercase `input` and drop everything that is not an ASCII letter or
/// digit.
///
/// The tree itself never normalizes; callers that want case- and
/// punctuation-insensitive matching run their documents and queries through
/// this before `insert` and before querying.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter_map(|c| {
            let c = c.to_ascii_lowercase();
            (c.is_ascii_lowercase() || c.is_ascii_digit()).then_some(c)
        })
        .collect()
}
