//! Domain column detection.

/// Finds the header key that holds website/domain values.
///
/// Header keys and synonyms are compared trimmed and lower-cased. The first
/// header (in column order) whose form appears among `synonyms` wins, so for
/// `["Name", "Company Website", "Domain"]` the answer is `"Company Website"`
/// regardless of where `"domain"` sits in the synonym list.
///
/// Returns the header key exactly as it appears in the file, or `None` when
/// no column matches.
pub fn detect_domain_column<H, S>(headers: &[H], synonyms: &[S]) -> Option<String>
where
    H: AsRef<str>,
    S: AsRef<str>,
{
    let accepted: Vec<String> = synonyms
        .iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .collect();

    headers
        .iter()
        .find(|header| {
            let key = header.as_ref().trim().to_lowercase();
            accepted.iter().any(|synonym| *synonym == key)
        })
        .map(|header| header.as_ref().to_string())
}
