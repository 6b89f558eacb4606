use super::template::HeaderTemplate;

/// Check whether `content` contains the rendered header block verbatim
///
/// Position is not checked, so a header after a shebang line still counts.
/// Whitespace, case and line endings are compared byte for byte.
pub fn is_compliant(content: &[u8], template: &HeaderTemplate) -> bool {
    contains(content, template.as_bytes())
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.len() >= needle.len() && haystack.windows(needle.len()).any(|window| window == needle)
}
