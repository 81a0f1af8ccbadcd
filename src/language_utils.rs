/*!
 * Language tag utilities.
 *
 * Bilingual documents label segments with BCP 47 style tags whose
 * subtags form a hierarchy: `en` subsumes `en-GB` and `en-US-VA`.
 * Grouping and source-segment selection both rely on that relation.
 */

/// Checks whether one language tag covers another.
///
/// A tag covers itself, and a tag covers another tag when all of its
/// subtags are a prefix of the other at a `-` boundary. Comparison is
/// ordinal and case-insensitive; a strictly longer `parent` never covers
/// a shorter `code`.
///
/// `covers("en", "en-GB")` holds, `covers("en", "eng")` and
/// `covers("en-US", "en")` do not.
pub fn covers(parent: &str, code: &str) -> bool {
    if parent.len() == code.len() {
        parent.eq_ignore_ascii_case(code)
    } else if parent.len() < code.len() {
        code.as_bytes()[..parent.len()].eq_ignore_ascii_case(parent.as_bytes())
            && code.as_bytes()[parent.len()] == b'-'
    } else {
        false
    }
}

/// Ordinal case-insensitive equality for language tags.
pub fn tags_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// The lowercase key used for case-insensitive bucket grouping.
pub(crate) fn bucket_key(tag: &str) -> String {
    tag.to_ascii_lowercase()
}
