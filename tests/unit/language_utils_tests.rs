/*!
 * Tests for the language-tag covering relation
 */

use tmxgrid::covers;

/// The covering relation holds iff the code equals the parent
/// case-insensitively or extends it at a hyphen boundary.
#[test]
fn test_covers_withHierarchyPairs_shouldFollowSubtagBoundaries() {
    // a tag covers itself
    assert!(covers("en", "en"));
    assert!(covers("en-US", "en-US"));
    assert!(covers("en", "EN"));

    // parent covers children at subtag boundaries
    assert!(covers("en", "en-GB"));
    assert!(covers("en", "en-US"));
    assert!(covers("en", "en-US-VA"));
    assert!(covers("en-US", "en-US-VA"));

    // never the other way around
    assert!(!covers("en-US", "en"));
    assert!(!covers("en-US-VA", "en-US"));

    // prefix without a boundary is not coverage
    assert!(!covers("en", "eng"));
    assert!(!covers("e", "en"));

    // unrelated tags
    assert!(!covers("en", "fr"));
    assert!(!covers("en-US", "en-GB"));
}

#[test]
fn test_covers_shouldCompareOrdinallyAndCaseInsensitively() {
    assert!(covers("EN", "en-gb"));
    assert!(covers("zh-Hant", "ZH-HANT-TW"));
    assert!(!covers("en", "EN_GB")); // underscore is not a subtag boundary
}
