/*!
 * Tests for the rich-text value type and its builder
 */

use std::collections::HashMap;

use tmxgrid::{InlineElement, InlineTag, RichText, RichTextBuilder, TagKind};

/// Consecutive text appends collapse into a single run equal to their
/// concatenation.
#[test]
fn test_builder_withConsecutiveTextFragments_shouldKeepOneRun() {
    let fragments = ["The ", "quick", " brown", " fox"];
    let mut builder = RichTextBuilder::new();
    for fragment in fragments {
        builder.push_str(fragment);
    }
    let rich = builder.build();

    assert_eq!(rich.elements().len(), 1);
    assert_eq!(rich.to_string(), fragments.concat());
}

#[test]
fn test_builder_withTagBetweenText_shouldNotMergeAcrossTag() {
    let mut builder = RichTextBuilder::new();
    builder.push_str("a");
    builder.push_tag(InlineTag::new(TagKind::Standalone, "1", "*", "ph"));
    builder.push_str("b");
    builder.push_str("c");
    let rich = builder.build();

    assert_eq!(rich.elements().len(), 3);
    assert_eq!(rich.to_string(), "a{ph;1}bc");
}

/// Two independently built values with identical element sequences are
/// equal, hash alike, and work as the same map key.
#[test]
fn test_richText_equality_shouldBeReflexiveSymmetricAndStructural() {
    let build = || {
        let mut builder = RichTextBuilder::new();
        builder.push_str("Hello ");
        builder.push_tag(InlineTag::new(TagKind::Begin, "*", "1", "bpt"));
        builder.push_str("world");
        builder.push_tag(InlineTag::new(TagKind::End, "*", "1", "ept"));
        builder.build()
    };
    let a = build();
    let b = build();

    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);

    let mut map = HashMap::new();
    map.insert(a, 1);
    assert_eq!(map.get(&b), Some(&1));
}

/// Changing a tag's decorations without touching its identity does not
/// break rich-text equality.
#[test]
fn test_richText_equality_shouldIgnoreTagDecorations() {
    let plain = RichText::from_elements(vec![InlineElement::Tag(InlineTag::new(
        TagKind::Begin,
        "3",
        "3",
        "bpt",
    ))]);
    let decorated = RichText::from_elements(vec![InlineElement::Tag(
        InlineTag::new(TagKind::Begin, "3", "3", "bpt")
            .with_ctype(Some("link".to_string()))
            .with_display(Some("a".to_string()))
            .with_code(Some("<a href=\"x\">".to_string()))
            .with_number(9),
    )]);

    assert_eq!(plain, decorated);
}

#[test]
fn test_richText_fromRawString_shouldYieldAtMostOneElement() {
    assert!(RichText::from("").is_empty());

    let rich = RichText::from("plain text");
    assert_eq!(rich.elements().len(), 1);
    assert_eq!(rich.to_string(), "plain text");
}

#[test]
fn test_richText_traversal_shouldExposeEveryTagAttribute() {
    let tag = InlineTag::new(TagKind::Begin, "4", "2", "bpt")
        .with_ctype(Some("bold".to_string()))
        .with_code(Some("<b>".to_string()))
        .with_number(1);
    let rich = RichText::from_elements(vec![
        InlineElement::Text("x".to_string()),
        InlineElement::Tag(tag),
    ]);

    let seen: Vec<&InlineTag> = rich.tags().collect();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].kind(), TagKind::Begin);
    assert_eq!(seen[0].id(), "4");
    assert_eq!(seen[0].rid(), "2");
    assert_eq!(seen[0].name(), "bpt");
    assert_eq!(seen[0].ctype(), Some("bold"));
    assert_eq!(seen[0].display(), None);
    assert_eq!(seen[0].code(), Some("<b>"));
    assert_eq!(seen[0].number(), 1);
}
