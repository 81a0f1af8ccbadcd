/*!
 * Per-unit segment extraction.
 *
 * Turns the mixed content of a `<seg>` element into a [`RichText`],
 * mapping the TMX inline vocabulary onto uniform begin/end/standalone
 * tags, and reconciles tag numbering between a source segment and its
 * target-language counterparts.
 */

use std::collections::HashMap;

use crate::inline::{InlineTag, RichText, RichTextBuilder, TagKind};
use crate::xml::{XmlElement, XmlNode};

/// Identity-keyed tag numbers for one translation unit.
///
/// [`InlineTag`] hashes and compares by identity `(kind, id, rid,
/// name)` alone, so the tag itself is the key. Scoped to a single unit
/// and cleared before reuse; numbering never leaks across units.
pub(crate) type TagNumberTable = HashMap<InlineTag, u32>;

/// The declared language of a segment holder, `xml:lang` first, then a
/// plain `lang` attribute.
pub(crate) fn segment_lang(tuv: &XmlElement) -> Option<&str> {
    tuv.prefixed_attr("xml", "lang").or_else(|| tuv.attr("lang"))
}

/// Extracts the inline content of a `<seg>` element.
///
/// `namespace` is the document namespace; elements outside it fall
/// through to the unrecognized-element handling.
pub(crate) fn extract_inline(seg: &XmlElement, namespace: Option<&str>) -> RichText {
    let mut builder = RichTextBuilder::new();
    build_inline(&mut builder, seg, namespace);
    builder.build()
}

fn build_inline(builder: &mut RichTextBuilder, elem: &XmlElement, namespace: Option<&str>) {
    for node in &elem.children {
        match node {
            XmlNode::Text(text) => builder.push_str(text),
            XmlNode::Element(e) => {
                let in_ns = e.namespace.as_deref() == namespace;
                match (in_ns, e.name.as_str()) {
                    (true, "bpt") => builder.push_tag(native_code_tag(TagKind::Begin, e, true)),
                    (true, "ept") => builder.push_tag(native_code_tag(TagKind::End, e, true)),
                    (true, "hi") => {
                        // The wrapper itself has no native code; an
                        // implicit begin/end pair brackets its content.
                        builder.push_tag(native_code_tag(TagKind::Begin, e, false));
                        build_inline(builder, e, namespace);
                        builder.push_tag(native_code_tag(TagKind::End, e, false));
                    }
                    (true, "it") => {
                        let kind = match e.attr("pos") {
                            Some("open") => TagKind::Begin,
                            Some("close") => TagKind::End,
                            _ => TagKind::Standalone,
                        };
                        builder.push_tag(native_code_tag(kind, e, true));
                    }
                    (true, "ph") | (true, "ut") => {
                        builder.push_tag(native_code_tag(TagKind::Standalone, e, true));
                    }
                    _ => {
                        // Unrecognized element. A childless, textless one
                        // passes as a standalone tag; anything else gets
                        // bracketed around its extracted children as a
                        // best effort.
                        if e.text_content().is_empty() && !e.has_child_elements() {
                            builder.push_tag(native_code_tag(TagKind::Standalone, e, false));
                        } else {
                            builder.push_tag(native_code_tag(TagKind::Begin, e, false));
                            build_inline(builder, e, namespace);
                            builder.push_tag(native_code_tag(TagKind::End, e, false));
                        }
                    }
                }
            }
        }
    }
}

fn native_code_tag(kind: TagKind, elem: &XmlElement, has_code: bool) -> InlineTag {
    InlineTag::new(
        kind,
        elem.attr("x").unwrap_or("*"),
        elem.attr("i").unwrap_or("*"),
        elem.name.as_str(),
    )
    .with_ctype(elem.attr("type").map(str::to_owned))
    .with_code(has_code.then(|| elem.text_content()))
}

/// Numbers the source tags 1..n in order and records each assignment
/// under the tag's identity.
///
/// When the same identity occurs twice, the later occurrence overwrites
/// the table entry; target matches then resolve to the last-assigned
/// number. That is the accepted behavior, not a defect.
pub(crate) fn number_source_tags(source: RichText, numbers: &mut TagNumberTable) -> RichText {
    numbers.clear();
    let mut next = 0u32;
    source.map_tags(|tag| {
        next += 1;
        numbers.insert(tag.clone(), next);
        tag.with_number(next)
    })
}

/// Copies the source-side numbers onto target tags with the same
/// identity; unmatched tags stay at 0.
pub(crate) fn match_target_tags(target: RichText, numbers: &TagNumberTable) -> RichText {
    target.map_tags(|tag| {
        let number = numbers.get(&tag).copied().unwrap_or(0);
        tag.with_number(number)
    })
}

/// Gathers the property key/value pairs of a `<tu>` or `<tuv>`: its
/// attributes (minus the structural `xml:` ones) followed by its
/// `<prop>` children.
pub(crate) fn collect_props(
    out: &mut Vec<(String, String)>,
    elem: &XmlElement,
    namespace: Option<&str>,
) -> Result<(), String> {
    out.clear();
    for attr in &elem.attrs {
        if attr.prefix.as_deref() == Some("xml") {
            continue;
        }
        out.push((attr.name.clone(), attr.value.clone()));
    }
    for prop in elem.find_all(namespace, "prop") {
        let Some(key) = prop.attr("type") else {
            return Err("prop element is missing its type attribute".to_string());
        };
        out.push((key.to_owned(), prop.text_content()));
    }
    Ok(())
}

/// Gathers the `<note>` texts of a `<tu>` or `<tuv>`.
pub(crate) fn collect_notes(out: &mut Vec<String>, elem: &XmlElement, namespace: Option<&str>) {
    out.clear();
    out.extend(elem.find_all(namespace, "note").map(XmlElement::text_content));
}
