/*!
 * Inline rich-text model.
 *
 * Bilingual file formats embed formatting and placeholder codes inside
 * segment text. `RichText` is the substitute for a plain `String` whose
 * contents are ordinary text runs interleaved with inline tags.
 */

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// The pairing role of an inline tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// A tag that begins something, e.g. `<em>`.
    Begin,
    /// A tag that ends something, e.g. `</em>`.
    End,
    /// A tag with no begin/end semantics, e.g. `<image ... />`.
    Standalone,
}

/// An inline tag inside a [`RichText`].
///
/// Tags are immutable values. Two tags are equal iff they have equal
/// `kind`, `id`, `rid` and `name`; the decorative members (`ctype`,
/// `display`, `code`) and the reconciliation `number` never participate
/// in equality or hashing, so a source tag and its target counterpart
/// compare equal even when their surrounding code differs.
#[derive(Debug, Clone, Serialize)]
pub struct InlineTag {
    kind: TagKind,
    id: String,
    rid: String,
    name: String,
    ctype: Option<String>,
    display: Option<String>,
    code: Option<String>,
    number: u32,
}

impl InlineTag {
    /// Creates a tag with the three identity fields and no decorations.
    pub fn new(
        kind: TagKind,
        id: impl Into<String>,
        rid: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        InlineTag {
            kind,
            id: id.into(),
            rid: rid.into(),
            name: name.into(),
            ctype: None,
            display: None,
            code: None,
            number: 0,
        }
    }

    /// Sets the purpose classifier, as in the `ctype` attribute of
    /// XLIFF-family inline tags.
    pub fn with_ctype(mut self, ctype: Option<String>) -> Self {
        self.ctype = ctype;
        self
    }

    /// Sets the user-friendly label of this tag.
    pub fn with_display(mut self, display: Option<String>) -> Self {
        self.display = display;
        self
    }

    /// Sets the native code underlying this tag.
    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }

    /// Returns a copy of this tag carrying the given ordinal number.
    ///
    /// A tag number is assigned at most once. Zero means "unassigned"
    /// and may be re-applied freely; overwriting a nonzero number is a
    /// reconciliation bug and panics.
    #[must_use]
    pub fn with_number(&self, number: u32) -> Self {
        if self.number != 0 {
            panic!("tag number is already assigned (was {}, got {})", self.number, number);
        }
        let mut tag = self.clone();
        tag.number = number;
        tag
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rid(&self) -> &str {
        &self.rid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ctype(&self) -> Option<&str> {
        self.ctype.as_deref()
    }

    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The ordinal assigned by tag reconciliation, 0 when unassigned.
    pub fn number(&self) -> u32 {
        self.number
    }
}

impl PartialEq for InlineTag {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.id == other.id
            && self.rid == other.rid
            && self.name == other.name
    }
}

impl Eq for InlineTag {}

impl Hash for InlineTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.id.hash(state);
        self.rid.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for InlineTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{};{}}}", self.name, self.id)
    }
}

/// One element of a [`RichText`]: either a text run or an inline tag.
///
/// The variant set is closed on purpose; every consumer matches it
/// exhaustively, so a future element kind cannot be silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineElement {
    Text(String),
    Tag(InlineTag),
}

impl fmt::Display for InlineElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InlineElement::Text(text) => f.write_str(text),
            InlineElement::Tag(tag) => tag.fmt(f),
        }
    }
}

/// An immutable rich text: an ordered sequence of [`InlineElement`].
///
/// Equality is structural and the hash is an order-sensitive combination
/// of the element hashes, so two independently built values with the
/// same element sequence are interchangeable as map keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RichText {
    elements: Vec<InlineElement>,
}

impl RichText {
    /// Creates an empty rich text.
    pub fn new() -> Self {
        RichText::default()
    }

    /// Builds a rich text from raw elements, coalescing adjacent text
    /// runs and dropping empty ones.
    pub fn from_elements<I: IntoIterator<Item = InlineElement>>(elements: I) -> Self {
        let mut builder = RichTextBuilder::new();
        builder.extend(elements);
        builder.build()
    }

    /// The element sequence.
    pub fn elements(&self) -> &[InlineElement] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InlineElement> {
        self.elements.iter()
    }

    /// The inline tags, in document order.
    pub fn tags(&self) -> impl Iterator<Item = &InlineTag> {
        self.elements.iter().filter_map(|element| match element {
            InlineElement::Tag(tag) => Some(tag),
            InlineElement::Text(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Maps every tag through `f`, leaving text runs untouched.
    ///
    /// The element structure is preserved, so no re-coalescing happens.
    #[must_use]
    pub fn map_tags<F: FnMut(InlineTag) -> InlineTag>(self, mut f: F) -> Self {
        let elements = self
            .elements
            .into_iter()
            .map(|element| match element {
                InlineElement::Tag(tag) => InlineElement::Tag(f(tag)),
                text @ InlineElement::Text(_) => text,
            })
            .collect();
        RichText { elements }
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        RichText::from(text.to_owned())
    }
}

impl From<String> for RichText {
    fn from(text: String) -> Self {
        if text.is_empty() {
            RichText::new()
        } else {
            RichText { elements: vec![InlineElement::Text(text)] }
        }
    }
}

impl fmt::Display for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            element.fmt(f)?;
        }
        Ok(())
    }
}

impl IntoIterator for RichText {
    type Item = InlineElement;
    type IntoIter = std::vec::IntoIter<InlineElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a RichText {
    type Item = &'a InlineElement;
    type IntoIter = std::slice::Iter<'a, InlineElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Accretes a [`RichText`], the counterpart of `String` pushes.
///
/// Append-only: elements cannot be removed or reordered once pushed.
/// Consecutive text contributions are merged into one run by comparing
/// against the last element only.
#[derive(Debug, Default)]
pub struct RichTextBuilder {
    elements: Vec<InlineElement>,
}

impl RichTextBuilder {
    pub fn new() -> Self {
        RichTextBuilder::default()
    }

    /// Appends a text run; empty input is a no-op.
    pub fn push_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(InlineElement::Text(last)) = self.elements.last_mut() {
            last.push_str(text);
        } else {
            self.elements.push(InlineElement::Text(text.to_owned()));
        }
    }

    /// Appends an owned text run; empty input is a no-op.
    pub fn push_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        if let Some(InlineElement::Text(last)) = self.elements.last_mut() {
            last.push_str(&text);
        } else {
            self.elements.push(InlineElement::Text(text));
        }
    }

    /// Appends an inline tag.
    pub fn push_tag(&mut self, tag: InlineTag) {
        self.elements.push(InlineElement::Tag(tag));
    }

    /// Appends the contents of another rich text, merging across the
    /// boundary where two text runs meet.
    pub fn push_rich_text(&mut self, rich: &RichText) {
        for element in rich {
            match element {
                InlineElement::Text(text) => self.push_str(text),
                InlineElement::Tag(tag) => self.push_tag(tag.clone()),
            }
        }
    }

    /// Appends raw elements with the same coalescing rules.
    pub fn extend<I: IntoIterator<Item = InlineElement>>(&mut self, elements: I) {
        for element in elements {
            match element {
                InlineElement::Text(text) => self.push_text(text),
                InlineElement::Tag(tag) => self.push_tag(tag),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Finalizes the immutable rich text.
    pub fn build(self) -> RichText {
        RichText { elements: self.elements }
    }
}
