/*!
 * Bilingual document model.
 *
 * An asset is one logical source/target document: an ordered list of
 * translation pairs plus the property schema their metadata is indexed
 * by. These are plain values; readers produce them and presentation
 * layers consume them.
 */

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use crate::inline::RichText;
use crate::properties::PropInfo;

/// One source-to-target translation entry.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationPair {
    /// 1-based position of the originating unit in the document.
    ///
    /// Units are processed concurrently, so this is the authoritative
    /// sort key once a read completes.
    pub serial: usize,

    /// The unit identifier declared by the document, or empty.
    pub id: String,

    /// Source segment with reconciliation numbers assigned to its tags.
    pub source: RichText,

    /// Target segment with numbers matched from the source side.
    pub target: RichText,

    /// Language tag declared on the source segment itself.
    pub source_lang: String,

    /// Language tag declared on the target segment.
    pub target_lang: String,

    /// Property values, indexed by the owning asset's schema.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    props: Vec<Option<Arc<str>>>,

    /// Deduplicated free-text notes from all nesting levels.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    notes: BTreeSet<String>,
}

impl TranslationPair {
    pub fn new(
        serial: usize,
        id: impl Into<String>,
        source: RichText,
        target: RichText,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        TranslationPair {
            serial,
            id: id.into(),
            source,
            target,
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            props: Vec::new(),
            notes: BTreeSet::new(),
        }
    }

    /// The property value at a schema index, if any.
    pub fn prop(&self, index: usize) -> Option<&str> {
        self.props.get(index).and_then(|slot| slot.as_deref())
    }

    /// The raw property slots, indexed by the asset's schema.
    pub fn props(&self) -> &[Option<Arc<str>>] {
        &self.props
    }

    pub(crate) fn props_mut(&mut self) -> &mut Vec<Option<Arc<str>>> {
        &mut self.props
    }

    /// Adds notes, deduplicating against the ones already present.
    pub fn add_notes<I>(&mut self, notes: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.notes.extend(notes);
    }

    pub fn notes(&self) -> impl Iterator<Item = &str> {
        self.notes.iter().map(String::as_str)
    }

    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }
}

/// One emitted document: every pair sharing a source/target language
/// combination, in document order.
#[derive(Debug, Clone, Serialize)]
pub struct Asset {
    /// The container the asset came from, usually a file name.
    pub package: String,

    /// Display label, `"{source} - {target}"`.
    pub original: String,

    /// Source language declared by the document header.
    pub source_lang: String,

    /// Canonical target language of this asset's pairs.
    pub target_lang: String,

    /// Translation pairs ordered by ascending serial.
    pub pairs: Vec<TranslationPair>,

    /// The property schema all pairs' slot vectors are indexed by.
    pub properties: Vec<PropInfo>,
}
