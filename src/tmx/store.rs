/*!
 * The shared language-bucket store.
 *
 * Workers append finished pairs under their target-language tag while
 * units are processed in arbitrary order; after the join barrier the
 * store resolves language-code variants into canonical buckets and
 * restores document order.
 */

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::language_utils::{bucket_key, covers};
use crate::model::TranslationPair;

#[derive(Debug)]
struct Bucket {
    /// The tag as first seen in the document; used for display.
    tag: String,
    pairs: Vec<TranslationPair>,
}

/// A synchronized multimap from target-language tag to pairs.
///
/// Tags are grouped case-insensitively. One coarse lock guards both
/// lookup-or-create and append; units are independent and contention
/// is low next to the cost of parsing them.
#[derive(Debug, Default)]
pub(crate) struct PairStore {
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl PairStore {
    pub fn new() -> Self {
        PairStore::default()
    }

    /// Appends a pair to the bucket of `target_lang`, creating the
    /// bucket on first sight of the tag.
    pub fn add(&self, target_lang: &str, pair: TranslationPair) {
        let mut buckets = self.buckets.lock();
        buckets
            .entry(bucket_key(target_lang))
            .or_insert_with(|| Bucket { tag: target_lang.to_owned(), pairs: Vec::new() })
            .pairs
            .push(pair);
    }

    /// Resolves variant tags into canonical buckets and returns
    /// `(display tag, pairs)` groups, sorted case-insensitively by tag
    /// with every pair list sorted by ascending serial.
    ///
    /// A tag is canonical when no other tag in the store covers it;
    /// each non-canonical bucket is absorbed by the canonical tag that
    /// covers it. Must only be called after all workers have finished.
    pub fn into_groups(self) -> Vec<(String, Vec<TranslationPair>)> {
        let mut buckets = self.buckets.into_inner();

        let keys: Vec<String> = buckets.keys().cloned().collect();
        let mut canonical: Vec<String> = keys
            .iter()
            .filter(|t| !keys.iter().any(|v| v != *t && covers(v.as_str(), t.as_str())))
            .cloned()
            .collect();
        // keys are lowercased, so a plain sort is the case-insensitive one
        canonical.sort();

        let mut groups = Vec::with_capacity(canonical.len());
        for key in &canonical {
            let mut bucket = buckets.remove(key).expect("canonical bucket present");
            let covered: Vec<String> =
                buckets.keys().filter(|v| covers(key, v.as_str())).cloned().collect();
            for v in covered {
                let absorbed = buckets.remove(&v).expect("covered bucket present");
                bucket.pairs.extend(absorbed.pairs);
            }
            bucket.pairs.sort_by_key(|pair| pair.serial);
            groups.push((bucket.tag, bucket.pairs));
        }
        groups
    }
}
