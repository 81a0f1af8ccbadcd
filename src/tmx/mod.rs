/*!
 * TMX translation-memory reader.
 *
 * Parses a TMX document into one asset per canonical target language.
 * Translation units are independent, so they are fanned out across a
 * fixed pool of worker threads; each worker leases a reusable scratch
 * object and appends finished pairs into the shared bucket store. A
 * failure in any unit aborts the whole read — a partial bilingual
 * asset is not useful.
 */

mod extract;
mod store;

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use log::{debug, warn};
use parking_lot::Mutex;

use crate::errors::TmxError;
use crate::language_utils::{covers, tags_equal};
use crate::model::{Asset, TranslationPair};
use crate::properties::{PropertySchema, StringPool};
use crate::reader::AssetReader;
use crate::xml::{self, XmlElement};

use extract::TagNumberTable;
use store::PairStore;

/// The TMX 1.4 namespace; documents without any namespace are accepted
/// as well.
pub const TMX_NAMESPACE: &str = "http://www.lisa.org/tmx14";

/// Header sentinel meaning "segments of every language are sources".
/// There is no usable source side in such a document.
const ALL_LANGUAGES: &str = "*all*";

/// Reads TMX documents into [`Asset`]s.
///
/// The reader is stateless across documents; per-read services (the
/// property schema, the string pool, the bucket store) are created
/// inside [`try_read`](TmxReader::try_read) and dropped with it.
#[derive(Debug, Clone, Default)]
pub struct TmxReader {
    workers: Option<usize>,
}

impl TmxReader {
    pub fn new() -> Self {
        TmxReader::default()
    }

    /// Overrides the worker count, which otherwise follows available
    /// hardware parallelism.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Reads a TMX document, reporting failures through the typed
    /// error taxonomy.
    pub fn try_read(&self, bytes: &[u8], package: &str) -> Result<Vec<Asset>, TmxError> {
        let head = xml::peek_root(bytes).ok_or(TmxError::UnrecognizedFormat)?;
        if !accepted_root(&head) {
            return Err(TmxError::UnrecognizedFormat);
        }

        let root = xml::parse(bytes)?;
        let namespace = root.namespace.clone();
        let ns = namespace.as_deref();

        let source_lang = detect_source_language(&root, ns)?;
        let body = root.find(ns, "body").ok_or(TmxError::MissingElement("body"))?;
        let units: Vec<&XmlElement> = body.find_all(ns, "tu").collect();
        debug!(
            "{}: {} translation units, source language {}",
            package,
            units.len(),
            source_lang
        );

        let schema = PropertySchema::new();
        let pool = StringPool::new();
        let pairs = PairStore::new();
        process_units(
            &units,
            &UnitContext { ns, source_lang: &source_lang, schema: &schema, pool: &pool, pairs: &pairs },
            self.worker_count(units.len()),
        )?;

        let properties = schema.keys();
        let assets = pairs
            .into_groups()
            .into_iter()
            .map(|(target_lang, pairs)| Asset {
                package: package.to_owned(),
                original: format!("{} - {}", source_lang, target_lang),
                source_lang: source_lang.clone(),
                target_lang,
                pairs,
                properties: properties.clone(),
            })
            .collect();
        Ok(assets)
    }

    fn worker_count(&self, units: usize) -> usize {
        let hardware = || thread::available_parallelism().map_or(1, usize::from);
        self.workers.unwrap_or_else(hardware).clamp(1, units.max(1))
    }
}

impl AssetReader for TmxReader {
    fn name(&self) -> &'static str {
        "tmx"
    }

    fn priority(&self) -> i32 {
        7
    }

    fn filter_strings(&self) -> &'static [&'static str] {
        &["TMX Translation Memory|*.tmx"]
    }

    fn probe(&self, bytes: &[u8]) -> bool {
        xml::peek_root(bytes).is_some_and(|head| accepted_root(&head))
    }

    fn read(&self, bytes: &[u8], package: &str) -> Option<Vec<Asset>> {
        match self.try_read(bytes, package) {
            Ok(assets) => Some(assets),
            Err(TmxError::UnrecognizedFormat) => {
                debug!("{}: not a TMX document", package);
                None
            }
            Err(err) => {
                warn!("{}: {}", package, err);
                None
            }
        }
    }
}

fn accepted_root(head: &XmlElement) -> bool {
    head.name == "tmx"
        && matches!(head.namespace.as_deref(), None | Some(TMX_NAMESPACE))
}

fn detect_source_language(root: &XmlElement, ns: Option<&str>) -> Result<String, TmxError> {
    let header = root.find(ns, "header").ok_or(TmxError::MissingElement("header"))?;
    let source_lang = header.attr("srclang").ok_or(TmxError::MissingSourceLanguage)?;
    if tags_equal(source_lang, ALL_LANGUAGES) {
        return Err(TmxError::AllLanguages(source_lang.to_owned()));
    }
    Ok(source_lang.to_owned())
}

/// Shared per-read services handed to every worker. The lifetime is
/// the parsed document's, which pooled scratch state also borrows.
struct UnitContext<'doc> {
    ns: Option<&'doc str>,
    source_lang: &'doc str,
    schema: &'doc PropertySchema,
    pool: &'doc StringPool,
    pairs: &'doc PairStore,
}

/// One language variant of the unit being processed.
struct SegContext<'doc> {
    seg: Option<&'doc XmlElement>,
    lang: String,
    props: Vec<(String, String)>,
    notes: Vec<String>,
}

/// Reusable per-worker buffers, cleared between units.
#[derive(Default)]
struct Scratch<'doc> {
    targets: HashMap<String, SegContext<'doc>>,
    unit_props: Vec<(String, String)>,
    unit_notes: Vec<String>,
    tag_numbers: TagNumberTable,
}

impl Scratch<'_> {
    fn reset(&mut self) {
        self.targets.clear();
        self.unit_props.clear();
        self.unit_notes.clear();
        self.tag_numbers.clear();
    }
}

/// A free-list of scratch objects. Leasing pops one (or allocates when
/// the list is empty); the lease guard returns it on drop, so a worker
/// gives its scratch back on every exit path, including failure.
#[derive(Default)]
struct ScratchPool<'doc> {
    free: Mutex<Vec<Scratch<'doc>>>,
}

impl<'doc> ScratchPool<'doc> {
    fn new() -> Self {
        ScratchPool::default()
    }

    fn lease(&self) -> ScratchLease<'_, 'doc> {
        let scratch = self.free.lock().pop().unwrap_or_default();
        ScratchLease { pool: self, scratch: Some(scratch) }
    }
}

struct ScratchLease<'pool, 'doc> {
    pool: &'pool ScratchPool<'doc>,
    scratch: Option<Scratch<'doc>>,
}

impl<'doc> Deref for ScratchLease<'_, 'doc> {
    type Target = Scratch<'doc>;

    fn deref(&self) -> &Self::Target {
        self.scratch.as_ref().expect("scratch present until drop")
    }
}

impl DerefMut for ScratchLease<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.scratch.as_mut().expect("scratch present until drop")
    }
}

impl Drop for ScratchLease<'_, '_> {
    fn drop(&mut self) {
        if let Some(scratch) = self.scratch.take() {
            self.pool.free.lock().push(scratch);
        }
    }
}

/// Fans the units out across the worker pool and joins every worker
/// before returning. The first unit error wins; later workers drain as
/// soon as they observe the abort flag.
fn process_units<'doc>(
    units: &[&'doc XmlElement],
    ctx: &UnitContext<'doc>,
    workers: usize,
) -> Result<(), TmxError> {
    if units.is_empty() {
        return Ok(());
    }

    let scratch_pool = ScratchPool::new();
    let next = AtomicUsize::new(0);
    let failed = AtomicBool::new(false);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| -> Result<(), TmxError> {
                    let mut scratch = scratch_pool.lease();
                    while !failed.load(Ordering::Relaxed) {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(tu) = units.get(index).copied() else { break };
                        if let Err(err) = process_unit(ctx, tu, index, &mut scratch) {
                            failed.store(true, Ordering::Relaxed);
                            return Err(err);
                        }
                    }
                    Ok(())
                })
            })
            .collect();

        let mut outcome = Ok(());
        for handle in handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    if outcome.is_ok() {
                        outcome = Err(err);
                    }
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        outcome
    })
}

/// Processes one `<tu>`: classifies its `<tuv>`s into the source and
/// the targets, extracts inline content, reconciles tag numbers and
/// emits one pair per target language.
fn process_unit<'doc>(
    ctx: &UnitContext<'doc>,
    tu: &'doc XmlElement,
    index: usize,
    scratch: &mut Scratch<'doc>,
) -> Result<(), TmxError> {
    let unit_err = |message: String| TmxError::InvalidUnit { index, message };

    scratch.reset();
    extract::collect_props(&mut scratch.unit_props, tu, ctx.ns).map_err(&unit_err)?;
    extract::collect_notes(&mut scratch.unit_notes, tu, ctx.ns);

    let mut source: Option<SegContext<'doc>> = None;
    for tuv in tu.find_all(ctx.ns, "tuv") {
        let Some(lang) = extract::segment_lang(tuv) else {
            return Err(unit_err("tuv declares no language".to_string()));
        };
        let mut variant = SegContext {
            seg: tuv.find(ctx.ns, "seg"),
            lang: lang.to_owned(),
            props: Vec::new(),
            notes: Vec::new(),
        };
        extract::collect_props(&mut variant.props, tuv, ctx.ns).map_err(&unit_err)?;
        extract::collect_notes(&mut variant.notes, tuv, ctx.ns);

        if covers(ctx.source_lang, lang) {
            if source.is_none() {
                source = Some(variant);
            } else {
                debug!("unit #{}: extra source-language variant {} ignored", index, lang);
            }
        } else {
            scratch.targets.insert(variant.lang.clone(), variant);
        }
    }

    let Some(source) = source else { return Ok(()) };
    let Some(source_seg) = source.seg else { return Ok(()) };

    let id = tu.attr("tuid").unwrap_or("");
    let source_text = extract::number_source_tags(
        extract::extract_inline(source_seg, ctx.ns),
        &mut scratch.tag_numbers,
    );

    for (target_lang, target) in &scratch.targets {
        let Some(target_seg) = target.seg else { continue };
        let target_text = extract::match_target_tags(
            extract::extract_inline(target_seg, ctx.ns),
            &scratch.tag_numbers,
        );

        let mut pair = TranslationPair::new(
            index + 1,
            id,
            source_text.clone(),
            target_text,
            source.lang.clone(),
            target_lang.clone(),
        );
        for (key, value) in scratch
            .unit_props
            .iter()
            .chain(&source.props)
            .chain(&target.props)
        {
            ctx.schema.put(pair.props_mut(), key, ctx.pool.intern(value));
        }
        pair.add_notes(
            scratch
                .unit_notes
                .iter()
                .chain(&source.notes)
                .chain(&target.notes)
                .cloned(),
        );
        ctx.pairs.add(target_lang, pair);
    }
    Ok(())
}
