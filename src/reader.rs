/*!
 * The reader contract consumed by format dispatch.
 *
 * A caller that opens arbitrary bilingual files does not know the
 * format up front; it sniffs content by probing each registered reader
 * in priority order and takes the first one that both recognizes and
 * successfully reads the document.
 */

use log::debug;

use crate::model::Asset;

/// A bilingual document reader.
pub trait AssetReader {
    /// Short reader name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Dispatch priority; higher probes first.
    fn priority(&self) -> i32;

    /// File-dialog filter strings, `"Label|*.ext"`.
    fn filter_strings(&self) -> &'static [&'static str];

    /// Cheaply checks whether the input looks like this reader's
    /// format, without consuming or fully parsing it.
    fn probe(&self, bytes: &[u8]) -> bool;

    /// Reads the document into assets.
    ///
    /// `None` means the input is not a usable document for this reader:
    /// wrong format, malformed content, or an unusable source-language
    /// declaration. No partial result is ever returned.
    fn read(&self, bytes: &[u8], package: &str) -> Option<Vec<Asset>>;
}

/// Dispatches over `readers` in descending priority order and returns
/// the first successful read.
pub fn read_with<'a, I>(readers: I, bytes: &[u8], package: &str) -> Option<Vec<Asset>>
where
    I: IntoIterator<Item = &'a dyn AssetReader>,
{
    let mut readers: Vec<&dyn AssetReader> = readers.into_iter().collect();
    readers.sort_by_key(|reader| std::cmp::Reverse(reader.priority()));

    for reader in readers {
        if !reader.probe(bytes) {
            continue;
        }
        debug!("{}: probing succeeded with reader {}", package, reader.name());
        if let Some(assets) = reader.read(bytes, package) {
            return Some(assets);
        }
    }
    None
}
