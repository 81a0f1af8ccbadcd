/*!
 * # tmxgrid
 *
 * A Rust library that reads TMX translation memories into grid-ready
 * bilingual assets.
 *
 * ## Features
 *
 * - Rich-text segment model: text runs interleaved with begin/end/
 *   standalone inline tags, with structural equality and hashing
 * - Tag reconciliation: matching ordinals on source and target tags so
 *   a grid can visually pair them
 * - Concurrent ingestion: translation units fan out across a worker
 *   pool with pooled scratch state
 * - Language-variant merging: `en-US` pairs land in the `en` asset when
 *   both appear, deterministically ordered
 * - Property schema and note aggregation across unit and segment levels
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `inline`: the rich-text value type and its builder
 * - `language_utils`: the language-tag covering relation
 * - `xml`: a minimal owned XML tree over quick-xml
 * - `tmx`: the TMX reader, its worker pool and bucket store
 * - `model`: translation pairs and assets
 * - `properties`: property schema manager and string interning
 * - `reader`: the reader trait and format dispatch
 * - `errors`: custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod errors;
pub mod inline;
pub mod language_utils;
pub mod model;
pub mod properties;
pub mod reader;
pub mod tmx;
pub mod xml;

// Re-export main types for easier usage
pub use errors::{TmxError, XmlError};
pub use inline::{InlineElement, InlineTag, RichText, RichTextBuilder, TagKind};
pub use language_utils::covers;
pub use model::{Asset, TranslationPair};
pub use properties::{PropInfo, PropertySchema, StringPool};
pub use reader::{read_with, AssetReader};
pub use tmx::TmxReader;
