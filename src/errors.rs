/*!
 * Error types for the tmxgrid library.
 *
 * This module contains custom error types for the XML layer and the TMX
 * reader, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised while building the XML node tree.
#[derive(Error, Debug)]
pub enum XmlError {
    /// The underlying parser rejected the input
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// An attribute could not be decoded
    #[error("bad attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// An element or attribute used a prefix with no namespace binding
    #[error("reference to undeclared namespace prefix \"{0}\"")]
    UnknownPrefix(String),

    /// The document ended with elements still open
    #[error("unexpected end of document")]
    UnexpectedEof,

    /// Non-whitespace text appeared before or instead of the root element
    #[error("text content outside of the document root")]
    TextOutsideRoot,
}

/// Errors raised by the TMX reader.
///
/// `UnrecognizedFormat` is the expected outcome of probing a non-TMX
/// file and is reported quietly so a dispatcher can try other readers.
/// Everything else means the file looked like TMX but cannot be turned
/// into assets; no partial result is ever produced.
#[derive(Error, Debug)]
pub enum TmxError {
    /// Root element name or namespace does not match a TMX document
    #[error("not a TMX document")]
    UnrecognizedFormat,

    /// The full parse failed after a successful probe
    #[error("malformed document: {0}")]
    Malformed(#[from] XmlError),

    /// A structurally required element is absent
    #[error("the document has no <{0}> element")]
    MissingElement(&'static str),

    /// The header carries no srclang attribute
    #[error("the header declares no source language")]
    MissingSourceLanguage,

    /// The source language stands for "all languages", which has no
    /// usable source side
    #[error("the source language \"{0}\" stands for all languages and is not supported")]
    AllLanguages(String),

    /// A translation unit could not be processed; the whole read aborts
    #[error("translation unit #{index}: {message}")]
    InvalidUnit { index: usize, message: String },
}
