/*!
 * Common test utilities for the tmxgrid test suite
 */

/// Initializes logging once for tests that want to inspect output with
/// `RUST_LOG`.
#[allow(dead_code)]
pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wraps a TMX body in a minimal document without a namespace.
pub fn tmx(srclang: &str, body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <tmx version=\"1.4\">\
         <header creationtool=\"test\" srclang=\"{srclang}\" segtype=\"sentence\" \
         adminlang=\"en\" o-tmf=\"test\" datatype=\"plaintext\"/>\
         <body>{body}</body></tmx>"
    )
}

/// Wraps a TMX body in a document carrying the TMX 1.4 namespace.
pub fn tmx_in_namespace(srclang: &str, body: &str) -> String {
    format!(
        "<tmx xmlns=\"http://www.lisa.org/tmx14\" version=\"1.4\">\
         <header srclang=\"{srclang}\"/>\
         <body>{body}</body></tmx>"
    )
}

/// A `<tu>` with one segment per `(language, segment-xml)` entry.
pub fn unit(variants: &[(&str, &str)]) -> String {
    let mut out = String::from("<tu>");
    for (lang, seg) in variants {
        out.push_str(&format!("<tuv xml:lang=\"{lang}\"><seg>{seg}</seg></tuv>"));
    }
    out.push_str("</tu>");
    out
}
