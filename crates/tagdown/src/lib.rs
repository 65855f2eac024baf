//! Convert HTML to Markdown in a single pass over the input.
//!
//! The engine scans the HTML character stream exactly once, without
//! building a DOM. Tag names are matched against a fixed registry of
//! behaviors that write Markdown into an append-mostly buffer; a final
//! cleanup pass normalizes whitespace and unescapes common entities.
//!
//! # Example
//!
//! ```
//! let (md, ok) = tagdown::convert("<h1>Example</h1><p>Hello <b>world</b>!</p>");
//!
//! assert!(ok);
//! assert_eq!(md, "# Example\n\nHello **world**!\n");
//! ```
//!
//! Conversion never fails: malformed HTML degrades the output rather than
//! aborting it. The boolean reports whether every structural context was
//! closed by the input; use [`Converter`] directly to inspect the session
//! or reconvert the same source.

mod converter;
mod error;
mod options;
mod table;

pub use converter::Converter;
pub use error::TableFormatError;
pub use options::Options;
pub use table::format_table;

/// Converts `html` to Markdown with default [`Options`].
///
/// Returns the Markdown and whether the input left every structural
/// context closed.
pub fn convert(html: &str) -> (String, bool) {
    convert_with_options(html, &Options::default())
}

/// Converts `html` to Markdown with the given options.
pub fn convert_with_options(html: &str, options: &Options) -> (String, bool) {
    let mut converter = Converter::new(html, options.clone());
    let md = converter.convert();
    (md, converter.ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converter_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Converter>();
        assert_send::<Options>();
    }

    #[test]
    fn convert_reports_unclosed_structure() {
        let (_, ok) = convert("<ul><li>Unclosed");
        assert!(!ok);

        let (_, ok) = convert("<ul><li>Closed</li></ul>");
        assert!(ok);
    }
}
