//! Configuration for the HTML to Markdown conversion.

use serde::{Deserialize, Serialize};

/// Options controlling how HTML is converted to Markdown.
///
/// All fields are read once when the [`Converter`](crate::Converter) is
/// constructed and stay fixed for the lifetime of the session.
///
/// ```
/// use tagdown::{Options, convert_with_options};
///
/// let options = Options {
///     unordered_bullet: '*',
///     ..Options::default()
/// };
/// let (md, ok) = convert_with_options("<ul><li>List</li></ul>", &options);
/// assert!(ok);
/// assert!(md.contains("* List\n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Insert a soft line break once a line grows past the wrap threshold.
    pub wrap_lines: bool,
    /// Trim every output line during the cleanup pass.
    pub trim_whitespace: bool,
    /// Bullet character for unordered lists. Valid: `-`, `+`, `*`.
    pub unordered_bullet: char,
    /// Character emitted after the item number of ordered lists.
    /// Valid: `.`, `)`.
    pub ordered_suffix: char,
    /// Emit the `<title>` element as a setext heading at the top of the
    /// output. When false the title is suppressed entirely.
    pub include_title_as_heading: bool,
    /// Reformat emitted tables into fixed-width aligned columns.
    pub format_tables: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            wrap_lines: true,
            trim_whitespace: true,
            unordered_bullet: '-',
            ordered_suffix: '.',
            include_title_as_heading: true,
            format_tables: true,
        }
    }
}
