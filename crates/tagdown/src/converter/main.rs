//! The conversion session: scan loop, emission buffer and content rules.

use crate::converter::attributes::extract_attribute;
use crate::converter::cleanup::clean_up_markdown;
use crate::converter::tags::behavior_for;
use crate::options::Options;

/// Tags whose text content is dropped entirely while they are current.
///
/// `head` and `meta` are registered as no-op behaviors but deliberately
/// absent here, to tolerate documents that never close them.
fn is_content_suppressed_tag(tag: &str) -> bool {
    tag.starts_with('-')
        || matches!(tag, "template" | "style" | "script" | "noscript" | "nav")
}

/// Markers that cause an opening tag to be consumed without dispatch.
///
/// The check is shallow: it suppresses only this tag node, never its
/// descendants. A child element inside a hidden wrapper still renders.
fn tag_hides_content(tag_text: &str) -> bool {
    const HIDDEN_MARKERS: [&str; 5] = [
        "aria-hidden",
        "display:none",
        "visibility:hidden",
        "opacity:0",
        "Details-content--hidden-not-important",
    ];

    HIDDEN_MARKERS.iter().any(|marker| tag_text.contains(marker))
}

/// A conversion session over one HTML input.
///
/// The session owns the input, the growing Markdown buffer and every
/// structural counter. The scan runs exactly once per [`Self::convert`];
/// calling it again after the cursor reached end-of-input returns the
/// cached buffer without re-scanning. [`Self::reset`] rewinds the session
/// so the same source can be scanned again.
///
/// ```
/// use tagdown::Converter;
///
/// let mut converter = Converter::new("<h1>example</h1>", Default::default());
/// let md = converter.convert();
/// assert!(converter.ok());
/// assert_eq!(md, "# example\n");
/// ```
#[derive(Debug)]
pub struct Converter {
    /// The input text. Never mutated by the scan.
    html: String,
    /// Byte index one past the character just consumed.
    pub(crate) cursor: usize,
    /// The Markdown buffer. Append-mostly; retraction only ever removes a
    /// bounded suffix.
    pub(crate) md: String,

    /// Look-behind over the buffer, refreshed only at defined sync points
    /// (tag entry/exit, retraction, blank append, table-row close) so tag
    /// behaviors observe the values captured when their tag completed.
    pub(crate) last_ch: char,
    pub(crate) second_last_ch: char,

    in_tag: bool,
    is_closing_tag: bool,
    in_attribute_value: bool,
    /// The raw character consumed just before the current one inside a tag.
    prev_ch_in_tag: char,

    /// Byte offset just past the `<` of the tag being scanned.
    pub(crate) tag_start: usize,
    /// Accumulated tag text, truncated to the tag name once the tag ends.
    pub(crate) current_tag: String,
    /// Name of the previously completed tag, snapshotted on each `<`.
    pub(crate) prev_tag: String,

    pub(crate) in_code: bool,
    pub(crate) in_list: bool,
    pub(crate) in_paragraph: bool,
    pub(crate) in_pre: bool,
    pub(crate) in_table: bool,

    /// Relevant for `<li>` only; false means an unordered list.
    pub(crate) in_ordered_list: bool,
    pub(crate) ordered_index: usize,
    /// Count of currently open list levels.
    pub(crate) list_depth: usize,
    pub(crate) blockquote_depth: usize,

    /// Buffer offset where the current table's output began.
    pub(crate) table_start: usize,
    /// Separator row accumulated while the table header is scanned.
    pub(crate) table_header_line: String,

    /// Pending anchor attributes between `<a>` open and close.
    pub(crate) link_href: String,
    pub(crate) link_title: String,

    pub(crate) chars_in_curr_line: usize,

    pub(crate) options: Options,
}

impl Converter {
    /// Creates a session over `html` with the given options.
    pub fn new(html: impl Into<String>, options: Options) -> Self {
        Self {
            html: html.into(),
            cursor: 0,
            md: String::new(),
            last_ch: '\0',
            second_last_ch: '\0',
            in_tag: false,
            is_closing_tag: false,
            in_attribute_value: false,
            prev_ch_in_tag: '\0',
            tag_start: 0,
            current_tag: String::new(),
            prev_tag: String::new(),
            in_code: false,
            in_list: false,
            in_paragraph: false,
            in_pre: false,
            in_table: false,
            in_ordered_list: false,
            ordered_index: 0,
            list_depth: 0,
            blockquote_depth: 0,
            table_start: 0,
            table_header_line: String::new(),
            link_href: String::new(),
            link_title: String::new(),
            chars_in_curr_line: 0,
            options,
        }
    }

    /// Converts the HTML into Markdown, including the cleanup pass.
    ///
    /// Re-invoking after the scan reached end-of-input returns the cached
    /// buffer unchanged.
    pub fn convert(&mut self) -> String {
        if self.cursor == self.html.len() {
            return self.md.clone();
        }

        self.reset();

        let mut idx = 0;
        while let Some(ch) = self.html[idx..].chars().next() {
            idx += ch.len_utf8();
            self.cursor = idx;

            if !self.in_tag && ch == '<' {
                self.on_entered_tag();
                continue;
            }

            if self.in_tag {
                self.parse_char_in_tag(ch);
            } else {
                self.parse_char_in_tag_content(ch);
            }
        }

        clean_up_markdown(&mut self.md, &self.options);

        log::debug!(
            "converted {} bytes of html into {} bytes of markdown (ok: {})",
            self.html.len(),
            self.md.len(),
            self.ok()
        );

        self.md.clone()
    }

    /// Reports whether every structural context was closed by the input.
    ///
    /// Trivially true as long as [`Self::convert`] has not run.
    pub fn ok(&self) -> bool {
        !self.in_code
            && !self.in_pre
            && !self.in_paragraph
            && !self.in_table
            && !self.in_tag
            && self.blockquote_depth == 0
            && self.list_depth == 0
    }

    /// Clears the generated Markdown and look-behind state and rewinds the
    /// cursor, permitting a re-scan of the same source.
    pub fn reset(&mut self) {
        self.md.clear();
        self.last_ch = '\0';
        self.second_last_ch = '\0';
        self.cursor = 0;
    }

    /// Appends `text` to the Markdown buffer.
    ///
    /// Suppressed while the current tag's content is ignored. Useful for
    /// prepending content before the first [`Self::convert`] call.
    pub fn append_to_md(&mut self, text: &str) -> &mut Self {
        self.append_str(text);
        self
    }

    /// Appends a single space unless the buffer ends with a newline or a
    /// `**` delimiter pair.
    pub fn append_blank(&mut self) -> &mut Self {
        self.update_prev_from_md();

        if self.last_ch == '\n' || (self.last_ch == '*' && self.second_last_ch == '*') {
            return self;
        }

        self.append_to_md(" ")
    }

    /// Current char: `<`.
    fn on_entered_tag(&mut self) {
        self.tag_start = self.cursor;
        self.in_tag = true;
        self.prev_tag = std::mem::take(&mut self.current_tag);
        self.prev_ch_in_tag = '\0';

        if !self.md.is_empty() {
            self.update_prev_from_md();
        }
    }

    /// Handles the next character within a `<...>` tag.
    fn parse_char_in_tag(&mut self, ch: char) {
        let prev = self.prev_ch_in_tag;
        self.prev_ch_in_tag = ch;

        if ch == '/' && self.current_tag.is_empty() {
            self.is_closing_tag = true;
            return;
        }

        // A `>` always terminates the tag, even inside a quoted attribute
        // value. The attribute-value flag below does not guard it.
        if ch == '>' {
            self.on_left_tag();
            return;
        }

        if ch == '=' {
            return;
        }

        if ch == '"' {
            if self.in_attribute_value {
                self.in_attribute_value = false;
            } else if prev == '=' {
                self.in_attribute_value = true;
            }
            return;
        }

        self.current_tag.push(ch);
    }

    /// Current char: `>`.
    fn on_left_tag(&mut self) {
        self.in_tag = false;

        self.update_prev_from_md();

        if !self.is_closing_tag && tag_hides_content(&self.current_tag) {
            return;
        }

        let name = self
            .current_tag
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_owned();
        self.current_tag = name;

        let Some(behavior) = behavior_for(&self.current_tag) else {
            return;
        };

        if self.is_closing_tag {
            self.is_closing_tag = false;
            behavior.on_closing_tag_left(self);
        } else {
            behavior.on_opening_tag_left(self);
        }
    }

    /// Handles the next character outside of any tag.
    fn parse_char_in_tag_content(&mut self, ch: char) {
        if self.in_code {
            self.md.push(ch);

            if self.blockquote_depth != 0 && ch == '\n' {
                self.append_str(&"> ".repeat(self.blockquote_depth));
            }

            return;
        }

        if self.is_in_ignored_tag() || self.current_tag == "link" {
            return;
        }

        if ch == '\n' {
            // HTML collapses source newlines; only blockquotes re-emit them
            // together with their quote prefix.
            if self.blockquote_depth != 0 {
                self.md.push('\n');
                self.chars_in_curr_line = 0;
                self.append_str(&"> ".repeat(self.blockquote_depth));
            }
            return;
        }

        match ch {
            '*' => self.append_str("\\*"),
            '`' => self.append_str("\\`"),
            '\\' => self.append_str("\\\\"),
            _ => {
                self.md.push(ch);
                self.chars_in_curr_line += 1;
            }
        }

        if self.chars_in_curr_line > 80
            && !self.in_table
            && !self.in_list
            && self.current_tag != "img"
            && self.current_tag != "a"
            && self.options.wrap_lines
        {
            if ch == ' ' {
                // Break right at the space; a wrapped `-` at line start
                // would otherwise turn into a list marker.
                self.md.push('\n');
                self.chars_in_curr_line = 0;
            } else if self.chars_in_curr_line > 100 {
                self.replace_previous_space_in_line_by_newline();
            }
        }
    }

    /// Replaces the most recent space in the current line by a newline.
    ///
    /// Scans backward from the buffer's end and stops at the first prior
    /// newline with no effect if no space is found.
    pub(crate) fn replace_previous_space_in_line_by_newline(&mut self) -> bool {
        if self.current_tag == "p"
            || (self.in_table && self.prev_tag != "code" && self.prev_tag != "pre")
        {
            return false;
        }

        if self.md.is_empty() {
            return true;
        }

        let mut offset = self.md.len() - 1;
        while offset > 0 {
            match self.md.as_bytes()[offset] {
                b'\n' => return false,
                b' ' => {
                    self.md.replace_range(offset..=offset, "\n");
                    self.chars_in_curr_line = self.md[offset..].chars().count();
                    return true;
                }
                _ => {}
            }
            offset -= 1;
        }

        false
    }

    /// Appends one character, honoring content suppression and the
    /// blockquote prefix rule for newlines.
    pub(crate) fn append_char(&mut self, ch: char) {
        if self.is_in_ignored_tag() {
            return;
        }

        if self.blockquote_depth != 0 && ch == '\n' {
            if self.in_pre {
                self.md.push(ch);
                self.chars_in_curr_line = 0;
                self.append_str(&"> ".repeat(self.blockquote_depth));
            }
            return;
        }

        self.md.push(ch);

        if ch == '\n' {
            self.chars_in_curr_line = 0;
        } else {
            self.chars_in_curr_line += 1;
        }
    }

    fn append_str(&mut self, text: &str) {
        if self.is_in_ignored_tag() {
            return;
        }

        self.md.push_str(text);

        for ch in text.chars() {
            if ch == '\n' {
                self.chars_in_curr_line = 0;
            } else {
                self.chars_in_curr_line += 1;
            }
        }
    }

    /// Removes `len` bytes from the buffer's tail.
    ///
    /// Never underflows: truncation saturates at zero and backs up to a
    /// character boundary. The line counter drops by the number of
    /// characters actually removed, clamped at zero.
    pub(crate) fn shorten_markdown(&mut self, len: usize) {
        let mut target = self.md.len().saturating_sub(len);
        while !self.md.is_char_boundary(target) {
            target -= 1;
        }
        let removed = self.md[target..].chars().count();
        self.md.truncate(target);

        self.chars_in_curr_line = self.chars_in_curr_line.saturating_sub(removed);

        self.update_prev_from_md();
    }

    /// Refreshes the look-behind characters from the buffer's tail.
    pub(crate) fn update_prev_from_md(&mut self) {
        if self.md.is_empty() {
            return;
        }

        let mut tail = self.md.chars().rev();
        if let Some(last) = tail.next() {
            self.last_ch = last;
        }
        if let Some(second_last) = tail.next() {
            self.second_last_ch = second_last;
        }
    }

    /// Extracts an attribute value from the raw text of the tag that just
    /// ended. Returns an empty string for malformed attribute syntax.
    pub(crate) fn extract_attribute_from_tag(&self, attr: &str) -> String {
        let tag_text = self.html.get(self.tag_start..self.cursor).unwrap_or("");
        extract_attribute(tag_text, attr)
    }

    /// Underlines the current output line with `=` characters, turning it
    /// into a setext-style top-level heading.
    pub(crate) fn turn_line_into_setext_heading(&mut self) {
        let underline = format!("\n{}\n\n", "=".repeat(self.chars_in_curr_line));
        self.append_str(&underline);

        self.chars_in_curr_line = 0;
    }

    /// True while the current tag's content must not reach the buffer.
    pub(crate) fn is_in_ignored_tag(&self) -> bool {
        if self.current_tag == "title" && !self.options.include_title_as_heading {
            return true;
        }

        is_content_suppressed_tag(&self.current_tag)
    }
}
