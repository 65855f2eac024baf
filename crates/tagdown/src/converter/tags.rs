//! Per-tag Markdown emission rules.
//!
//! Each HTML element family is one [`TagBehavior`] variant with an
//! operation per tag event (opening tag fully scanned, closing tag fully
//! scanned). Several tag names alias the same variant, e.g. `b` and
//! `strong`. Tag names absent from the registry are silently skipped.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::converter::Converter;
use crate::table::format_table;

/// The behavior families keyed by tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagBehavior {
    /// head/meta/nav/noscript/script/style/template: consumed silently.
    Ignored,
    Anchor,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Break,
    Division,
    Heading(u8),
    ListItem,
    /// `<option>`: emits a trailing hard break per entry.
    SelectOption,
    OrderedList,
    UnorderedList,
    Paragraph,
    Preformatted,
    Code,
    Span,
    Title,
    Image,
    HorizontalRule,
    Blockquote,
    Table,
    TableRow,
    TableHeaderCell,
    TableDataCell,
}

static REGISTRY: Lazy<HashMap<&'static str, TagBehavior>> = Lazy::new(|| {
    use TagBehavior::{
        Anchor, Blockquote, Bold, Break, Code, Division, Heading, HorizontalRule, Ignored, Image,
        Italic, ListItem, OrderedList, Paragraph, Preformatted, SelectOption, Span,
        Strikethrough, Table, TableDataCell, TableHeaderCell, TableRow, Title, Underline,
        UnorderedList,
    };

    let mut tags = HashMap::with_capacity(41);

    // non-printing tags
    tags.insert("head", Ignored);
    tags.insert("meta", Ignored);
    tags.insert("nav", Ignored);
    tags.insert("noscript", Ignored);
    tags.insert("script", Ignored);
    tags.insert("style", Ignored);
    tags.insert("template", Ignored);

    // printing tags
    tags.insert("a", Anchor);
    tags.insert("br", Break);
    tags.insert("div", Division);
    tags.insert("h1", Heading(1));
    tags.insert("h2", Heading(2));
    tags.insert("h3", Heading(3));
    tags.insert("h4", Heading(4));
    tags.insert("h5", Heading(5));
    tags.insert("h6", Heading(6));
    tags.insert("li", ListItem);
    tags.insert("option", SelectOption);
    tags.insert("ol", OrderedList);
    tags.insert("pre", Preformatted);
    tags.insert("code", Code);
    tags.insert("p", Paragraph);
    tags.insert("span", Span);
    tags.insert("ul", UnorderedList);
    tags.insert("title", Title);
    tags.insert("img", Image);
    tags.insert("hr", HorizontalRule);

    // text formatting
    tags.insert("b", Bold);
    tags.insert("strong", Bold);
    tags.insert("em", Italic);
    tags.insert("i", Italic);
    tags.insert("dfn", Italic);
    tags.insert("cite", Italic);
    tags.insert("u", Underline);
    tags.insert("del", Strikethrough);
    tags.insert("s", Strikethrough);

    tags.insert("blockquote", Blockquote);

    // tables
    tags.insert("table", Table);
    tags.insert("tr", TableRow);
    tags.insert("th", TableHeaderCell);
    tags.insert("td", TableDataCell);

    tags
});

/// Resolves a tag name to its behavior. Lookups are case-sensitive.
pub(crate) fn behavior_for(name: &str) -> Option<TagBehavior> {
    REGISTRY.get(name).copied()
}

impl TagBehavior {
    pub(crate) fn on_opening_tag_left(self, c: &mut Converter) {
        match self {
            Self::Ignored | Self::Span | Self::Title | Self::SelectOption => {}
            Self::Anchor => open_anchor(c),
            Self::Bold => {
                c.append_to_md("**");
            }
            Self::Italic => c.append_char('*'),
            Self::Underline => {
                c.append_to_md("_");
            }
            Self::Strikethrough => c.append_char('~'),
            Self::Break => open_break(c),
            Self::Division => {
                // Both checks read the look-behind captured at `>`; the
                // first append does not advance it for the second check.
                if c.last_ch != '\n' {
                    c.append_char('\n');
                }
                if c.second_last_ch != '\n' {
                    c.append_char('\n');
                }
            }
            Self::Heading(level) => {
                let marker = format!("\n{} ", "#".repeat(usize::from(level)));
                c.append_to_md(&marker);
            }
            Self::ListItem => open_list_item(c),
            Self::OrderedList => open_ordered_list(c),
            Self::UnorderedList => open_unordered_list(c),
            Self::Paragraph => {
                c.in_paragraph = true;

                if c.in_list && c.prev_tag == "p" {
                    c.append_to_md("\n\t");
                } else if !c.in_list {
                    c.append_char('\n');
                }
            }
            Self::Preformatted => open_preformatted(c),
            Self::Code => open_code(c),
            Self::Image => open_image(c),
            Self::HorizontalRule => {
                c.append_to_md("\n---\n");
            }
            Self::Blockquote => c.blockquote_depth += 1,
            Self::Table => {
                c.in_table = true;
                c.append_char('\n');
                c.table_start = c.md.len();
            }
            Self::TableRow => c.append_char('\n'),
            Self::TableHeaderCell => open_table_header_cell(c),
            Self::TableDataCell => {
                if c.second_last_ch != '|' {
                    c.append_to_md("| ");
                }
            }
        }
    }

    pub(crate) fn on_closing_tag_left(self, c: &mut Converter) {
        match self {
            Self::Ignored
            | Self::Span
            | Self::Break
            | Self::Division
            | Self::HorizontalRule
            | Self::TableHeaderCell
            | Self::TableDataCell => {}
            Self::Anchor => close_anchor(c),
            Self::Bold => {
                c.append_to_md("**");
            }
            Self::Italic => c.append_char('*'),
            Self::Underline => {
                c.append_to_md("_");
            }
            Self::Strikethrough => c.append_char('~'),
            Self::Heading(_) => {
                if c.second_last_ch != ' ' {
                    c.append_char('\n');
                }
            }
            Self::ListItem => {
                if !c.in_table && c.last_ch != '\n' {
                    c.append_char('\n');
                }
            }
            Self::SelectOption => {
                if !c.md.is_empty() {
                    c.append_to_md("  \n");
                }
            }
            Self::OrderedList => close_ordered_list(c),
            Self::UnorderedList => close_unordered_list(c),
            Self::Paragraph => close_paragraph(c),
            Self::Preformatted => {
                c.in_pre = false;

                if !c.in_list {
                    c.append_to_md("```");
                    c.append_char('\n');
                }
            }
            Self::Code => {
                c.in_code = false;

                if !c.in_pre {
                    c.append_char('`');
                }
            }
            Self::Title => c.turn_line_into_setext_heading(),
            Self::Image => {
                if c.prev_tag == "a" {
                    c.append_char('\n');
                }
            }
            Self::Blockquote => {
                c.blockquote_depth = c.blockquote_depth.saturating_sub(1);
                // Drop the pending "> " prefix.
                c.shorten_markdown(2);
            }
            Self::Table => close_table(c),
            Self::TableRow => close_table_row(c),
        }
    }
}

fn open_anchor(c: &mut Converter) {
    if c.prev_tag == "img" {
        c.append_char('\n');
    }

    c.link_title = c.extract_attribute_from_tag("title");

    c.append_char('[');
    c.link_href = c.extract_attribute_from_tag("href");
}

fn close_anchor(c: &mut Converter) {
    // An anchor without any emitted content collapses to nothing.
    if c.last_ch == '[' {
        c.shorten_markdown(1);
        return;
    }

    let href = std::mem::take(&mut c.link_href);
    let title = std::mem::take(&mut c.link_title);

    c.append_to_md("](");
    c.append_to_md(&href);

    if !title.is_empty() {
        c.append_to_md(" \"");
        c.append_to_md(&title);
        c.append_to_md("\"");
    }

    c.append_char(')');

    if c.prev_tag == "img" {
        c.append_char('\n');
    }
}

fn open_break(c: &mut Converter) {
    if c.in_list {
        // Never in a paragraph at the same time.
        c.append_to_md("  \n");
        c.append_to_md(&"  ".repeat(c.list_depth));
    } else if c.in_table {
        c.append_to_md("<br>");
    } else if !c.in_paragraph {
        c.append_to_md("\n<br>\n\n");
    } else if !c.md.is_empty() {
        c.append_to_md("<br />");
    }
}

fn open_list_item(c: &mut Converter) {
    if c.in_table {
        return;
    }

    if !c.in_ordered_list {
        let marker = format!("{} ", c.options.unordered_bullet);
        c.append_to_md(&marker);
        return;
    }

    c.ordered_index += 1;

    let marker = format!("{}{} ", c.ordered_index, c.options.ordered_suffix);
    c.append_to_md(&marker);
}

fn open_ordered_list(c: &mut Converter) {
    if c.in_table {
        return;
    }

    c.in_list = true;
    c.in_ordered_list = true;
    c.ordered_index = 0;

    c.list_depth += 1;

    c.replace_previous_space_in_line_by_newline();

    c.append_char('\n');
}

fn close_ordered_list(c: &mut Converter) {
    if c.in_table {
        return;
    }

    c.in_ordered_list = false;

    c.list_depth = c.list_depth.saturating_sub(1);
    c.in_list = c.list_depth != 0;

    c.append_char('\n');
}

fn open_unordered_list(c: &mut Converter) {
    // Nested lists reuse the bullet of the level that opened them.
    if c.in_list || c.in_table {
        return;
    }

    c.in_list = true;

    c.list_depth += 1;

    c.append_char('\n');
}

fn close_unordered_list(c: &mut Converter) {
    if c.in_table {
        return;
    }

    c.list_depth = c.list_depth.saturating_sub(1);
    c.in_list = c.list_depth != 0;

    if c.second_last_ch == '\n' && c.last_ch == '\n' {
        c.shorten_markdown(1);
    } else if c.last_ch != '\n' {
        c.append_char('\n');
    }
}

fn close_paragraph(c: &mut Converter) {
    c.in_paragraph = false;

    // The plain push sidesteps the blockquote newline handling; the
    // quote prefix is re-inserted right below.
    if !c.md.is_empty() {
        c.append_to_md("\n");
    }

    if c.blockquote_depth != 0 {
        let prefix = "> ".repeat(c.blockquote_depth);
        c.append_to_md(&prefix);
    }
}

fn open_preformatted(c: &mut Converter) {
    c.in_pre = true;

    if c.last_ch != '\n' {
        c.append_char('\n');
    }

    if c.second_last_ch != '\n' {
        c.append_char('\n');
    }

    if c.in_list && c.prev_tag != "p" {
        c.shorten_markdown(2);
    }

    if c.in_list {
        c.append_to_md("\t\t");
    } else {
        c.append_to_md("```");
    }
}

fn open_code(c: &mut Converter) {
    c.in_code = true;

    if !c.in_pre {
        c.append_char('`');
        return;
    }

    if c.in_list {
        return;
    }

    let class = c.extract_attribute_from_tag("class");
    if !class.is_empty() {
        let language = class.strip_prefix("language-").unwrap_or(&class).to_owned();
        c.append_to_md(&language);
    }
    c.append_char('\n');
}

fn open_image(c: &mut Converter) {
    if c.prev_tag != "a" && c.last_ch != '\n' {
        c.append_char('\n');
    }

    let alt = c.extract_attribute_from_tag("alt");
    let src = c.extract_attribute_from_tag("src");
    let title = c.extract_attribute_from_tag("title");

    c.append_to_md("![");
    c.append_to_md(&alt);
    c.append_to_md("](");
    c.append_to_md(&src);

    if !title.is_empty() {
        c.append_to_md(" \"");
        c.append_to_md(&title);
        c.append_to_md("\"");
    }

    c.append_to_md(")");
}

fn open_table_header_cell(c: &mut Converter) {
    let align = c.extract_attribute_from_tag("align");

    let mut line = String::from("| ");

    if align == "left" || align == "center" {
        line.push(':');
    }

    line.push('-');

    if align == "right" || align == "center" {
        line.push_str(": ");
    } else {
        line.push(' ');
    }

    c.table_header_line.push_str(&line);

    c.append_to_md("| ");
}

fn close_table(c: &mut Converter) {
    c.in_table = false;
    c.append_char('\n');

    if !c.options.format_tables {
        return;
    }

    let region = c.md.get(c.table_start..).unwrap_or("").to_owned();
    match format_table(&region) {
        Ok(table) => {
            c.shorten_markdown(region.len());
            c.append_to_md(&table);
        }
        // An unparsable region stays as emitted.
        Err(err) => log::debug!("table left unformatted: {err}"),
    }
}

fn close_table_row(c: &mut Converter) {
    c.update_prev_from_md();

    if c.last_ch == '|' {
        c.append_char('\n');
    } else {
        c.append_char('|');
    }

    // Flush the separator accumulated by the header cells. The newline
    // check reads the look-behind from before the append above.
    if !c.table_header_line.is_empty() {
        if c.last_ch != '\n' {
            c.append_char('\n');
        }

        let mut line = std::mem::take(&mut c.table_header_line);
        line.push_str("|\n");
        c.append_to_md(&line);
    }
}
