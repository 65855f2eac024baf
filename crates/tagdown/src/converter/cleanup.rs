//! The whole-buffer cleanup pass run once after the scan.

use crate::options::Options;

/// Normalizes the finished Markdown buffer in place.
///
/// First pass tidies line by line; second pass applies literal textual
/// replacements, including HTML entity unescaping.
pub(crate) fn clean_up_markdown(md: &mut String, options: &Options) {
    tidy_all_lines(md, options);

    let mut out = std::mem::take(md);

    for (needle, replacement) in [
        (" , ", ", "),
        ("\n.\n", ".\n"),
        ("\n\u{21b5}\n", " \u{21b5}\n"),
        ("\n*\n", "\n"),
        ("\n. ", ".\n"),
        ("&quot;", "\""),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&amp;", "&"),
        ("&nbsp;", " "),
        ("&rarr;", "\u{2192}"),
        ("\t\t  ", "\t\t"),
    ] {
        out = out.replace(needle, replacement);
    }

    *md = out;
}

/// Rebuilds the buffer line by line: trims each line, collapses runs of
/// blank lines to at most two newlines, and drops leading blank lines.
///
/// Fenced code blocks pass through untouched. The fence state toggles
/// before the passthrough check, so an opening fence line is emitted raw
/// while a closing fence line is trimmed like regular text.
fn tidy_all_lines(md: &mut String, options: &Options) {
    let mut lines: Vec<&str> = md.split('\n').collect();
    if md.ends_with('\n') {
        lines.pop();
    }

    let mut res = String::with_capacity(md.len());

    let mut amount_newlines = 0u8;
    let mut in_code_block = false;

    for line in &lines {
        if line.starts_with("```") || line.starts_with("~~~") {
            in_code_block = !in_code_block;
        }
        if in_code_block {
            res.push_str(line);
            res.push('\n');
            continue;
        }

        let line = trim_line(line, options);

        if line.is_empty() {
            if amount_newlines < 2 && !res.is_empty() {
                res.push('\n');
                amount_newlines += 1;
            }
        } else {
            amount_newlines = 0;

            res.push_str(line);
            res.push('\n');
        }
    }

    *md = res;
}

/// Trims one line: the start unless it is tab-indented, the end unless it
/// carries a two-space hard break.
fn trim_line<'a>(line: &'a str, options: &Options) -> &'a str {
    if !options.trim_whitespace {
        return line;
    }

    let mut line = line;

    if !line.starts_with('\t') {
        line = line.trim_start();
    }

    if !line.ends_with("  ") {
        line = line.trim_end();
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned(input: &str) -> String {
        let mut md = input.to_owned();
        clean_up_markdown(&mut md, &Options::default());
        md
    }

    #[test]
    fn collapses_blank_runs_and_drops_leading_blanks() {
        assert_eq!(cleaned("\n\n\nfirst\n\n\n\n\nsecond\n"), "first\n\n\nsecond\n");
    }

    #[test]
    fn preserves_hard_breaks_and_tab_indentation() {
        assert_eq!(cleaned("choice  \n"), "choice  \n");
        assert_eq!(cleaned("\tindented \n"), "\tindented\n");
        assert_eq!(cleaned("  plain  x \n"), "plain  x\n");
    }

    #[test]
    fn code_fences_pass_through_untrimmed() {
        let input = "```rust\n    let x = 1;   \n```\ntext \n";
        assert_eq!(cleaned(input), "```rust\n    let x = 1;   \n```\ntext\n");
    }

    #[test]
    fn three_trailing_spaces_count_as_a_hard_break() {
        // The right trim is skipped for any line ending in two spaces,
        // however many spaces precede them.
        assert_eq!(cleaned("text   \n"), "text   \n");
    }

    #[test]
    fn unescapes_entities() {
        assert_eq!(
            cleaned("&quot;a&quot; &lt;b&gt; &amp; c&nbsp;&rarr;\n"),
            "\"a\" <b> & c \u{2192}\n"
        );
    }

    #[test]
    fn trimming_can_be_disabled() {
        let mut md = String::from("  padded  x \n");
        let options = Options {
            trim_whitespace: false,
            ..Options::default()
        };
        clean_up_markdown(&mut md, &options);
        assert_eq!(md, "  padded  x \n");
    }

    #[test]
    fn stray_list_marker_lines_are_removed() {
        assert_eq!(cleaned("a\n*\nb\n"), "a\nb\n");
    }
}
