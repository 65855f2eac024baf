//! Substring-based attribute extraction from raw tag text.

/// Extracts the value of `attr` from the raw text of a tag.
///
/// `tag_text` is the slice between `<` and `>` as it appears in the
/// source. The search is purely positional: find the attribute name, the
/// next `=`, then the earlier of the next `"` or `'` and its matching
/// partner. Any missing piece yields an empty string, as does an
/// attribute whose name merely appears inside another attribute's value.
pub(crate) fn extract_attribute(tag_text: &str, attr: &str) -> String {
    let Some(offset_attr) = tag_text.find(attr) else {
        return String::new();
    };

    let Some(offset_equals) = tag_text[offset_attr..]
        .find('=')
        .map(|idx| offset_attr + idx)
    else {
        return String::new();
    };

    let after_equals = &tag_text[offset_equals..];
    let offset_double = after_equals.find('"');
    let offset_single = after_equals.find('\'');

    let (quote, offset_opening) = match (offset_double, offset_single) {
        (Some(d), Some(s)) if s < d => ('\'', offset_equals + s),
        (Some(d), _) => ('"', offset_equals + d),
        (None, Some(s)) => ('\'', offset_equals + s),
        (None, None) => return String::new(),
    };

    let value_start = offset_opening + quote.len_utf8();
    let Some(offset_closing) = tag_text[value_start..]
        .find(quote)
        .map(|idx| value_start + idx)
    else {
        return String::new();
    };

    tag_text[value_start..offset_closing].to_owned()
}
