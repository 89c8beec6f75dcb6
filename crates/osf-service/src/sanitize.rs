//! Filename safety and HTML escaping.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Characters allowed in a sanitized file name.
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("static regex"));

/// Reduce a user-supplied file name to a safe, flat ASCII name.
///
/// The name is NFKD-folded and whatever is still non-ASCII is dropped
/// (`ü` becomes `u`). Path separators and whitespace runs become `_`,
/// anything outside `[A-Za-z0-9_.-]` is removed, and leading or trailing
/// `.`/`_` are stripped. The result may be empty.
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name.nfkd().filter(char::is_ascii).collect();
    let spaced = ascii.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_CHARS.replace_all(&joined, "");
    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Sanitize a `/`-separated archive member path segment by segment.
///
/// Empty and unsafe segments (`..`, `.`) disappear, so the result never
/// climbs out of the archive root.
pub fn secure_member_path(path: &str) -> String {
    path.split('/')
        .map(secure_filename)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// HTML-escape text for embedding in markup.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}
