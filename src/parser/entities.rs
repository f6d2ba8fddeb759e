use std::borrow::Cow;
use std::sync::LazyLock;

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use regex::Regex;

static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]{0,31});").unwrap()
});

/// Resolve named and numeric character references.
///
/// Exported titles are not reliably escaped (`AT&T` shows up verbatim), so
/// anything that is not a complete, known reference is kept as written.
pub fn decode(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match REFERENCE_RE.find(tail) {
            Some(m) => {
                out.push_str(&resolve(m.as_str()));
                rest = &tail[m.end()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn resolve(reference: &str) -> Cow<'_, str> {
    // quick-xml only accepts a lower-case hex marker
    let normalized: Cow<'_, str> = match reference.strip_prefix("&#X") {
        Some(hex) => Cow::Owned(format!("&#x{}", hex)),
        None => Cow::Borrowed(reference),
    };
    match unescape_with(&normalized, resolve_html5_entity) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => Cow::Borrowed(reference),
    }
}
