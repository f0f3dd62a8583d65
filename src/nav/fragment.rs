use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters left as-is in a fragment value; dotted chapter ids stay readable.
const FRAGMENT_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Read `key` from a query-string style fragment such as `#chapter=1.1&x=y`.
pub fn parse_fragment(raw: &str, key: &str) -> Option<String> {
    let body = raw.strip_prefix('#').unwrap_or(raw);
    body.split('&').find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        if decode(name) != key {
            return None;
        }
        let value = decode(value);
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// `#<key>=<id>` with the id percent-encoded.
pub fn format_fragment(key: &str, chapter_id: &str) -> String {
    format!("#{key}={}", utf8_percent_encode(chapter_id, FRAGMENT_VALUE))
}

fn decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
