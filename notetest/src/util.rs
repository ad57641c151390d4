use crate::error::Error;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::borrow::Cow;

pub const REDACTED: &str = "[redacted]";

pub fn put_headers<'a, I: IntoIterator<Item = (&'a String, &'a String)>>(
    header_map: &mut HeaderMap<HeaderValue>,
    headers: I,
) -> Result<(), Error> {
    for (key, value) in headers {
        let header_name = HeaderName::from_lowercase(key.to_lowercase().as_bytes())?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| Error::InvalidHeaderValue(key.clone()))?;
        header_map.append(header_name, header_value);
    }

    Ok(())
}

/// Converts a header map into a JSON object for the report, joining repeated
/// headers with `", "`. Fails on the first value that is not valid text.
pub fn headers_to_json(
    header_map: &HeaderMap,
    redacted: &[Regex],
) -> Result<serde_json::Map<String, serde_json::Value>, Error> {
    let mut headers = serde_json::Map::new();

    for name in header_map.keys() {
        let mut values = Vec::new();
        for value in header_map.get_all(name) {
            let value = value
                .to_str()
                .map_err(|_| Error::InvalidHeaderValue(name.as_str().into()))?;
            values.push(value);
        }

        let value = if redacted.iter().any(|pattern| pattern.is_match(name.as_str())) {
            String::from(REDACTED)
        } else {
            values.join(", ")
        };
        headers.insert(name.as_str().into(), value.into());
    }

    Ok(headers)
}

/// Cuts `text` after `max_chars` characters and appends `marker` if anything
/// was dropped.
pub fn truncate_chars<'a>(text: &'a str, max_chars: usize, marker: &str) -> Cow<'a, str> {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &text[..cut], marker)),
        None => Cow::Borrowed(text),
    }
}
