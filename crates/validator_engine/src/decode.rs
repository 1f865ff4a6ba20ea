use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// The fetched body could not be decoded into text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The bytes were malformed under the chosen encoding.
    #[error("body is not valid {0}")]
    Malformed(&'static str),
}

/// Decode a fetched HTML body into UTF-8 text.
///
/// Charset precedence: BOM, then the Content-Type header charset, then
/// statistical detection over the raw bytes.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> Result<String, DecodeError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| content_type.and_then(header_charset))
        .unwrap_or_else(|| detect(bytes));

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed(used.name()));
    }
    Ok(text.into_owned())
}

fn header_charset(content_type: &str) -> Option<&'static Encoding> {
    let label = content_type.split(';').find_map(|part| {
        let part = part.trim();
        let (name, value) = part.split_once('=')?;
        if name.eq_ignore_ascii_case("charset") {
            Some(value.trim_matches(|c| c == ' ' || c == '"' || c == '\''))
        } else {
            None
        }
    })?;
    Encoding::for_label(label.as_bytes())
}

fn detect(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}
