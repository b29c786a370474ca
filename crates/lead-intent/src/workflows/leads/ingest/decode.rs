const UTF8_BOM: &str = "\u{feff}";

pub(crate) fn decode_upload(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(text) => text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string(),
        // Latin-1 maps each byte straight onto the first 256 code points.
        Err(_) => raw.iter().map(|&byte| char::from(byte)).collect(),
    }
}
