use base64::{Engine as _, engine::general_purpose::STANDARD};

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Wrap raw image bytes as a PNG data URL.
#[must_use]
pub fn png_data_url(bytes: &[u8]) -> String {
    let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + bytes.len().div_ceil(3) * 4);
    url.push_str(PNG_DATA_URL_PREFIX);
    STANDARD.encode_string(bytes, &mut url);

    url
}

///
/// TESTS
///
