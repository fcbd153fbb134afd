//! MIME type lookup for referenced assets.
//!
//! Mirrors the lookup table of the common `mime-types` databases for the
//! extensions a page is likely to reference. Only the script and stylesheet
//! entries decide preload eligibility; the rest exist so that a known
//! non-script asset is reported as such instead of falling through.

/// Common MIME type constants.
pub mod types {
    pub const HTML: &str = "text/html";
    pub const CSS: &str = "text/css";
    pub const JAVASCRIPT: &str = "application/javascript";
    pub const JSON: &str = "application/json";
    pub const XML: &str = "application/xml";
    pub const WASM: &str = "application/wasm";

    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
    pub const AVIF: &str = "image/avif";
    pub const SVG: &str = "image/svg+xml";
    pub const ICO: &str = "image/x-icon";

    pub const WOFF: &str = "font/woff";
    pub const WOFF2: &str = "font/woff2";
    pub const TTF: &str = "font/ttf";
    pub const OTF: &str = "font/otf";

    pub const MP4: &str = "video/mp4";
    pub const WEBM: &str = "video/webm";
    pub const MP3: &str = "audio/mpeg";
}

/// Guess the MIME type of a URL path from its final extension.
///
/// Returns `None` when the last segment has no extension or the extension
/// is not in the table. Matching is case-insensitive.
pub fn from_url_path(path: &str) -> Option<&'static str> {
    let segment = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = segment.rsplit_once('.')?;
    // dotfiles such as `/.env` have no extension
    if stem.is_empty() {
        return None;
    }
    from_extension(&ext.to_ascii_lowercase())
}

/// Guess MIME type from a lowercase extension string.
pub fn from_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        "html" | "htm" => types::HTML,
        "css" => types::CSS,
        "js" | "mjs" | "cjs" => types::JAVASCRIPT,
        "json" | "map" => types::JSON,
        "xml" => types::XML,
        "wasm" => types::WASM,

        "png" => types::PNG,
        "jpg" | "jpeg" => types::JPEG,
        "gif" => types::GIF,
        "webp" => types::WEBP,
        "avif" => types::AVIF,
        "svg" => types::SVG,
        "ico" => types::ICO,

        "woff" => types::WOFF,
        "woff2" => types::WOFF2,
        "ttf" => types::TTF,
        "otf" => types::OTF,

        "mp4" | "m4v" => types::MP4,
        "webm" => types::WEBM,
        "mp3" => types::MP3,

        _ => return None,
    };
    Some(mime)
}
