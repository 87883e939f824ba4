//! Object key generation.
//!
//! Keys look like `events/{event_id}/{unix_ms}-{16 hex}.{ext}`: unique per
//! upload, grouped by owner, and keeping a usable extension for content
//! sniffing by browsers and CDNs.

use std::fmt;

use chrono::Utc;

/// Extensions accepted as-is from the uploaded file name.
const KNOWN_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif", "svg", "heic"];

/// A generated storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Key for an image in an event gallery.
    pub fn event_image(event_id: i64, file_name: Option<&str>, content_type: &str) -> Self {
        Self::generate(&format!("events/{event_id}"), file_name, content_type)
    }

    /// Key for a board member portrait.
    pub fn board_member_image(file_name: Option<&str>, content_type: &str) -> Self {
        Self::generate("board-member", file_name, content_type)
    }

    fn generate(prefix: &str, file_name: Option<&str>, content_type: &str) -> Self {
        let suffix: [u8; 8] = rand::random();
        let ext = extension_for(file_name, content_type);
        Self(format!(
            "{prefix}/{}-{}.{ext}",
            Utc::now().timestamp_millis(),
            hex::encode(suffix)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pick a file extension from the original name, else from the MIME type.
pub fn extension_for(file_name: Option<&str>, content_type: &str) -> String {
    let from_name = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| KNOWN_EXTENSIONS.contains(&ext.as_str()));
    if let Some(ext) = from_name {
        return ext;
    }
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/avif" => "avif",
        "image/svg+xml" => "svg",
        "image/heic" => "heic",
        _ => "bin",
    }
    .to_string()
}
