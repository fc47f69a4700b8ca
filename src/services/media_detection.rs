use regex::Regex;

use crate::database::entities::project_media::MediaType;

/// Derive the media kind from a URL suffix. Anything that is not a known
/// image extension is treated as video, matching how the upload frontend
/// categorizes files.
pub fn detect_media_type(media_url: &str) -> MediaType {
    let image_suffix =
        Regex::new(r"(?i)\.(jpe?g|png|gif)$").expect("image suffix pattern is valid");

    if image_suffix.is_match(media_url.trim()) {
        MediaType::Image
    } else {
        MediaType::Video
    }
}
