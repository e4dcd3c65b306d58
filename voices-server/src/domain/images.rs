//! The single decoder for the legacy `posts.images` column.
//!
//! The column holds a JSON-encoded array of image paths, but older rows may
//! contain a JSON string or a bare, unencoded path. Decoding never fails: an
//! unreadable value degrades to a one-element list holding the raw text.

use serde_json::Value;

/// Public route prefix bare filenames are rewritten to.
pub(crate) const PUBLIC_UPLOAD_PREFIX: &str = "/api/uploads/posts";

/// Decodes the raw column value into a list of image references.
pub(crate) fn decode_images(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => {
                    let s = s.trim().to_string();
                    (!s.is_empty()).then_some(s)
                }
                _ => None,
            })
            .collect(),
        Ok(Value::String(s)) => {
            let s = s.trim().to_string();
            if s.is_empty() { Vec::new() } else { vec![s] }
        }
        // Valid JSON of some other shape holds no image paths.
        Ok(_) => Vec::new(),
        // Malformed JSON: treat the raw text as a single image path instead
        // of failing the read.
        Err(_) => vec![raw.to_string()],
    }
}

/// Rewrites one image reference into its public URL form.
///
/// Absolute URLs and webroot-relative paths pass through; a bare filename is
/// assumed to live in the uploads directory.
pub(crate) fn public_image_url(image: &str) -> String {
    let image = image.trim();
    if image.starts_with("http://") || image.starts_with("https://") || image.starts_with('/') {
        return image.to_string();
    }
    format!("{PUBLIC_UPLOAD_PREFIX}/{image}")
}

/// Decode + normalize in one step; every read path goes through here.
pub(crate) fn decode_public_images(raw: Option<&str>) -> Vec<String> {
    decode_images(raw)
        .iter()
        .map(|img| public_image_url(img))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{decode_images, decode_public_images, public_image_url};

    #[test]
    fn decode_handles_missing_and_blank() {
        assert!(decode_images(None).is_empty());
        assert!(decode_images(Some("   ")).is_empty());
    }

    #[test]
    fn decode_handles_json_array() {
        let images = decode_images(Some(r#"["a.png", " b.jpg ", ""]"#));
        assert_eq!(images, vec!["a.png".to_string(), "b.jpg".to_string()]);
    }

    #[test]
    fn decode_handles_json_string() {
        let images = decode_images(Some(r#""single.png""#));
        assert_eq!(images, vec!["single.png".to_string()]);
    }

    #[test]
    fn decode_falls_back_to_raw_path_on_malformed_json() {
        let images = decode_images(Some("not-json.png"));
        assert_eq!(images, vec!["not-json.png".to_string()]);

        let images = decode_images(Some(r#"["broken"#));
        assert_eq!(images, vec![r#"["broken"#.to_string()]);
    }

    #[test]
    fn decode_ignores_non_string_array_items() {
        let images = decode_images(Some(r#"[1, "ok.png", null]"#));
        assert_eq!(images, vec!["ok.png".to_string()]);
    }

    #[test]
    fn decode_yields_nothing_for_other_valid_json() {
        assert!(decode_images(Some("42")).is_empty());
        assert!(decode_images(Some("null")).is_empty());
        assert!(decode_images(Some(r#"{"a":"b.png"}"#)).is_empty());
    }

    #[test]
    fn public_url_keeps_absolute_and_rooted_references() {
        assert_eq!(
            public_image_url("https://cdn.example.com/x.png"),
            "https://cdn.example.com/x.png"
        );
        assert_eq!(public_image_url("/static/x.png"), "/static/x.png");
    }

    #[test]
    fn public_url_prefixes_bare_filenames() {
        assert_eq!(
            public_image_url("x.png"),
            "/api/uploads/posts/x.png"
        );
    }

    #[test]
    fn decode_public_images_combines_both_steps() {
        let images = decode_public_images(Some(r#"["a.png", "/b.png"]"#));
        assert_eq!(
            images,
            vec!["/api/uploads/posts/a.png".to_string(), "/b.png".to_string()]
        );
    }
}
