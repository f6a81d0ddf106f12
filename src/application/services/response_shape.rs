//! Tolerant extraction of artifacts from model responses
//!
//! Different versions of the same hosted model return the same artifact under
//! different JSON shapes. Each artifact kind has an ordered list of JSON
//! pointers; the first one that yields a non-blank string wins. Finding none
//! is a single failure, not one per path.

use serde_json::Value;

pub const TEXT_OUTPUT_PATHS: &[&str] = &["/output", "/text", "/response"];

pub const IMAGE_URL_PATHS: &[&str] = &["/images/0/url", "/image/url", "/image_url"];

pub const AUDIO_URL_PATHS: &[&str] = &[
    "/audio/url",
    "/audio_url",
    "/audio/0/url",
    "/output/url",
    "/url",
];

pub const VIDEO_URL_PATHS: &[&str] = &[
    "/video/url",
    "/video_url",
    "/output/video/url",
    "/output/url",
    "/url",
];

/// First non-blank string found at any of `paths`, in order
pub fn extract_first_str<'a>(value: &'a Value, paths: &[&str]) -> Option<&'a str> {
    paths
        .iter()
        .filter_map(|path| value.pointer(path))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
}

pub fn extract_first_url(value: &Value, paths: &[&str]) -> Option<String> {
    extract_first_str(value, paths).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_audio_shapes() {
        let shapes = [
            json!({"audio": {"url": "https://a/1.mp3"}}),
            json!({"audio_url": "https://a/1.mp3"}),
            json!({"audio": [{"url": "https://a/1.mp3"}]}),
            json!({"output": {"url": "https://a/1.mp3"}}),
            json!({"url": "https://a/1.mp3"}),
        ];
        for shape in shapes {
            assert_eq!(
                extract_first_url(&shape, AUDIO_URL_PATHS).as_deref(),
                Some("https://a/1.mp3"),
                "shape {shape}"
            );
        }
    }

    #[test]
    fn test_precedence_follows_path_order() {
        let value = json!({
            "url": "https://fallback",
            "video": {"url": "https://preferred"}
        });
        assert_eq!(
            extract_first_url(&value, VIDEO_URL_PATHS).as_deref(),
            Some("https://preferred")
        );
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let value = json!({"video": {"url": "  "}, "video_url": "https://v"});
        assert_eq!(extract_first_url(&value, VIDEO_URL_PATHS).as_deref(), Some("https://v"));
    }

    #[test]
    fn test_unrecognized_shape_is_none() {
        let value = json!({"audio": {"href": "https://a"}, "status": "done"});
        assert!(extract_first_url(&value, AUDIO_URL_PATHS).is_none());
        assert!(extract_first_url(&Value::Null, AUDIO_URL_PATHS).is_none());
    }

    #[test]
    fn test_non_string_values_are_ignored() {
        let value = json!({"images": [{"url": 42}], "image": {"url": "https://img"}});
        assert_eq!(extract_first_url(&value, IMAGE_URL_PATHS).as_deref(), Some("https://img"));
    }
}
