use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

// players put these in the extra segment in whatever order they like, alongside other keys
// (videoSize etc), so this is a search and not a query string parse
static VIDEO_HASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"videoHash=([^&.]+)").expect("static regex should compile"));
static FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"filename=([^&]+)").expect("static regex should compile"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoMetadata {
    pub content_hash: Option<String>,
    /// decoded and lower-cased
    pub normalized_filename: Option<String>,
}

impl VideoMetadata {
    /// pulls the hash and filename out of the trailing `{extra}` segment (already stripped of
    /// `.json`). a filename that won't percent-decode is kept raw, this never fails
    pub fn extract(extra: Option<&str>) -> Self {
        let Some(extra) = extra else {
            return Self::default();
        };

        let content_hash = VIDEO_HASH
            .captures(extra)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());

        let normalized_filename = FILENAME
            .captures(extra)
            .and_then(|c| c.get(1))
            .map(|m| {
                let raw = m.as_str();
                match urlencoding::decode(raw) {
                    Ok(decoded) => decoded.to_lowercase(),
                    Err(e) => {
                        debug!("filename didn't decode ({}), using it raw", e);
                        raw.to_lowercase()
                    }
                }
            });

        Self {
            content_hash,
            normalized_filename,
        }
    }
}
