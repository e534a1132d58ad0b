use crate::server::{extractors::AddonConfig, utils::metadata_utils::VideoMetadata};

/// everything one subtitle request needs, built once from the path and never touched again
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub target_language: String,
    pub substitute_language: String,
    pub source_urls: Vec<String>,
    pub content_hash: Option<String>,
    pub normalized_filename: Option<String>,
    pub media_type: String,
    pub media_id: String,
}

impl RequestContext {
    pub fn new(
        config: AddonConfig,
        metadata: VideoMetadata,
        media_type: &str,
        media_id: &str,
    ) -> Self {
        Self {
            target_language: config.target_language,
            substitute_language: config.substitute_language,
            source_urls: config.source_urls,
            content_hash: metadata.content_hash,
            normalized_filename: metadata.normalized_filename,
            media_type: media_type.to_string(),
            media_id: media_id.to_string(),
        }
    }
}
