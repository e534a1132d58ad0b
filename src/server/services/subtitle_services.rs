use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::{
    config::SelectionConfig,
    server::{
        dtos::subtitle_dto::SubtitleEntry,
        models::{RequestContext, SourceBatch},
        services::{
            ranking_services::{ProviderHints, Scorer, rank_subtitles},
            source_services::DynSubtitleSource,
        },
    },
};

pub type DynSubtitleService = Arc<dyn SubtitleServiceTrait + Send + Sync>;

#[async_trait]
pub trait SubtitleServiceTrait {
    /// asks every configured source, then ranks whatever came back
    async fn find_subtitles(&self, request: &RequestContext) -> Vec<SubtitleEntry>;

    /// one batch per http source, in config order. failures come back as empty batches
    async fn fetch_all(&self, request: &RequestContext) -> Vec<SourceBatch>;
}

pub struct SubtitleService {
    source: DynSubtitleSource,
    scorer: Scorer,
    selection: SelectionConfig,
    hints: ProviderHints,
}

impl SubtitleService {
    pub fn new(
        source: DynSubtitleSource,
        scorer: Scorer,
        selection: SelectionConfig,
        hints: ProviderHints,
    ) -> Self {
        Self {
            source,
            scorer,
            selection,
            hints,
        }
    }
}

#[async_trait]
impl SubtitleServiceTrait for SubtitleService {
    async fn find_subtitles(&self, request: &RequestContext) -> Vec<SubtitleEntry> {
        info!(
            "[{}] fetching best match... (hash: {})",
            request.media_id,
            request.content_hash.is_some()
        );

        let batches = self.fetch_all(request).await;

        rank_subtitles(batches, request, &self.scorer, &self.selection, &self.hints)
    }

    async fn fetch_all(&self, request: &RequestContext) -> Vec<SourceBatch> {
        let sources: Vec<&String> = request
            .source_urls
            .iter()
            .filter(|s| {
                let usable = s.starts_with("http");
                if !usable {
                    debug!("skipping non-http source {}", s);
                }
                usable
            })
            .collect();

        // every source at once, the slowest one (or its timeout) decides how long this takes
        let fetches = sources.into_iter().map(|source| async move {
            match self.source.fetch_subtitles(source, request).await {
                Ok(entries) => SourceBatch {
                    source: source.clone(),
                    entries,
                },
                Err(e) => {
                    warn!("[{}] source {} failed: {}", request.media_id, source, e);
                    SourceBatch::empty(source)
                }
            }
        });

        join_all(fetches).await
    }
}
