use std::{sync::Arc, time::Duration};

use tracing::info;

use crate::{
    config::AppConfig,
    server::{
        services::{
            ranking_services::{ProviderHints, Scorer},
            source_services::HttpSubtitleSource,
            subtitle_services::SubtitleService,
        },
        utils::release_utils::ReleaseCatalogue,
    },
};

use super::{source_services::DynSubtitleSource, subtitle_services::DynSubtitleService};

/// everything a handler needs, cloned into each request through an Extension. there is no
/// database or cache behind any of it, every request stands on its own
#[derive(Clone)]
pub struct AppServices {
    pub subtitles: DynSubtitleService,
    pub config: Arc<AppConfig>,
}

impl AppServices {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let timeout = Duration::from_millis(config.sources.upstream_timeout_ms);
        info!("starting services, upstream timeout {:?}...", timeout);

        let source = Arc::new(HttpSubtitleSource::new(timeout)) as DynSubtitleSource;

        Self::with_source(config, source)
    }

    /// same wiring with a different upstream, tests hand in a mock here
    pub fn with_source(config: Arc<AppConfig>, source: DynSubtitleSource) -> Self {
        let scorer = Scorer::new(config.scoring.clone(), ReleaseCatalogue::default());

        let subtitles = Arc::new(SubtitleService::new(
            source,
            scorer,
            config.selection.clone(),
            ProviderHints::from(&config.sources),
        )) as DynSubtitleService;

        Self { subtitles, config }
    }
}
