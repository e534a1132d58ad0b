use std::panic::AssertUnwindSafe;

use axum::{
    Json, Router,
    extract::{Path, rejection::PathRejection},
    http::Uri,
    routing::get,
};
use futures::FutureExt;
use tracing::{debug, error, warn};

use crate::server::{
    dtos::{manifest_dto::ManifestResponse, subtitle_dto::SubtitlesResponse},
    error::{AppResult, Error},
    extractors::{Addon, AddonConfig, path_segment},
    get_app_version,
    models::RequestContext,
    services::app_services::AppServices,
    utils::metadata_utils::VideoMetadata,
};

/// the two routes a player ever calls, both behind the `{config}` segment
pub struct AddonController;

impl AddonController {
    pub fn app() -> Router {
        Router::new()
            .route("/{config}/manifest.json", get(Self::manifest))
            .route(
                "/{config}/subtitles/{media_type}/{media_id}",
                get(Self::subtitles),
            )
            .route(
                "/{config}/subtitles/{media_type}/{media_id}/{extra}",
                get(Self::subtitles_with_extra),
            )
    }

    async fn manifest(Addon(config, services): Addon) -> Json<ManifestResponse> {
        Json(ManifestResponse::for_selection(
            &config.target_language,
            &services.config.selection,
            get_app_version(),
        ))
    }

    // `/subtitles/movie/tt123.json`, the .json is glued to the id
    async fn subtitles(
        Addon(config, services): Addon,
        uri: Uri,
        params: Result<Path<(String, String, String)>, PathRejection>,
    ) -> AppResult<Json<SubtitlesResponse>> {
        let (media_type, media_id) = match params {
            Ok(Path((_, media_type, media_id))) => (media_type, media_id),
            Err(rejection) => {
                warn!("path params rejected ({}), reading them from the uri", rejection);
                let path = uri.path();
                (
                    path_segment(path, 2).unwrap_or_default(),
                    path_segment(path, 3).unwrap_or_default(),
                )
            }
        };
        let media_id = Self::strip_json(&media_id)?;

        Ok(Self::respond(config, &services, &media_type, media_id, None).await)
    }

    // `/subtitles/movie/tt123/filename=...&videoHash=....json`, here it's glued to the extra
    async fn subtitles_with_extra(
        Addon(config, services): Addon,
        uri: Uri,
        params: Result<Path<(String, String, String, String)>, PathRejection>,
    ) -> AppResult<Json<SubtitlesResponse>> {
        // a filename that decodes to invalid utf-8 makes axum reject the whole path, the raw
        // segments still carry everything the pipeline needs
        let (media_type, media_id, extra) = match params {
            Ok(Path((_, media_type, media_id, extra))) => (media_type, media_id, extra),
            Err(rejection) => {
                warn!("path params rejected ({}), reading them from the uri", rejection);
                let path = uri.path();
                (
                    path_segment(path, 2).unwrap_or_default(),
                    path_segment(path, 3).unwrap_or_default(),
                    path_segment(path, 4).unwrap_or_default(),
                )
            }
        };
        let extra = Self::strip_json(&extra)?;

        Ok(Self::respond(config, &services, &media_type, &media_id, Some(extra)).await)
    }

    fn strip_json(segment: &str) -> AppResult<&str> {
        segment
            .strip_suffix(".json")
            .ok_or_else(|| Error::NotFound(format!("no such resource: {}", segment)))
    }

    /// anything that goes wrong past this point still answers 200 with an empty list, players
    /// treat an error status as a broken addon
    async fn respond(
        config: AddonConfig,
        services: &AppServices,
        media_type: &str,
        media_id: &str,
        extra: Option<&str>,
    ) -> Json<SubtitlesResponse> {
        let metadata = VideoMetadata::extract(extra);
        debug!(
            "[{}] hash: {:?}, filename: {:?}",
            media_id, metadata.content_hash, metadata.normalized_filename
        );

        let request = RequestContext::new(config, metadata, media_type, media_id);

        let outcome = AssertUnwindSafe(services.subtitles.find_subtitles(&request))
            .catch_unwind()
            .await;

        match outcome {
            Ok(subtitles) => Json(SubtitlesResponse { subtitles }),
            Err(_) => {
                error!("[{}] subtitle pipeline panicked, answering empty", media_id);
                Json(SubtitlesResponse::empty())
            }
        }
    }
}
