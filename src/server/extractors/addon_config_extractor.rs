use std::collections::HashMap;

use axum::Extension;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use tracing::debug;

use crate::server::error::Error;
use crate::server::services::app_services::AppServices;

const DEFAULT_TARGET_LANGUAGE: &str = "eng";
const DEFAULT_SUBSTITUTE_LANGUAGE: &str = "mri";

/// what the user picked on the configure page, carried in the first path segment as
/// `lang|spoofLang|source1|source2|...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonConfig {
    pub target_language: String,
    pub substitute_language: String,
    pub source_urls: Vec<String>,
}

impl AddonConfig {
    /// never fails, anything missing or empty falls back to a default. source urls are not
    /// validated here, the fetcher skips anything that isn't http
    pub fn decode(raw: &str, default_source_url: &str) -> Self {
        let mut parts = raw.split('|');

        let target_language = parts
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_TARGET_LANGUAGE)
            .to_string();

        let substitute_language = parts
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SUBSTITUTE_LANGUAGE)
            .to_string();

        let mut source_urls: Vec<String> = parts
            .filter(|s| !s.is_empty())
            .map(Self::decode_source)
            .filter(|s| !s.is_empty())
            .collect();

        if source_urls.is_empty() {
            source_urls.push(default_source_url.to_string());
        }

        Self {
            target_language,
            substitute_language,
            source_urls,
        }
    }

    // the configure page encodes each url on its own, then the whole segment gets encoded
    // again on the way into the player so axum only undoes the outer layer
    fn decode_source(raw: &str) -> String {
        let decoded = urlencoding::decode(raw)
            .map(|s| s.into_owned())
            .unwrap_or_else(|e| {
                debug!("source url didn't decode ({}), keeping it raw", e);
                raw.to_string()
            });

        // people paste install links, the base is what we want
        let trimmed = decoded.trim();
        let trimmed = trimmed.strip_suffix("/manifest.json").unwrap_or(trimmed);
        trimmed.trim_end_matches('/').to_string()
    }
}

/// the `index`th segment of a request path, percent-decoded once. a segment that doesn't decode
/// comes back raw
pub fn path_segment(path: &str, index: usize) -> Option<String> {
    let raw = path.trim_start_matches('/').split('/').nth(index)?;

    Some(
        urlencoding::decode(raw)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| raw.to_string()),
    )
}

/// decodes the `{config}` path param and hands back the shared services with it
pub struct Addon(pub AddonConfig, pub AppServices);

impl<S> FromRequestParts<S> for Addon
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(services): Extension<AppServices> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|err| Error::InternalServerErrorWithContext(err.to_string()))?;

        // a broken config is still a config, defaults take over. when any segment of the path
        // isn't valid utf-8 axum refuses every param, so the config is read off the uri instead
        let raw = match Path::<HashMap<String, String>>::from_request_parts(parts, state).await {
            Ok(Path(params)) => params.get("config").cloned().unwrap_or_default(),
            Err(rejection) => {
                debug!("path params rejected ({}), reading config from the uri", rejection);
                path_segment(parts.uri.path(), 0).unwrap_or_default()
            }
        };

        let config = AddonConfig::decode(&raw, &services.config.sources.default_source_url);
        debug!(
            "addon config: lang={}, spoof={}, {} source(s)",
            config.target_language,
            config.substitute_language,
            config.source_urls.len()
        );

        Ok(Addon(config, services))
    }
}
