use serde::Deserialize;
use serde_json::{Map, Value};

/// where a candidate came from, decided by sniffing the source url
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// the hash capable index (opensubtitles)
    Primary,
    Secondary,
    Unknown,
}

/// what an upstream addon answers with. anything that doesn't fit this shape is treated as an
/// empty list, entries themselves are validated one by one in `SubtitleCandidate::from_upstream`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamSubtitlesResponse {
    #[serde(default)]
    pub subtitles: Vec<Value>,
}

/// one source's answer, raw entries in the order the provider ranked them
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub source: String,
    pub entries: Vec<Value>,
}

impl SourceBatch {
    pub fn empty(source: &str) -> Self {
        Self {
            source: source.to_string(),
            entries: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleCandidate {
    pub id: String,
    pub url: String,
    pub lang: Option<String>,
    pub origin: Origin,
    /// position inside its own source's list, before any filtering
    pub original_rank: usize,
    pub source: String,
    /// every other upstream field, passed back to the player untouched
    pub extra: Map<String, Value>,
}

impl SubtitleCandidate {
    /// validates a raw upstream entry. needs a non-empty `url` and an `id` (string or number),
    /// returns None for anything else
    pub fn from_upstream(
        entry: Value,
        source: &str,
        origin: Origin,
        original_rank: usize,
    ) -> Option<Self> {
        let Value::Object(mut fields) = entry else {
            return None;
        };

        let url = match fields.remove("url") {
            Some(Value::String(url)) if !url.is_empty() => url,
            _ => return None,
        };

        let id = match fields.remove("id") {
            Some(Value::String(id)) if !id.is_empty() => id,
            Some(Value::Number(id)) => id.to_string(),
            _ => return None,
        };

        let lang = match fields.remove("lang") {
            Some(Value::String(lang)) if !lang.is_empty() => Some(lang),
            _ => None,
        };

        Some(Self {
            id,
            url,
            lang,
            origin,
            original_rank,
            source: source.to_string(),
            extra: fields,
        })
    }

    /// lower-cased `id url`, what every text rule in the scorer looks at
    pub fn descriptive_text(&self) -> String {
        format!("{} {}", self.id, self.url).to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: SubtitleCandidate,
    pub score: i64,
}
