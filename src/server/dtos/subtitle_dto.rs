use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// a subtitle as the player gets it: the upstream record with `id` and `lang` rewritten
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleEntry {
    pub id: String,
    pub url: String,
    pub lang: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubtitlesResponse {
    pub subtitles: Vec<SubtitleEntry>,
}

impl SubtitlesResponse {
    pub fn empty() -> Self {
        Self::default()
    }
}
