use serde::Serialize;

use crate::config::{SelectionConfig, SelectionMode};

/// the addon descriptor players fetch on install
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestResponse {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub resources: Vec<String>,
    pub types: Vec<String>,
    pub catalogs: Vec<serde_json::Value>,
    pub id_prefixes: Vec<String>,
}

impl ManifestResponse {
    /// id and wording depend on how many subtitles come back, the language goes into the id so
    /// one install per language doesn't collide
    pub fn for_selection(target_language: &str, selection: &SelectionConfig, version: &str) -> Self {
        let (id, name, description) = match selection.selection_mode {
            SelectionMode::Single => (
                format!("org.community.singlebest.{}", target_language),
                "Auto-Sub (Best Only)".to_string(),
                "Returns ONLY the single best matching subtitle. No backup options.".to_string(),
            ),
            SelectionMode::Top => {
                let n = selection.effective_top_n();
                (
                    format!("org.community.top{}.{}", n, target_language),
                    format!("Auto-Sub (Top {})", n),
                    format!(
                        "Returns the {} best matching subtitles, ranked by how likely they are to be in sync.",
                        n
                    ),
                )
            }
        };

        Self {
            id,
            version: version.to_string(),
            name,
            description,
            resources: vec!["subtitles".to_string()],
            types: vec!["movie".to_string(), "series".to_string()],
            catalogs: Vec::new(),
            id_prefixes: vec!["tt".to_string()],
        }
    }
}
