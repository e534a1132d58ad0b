// the part that actually decides anything. everything in here is sync and pure so it can be run
// over the same input again and give the same answer
use std::collections::HashSet;

use tracing::{debug, info};

use crate::{
    config::{ScoringWeights, SelectionConfig, SelectionMode, SourceConfig, TagScheme},
    server::{
        dtos::subtitle_dto::SubtitleEntry,
        models::{Origin, RequestContext, ScoredCandidate, SourceBatch, SubtitleCandidate},
        utils::release_utils::{ReleaseCatalogue, contains_token},
    },
};

const ENGLISH: &str = "eng";
const ENGLISH_ALIAS: &str = "en";

/// decides a candidate's origin from the url of the source it came from
#[derive(Debug, Clone)]
pub struct ProviderHints {
    pub primary: String,
    pub secondary: String,
}

impl ProviderHints {
    pub fn classify(&self, source: &str) -> Origin {
        // secondary wins when both match, same as checking them in order and overwriting
        if !self.secondary.is_empty() && source.contains(&self.secondary) {
            Origin::Secondary
        } else if !self.primary.is_empty() && source.contains(&self.primary) {
            Origin::Primary
        } else {
            Origin::Unknown
        }
    }
}

impl From<&SourceConfig> for ProviderHints {
    fn from(config: &SourceConfig) -> Self {
        Self {
            primary: config.primary_provider_hint.clone(),
            secondary: config.secondary_provider_hint.clone(),
        }
    }
}

/// flattens every source's list (source order, then provider order), tags each entry and drops
/// urls that were already seen. malformed entries are skipped but still take up their rank
pub fn merge_sources(batches: Vec<SourceBatch>, hints: &ProviderHints) -> Vec<SubtitleCandidate> {
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();

    for batch in batches {
        let origin = hints.classify(&batch.source);

        for (rank, entry) in batch.entries.into_iter().enumerate() {
            let Some(candidate) = SubtitleCandidate::from_upstream(entry, &batch.source, origin, rank)
            else {
                debug!("skipping malformed entry #{} from {}", rank, batch.source);
                continue;
            };

            if !seen_urls.insert(candidate.url.clone()) {
                continue;
            }

            merged.push(candidate);
        }
    }

    merged
}

/// `lang` has to start with the target, english also takes the two letter code
pub fn matches_language(lang: Option<&str>, target_language: &str) -> bool {
    match lang {
        Some(lang) => {
            lang.starts_with(target_language)
                || (target_language == ENGLISH && lang == ENGLISH_ALIAS)
        }
        None => false,
    }
}

pub fn filter_language(
    candidates: Vec<SubtitleCandidate>,
    target_language: &str,
) -> Vec<SubtitleCandidate> {
    candidates
        .into_iter()
        .filter(|c| matches_language(c.lang.as_deref(), target_language))
        .collect()
}

pub struct Scorer {
    weights: ScoringWeights,
    catalogue: ReleaseCatalogue,
}

impl Scorer {
    pub fn new(weights: ScoringWeights, catalogue: ReleaseCatalogue) -> Self {
        Self { weights, catalogue }
    }

    /// every rule is additive, so the order they run in doesn't matter
    pub fn score(&self, candidate: &SubtitleCandidate, request: &RequestContext) -> i64 {
        let w = &self.weights;
        let text = candidate.descriptive_text();
        let filename = request.normalized_filename.as_deref().unwrap_or("");

        // providers order by their own relevance, one point per position
        let mut score = if w.popularity {
            w.popularity_base - candidate.original_rank as i64
        } else {
            0
        };

        score += match w.tag_scheme {
            TagScheme::Grouped => self.grouped_type_score(filename, &text),
            TagScheme::Loose => self.loose_type_score(filename, &text),
        };

        score += self.catalogue.shared_release_groups(filename, &text) as i64 * w.group_match;

        if self.catalogue.shares_frame_rate(filename, &text) {
            score += w.frame_rate_match;
        }

        if text.contains("sdh") || text.contains("impaired") {
            score += w.hearing_impaired;
        }

        if text.contains("machine") || text.contains("translated") {
            score += w.machine_translated;
        }

        if self.is_hash_verified(candidate, request) {
            score += w.hash_match;
        }

        score
    }

    fn grouped_type_score(&self, filename: &str, text: &str) -> i64 {
        // can't say anything about consistency without knowing what the file is
        let Some(file_type) = self.catalogue.release_type_of(filename) else {
            return 0;
        };

        if file_type.is_in(text) {
            self.weights.type_match
        } else if self.catalogue.names_other_type(text, file_type) {
            self.weights.type_mismatch
        } else {
            0
        }
    }

    fn loose_type_score(&self, filename: &str, text: &str) -> i64 {
        self.catalogue
            .loose_tags
            .iter()
            .filter(|tag| contains_token(text, tag))
            .map(|tag| {
                if contains_token(filename, tag) {
                    self.weights.loose_tag_match
                } else {
                    self.weights.loose_tag_mismatch
                }
            })
            .sum()
    }

    fn is_hash_verified(&self, candidate: &SubtitleCandidate, request: &RequestContext) -> bool {
        request.content_hash.is_some()
            && candidate.origin == Origin::Primary
            && (!self.weights.hash_top_rank_only || candidate.original_rank == 0)
    }

    pub fn score_all(
        &self,
        candidates: Vec<SubtitleCandidate>,
        request: &RequestContext,
    ) -> Vec<ScoredCandidate> {
        candidates
            .into_iter()
            .map(|candidate| {
                let score = self.score(&candidate, request);
                debug!("scored {} = {}", candidate.id, score);
                ScoredCandidate { candidate, score }
            })
            .collect()
    }
}

/// sorts best first and relabels what's left. the sort is stable so equal scores keep merge
/// order, and there is no score floor unless one is configured
pub fn select(
    mut scored: Vec<ScoredCandidate>,
    selection: &SelectionConfig,
    substitute_language: &str,
) -> Vec<SubtitleEntry> {
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    if let Some(min_score) = selection.min_score {
        scored.retain(|s| s.score >= min_score);
    }

    scored
        .into_iter()
        .take(selection.effective_top_n())
        .enumerate()
        .map(|(index, scored)| {
            let candidate = scored.candidate;
            let (id, lang) = match selection.selection_mode {
                SelectionMode::Single => (
                    format!("best_{}", candidate.id),
                    substitute_language.to_string(),
                ),
                SelectionMode::Top => {
                    let lang = if selection.top_lang_suffix {
                        format!("{}-{}", substitute_language, index + 1)
                    } else {
                        substitute_language.to_string()
                    };
                    (format!("top{}_{}", index + 1, candidate.id), lang)
                }
            };

            SubtitleEntry {
                id,
                url: candidate.url,
                lang,
                extra: candidate.extra,
            }
        })
        .collect()
}

/// merge, filter, score and select in one go
pub fn rank_subtitles(
    batches: Vec<SourceBatch>,
    request: &RequestContext,
    scorer: &Scorer,
    selection: &SelectionConfig,
    hints: &ProviderHints,
) -> Vec<SubtitleEntry> {
    let merged = merge_sources(batches, hints);
    let merged_count = merged.len();

    let filtered = filter_language(merged, &request.target_language);
    debug!(
        "[{}] {} unique candidates, {} in {}",
        request.media_id,
        merged_count,
        filtered.len(),
        request.target_language
    );

    let scored = scorer.score_all(filtered, request);
    // rev so the first of several equal scores is reported, same one select keeps
    if let Some(winner) = scored.iter().rev().max_by_key(|s| s.score) {
        info!(
            "[{}] winner: {} (score: {})",
            request.media_id, winner.candidate.id, winner.score
        );
    }

    select(scored, selection, &request.substitute_language)
}
