use autosub::server::models::{RequestContext, SourceBatch};
use autosub::server::services::ranking_services::{
    ProviderHints, Scorer, filter_language, merge_sources, rank_subtitles,
};
use autosub::server::utils::release_utils::ReleaseCatalogue;
use autosub::{ScoringWeights, SelectionConfig, SelectionMode, SourceConfig};
use serde_json::{Value, json};

const OPENSUBTITLES: &str = "https://opensubtitles-v3.strem.io";
const SUBDL: &str = "https://subdl.strem.top/key";
const OTHER: &str = "https://subsource.example";

fn request(filename: Option<&str>, hash: Option<&str>) -> RequestContext {
    RequestContext {
        target_language: "eng".to_string(),
        substitute_language: "mri".to_string(),
        source_urls: vec![],
        content_hash: hash.map(str::to_string),
        normalized_filename: filename.map(str::to_lowercase),
        media_type: "movie".to_string(),
        media_id: "tt0499549".to_string(),
    }
}

fn batch(source: &str, entries: Value) -> SourceBatch {
    SourceBatch {
        source: source.to_string(),
        entries: entries.as_array().cloned().unwrap_or_default(),
    }
}

fn hints() -> ProviderHints {
    ProviderHints::from(&SourceConfig::default())
}

fn scorer() -> Scorer {
    Scorer::new(ScoringWeights::default(), ReleaseCatalogue::default())
}

fn single() -> SelectionConfig {
    SelectionConfig::default()
}

fn top() -> SelectionConfig {
    SelectionConfig {
        selection_mode: SelectionMode::Top,
        ..Default::default()
    }
}

fn ids(entries: &[autosub::server::dtos::subtitle_dto::SubtitleEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.id.as_str()).collect()
}

#[test]
fn return_nothing_without_sources() {
    let ranked = rank_subtitles(vec![], &request(None, None), &scorer(), &single(), &hints());
    assert!(ranked.is_empty());

    let ranked = rank_subtitles(
        vec![batch(OPENSUBTITLES, json!([])), batch(SUBDL, json!([]))],
        &request(None, None),
        &scorer(),
        &top(),
        &hints(),
    );
    assert!(ranked.is_empty());
}

#[test]
fn keep_the_first_of_duplicate_urls() {
    let merged = merge_sources(
        vec![
            batch(SUBDL, json!([{"id": "s1", "url": "dup", "lang": "eng"}])),
            batch(OPENSUBTITLES, json!([
                {"id": "o1", "url": "other", "lang": "eng"},
                {"id": "o2", "url": "dup", "lang": "eng"}
            ])),
        ],
        &hints(),
    );

    let ids: Vec<&str> = merged.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["s1", "o1"]);
    assert_eq!(merged.iter().filter(|c| c.url == "dup").count(), 1);
}

#[test]
fn accept_the_english_alias_only_for_english() {
    let candidates = merge_sources(
        vec![batch(OTHER, json!([
            {"id": "en", "url": "1", "lang": "en"},
            {"id": "fra", "url": "2", "lang": "fra"},
            {"id": "eng", "url": "3", "lang": "eng"}
        ]))],
        &hints(),
    );

    let kept = filter_language(candidates.clone(), "eng");
    let kept: Vec<&str> = kept.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(kept, vec!["en", "eng"]);

    let kept = filter_language(candidates, "fra");
    let kept: Vec<&str> = kept.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(kept, vec!["fra"]);
}

#[test]
fn rank_the_hash_match_first() {
    let batches = vec![
        batch(SUBDL, json!([
            {"id": "Avatar.2009.BluRay.x264-RARBG", "url": "s1", "lang": "eng"},
            {"id": "Avatar.2009.BluRay.x264-RARBG.23.976", "url": "s2", "lang": "eng"}
        ])),
        batch(OTHER, json!([
            {"id": "Avatar 2009 BluRay RARBG x264", "url": "x1", "lang": "eng"}
        ])),
        batch(OPENSUBTITLES, json!([{"id": "exact", "url": "o1", "lang": "eng"}])),
    ];

    let ranked = rank_subtitles(
        batches,
        &request(Some("Avatar.2009.BluRay.x264-RARBG.23.976.mp4"), Some("abc123")),
        &scorer(),
        &top(),
        &hints(),
    );

    assert_eq!(ranked[0].id, "top1_exact");
}

#[test]
fn score_far_above_without_the_hash() {
    let scorer = scorer();
    let req = request(Some("Avatar.2009.BluRay.x264-RARBG.mp4"), Some("abc123"));
    let merged = merge_sources(
        vec![
            batch(OPENSUBTITLES, json!([{"id": "exact", "url": "o1", "lang": "eng"}])),
            batch(SUBDL, json!([{"id": "Avatar BluRay x264 RARBG", "url": "s1", "lang": "eng"}])),
        ],
        &hints(),
    );

    let scored = scorer.score_all(merged, &req);
    assert_eq!(scored[0].score, 600);
    assert_eq!(scored[1].score, 100 + 50 + 80 + 80);
    assert!(scored[0].score - scored[1].score >= 250);
}

#[test]
fn follow_the_release_in_the_avatar_case() {
    let batches = vec![batch(OPENSUBTITLES, json!([
        {"id": "a1", "url": "u1", "lang": "eng"},
        {"id": "a2 BluRay RARBG", "url": "u2", "lang": "eng"},
        {"id": "a3 WEBRip", "url": "u3", "lang": "eng"}
    ]))];
    let req = request(Some("Avatar.2009.BluRay.x264-RARBG.mp4"), None);

    let ranked = rank_subtitles(batches.clone(), &req, &scorer(), &top(), &hints());
    assert_eq!(ids(&ranked), vec!["top1_a2 BluRay RARBG", "top2_a1", "top3_a3 WEBRip"]);

    let ranked = rank_subtitles(batches, &req, &scorer(), &single(), &hints());
    assert_eq!(ids(&ranked), vec!["best_a2 BluRay RARBG"]);
    assert_eq!(ranked[0].lang, "mri");
}

#[test]
fn give_the_same_answer_every_time() {
    let batches = vec![
        batch(OPENSUBTITLES, json!([
            {"id": "x", "url": "1", "lang": "eng"},
            {"id": "y WEB-DL", "url": "2", "lang": "eng"},
            {"id": "z sdh", "url": "3", "lang": "eng"}
        ])),
        batch(SUBDL, json!([
            {"id": "w WEB-DL", "url": "4", "lang": "eng"},
            {"id": "v", "url": "5", "lang": "en"}
        ])),
    ];
    let req = request(Some("show.s01e01.web-dl.mkv"), None);
    let scorer = scorer();

    let merged = filter_language(merge_sources(batches.clone(), &hints()), "eng");
    let first: Vec<i64> = scorer.score_all(merged.clone(), &req).iter().map(|s| s.score).collect();
    let second: Vec<i64> = scorer.score_all(merged, &req).iter().map(|s| s.score).collect();
    assert_eq!(first, second);

    let once = rank_subtitles(batches.clone(), &req, &scorer, &top(), &hints());
    let twice = rank_subtitles(batches, &req, &scorer, &top(), &hints());
    assert_eq!(once, twice);
}

#[test]
fn never_exceed_the_requested_count() {
    let entries: Vec<Value> = (0..10)
        .map(|i| json!({"id": format!("s{}", i), "url": format!("u{}", i), "lang": "eng"}))
        .collect();
    let batches = vec![batch(OTHER, Value::Array(entries))];
    let req = request(None, None);

    let ranked = rank_subtitles(batches.clone(), &req, &scorer(), &single(), &hints());
    assert_eq!(ranked.len(), 1);

    let ranked = rank_subtitles(batches.clone(), &req, &scorer(), &top(), &hints());
    assert_eq!(ranked.len(), 3);

    let greedy = SelectionConfig {
        top_n: 50,
        ..top()
    };
    let ranked = rank_subtitles(batches, &req, &scorer(), &greedy, &hints());
    assert_eq!(ranked.len(), 3);
}

#[test]
fn return_a_weak_winner_unless_a_floor_is_set() {
    let batches = vec![batch(OTHER, json!([
        {"id": "machine translated", "url": "1", "lang": "eng"}
    ]))];
    let weights = ScoringWeights {
        popularity: false,
        ..Default::default()
    };
    let scorer = Scorer::new(weights, ReleaseCatalogue::default());
    let req = request(None, None);

    let ranked = rank_subtitles(batches.clone(), &req, &scorer, &single(), &hints());
    assert_eq!(ids(&ranked), vec!["best_machine translated"]);

    let floored = SelectionConfig {
        min_score: Some(0),
        ..single()
    };
    let ranked = rank_subtitles(batches, &req, &scorer, &floored, &hints());
    assert!(ranked.is_empty());
}
