use autosub::server::extractors::{AddonConfig, path_segment};
use autosub::server::dtos::manifest_dto::ManifestResponse;
use autosub::{AppConfig, SelectionConfig, SelectionMode};

const FALLBACK: &str = "https://opensubtitles-v3.strem.io";

#[test]
fn fall_back_to_defaults_on_empty_config() {
    let config = AddonConfig::decode("", FALLBACK);

    assert_eq!(config.target_language, "eng");
    assert_eq!(config.substitute_language, "mri");
    assert_eq!(config.source_urls, vec![FALLBACK.to_string()]);

    let config = AddonConfig::decode("||", FALLBACK);
    assert_eq!(config.target_language, "eng");
    assert_eq!(config.substitute_language, "mri");
    assert_eq!(config.source_urls, vec![FALLBACK.to_string()]);
}

#[test]
fn decode_each_source() {
    let config = AddonConfig::decode(
        "spa|fil|https%3A%2F%2Fsubdl.strem.top%2Fkey|https%3A%2F%2Fopensubtitles-v3.strem.io",
        FALLBACK,
    );

    assert_eq!(config.target_language, "spa");
    assert_eq!(config.substitute_language, "fil");
    assert_eq!(
        config.source_urls,
        vec![
            "https://subdl.strem.top/key".to_string(),
            "https://opensubtitles-v3.strem.io".to_string()
        ]
    );
}

#[test]
fn trim_pasted_install_links() {
    let config = AddonConfig::decode(
        "eng|mri|https://subs.example/abc/manifest.json|https://other.example/",
        FALLBACK,
    );

    assert_eq!(
        config.source_urls,
        vec![
            "https://subs.example/abc".to_string(),
            "https://other.example".to_string()
        ]
    );
}

#[test]
fn keep_sources_that_do_not_decode() {
    // not validated here, the fetcher skips non-http entries later
    let config = AddonConfig::decode("eng|mri|weird%E0%A4%A", FALLBACK);
    assert_eq!(config.source_urls, vec!["weird%E0%A4%A".to_string()]);
}

#[test]
fn read_raw_path_segments() {
    let path = "/eng%7Cmri/subtitles/movie/tt1/filename=Movie%FF.mkv.json";

    assert_eq!(path_segment(path, 0), Some("eng|mri".to_string()));
    assert_eq!(path_segment(path, 3), Some("tt1".to_string()));
    assert_eq!(
        path_segment(path, 4),
        Some("filename=Movie%FF.mkv.json".to_string())
    );
    assert_eq!(path_segment(path, 5), None);
}

#[test]
fn name_the_manifest_after_the_mode() {
    let config = AppConfig::default();
    let manifest = ManifestResponse::for_selection("eng", &config.selection, "4.0.0");
    assert_eq!(manifest.id, "org.community.singlebest.eng");
    assert_eq!(manifest.name, "Auto-Sub (Best Only)");

    let selection = SelectionConfig {
        selection_mode: SelectionMode::Top,
        ..Default::default()
    };
    let manifest = ManifestResponse::for_selection("por", &selection, "4.0.0");
    assert_eq!(manifest.id, "org.community.top3.por");
    assert_eq!(manifest.name, "Auto-Sub (Top 3)");
    assert_eq!(manifest.id_prefixes, vec!["tt".to_string()]);
}
