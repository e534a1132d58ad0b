#[derive(clap::ValueEnum, Clone, Debug, Copy)]
pub enum CargoEnv {
    Development,
    Production,
}

/// how many subtitles make it back to the player
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// only the winner, no backups
    Single,
    /// the best few, each relabeled
    Top,
}

/// how release types (bluray, web, cam...) are compared between the file and a subtitle
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum TagScheme {
    /// tags are grouped into families, same family is a bonus and a different one is a penalty
    Grouped,
    /// every tag on its own, +match / -unexpected tag
    Loose,
}

#[derive(clap::Parser, Clone, Debug)]
pub struct AppConfig {
    // production or development
    #[clap(long, env, value_enum, default_value = "development")]
    pub cargo_env: CargoEnv,

    // port that the app will bind to
    #[clap(long, env, default_value = "7000")]
    pub port: u16,

    // this should be either * for allowing everything, or a comma seperated list of domains like
    // example.com,something.com. players call this from all over so * is the sane default
    #[clap(long, env, default_value = "*")]
    pub cors_origin: String,

    // optional sentry integration
    #[clap(long, env)]
    pub sentry_dsn: Option<String>,

    #[clap(flatten)]
    pub sources: SourceConfig,

    #[clap(flatten)]
    pub selection: SelectionConfig,

    #[clap(flatten)]
    pub scoring: ScoringWeights,
}

#[derive(clap::Args, Clone, Debug)]
pub struct SourceConfig {
    // used when the addon config doesn't list any sources
    #[clap(
        long,
        env,
        default_value = "https://opensubtitles-v3.strem.io"
    )]
    pub default_source_url: String,

    // every upstream call gets this long before it counts as empty
    #[clap(long, env, default_value = "5000")]
    pub upstream_timeout_ms: u64,

    // a source url containing this is the hash capable provider
    #[clap(long, env, default_value = "opensub")]
    pub primary_provider_hint: String,

    #[clap(long, env, default_value = "subdl")]
    pub secondary_provider_hint: String,
}

#[derive(clap::Args, Clone, Debug)]
pub struct SelectionConfig {
    #[clap(long, env, value_enum, default_value = "single")]
    pub selection_mode: SelectionMode,

    // only used in top mode, anything above 3 gets clamped
    #[clap(long, env, default_value = "3")]
    pub top_n: usize,

    // appends -1, -2... to the spoofed language in top mode. players group tracks by language so
    // leave this off unless you know yours doesn't
    #[clap(long, env, default_value_t = false, action = clap::ArgAction::Set)]
    pub top_lang_suffix: bool,

    // drop anything scoring below this. unset means something is always better than nothing
    #[clap(long = "score-min", env = "SCORE_MIN", allow_negative_numbers = true)]
    pub min_score: Option<i64>,
}

/// every number the scorer uses, the defaults keep hash > group > type > frame rate > penalties
#[derive(clap::Args, Clone, Debug)]
pub struct ScoringWeights {
    /// start each candidate at `popularity_base - original_rank`
    #[clap(long = "score-popularity", env = "SCORE_POPULARITY", default_value_t = true, action = clap::ArgAction::Set)]
    pub popularity: bool,

    #[clap(long = "score-popularity-base", env = "SCORE_POPULARITY_BASE", default_value = "100")]
    pub popularity_base: i64,

    #[clap(long = "score-tag-scheme", env = "SCORE_TAG_SCHEME", value_enum, default_value = "grouped")]
    pub tag_scheme: TagScheme,

    #[clap(long = "score-type-match", env = "SCORE_TYPE_MATCH", default_value = "50", allow_negative_numbers = true)]
    pub type_match: i64,

    #[clap(long = "score-type-mismatch", env = "SCORE_TYPE_MISMATCH", default_value = "-30", allow_negative_numbers = true)]
    pub type_mismatch: i64,

    #[clap(long = "score-loose-tag-match", env = "SCORE_LOOSE_TAG_MATCH", default_value = "20", allow_negative_numbers = true)]
    pub loose_tag_match: i64,

    #[clap(long = "score-loose-tag-mismatch", env = "SCORE_LOOSE_TAG_MISMATCH", default_value = "-10", allow_negative_numbers = true)]
    pub loose_tag_mismatch: i64,

    /// per release group / encoding tag shared by file and subtitle
    #[clap(long = "score-group-match", env = "SCORE_GROUP_MATCH", default_value = "80", allow_negative_numbers = true)]
    pub group_match: i64,

    #[clap(long = "score-frame-rate-match", env = "SCORE_FRAME_RATE_MATCH", default_value = "25", allow_negative_numbers = true)]
    pub frame_rate_match: i64,

    #[clap(long = "score-hearing-impaired", env = "SCORE_HEARING_IMPAIRED", default_value = "-2", allow_negative_numbers = true)]
    pub hearing_impaired: i64,

    #[clap(long = "score-machine-translated", env = "SCORE_MACHINE_TRANSLATED", default_value = "-50", allow_negative_numbers = true)]
    pub machine_translated: i64,

    #[clap(long = "score-hash-match", env = "SCORE_HASH_MATCH", default_value = "500", allow_negative_numbers = true)]
    pub hash_match: i64,

    /// the primary provider puts its exact hash hit first, so only trust rank 0
    #[clap(long = "score-hash-top-rank-only", env = "SCORE_HASH_TOP_RANK_ONLY", default_value_t = true, action = clap::ArgAction::Set)]
    pub hash_top_rank_only: bool,
}

impl Default for AppConfig {
    // mirrors the clap defaults so tests don't need an env
    fn default() -> Self {
        Self {
            cargo_env: CargoEnv::Development,
            port: 7000,
            cors_origin: "*".to_string(),
            sentry_dsn: None,
            sources: SourceConfig::default(),
            selection: SelectionConfig::default(),
            scoring: ScoringWeights::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            default_source_url: "https://opensubtitles-v3.strem.io".to_string(),
            upstream_timeout_ms: 5000,
            primary_provider_hint: "opensub".to_string(),
            secondary_provider_hint: "subdl".to_string(),
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::Single,
            top_n: 3,
            top_lang_suffix: false,
            min_score: None,
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            popularity: true,
            popularity_base: 100,
            tag_scheme: TagScheme::Grouped,
            type_match: 50,
            type_mismatch: -30,
            loose_tag_match: 20,
            loose_tag_mismatch: -10,
            group_match: 80,
            frame_rate_match: 25,
            hearing_impaired: -2,
            machine_translated: -50,
            hash_match: 500,
            hash_top_rank_only: true,
        }
    }
}

impl SelectionConfig {
    /// how many entries a response may hold, top mode never goes past 3
    pub fn effective_top_n(&self) -> usize {
        match self.selection_mode {
            SelectionMode::Single => 1,
            SelectionMode::Top => self.top_n.clamp(1, 3),
        }
    }
}
