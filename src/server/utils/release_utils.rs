/// a family of release types that share timing, e.g. every web rip of a title lines up with
/// every other web rip but rarely with the bluray
#[derive(Debug, Clone)]
pub struct ReleaseTypeGroup {
    pub name: String,
    pub tokens: Vec<String>,
}

impl ReleaseTypeGroup {
    fn new(name: &str, tokens: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            tokens: owned(tokens),
        }
    }

    pub fn is_in(&self, text: &str) -> bool {
        self.tokens.iter().any(|t| contains_token(text, t))
    }
}

fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

/// the word lists the scorer matches filenames and subtitles against. built once at startup and
/// handed to the scorer, nothing in here is global
#[derive(Debug, Clone)]
pub struct ReleaseCatalogue {
    /// checked in order, the first group found in a filename is that file's type
    pub type_groups: Vec<ReleaseTypeGroup>,
    /// flat list used by the loose scheme
    pub loose_tags: Vec<String>,
    /// distribution groups and encoding tags
    pub release_groups: Vec<String>,
    pub frame_rates: Vec<String>,
}

impl Default for ReleaseCatalogue {
    fn default() -> Self {
        Self {
            type_groups: vec![
                ReleaseTypeGroup::new(
                    "bluray",
                    &["bluray", "blu-ray", "brrip", "bdrip", "bdremux", "remux"],
                ),
                ReleaseTypeGroup::new("web", &["web-dl", "webdl", "webrip", "web"]),
                ReleaseTypeGroup::new("hdtv", &["hdtv", "hdrip", "pdtv"]),
                ReleaseTypeGroup::new("dvd", &["dvdrip", "dvdscr", "dvd"]),
                ReleaseTypeGroup::new(
                    "cam",
                    &[
                        "cam", "hdcam", "camrip", "ts", "telesync", "hdts", "tc", "telecine",
                    ],
                ),
            ],
            loose_tags: owned(&[
                "bluray", "brrip", "web-dl", "webrip", "web", "hdrip", "dvdrip", "cam", "ts", "tc",
            ]),
            release_groups: owned(&[
                "yify", "yts", "rarbg", "sparks", "geckos", "fgt", "ntb", "flux", "ettv", "eztv",
                "tgx", "psa", "qxr", "evo", "cmrg", "amiable", "drones", "ion10", "galaxyrg",
                "amzn", "nf", "dsnp", "hmax", "x264", "x265", "h264", "h265", "hevc", "10bit",
            ]),
            frame_rates: owned(&[
                "23.976", "23.98", "24.000", "25.000", "29.97", "30.000", "59.94", "60.000",
            ]),
        }
    }
}

impl ReleaseCatalogue {
    /// the file's release type, first group in catalogue order that shows up
    pub fn release_type_of(&self, text: &str) -> Option<&ReleaseTypeGroup> {
        self.type_groups.iter().find(|g| g.is_in(text))
    }

    /// true when `text` names some release type other than `group`
    pub fn names_other_type(&self, text: &str, group: &ReleaseTypeGroup) -> bool {
        self.type_groups
            .iter()
            .filter(|g| g.name != group.name)
            .any(|g| g.is_in(text))
    }

    pub fn shared_release_groups(&self, filename: &str, text: &str) -> usize {
        self.release_groups
            .iter()
            .filter(|g| contains_token(filename, g) && contains_token(text, g))
            .count()
    }

    pub fn shares_frame_rate(&self, filename: &str, text: &str) -> bool {
        self.frame_rates
            .iter()
            .any(|r| contains_token(filename, r) && contains_token(text, r))
    }
}

/// substring search that ignores hits glued to other letters or digits, so `ts` doesn't fire on
/// `subtitles` and `web` doesn't fire on `website`. separators like `.` `-` `_` and spaces count
/// as boundaries
pub fn contains_token(haystack: &str, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }

    haystack.match_indices(token).any(|(start, _)| {
        let end = start + token.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(|c| c.is_ascii_alphanumeric())
            && !after.is_some_and(|c| c.is_ascii_alphanumeric())
    })
}
