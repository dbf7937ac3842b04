use regex::Regex;

/// Sequencing sample IDs come off the run as `<sample>_barcode<N>`.
pub const SAMPLE_ID_PATTERN: &str = r"^(.+)_barcode\d+$";

/// Date suffix format for the MatchPoint export filenames.
pub const DATE_FORMAT: &str = "%Y_%m_%d";

/// Outcome of normalizing a sample ID against [`SAMPLE_ID_PATTERN`].
///
/// IDs without the barcode suffix pass through unchanged instead of
/// erroring, the two variants keep the fallback visible to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyNorm {
    Matched(String),
    Unchanged(String),
}

impl KeyNorm {
    pub fn into_inner(self) -> String {
        match self {
            Self::Matched(key) | Self::Unchanged(key) => key,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Matched(key) | Self::Unchanged(key) => key,
        }
    }
}

/// Strip the `_barcode<N>` suffix off a sample ID.
pub fn normalize_sample_id(pattern: &Regex, id: &str) -> KeyNorm {
    match pattern.captures(id).and_then(|caps| caps.get(1)) {
        Some(stem) => KeyNorm::Matched(stem.as_str().to_string()),
        None => KeyNorm::Unchanged(id.to_string()),
    }
}

pub fn date_suffix() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}
