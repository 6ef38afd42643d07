use serde::{Deserialize, Serialize};

/// Name of the analyzer that indexes a whole value as a single term
pub const KEYWORD_ANALYZER: &str = "keyword";

/// Name of the lowercasing analyzer used when nothing else is configured
pub const STANDARD_ANALYZER: &str = "standard";

/// Name of the stopword-removing, stemming English analyzer
pub const ENGLISH_ANALYZER: &str = "english";

/// Schema-wide settings consumed by `SchemaBuilder`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchemaSettings {
    /// Analyzer used by text mappers that do not name one
    #[serde(default = "default_analyzer")]
    pub default_analyzer: String,
    /// Geospatial prefix tree settings
    #[serde(default)]
    pub geo: GeoConfig,
}

fn default_analyzer() -> String {
    STANDARD_ANALYZER.to_string()
}

impl Default for SchemaSettings {
    fn default() -> Self {
        Self {
            default_analyzer: default_analyzer(),
            geo: GeoConfig::default(),
        }
    }
}

/// Tokenizer configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    pub lowercase: bool,
    pub remove_stopwords: bool,
    pub stem: bool,
    pub min_token_length: usize,
    pub max_token_length: usize,
    pub language: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            remove_stopwords: true,
            stem: true,
            min_token_length: 2,
            max_token_length: 50,
            language: "english".to_string(),
        }
    }
}

impl TokenizerConfig {
    /// Lowercasing only: no stopwords, no stemming, every word kept
    pub fn standard() -> Self {
        Self {
            lowercase: true,
            remove_stopwords: false,
            stem: false,
            min_token_length: 1,
            max_token_length: 255,
            language: "english".to_string(),
        }
    }
}

/// Geohash prefix tree configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoConfig {
    /// Levels used by geo point mappers that do not set their own
    #[serde(default = "default_max_levels")]
    pub max_levels: u8,
    /// Fraction of a query shape's size tolerated as matching error
    #[serde(default = "default_dist_err_pct")]
    pub dist_err_pct: f64,
    /// How many levels above the maximum the filter switches to scanning
    #[serde(default = "default_grid_scan_offset")]
    pub grid_scan_offset: u8,
}

fn default_max_levels() -> u8 {
    11
}

fn default_dist_err_pct() -> f64 {
    0.025
}

fn default_grid_scan_offset() -> u8 {
    4
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            max_levels: default_max_levels(),
            dist_err_pct: default_dist_err_pct(),
            grid_scan_offset: default_grid_scan_offset(),
        }
    }
}
