// src/config/consts.rs

// Site
pub const SITE_HOST: &str = "traverse.link";
pub const SITE_PORT: u16 = 80;
pub const LEVEL_PATH_TMPL: &str = "/Mandarin_Blueprint/word-progress/?level={level}";
pub const LEVEL_PLACEHOLDER: &str = "{level}";

// Curriculum
pub const FIRST_LEVEL: u32 = 1;
pub const LAST_LEVEL: u32 = 88;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const CHARACTERS_BLOB: &str = "characters.json";
pub const WORDS_BLOB: &str = "words.json";
pub const LOG_FILE: &str = "debug.log";

// Lexicon (full CC-CEDICT picked up from here when present)
pub const DEFAULT_LEXICON_PATH: &str = "data/cedict_ts.u8";

// Acquisition
pub const DEFAULT_CAPTURE_DIR: &str = "captures";
pub const WAIT_TIMEOUT_SECS: u64 = 20;
pub const POLL_INTERVAL_MS: u64 = 250;
pub const HTTP_IO_TIMEOUT_SECS: u64 = 15;

// Export
pub const DEFAULT_OUT_DIR: &str = "migaku_known_words";
pub const EXPORT_FILE_PREFIX: &str = "MB_knownWords_level_";
pub const EXPORT_FILE_EXT: &str = "json";

// Report
pub const REPORT_MAX_LEVEL: u32 = 41;
