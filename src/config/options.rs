// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    /// Levels to scrape (when missing) and to export, ascending.
    pub levels: Vec<u32>,
    pub store_dir: PathBuf,
    /// Full CC-CEDICT file. `None` tries `data/cedict_ts.u8`, then the bundled seed.
    pub lexicon: Option<PathBuf>,
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
    pub report: ReportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            levels: (FIRST_LEVEL..=LAST_LEVEL).collect(),
            store_dir: PathBuf::from(STORE_DIR),
            lexicon: None,
            scrape: ScrapeOptions::default(),
            export: ExportOptions::default(),
            report: ReportOptions::default(),
        }
    }
}

/// Where rendered level pages come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Directory of `level_NN.html` files saved by a browser.
    Capture(PathBuf),
    /// Plain-HTTP endpoint serving rendered pages (e.g. a rendering proxy).
    Http(HttpEndpoint),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpEndpoint {
    pub host: String,
    pub port: u16,
    /// Request path; `{level}` is replaced by the level number.
    pub path_tmpl: String,
}

impl Default for HttpEndpoint {
    fn default() -> Self {
        Self {
            host: s!(SITE_HOST),
            port: SITE_PORT,
            path_tmpl: s!(LEVEL_PATH_TMPL),
        }
    }
}

impl HttpEndpoint {
    /// Parse `host[:port][/path?query]`. Missing parts fall back to the site defaults.
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        let spec = spec.strip_prefix("http://").unwrap_or(spec);
        if spec.is_empty() {
            return Err(Error::Config(s!("empty HTTP endpoint")));
        }

        let (authority, path) = match spec.find('/') {
            Some(i) => (&spec[..i], &spec[i..]),
            None => (spec, LEVEL_PATH_TMPL),
        };

        let (host, port) = match authority.rsplit_once(':') {
            Some((h, p)) => {
                let port = p
                    .parse::<u16>()
                    .map_err(|_| Error::Config(format!("invalid port in endpoint: {authority}")))?;
                (h, port)
            }
            None => (authority, SITE_PORT),
        };
        if host.is_empty() {
            return Err(Error::Config(format!("missing host in endpoint: {spec}")));
        }

        let path_tmpl = if path.contains(LEVEL_PLACEHOLDER) {
            s!(path)
        } else {
            // No placeholder given: treat the path as the page and append the level query.
            let sep = if path.contains('?') { '&' } else { '?' };
            join!(path, sep, "level=", LEVEL_PLACEHOLDER)
        };

        Ok(Self { host: s!(host), port, path_tmpl })
    }

    pub fn path_for(&self, level: u32) -> String {
        self.path_tmpl.replace(LEVEL_PLACEHOLDER, &level.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub enabled: bool,
    pub source: SourceKind,
    /// Upper bound on waiting for one level page to become ready.
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            source: SourceKind::Capture(PathBuf::from(DEFAULT_CAPTURE_DIR)),
            timeout: Duration::from_secs(WAIT_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub enabled: bool,
    pub out_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl ExportOptions {
    /// `<out_dir>/MB_knownWords_level_NN.json`
    pub fn path_for(&self, level: u32) -> PathBuf {
        self.out_dir.join(export_file_name(level))
    }
}

pub fn export_file_name(level: u32) -> String {
    format!("{EXPORT_FILE_PREFIX}{level:02}.{EXPORT_FILE_EXT}")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    pub enabled: bool,
    pub max_level: u32,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            max_level: REPORT_MAX_LEVEL,
        }
    }
}
