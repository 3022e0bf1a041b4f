// src/runner.rs
use std::path::{Path, PathBuf};

use crate::{
    classify::Classifier,
    config::{
        consts::DEFAULT_LEXICON_PATH,
        options::{AppOptions, SourceKind},
    },
    error::Result,
    export::{self, DirSink},
    file::ensure_directory,
    gateway::{capture::CaptureGateway, http::HttpGateway, WaitPolicy},
    lexicon::Lexicon,
    progress::{LogProgress, Progress},
    report,
    scrape::{self, ScrapeReport},
    store::EntityStore,
};

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// `None` when scraping was disabled.
    pub scrape: Option<ScrapeReport>,
    pub files_written: Vec<PathBuf>,
    /// Empty when the report was disabled.
    pub frequencies: Vec<(String, usize)>,
    pub characters: usize,
    pub words: usize,
}

/// Top-level runner: load → scrape missing levels → export → report.
/// `progress` can be None (progress goes to the debug log only).
///
/// Only a corrupt snapshot, a bad lexicon file or an I/O failure while
/// writing results ends the run with an error. Scrape failures are part of
/// the summary.
pub fn run(opts: &AppOptions, progress: Option<&mut (dyn Progress + '_)>) -> Result<RunSummary> {
    crate::log::init(&opts.store_dir);

    let lexicon = resolve_lexicon(opts.lexicon.as_deref())?;
    let classifier = Classifier::new(&lexicon);
    let mut store = EntityStore::load(&opts.store_dir)?;

    // Created only once startup succeeded; it hosts the log too.
    ensure_directory(&opts.store_dir)?;
    logf!("Run: Begin levels={}..={} store={} ({} entities loaded)",
        opts.levels.first().copied().unwrap_or_default(),
        opts.levels.last().copied().unwrap_or_default(),
        opts.store_dir.display(),
        store.len()
    );

    let mut fallback = LogProgress::default();
    let progress: &mut (dyn Progress + '_) = match progress {
        Some(p) => p,
        None => &mut fallback,
    };

    let mut summary = RunSummary::default();

    if opts.scrape.enabled {
        let wait = WaitPolicy::new(opts.scrape.timeout, opts.scrape.poll_interval);
        let report = match &opts.scrape.source {
            SourceKind::Capture(dir) => {
                let mut gw = CaptureGateway::new(dir, wait);
                scrape::run(&mut store, &mut gw, &classifier, &opts.levels, &opts.store_dir, Some(progress))?
            }
            SourceKind::Http(endpoint) => {
                let mut gw = HttpGateway::new(endpoint.clone(), wait);
                scrape::run(&mut store, &mut gw, &classifier, &opts.levels, &opts.store_dir, Some(progress))?
            }
        };
        summary.scrape = Some(report);
    }

    if opts.export.enabled {
        let mut sink = DirSink::new(&opts.export.out_dir);
        export::export_levels(&store, &opts.levels, &mut sink)?;
        summary.files_written = sink.into_written();
    }

    if opts.report.enabled {
        summary.frequencies = report::reading_frequencies(&store, opts.report.max_level, &lexicon);
    }

    summary.characters = store.characters().len();
    summary.words = store.words().len();
    logf!(
        "Run: End characters={} words={} files={}",
        summary.characters, summary.words, summary.files_written.len()
    );
    Ok(summary)
}

/// Explicit path, else the full CC-CEDICT at the default location, else the bundled seed.
pub fn resolve_lexicon(path: Option<&Path>) -> Result<Lexicon> {
    if let Some(path) = path {
        return Lexicon::load(path);
    }
    let default = Path::new(DEFAULT_LEXICON_PATH);
    if default.is_file() {
        return Lexicon::load(default);
    }
    let lex = Lexicon::bundled();
    logf!("Lexicon: {} not found, using bundled seed ({} entries)", DEFAULT_LEXICON_PATH, lex.len());
    Ok(lex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;

    #[test]
    fn explicit_missing_lexicon_is_an_error() {
        let missing = std::env::temp_dir().join("mb_runner_no_such_cedict.u8");
        let _ = fs::remove_file(&missing);
        assert!(matches!(resolve_lexicon(Some(&missing)), Err(Error::Io(_))));
    }

    #[test]
    fn failed_startup_leaves_no_store_dir() {
        let root = std::env::temp_dir().join("mb_runner_failed_startup");
        let _ = fs::remove_dir_all(&root);
        let mut opts = AppOptions::default();
        opts.store_dir = root.join("store");
        opts.export.out_dir = root.join("out");
        opts.lexicon = Some(root.join("missing_cedict.u8"));

        assert!(matches!(run(&opts, None), Err(Error::Io(_))));
        assert!(!opts.store_dir.exists());
        assert!(!opts.export.out_dir.exists());
    }

    #[test]
    fn explicit_empty_lexicon_is_rejected() {
        let path = std::env::temp_dir().join("mb_runner_empty_cedict.u8");
        fs::write(&path, "# only comments\n").unwrap();
        assert!(matches!(resolve_lexicon(Some(&path)), Err(Error::Lexicon(_))));
    }
}
