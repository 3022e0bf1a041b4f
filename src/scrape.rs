// src/scrape.rs
//! Incremental scrape: fetch only the levels the store has not seen yet.

use std::collections::BTreeSet;
use std::path::Path;

use crate::classify::Classifier;
use crate::error::{GatewayError, Result};
use crate::gateway::{Gateway, Session, SessionGuard};
use crate::progress::Progress;
use crate::store::EntityStore;

/// What one scrape pass did.
#[derive(Debug, Default)]
pub struct ScrapeReport {
    /// Levels that were missing and therefore requested, ascending.
    pub requested: Vec<u32>,
    /// Levels fully fetched and stored.
    pub completed: Vec<u32>,
    pub characters_added: usize,
    pub words_added: usize,
    /// The failure that ended the pass early, if any. Logged, never rethrown.
    pub failure: Option<GatewayError>,
}

impl ScrapeReport {
    pub fn added(&self) -> usize {
        self.characters_added + self.words_added
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && self.completed.len() == self.requested.len()
    }
}

/// `all_levels` minus the levels already covered, ascending and deduplicated.
pub fn missing_levels(store: &EntityStore, all_levels: &[u32]) -> Vec<u32> {
    let covered = store.covered_levels();
    all_levels
        .iter()
        .copied()
        .filter(|l| !covered.contains(l))
        .collect::<BTreeSet<u32>>()
        .into_iter()
        .collect()
}

/// Scrape missing levels, then persist the store to `store_dir` if anything
/// was added. Gateway failures end up in the report; only persistence
/// errors are returned.
pub fn run<G: Gateway>(
    store: &mut EntityStore,
    gateway: &mut G,
    classifier: &Classifier,
    all_levels: &[u32],
    store_dir: &Path,
    progress: Option<&mut (dyn Progress + '_)>,
) -> Result<ScrapeReport> {
    let report = scrape_missing(store, gateway, classifier, all_levels, progress);

    if report.added() > 0 {
        store.save(store_dir)?;
    }
    Ok(report)
}

/// Scrape missing levels into `store` without touching disk.
pub fn scrape_missing<G: Gateway>(
    store: &mut EntityStore,
    gateway: &mut G,
    classifier: &Classifier,
    all_levels: &[u32],
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> ScrapeReport {
    let mut report = ScrapeReport {
        requested: missing_levels(store, all_levels),
        ..ScrapeReport::default()
    };

    if report.requested.is_empty() {
        logf!("Scrape: every requested level is already stored");
        if let Some(p) = progress.as_deref_mut() {
            p.log("Everything already in the store");
        }
        return report;
    }

    logf!("Scrape: Begin levels={:?}", report.requested);
    if let Some(p) = progress.as_deref_mut() {
        p.begin(report.requested.len());
    }

    if let Err(e) = acquire(store, gateway, classifier, &mut report, progress.as_deref_mut()) {
        loge!("Scrape: stopped after {} level(s): {}", report.completed.len(), e);
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Scrape stopped: {e}"));
        }
        report.failure = Some(e);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    logf!(
        "Scrape: End completed={:?} characters+={} words+={}",
        report.completed, report.characters_added, report.words_added
    );
    report
}

// The only error boundary of the scrape phase. The guard closes the session
// on every exit path, including `?`.
fn acquire<G: Gateway>(
    store: &mut EntityStore,
    gateway: &mut G,
    classifier: &Classifier,
    report: &mut ScrapeReport,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> std::result::Result<(), GatewayError> {
    let mut session = SessionGuard::new(gateway.open_session()?);

    for level in report.requested.clone() {
        let cats = session.fetch_level(level)?;

        for text in cats.characters() {
            store.add_character(text, level, classifier);
        }
        for text in cats.words() {
            store.add_word(text, level, classifier);
        }
        report.characters_added += cats.characters().len();
        report.words_added += cats.words().len();
        report.completed.push(level);

        logd!(
            "Scrape: level {level} → {} characters, {} words",
            cats.characters().len(), cats.words().len()
        );
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(level);
        }
    }
    Ok(())
}
