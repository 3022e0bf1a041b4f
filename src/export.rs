// src/export.rs
//! Migaku known-word lists.
//!
//! One JSON file per level, each covering every entity up to and including
//! that level: `[["你◴0",2],["你好◴0",2],…]`. The digit after `◴` is the
//! script variant code; the trailing `2` marks the word as already known.
//! Characters are exported too (and first), otherwise Migaku treats single
//! glyphs as unknown.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::classify;
use crate::config::options::export_file_name;
use crate::error::Result;
use crate::file::write_file;
use crate::store::EntityStore;

pub const VARIANT_SEP: char = '◴';
pub const STATUS_KNOWN: u8 = 2;

/// One `[label, status]` pair of the export.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct KnownWord(pub String, pub u8);

impl KnownWord {
    pub fn label(&self) -> &str {
        &self.0
    }

    /// The label without the `◴<code>` suffix.
    pub fn text(&self) -> &str {
        self.0.rsplit_once(VARIANT_SEP).map_or(&self.0, |(text, _)| text)
    }
}

/// Destination of serialized known-word lists, addressed by level.
pub trait KnownWordSink {
    fn write_level(&mut self, level: u32, json: &str) -> Result<()>;
}

/// Writes `<dir>/MB_knownWords_level_NN.json`.
pub struct DirSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), written: Vec::new() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn into_written(self) -> Vec<PathBuf> {
        self.written
    }
}

impl KnownWordSink for DirSink {
    fn write_level(&mut self, level: u32, json: &str) -> Result<()> {
        let path = self.dir.join(export_file_name(level));
        write_file(&path, json)?;
        self.written.push(path);
        Ok(())
    }
}

/// Deduplicated known words for every entity with `level <= max_level`.
/// Characters come before words; the first entity to use a string wins.
pub fn known_words(store: &EntityStore, max_level: u32) -> Vec<KnownWord> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for entity in store.iter() {
        if entity.level > max_level {
            continue;
        }
        let text = classify::normalize(&entity.text);
        if seen.contains(text.as_ref()) {
            continue;
        }
        out.push(KnownWord(join!(text.as_ref(), VARIANT_SEP, entity.variant.code()), STATUS_KNOWN));
        seen.insert(text.into_owned());
    }
    out
}

/// JSON array of `[label, status]` pairs, double-quoted, no whitespace.
pub fn to_json(words: &[KnownWord]) -> Result<String> {
    Ok(serde_json::to_string(words)?)
}

/// Build the list for `max_level` and hand it to `sink`. Returns the number of pairs.
pub fn export_up_to(store: &EntityStore, max_level: u32, sink: &mut dyn KnownWordSink) -> Result<usize> {
    let words = known_words(store, max_level);
    sink.write_level(max_level, &to_json(&words)?)?;
    logd!("Export: level {max_level} → {} entries", words.len());
    Ok(words.len())
}

/// One export per level, in the given order.
pub fn export_levels(store: &EntityStore, levels: &[u32], sink: &mut dyn KnownWordSink) -> Result<()> {
    for &level in levels {
        export_up_to(store, level, sink)?;
    }
    logf!("Export: wrote {} level file(s)", levels.len());
    Ok(())
}
