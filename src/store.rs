// src/store.rs
//! Accumulated characters and words.
//!
//! Both collections are append-only for the lifetime of a run. The only way
//! to replace them is a full `restore` from a snapshot, which is what happens
//! at startup (`load`) before any scraping.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::{self, Classifier, ScriptVariant};
use crate::config::consts::{CHARACTERS_BLOB, WORDS_BLOB};
use crate::error::{Error, Result};
use crate::file::ensure_directory;

/// A character or word introduced at some curriculum level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// 1-based position in its collection at creation time.
    pub id: u32,
    pub text: String,
    pub level: u32,
    pub variant: ScriptVariant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Character,
    Word,
}

impl EntityKind {
    fn blob_name(self) -> &'static str {
        match self {
            EntityKind::Character => CHARACTERS_BLOB,
            EntityKind::Word => WORDS_BLOB,
        }
    }
}

/// Opaque durable form of the store: one blob per collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub characters: Vec<u8>,
    pub words: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityStore {
    characters: Vec<Entity>,
    words: Vec<Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn characters(&self) -> &[Entity] {
        &self.characters
    }

    pub fn words(&self) -> &[Entity] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.characters.len() + self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Characters first, then words, each in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.characters.iter().chain(self.words.iter())
    }

    pub fn add_character(&mut self, text: &str, level: u32, classifier: &Classifier) -> &Entity {
        Self::append(&mut self.characters, text, level, classifier)
    }

    pub fn add_word(&mut self, text: &str, level: u32, classifier: &Classifier) -> &Entity {
        Self::append(&mut self.words, text, level, classifier)
    }

    fn append<'a>(list: &'a mut Vec<Entity>, text: &str, level: u32, classifier: &Classifier) -> &'a Entity {
        let text = classify::normalize(text).into_owned();
        let variant = classifier.classify(&text);
        let id = list.len() as u32 + 1;
        list.push(Entity { id, text, level, variant });
        &list[list.len() - 1]
    }

    /// Levels already present among words; these are not scraped again.
    pub fn covered_levels(&self) -> BTreeSet<u32> {
        self.words.iter().map(|w| w.level).collect()
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            characters: serde_json::to_vec(&self.characters)?,
            words: serde_json::to_vec(&self.words)?,
        })
    }

    pub fn restore(snapshot: &Snapshot) -> Result<Self> {
        Ok(Self {
            characters: decode_blob(EntityKind::Character, &snapshot.characters)?,
            words: decode_blob(EntityKind::Word, &snapshot.words)?,
        })
    }

    /// Write `characters.json` and `words.json` into `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        ensure_directory(dir)?;
        let snap = self.snapshot()?;
        fs::write(dir.join(EntityKind::Character.blob_name()), &snap.characters)?;
        fs::write(dir.join(EntityKind::Word.blob_name()), &snap.words)?;
        logf!(
            "Store: Saved {} characters, {} words → {}",
            self.characters.len(), self.words.len(), dir.display()
        );
        Ok(())
    }

    /// Read the snapshot in `dir`. Missing blobs count as empty collections
    /// (first run); present but undecodable blobs are `CorruptSnapshot`.
    pub fn load(dir: &Path) -> Result<Self> {
        let snap = Snapshot {
            characters: read_blob(dir, EntityKind::Character)?,
            words: read_blob(dir, EntityKind::Word)?,
        };
        let store = Self::restore(&snap)?;
        logf!(
            "Store: Loaded {} characters, {} words from {}",
            store.characters.len(), store.words.len(), dir.display()
        );
        Ok(store)
    }
}

fn read_blob(dir: &Path, kind: EntityKind) -> Result<Vec<u8>> {
    match fs::read(dir.join(kind.blob_name())) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(b"[]".to_vec()),
        Err(e) => Err(e.into()),
    }
}

fn decode_blob(kind: EntityKind, bytes: &[u8]) -> Result<Vec<Entity>> {
    let blob = kind.blob_name();
    let entities: Vec<Entity> = serde_json::from_slice(bytes)
        .map_err(|e| Error::CorruptSnapshot { blob, reason: e.to_string() })?;

    if let Some(bad) = entities.iter().find(|e| e.level == 0) {
        return Err(Error::CorruptSnapshot {
            blob,
            reason: format!("entity {} ({}) has level 0", bad.id, bad.text),
        });
    }
    Ok(entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;

    fn classifier() -> Classifier {
        Classifier::new(&Lexicon::parse(
            "你 你 [ni3] /you/\n你好 你好 [ni3 hao3] /hello/\n眾 众 [zhong4] /crowd/\n",
        ))
    }

    #[test]
    fn ids_are_per_collection_and_one_based() {
        let c = classifier();
        let mut store = EntityStore::new();
        assert_eq!(store.add_character("你", 1, &c).id, 1);
        assert_eq!(store.add_character("众", 1, &c).id, 2);
        assert_eq!(store.add_word("你好", 1, &c).id, 1);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn entities_are_classified_and_normalized() {
        let c = classifier();
        let mut store = EntityStore::new();
        let e = store.add_character("眾", 3, &c).clone();
        assert_eq!(e.variant, ScriptVariant::Traditional);
        assert_eq!(e.level, 3);

        let e = store.add_word(classify::CORRUPTED_GLYPH, 4, &c);
        assert_eq!(e.text, classify::CANONICAL_GLYPH);
    }

    #[test]
    fn covered_levels_come_from_words_only() {
        let c = classifier();
        let mut store = EntityStore::new();
        store.add_character("你", 9, &c);
        store.add_word("你好", 2, &c);
        store.add_word("你好", 1, &c);
        store.add_word("你", 2, &c);
        assert_eq!(store.covered_levels().into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn iter_yields_characters_before_words() {
        let c = classifier();
        let mut store = EntityStore::new();
        store.add_word("你好", 1, &c);
        store.add_character("你", 2, &c);
        let texts: Vec<&str> = store.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["你", "你好"]);
    }

    #[test]
    fn snapshot_round_trips() {
        let c = classifier();
        let mut store = EntityStore::new();
        store.add_character("你", 1, &c);
        store.add_character("眾", 2, &c);
        store.add_word("你好", 1, &c);

        let restored = EntityStore::restore(&store.snapshot().unwrap()).unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn variants_are_stored_as_codes() {
        let c = classifier();
        let mut store = EntityStore::new();
        store.add_character("众", 1, &c);
        let snap = store.snapshot().unwrap();
        let text = String::from_utf8(snap.characters).unwrap();
        assert_eq!(text, r#"[{"id":1,"text":"众","level":1,"variant":1}]"#);
    }

    #[test]
    fn restore_rejects_bad_blobs() {
        let cases: [&[u8]; 4] = [
            b"not json",
            br#"[{"id":1,"text":"x","level":1,"variant":7}]"#,
            br#"[{"id":1,"text":"x","level":0,"variant":0}]"#,
            br#"[{"id":"one","text":"x","level":1,"variant":0}]"#,
        ];
        for bytes in cases {
            let snap = Snapshot { characters: b"[]".to_vec(), words: bytes.to_vec() };
            match EntityStore::restore(&snap) {
                Err(Error::CorruptSnapshot { blob, .. }) => assert_eq!(blob, WORDS_BLOB),
                other => panic!("expected CorruptSnapshot, got {other:?}"),
            }
        }
    }
}
