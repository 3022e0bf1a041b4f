// src/lexicon.rs
//! CC-CEDICT lexicon.
//!
//! Each line is `TRAD SIMP [pin1 yin1] /gloss/.../`. The lexicon feeds two
//! consumers: the script classifier (simplified/traditional word pairs) and
//! the frequency report (per-glyph readings).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

static BUNDLED: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/cedict_seed.u8"));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexiconEntry {
    pub traditional: String,
    pub simplified: String,
    /// Numbered pinyin as written in the source, e.g. `ni3 hao3`.
    pub pinyin: String,
}

impl LexiconEntry {
    pub fn is_same_form(&self) -> bool {
        self.traditional == self.simplified
    }
}

#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    /// glyph → (tone-stripped reading, came from a proper-noun entry)
    readings: HashMap<char, (String, bool)>,
    skipped: usize,
}

impl Lexicon {
    /// Parse CC-CEDICT text. Comment and blank lines are ignored; malformed
    /// lines are counted in `skipped()` and otherwise dropped.
    pub fn parse(text: &str) -> Self {
        let mut lex = Lexicon::default();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_line(line) {
                Some(entry) => lex.push(entry),
                None => lex.skipped += 1,
            }
        }
        lex
    }

    /// The seed lexicon compiled into the binary.
    pub fn bundled() -> Self {
        Self::parse(BUNDLED)
    }

    /// Load a full CC-CEDICT file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let lex = Self::parse(&text);
        if lex.is_empty() {
            return Err(Error::Lexicon(format!("no entries in {}", path.display())));
        }
        logf!(
            "Lexicon: {} entries from {} ({} malformed lines skipped)",
            lex.len(), path.display(), lex.skipped
        );
        Ok(lex)
    }

    fn push(&mut self, entry: LexiconEntry) {
        let mut forms = vec![entry.simplified.as_str()];
        if !entry.is_same_form() {
            forms.push(entry.traditional.as_str());
        }

        let proper = entry.pinyin.starts_with(|c: char| c.is_ascii_uppercase());
        let reading = strip_tones(&entry.pinyin);

        for form in forms {
            let mut chars = form.chars();
            if let (Some(glyph), None) = (chars.next(), chars.next()) {
                // First lowercase reading wins; a proper-noun reading only holds
                // until a common one shows up.
                match self.readings.get(&glyph) {
                    Some((_, was_proper)) if !*was_proper || proper => {}
                    _ => { self.readings.insert(glyph, (reading.clone(), proper)); }
                }
            }
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Tone-stripped, lowercase pinyin for a single glyph (`狭` → `xia`).
    pub fn reading(&self, glyph: char) -> Option<&str> {
        self.readings.get(&glyph).map(|(r, _)| r.as_str())
    }
}

fn parse_line(line: &str) -> Option<LexiconEntry> {
    let (heads, rest) = line.split_once(" [")?;
    let (pinyin, gloss) = rest.split_once(']')?;
    if !gloss.trim_start().starts_with('/') {
        return None;
    }

    let mut forms = heads.split_whitespace();
    let traditional = forms.next()?;
    let simplified = forms.next()?;
    if forms.next().is_some() {
        return None;
    }

    Some(LexiconEntry {
        traditional: s!(traditional),
        simplified: s!(simplified),
        pinyin: s!(pinyin.trim()),
    })
}

/// `Nu:3 ren2` → `nü ren`
pub fn strip_tones(pinyin: &str) -> String {
    pinyin
        .replace("u:", "ü")
        .replace("U:", "Ü")
        .chars()
        .filter(|c| !matches!(c, '1'..='5'))
        .collect::<String>()
        .to_lowercase()
}
