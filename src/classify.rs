// src/classify.rs
//! Script-variant classification.
//!
//! Two tiers:
//! 1. Whole-string dictionary built from the lexicon. Needed because some
//!    simplified words contain glyphs that look traditional in isolation.
//! 2. Glyph heuristic for strings the dictionary does not know.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;

/// The site serves 狭 with a stray backspace in front of it; the pair is
/// replaced with the plain glyph before anything else.
pub const CORRUPTED_GLYPH: &str = "\u{8}\u{72ED}";
pub const CANONICAL_GLYPH: &str = "\u{72ED}";

/// Written form of a string. The discriminant is the code Migaku expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ScriptVariant {
    Both = 0,
    Simplified = 1,
    Traditional = 2,
}

impl ScriptVariant {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ScriptVariant> for u8 {
    fn from(v: ScriptVariant) -> u8 {
        v.code()
    }
}

impl TryFrom<u8> for ScriptVariant {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ScriptVariant::Both),
            1 => Ok(ScriptVariant::Simplified),
            2 => Ok(ScriptVariant::Traditional),
            other => Err(format!("unknown script variant code {other}")),
        }
    }
}

impl fmt::Display for ScriptVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScriptVariant::Both => "both",
            ScriptVariant::Simplified => "simplified",
            ScriptVariant::Traditional => "traditional",
        };
        f.write_str(name)
    }
}

/// Which tier decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Dictionary,
    Heuristic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    pub variant: ScriptVariant,
    pub source: Source,
}

/// Apply the fixed glyph substitution.
pub fn normalize(text: &str) -> Cow<'_, str> {
    if text.contains(CORRUPTED_GLYPH) {
        Cow::Owned(text.replace(CORRUPTED_GLYPH, CANONICAL_GLYPH))
    } else {
        Cow::Borrowed(text)
    }
}

// Common traditional-only glyphs. Guarantees the heuristic still spots the
// obvious cases when running on a small lexicon.
const TRADITIONAL_ONLY: &[u32] = &[
    0x500B, 0x5011, 0x5099, 0x50B3, 0x50C5, 0x50F9, 0x512A, 0x554F, 0x5B78, 0x5BEB, 0x5C0D,
    0x6642, 0x6703, 0x689D, 0x696D, 0x6A02, 0x6A23, 0x6A5F, 0x6A19, 0x6AA2, 0x6B0A, 0x70BA,
    0x7121, 0x767C, 0x7D93, 0x7E3D, 0x806F, 0x8166, 0x8207, 0x8209, 0x820A, 0x83EF, 0x85DD,
    0x85E5, 0x898B, 0x898F, 0x89C0, 0x8A08, 0x8A0A, 0x8A31, 0x8A71, 0x8A72, 0x8A9E, 0x8AB0,
    0x8ABF, 0x8ACB, 0x8AD6, 0x8B1D, 0x8B58, 0x8B70, 0x8B80, 0x8B8A, 0x8B93, 0x8AAA, 0x9019,
    0x904E, 0x9084, 0x958B, 0x9580, 0x9577, 0x96D6, 0x96DC, 0x96E2, 0x96E3, 0x96FB, 0x98A8,
    0x982D, 0x984C, 0x99AC, 0x9B5A, 0x9EBC, 0x9CE5, 0x9AD4, 0x9EDE, 0x9F8D, 0x570B, 0x4F86,
    0x66F8, 0x756B,
];

fn is_han(c: char) -> bool {
    matches!(c as u32,
        0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xF900..=0xFAFF
        | 0x20000..=0x2FA1F)
}

pub struct Classifier {
    dictionary: HashMap<String, ScriptVariant>,
    simplified_glyphs: HashSet<char>,
    traditional_glyphs: HashSet<char>,
    traditional_only: HashSet<char>,
}

impl Classifier {
    pub fn new(lexicon: &Lexicon) -> Self {
        let mut dictionary = HashMap::with_capacity(lexicon.len() * 2);
        let mut simplified_glyphs = HashSet::new();
        let mut traditional_glyphs = HashSet::new();

        // Later entries overwrite earlier keys.
        for entry in lexicon.entries() {
            if entry.is_same_form() {
                dictionary.insert(entry.simplified.clone(), ScriptVariant::Both);
            } else {
                dictionary.insert(entry.simplified.clone(), ScriptVariant::Simplified);
                dictionary.insert(entry.traditional.clone(), ScriptVariant::Traditional);
            }
            simplified_glyphs.extend(entry.simplified.chars());
            traditional_glyphs.extend(entry.traditional.chars());
        }

        let traditional_only = TRADITIONAL_ONLY
            .iter()
            .filter_map(|&u| char::from_u32(u))
            .collect();

        logd!(
            "Classifier: {} dictionary keys, {} simplified / {} traditional glyphs",
            dictionary.len(), simplified_glyphs.len(), traditional_glyphs.len()
        );

        Self { dictionary, simplified_glyphs, traditional_glyphs, traditional_only }
    }

    pub fn classify(&self, text: &str) -> ScriptVariant {
        self.lookup(text).variant
    }

    pub fn lookup(&self, text: &str) -> Classification {
        let text = normalize(text);
        match self.dictionary.get(text.as_ref()) {
            Some(&variant) => Classification { variant, source: Source::Dictionary },
            None => Classification { variant: self.heuristic(&text), source: Source::Heuristic },
        }
    }

    /// Every glyph shared by both systems → Both. Every glyph usable in
    /// traditional text, at least one of them traditional-only → Traditional.
    /// Anything else, unknown glyphs included → Simplified.
    pub fn heuristic(&self, text: &str) -> ScriptVariant {
        let mut all_traditional = true;
        let mut all_simplified = true;

        for c in text.chars() {
            let (in_trad, in_simp) = self.glyph_forms(c);
            all_traditional &= in_trad;
            all_simplified &= in_simp;
        }

        match (all_traditional, all_simplified) {
            (true, true) => ScriptVariant::Both,
            (true, false) => ScriptVariant::Traditional,
            _ => ScriptVariant::Simplified,
        }
    }

    // (usable in traditional text, usable in simplified text)
    fn glyph_forms(&self, c: char) -> (bool, bool) {
        if !is_han(c) {
            return (true, true);
        }
        if self.traditional_only.contains(&c) {
            return (true, false);
        }
        (self.traditional_glyphs.contains(&c), self.simplified_glyphs.contains(&c))
    }

    pub fn dictionary_len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.dictionary.contains_key(normalize(text).as_ref())
    }
}
