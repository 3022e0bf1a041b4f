// src/report.rs
//! Reading frequencies of early characters: which syllables a learner meets
//! most often in the first levels.

use std::collections::HashMap;

use crate::lexicon::Lexicon;
use crate::store::EntityStore;

/// Maps a text to its phonetic reading.
pub trait Transliterator {
    fn reading(&self, text: &str) -> Option<String>;
}

impl Transliterator for Lexicon {
    /// Per-glyph readings joined by spaces; `None` if any glyph is unknown.
    fn reading(&self, text: &str) -> Option<String> {
        let mut parts = Vec::new();
        for glyph in text.chars() {
            parts.push(Lexicon::reading(self, glyph)?);
        }
        if parts.is_empty() {
            return None;
        }
        Some(parts.join(" "))
    }
}

/// `(reading, count)` over characters with `level <= max_level`, most
/// frequent first. Ties keep first-occurrence order. Characters without a
/// reading are counted under their own text.
pub fn reading_frequencies(
    store: &EntityStore,
    max_level: u32,
    translit: &dyn Transliterator,
) -> Vec<(String, usize)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<(String, usize)> = Vec::new();

    for ch in store.characters().iter().filter(|c| c.level <= max_level) {
        let reading = translit.reading(&ch.text).unwrap_or_else(|| ch.text.clone());
        match index.get(&reading) {
            Some(&i) => rows[i].1 += 1,
            None => {
                index.insert(reading.clone(), rows.len());
                rows.push((reading, 1));
            }
        }
    }

    // stable
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    logd!("Report: {} distinct readings up to level {max_level}", rows.len());
    rows
}

/// One `reading: count` line per row.
pub fn format_table(rows: &[(String, usize)]) -> String {
    let mut out = s!();
    for (reading, count) in rows {
        out.push_str(&format!("{reading}: {count}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;

    fn lexicon() -> Lexicon {
        Lexicon::parse(
            "狹 狭 [xia2] /narrow/\n\
             下 下 [xia4] /down/\n\
             人 人 [ren2] /person/\n\
             你 你 [ni3] /you/\n\
             王 王 [Wang2] /surname/\n\
             王 王 [wang2] /king/\n",
        )
    }

    #[test]
    fn counts_tone_stripped_readings() {
        let lex = lexicon();
        let c = Classifier::new(&lex);
        let mut store = EntityStore::new();
        store.add_character("人", 1, &c);
        store.add_character("狭", 1, &c);
        store.add_character("下", 2, &c);
        store.add_character("王", 2, &c);
        store.add_word("人人", 1, &c);

        let rows = reading_frequencies(&store, 41, &lex);
        assert_eq!(rows, vec![
            (s!("xia"), 2),
            (s!("ren"), 1),
            (s!("wang"), 1),
        ]);
        assert_eq!(format_table(&rows), "xia: 2\nren: 1\nwang: 1\n");
    }

    #[test]
    fn respects_max_level_and_unknown_glyphs() {
        let lex = lexicon();
        let c = Classifier::new(&lex);
        let mut store = EntityStore::new();
        store.add_character("你", 1, &c);
        store.add_character("龘", 1, &c);
        store.add_character("人", 42, &c);

        let rows = reading_frequencies(&store, 41, &lex);
        assert_eq!(rows, vec![(s!("ni"), 1), (s!("龘"), 1)]);
    }

    #[test]
    fn multi_glyph_readings_join() {
        let lex = lexicon();
        assert_eq!(Transliterator::reading(&lex, "你人"), Some(s!("ni ren")));
        assert_eq!(Transliterator::reading(&lex, "你龘"), None);
        assert_eq!(Transliterator::reading(&lex, ""), None);
    }
}
