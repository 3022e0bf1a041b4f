// tests/properties.rs
use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use mb_scrape::classify::{Source, CORRUPTED_GLYPH};
use mb_scrape::export::known_words;
use mb_scrape::lexicon::Lexicon;
use mb_scrape::{Classifier, EntityStore, ScriptVariant};

const POOL: &[&str] = &[
    "你", "好", "你好", "众", "眾", "人", "们", "們", "我们", "我們", "干", "乾", "幹",
    "后", "後", "狭", CORRUPTED_GLYPH, "\u{8}狭窄", "龘", "abc", "里", "裡", "这里", "這裡",
];

fn build(ops: &[(bool, usize, u32)], c: &Classifier) -> EntityStore {
    let mut store = EntityStore::new();
    for &(is_word, idx, level) in ops {
        let text = POOL[idx % POOL.len()];
        if is_word {
            store.add_word(text, level, c);
        } else {
            store.add_character(text, level, c);
        }
    }
    store
}

fn ops() -> impl Strategy<Value = Vec<(bool, usize, u32)>> {
    prop::collection::vec((any::<bool>(), 0..POOL.len(), 1u32..=10), 0..40)
}

proptest! {
    #[test]
    fn export_never_repeats_a_text(ops in ops(), max in 1u32..=10) {
        let c = Classifier::new(&Lexicon::bundled());
        let store = build(&ops, &c);
        let words = known_words(&store, max);

        let mut seen = HashSet::new();
        for w in &words {
            prop_assert!(!w.label().contains('\x08'));
            prop_assert!(seen.insert(w.text().to_string()), "duplicate {}", w.label());
            prop_assert_eq!(w.1, 2);
        }
    }

    #[test]
    fn export_grows_with_level(ops in ops(), max in 1u32..10) {
        let c = Classifier::new(&Lexicon::bundled());
        let store = build(&ops, &c);
        let lower: HashSet<_> = known_words(&store, max).into_iter().collect();
        let upper: HashSet<_> = known_words(&store, max + 1).into_iter().collect();
        prop_assert!(lower.is_subset(&upper));
    }

    #[test]
    fn snapshot_restores_identical_store(ops in ops()) {
        let c = Classifier::new(&Lexicon::bundled());
        let store = build(&ops, &c);
        let restored = EntityStore::restore(&store.snapshot().unwrap()).unwrap();
        prop_assert_eq!(restored, store);
    }

    #[test]
    fn unknown_strings_follow_the_heuristic(text in "[一-龥a-z]{0,4}") {
        let c = Classifier::new(&Lexicon::bundled());
        prop_assume!(!c.contains(&text));
        let first = c.lookup(&text);
        prop_assert_eq!(first.source, Source::Heuristic);
        prop_assert_eq!(first.variant, c.heuristic(&text));
        prop_assert_eq!(c.lookup(&text), first);
    }
}

#[test]
fn dictionary_keys_never_fall_back() {
    let lex = Lexicon::bundled();
    let c = Classifier::new(&lex);

    let mut expected = HashMap::new();
    for e in lex.entries() {
        if e.is_same_form() {
            expected.insert(e.simplified.as_str(), ScriptVariant::Both);
        } else {
            expected.insert(e.simplified.as_str(), ScriptVariant::Simplified);
            expected.insert(e.traditional.as_str(), ScriptVariant::Traditional);
        }
    }

    assert_eq!(c.dictionary_len(), expected.len());
    for (key, variant) in expected {
        let got = c.lookup(key);
        assert_eq!(got.source, Source::Dictionary, "{key}");
        assert_eq!(got.variant, variant, "{key}");
    }
}

#[test]
fn reference_pairs() {
    let c = Classifier::new(&Lexicon::bundled());
    assert_eq!(c.classify("众"), ScriptVariant::Simplified);
    assert_eq!(c.classify("眾"), ScriptVariant::Traditional);
    assert_eq!(c.classify("人"), ScriptVariant::Both);
    // 干 closes its own same-form entry last
    assert_eq!(c.classify("干"), ScriptVariant::Both);
    assert_eq!(c.classify("后"), ScriptVariant::Both);
    assert_eq!(c.classify("後"), ScriptVariant::Traditional);
}
