// tests/snapshot_files.rs
use std::fs;
use std::path::PathBuf;

use mb_scrape::{Classifier, EntityStore, Error, Lexicon};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("mb_snapshot_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

#[test]
fn save_then_load() {
    let c = Classifier::new(&Lexicon::bundled());
    let dir = tmp_dir("roundtrip").join("nested");
    let mut store = EntityStore::new();
    store.add_character("众", 1, &c);
    store.add_character("書", 2, &c);
    store.add_word("说话", 2, &c);

    store.save(&dir).unwrap();
    assert!(dir.join("characters.json").is_file());
    assert!(dir.join("words.json").is_file());
    assert_eq!(EntityStore::load(&dir).unwrap(), store);
}

#[test]
fn missing_snapshot_is_an_empty_store() {
    let dir = tmp_dir("fresh");
    assert!(EntityStore::load(&dir.join("never_written")).unwrap().is_empty());
}

#[test]
fn one_corrupt_blob_fails_the_load() {
    let c = Classifier::new(&Lexicon::bundled());
    let dir = tmp_dir("corrupt");
    let mut store = EntityStore::new();
    store.add_word("你好", 1, &c);
    store.save(&dir).unwrap();

    fs::write(dir.join("characters.json"), [0xff, 0xfe, b'[']).unwrap();
    match EntityStore::load(&dir) {
        Err(Error::CorruptSnapshot { blob, .. }) => assert_eq!(blob, "characters.json"),
        other => panic!("expected CorruptSnapshot, got {other:?}"),
    }
}

#[test]
fn store_path_that_is_a_file_cannot_be_saved() {
    let dir = tmp_dir("blocked");
    let blocker = dir.join("store");
    fs::write(&blocker, "not a directory").unwrap();
    assert!(matches!(EntityStore::new().save(&blocker), Err(Error::Io(_))));
}
