// src/gateway/mod.rs
//! # Level acquisition
//!
//! The scrape coordinator only sees the [`Gateway`] / [`Session`] pair:
//! open a session once per run, ask it for one level at a time, and let
//! [`SessionGuard`] close it exactly once however the loop ends.
//!
//! Adapters:
//! - [`capture::CaptureGateway`] reads rendered pages a browser saved to disk.
//! - [`http::HttpGateway`] fetches rendered pages over plain HTTP
//!   (e.g. from a rendering proxy in front of the site).
//!
//! Both hand the HTML to [`page`], which knows where the new entries live.

pub mod capture;
pub mod http;
pub mod page;

use std::ops::{Deref, DerefMut};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::GatewayError;

/// Headings on a level's word-progress page, in page order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    AllCharacters,
    AllWords,
    Nouns,
    Verbs,
    Adjectives,
    Adverbs,
    Pronouns,
    Measure,
    Numbers,
    Prepositions,
    Conjunction,
    Particles,
    Mood,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::AllCharacters,
        Category::AllWords,
        Category::Nouns,
        Category::Verbs,
        Category::Adjectives,
        Category::Adverbs,
        Category::Pronouns,
        Category::Measure,
        Category::Numbers,
        Category::Prepositions,
        Category::Conjunction,
        Category::Particles,
        Category::Mood,
    ];

    /// The heading id as it appears on the page.
    pub fn label(self) -> &'static str {
        match self {
            Category::AllCharacters => "All Characters",
            Category::AllWords => "All Words",
            Category::Nouns => "Nouns 名词",
            Category::Verbs => "Verbs 动词",
            Category::Adjectives => "Adjectives 形容词",
            Category::Adverbs => "Adverbs 副词",
            Category::Pronouns => "Pronouns 代词",
            Category::Measure => "Measure 量词",
            Category::Numbers => "Numbers 数词",
            Category::Prepositions => "Prepositions 介词",
            Category::Conjunction => "Conjunction 连词",
            Category::Particles => "Particles 助词",
            Category::Mood => "Mood 语气词",
        }
    }
}

/// Raw entry texts of one level, per category, in page order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelCategories {
    lists: Vec<(Category, Vec<String>)>,
}

impl LevelCategories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list for `category`.
    pub fn insert(&mut self, category: Category, texts: Vec<String>) {
        match self.lists.iter_mut().find(|(c, _)| *c == category) {
            Some((_, list)) => *list = texts,
            None => self.lists.push((category, texts)),
        }
    }

    /// Entries under `category`; empty when the heading was absent.
    pub fn get(&self, category: Category) -> &[String] {
        self.lists
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&[])
    }

    pub fn characters(&self) -> &[String] {
        self.get(Category::AllCharacters)
    }

    pub fn words(&self) -> &[String] {
        self.get(Category::AllWords)
    }
}

/// Source of acquisition sessions.
pub trait Gateway {
    type Session: Session;

    fn open_session(&mut self) -> Result<Self::Session, GatewayError>;
}

/// One acquisition session. `close` is called exactly once by [`SessionGuard`].
pub trait Session {
    fn fetch_level(&mut self, level: u32) -> Result<LevelCategories, GatewayError>;

    fn close(&mut self);
}

/// Owns an open session and closes it on drop.
pub struct SessionGuard<S: Session> {
    session: S,
}

impl<S: Session> SessionGuard<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }
}

impl<S: Session> Deref for SessionGuard<S> {
    type Target = S;
    fn deref(&self) -> &S {
        &self.session
    }
}

impl<S: Session> DerefMut for SessionGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.session
    }
}

impl<S: Session> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        self.session.close();
    }
}

/// Bounded wait for a page to become ready.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl WaitPolicy {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self { timeout, poll_interval }
    }

    /// Call `probe` until it yields a value, fails, or the timeout elapses.
    /// `probe` always runs at least once.
    pub fn until<T, F>(&self, level: u32, mut probe: F) -> Result<T, GatewayError>
    where
        F: FnMut() -> Result<Option<T>, GatewayError>,
    {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(value) = probe()? {
                return Ok(value);
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(GatewayError::Timeout { level, secs: self.timeout.as_secs() });
            }
            thread::sleep(self.poll_interval.min(deadline - now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn labels_match_page_headings() {
        assert_eq!(Category::ALL.len(), 13);
        assert_eq!(Category::AllCharacters.label(), "All Characters");
        assert_eq!(Category::Mood.label(), "Mood 语气词");
    }

    #[test]
    fn level_categories_default_to_empty() {
        let mut cats = LevelCategories::new();
        assert!(cats.words().is_empty());
        cats.insert(Category::AllWords, vec![s!("你好")]);
        cats.insert(Category::AllWords, vec![s!("再见")]);
        assert_eq!(cats.words(), [s!("再见")]);
        assert!(cats.characters().is_empty());
    }

    struct Counted(Rc<Cell<u32>>);
    impl Session for Counted {
        fn fetch_level(&mut self, _level: u32) -> Result<LevelCategories, GatewayError> {
            Err(GatewayError::Unavailable(s!("nope")))
        }
        fn close(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn guard_closes_once_on_error_path() {
        let closes = Rc::new(Cell::new(0));
        let run = || -> Result<(), GatewayError> {
            let mut s = SessionGuard::new(Counted(closes.clone()));
            s.fetch_level(1)?;
            Ok(())
        };
        assert!(run().is_err());
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn wait_returns_first_ready_value() {
        let policy = WaitPolicy::new(Duration::from_secs(5), Duration::from_millis(1));
        let mut calls = 0;
        let got = policy.until(3, || {
            calls += 1;
            Ok((calls == 3).then_some("ready"))
        });
        assert_eq!(got.unwrap(), "ready");
        assert_eq!(calls, 3);
    }

    #[test]
    fn wait_times_out() {
        let policy = WaitPolicy::new(Duration::from_millis(20), Duration::from_millis(5));
        let got: Result<(), _> = policy.until(7, || Ok(None));
        assert!(matches!(got, Err(GatewayError::Timeout { level: 7, secs: 0 })));
    }
}
