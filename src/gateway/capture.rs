// src/gateway/capture.rs
//! Rendered pages saved to disk by a browser, one file per level
//! (`level_01.html`, `level_02.html`, …). Files may still be in the middle of
//! being written when asked for, so each level waits until its page is ready.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::GatewayError;
use super::{page, Gateway, LevelCategories, Session, WaitPolicy};

pub fn capture_file_name(level: u32) -> String {
    format!("level_{level:02}.html")
}

pub struct CaptureGateway {
    dir: PathBuf,
    wait: WaitPolicy,
}

impl CaptureGateway {
    pub fn new(dir: impl Into<PathBuf>, wait: WaitPolicy) -> Self {
        Self { dir: dir.into(), wait }
    }
}

impl Gateway for CaptureGateway {
    type Session = CaptureSession;

    fn open_session(&mut self) -> Result<CaptureSession, GatewayError> {
        if !self.dir.is_dir() {
            return Err(GatewayError::Unavailable(format!(
                "capture directory not found: {}",
                self.dir.display()
            )));
        }
        logf!("Capture: session opened on {}", self.dir.display());
        Ok(CaptureSession { dir: self.dir.clone(), wait: self.wait, fetched: 0 })
    }
}

pub struct CaptureSession {
    dir: PathBuf,
    wait: WaitPolicy,
    fetched: usize,
}

impl Session for CaptureSession {
    fn fetch_level(&mut self, level: u32) -> Result<LevelCategories, GatewayError> {
        let path = self.dir.join(capture_file_name(level));
        let doc = self.wait.until(level, || read_if_ready(&path))?;
        self.fetched += 1;
        logd!("Capture: level {level} read from {}", path.display());
        Ok(page::extract_level(&doc))
    }

    fn close(&mut self) {
        logf!("Capture: session closed after {} level(s)", self.fetched);
    }
}

fn read_if_ready(path: &Path) -> Result<Option<String>, GatewayError> {
    match fs::read(path) {
        // Half-written files may end mid-character; lossy decoding keeps polling alive.
        Ok(bytes) => {
            let doc = String::from_utf8_lossy(&bytes).into_owned();
            Ok(page::is_ready(&doc).then_some(doc))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
