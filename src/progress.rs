// src/progress.rs
/// Progress reporting for the scrape phase.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called once with the number of levels that will be fetched.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One level fetched and stored.
    fn item_done(&mut self, _level: u32) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Sends progress to the debug log only. Used when the caller has no frontend.
#[derive(Default)]
pub struct LogProgress {
    done: usize,
    total: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        logf!("Scrape: {total} level(s) to fetch");
    }
    fn log(&mut self, msg: &str) {
        logf!("{msg}");
    }
    fn item_done(&mut self, level: u32) {
        self.done += 1;
        logf!("Scrape: level {level} done ({}/{})", self.done, self.total);
    }
    fn finish(&mut self) {
        logf!("Scrape: finished {}/{}", self.done, self.total);
    }
}
