// src/cli.rs
use std::{env, path::PathBuf, time::Duration};

use crate::config::consts::{FIRST_LEVEL, LAST_LEVEL};
use crate::config::options::{AppOptions, HttpEndpoint, SourceKind};
use crate::error::{Error, Result};
use crate::progress::Progress;
use crate::report::format_table;
use crate::runner::{self, RunSummary};

const HELP: &str = include_str!("cli_help.txt");

pub enum Command {
    Run(AppOptions),
    Help,
}

pub fn run() -> Result<()> {
    match parse_args(env::args().skip(1))? {
        Command::Help => {
            eprintln!("{HELP}");
            Ok(())
        }
        Command::Run(opts) => {
            let mut progress = CliProgress::default();
            let summary = runner::run(&opts, Some(&mut progress))?;
            print_summary(&opts, &summary);
            Ok(())
        }
    }
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command> {
    let mut opts = AppOptions::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        let mut value = |flag: &str| {
            args.next().ok_or_else(|| Error::Config(format!("Missing value for {flag}")))
        };
        match a.as_str()
        {
            "-l" | "--levels" => opts.levels = parse_levels(&value("--levels")?)?,
            "-s" | "--store" => opts.store_dir = PathBuf::from(value("--store")?),
            "-o" | "--out" => opts.export.out_dir = PathBuf::from(value("--out")?),
            "--lexicon" => opts.lexicon = Some(PathBuf::from(value("--lexicon")?)),
            "--capture" => opts.scrape.source = SourceKind::Capture(PathBuf::from(value("--capture")?)),
            "--http" => opts.scrape.source = SourceKind::Http(HttpEndpoint::parse(&value("--http")?)?),
            "--timeout" => {
                let v = value("--timeout")?;
                let secs: u64 = v.parse().map_err(|_| Error::Config(format!("Invalid timeout: {v}")))?;
                opts.scrape.timeout = Duration::from_secs(secs);}
            "--report-level" => {
                let v = value("--report-level")?;
                opts.report.max_level = parse_level(&v)?;}
            "--no-scrape" => opts.scrape.enabled = false,
            "--no-export" => opts.export.enabled = false,
            "--no-report" => opts.report.enabled = false,
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(Error::Config(format!("Unknown arg: {a}"))),
        }
    }

    Ok(Command::Run(opts))
}

/// `1-10,15,20-22` → sorted, deduplicated levels.
pub fn parse_levels(s: &str) -> Result<Vec<u32>> {
    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        if let Some((a, b)) = part.split_once('-') {
            let (a, b) = (parse_level(a)?, parse_level(b)?);
            if a > b { return Err(Error::Config(format!("Invalid range: {part}"))); }
            out.extend(a..=b);
        } else {
            out.push(parse_level(part)?);
        }
    }
    if out.is_empty() {
        return Err(Error::Config(s!("No levels given")));
    }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

fn parse_level(s: &str) -> Result<u32> {
    let s = s.trim();
    match s.parse::<u32>() {
        Ok(v) if (FIRST_LEVEL..=LAST_LEVEL).contains(&v) => Ok(v),
        _ => Err(Error::Config(format!("Level out of range ({FIRST_LEVEL}..={LAST_LEVEL}): {s}"))),
    }
}

/// Prints `i / n scraped` lines.
#[derive(Default)]
struct CliProgress {
    done: usize,
    total: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Scraping {total} level(s)…");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, level: u32) {
        self.done += 1;
        eprintln!("{} / {} scraped (level {level})", self.done, self.total);
    }
}

fn print_summary(opts: &AppOptions, summary: &RunSummary) {
    if let Some(report) = &summary.scrape {
        println!(
            "Scraped {} of {} missing level(s): +{} characters, +{} words",
            report.completed.len(), report.requested.len(),
            report.characters_added, report.words_added
        );
        if let Some(e) = &report.failure {
            println!("Scraping stopped early: {e}");
        }
    }
    println!("Store: {} characters, {} words", summary.characters, summary.words);
    if opts.export.enabled {
        println!("Wrote {} file(s) to {}", summary.files_written.len(), opts.export.out_dir.display());
    }
    if opts.report.enabled {
        println!("\nReading frequencies up to level {}:", opts.report.max_level);
        print!("{}", format_table(&summary.frequencies));
    }
}
