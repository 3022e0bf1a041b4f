// src/bin/cli.rs
use color_eyre::eyre::{Result, WrapErr};
use mb_scrape::cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    cli::run().wrap_err("mb_scrape failed")
}
