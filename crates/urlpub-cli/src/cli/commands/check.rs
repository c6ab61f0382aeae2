//! `urlpub check` – validate a publish URL without sending anything.

use anyhow::Result;
use urlpub_core::validate::validate_publish_url;

pub fn run_check(url: &str) -> Result<()> {
    validate_publish_url(url)?;
    println!("OK");
    Ok(())
}
