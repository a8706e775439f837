//! `qconf host` — describe the build host as an environment file.

use anyhow::Result;
use qconf_facts::parse::environment_to_toml;
use qconf_facts::{collect, RawEnvironment};

/// Print the raw environment as `.env.toml` text after checking it collects.
pub fn run(raw: &RawEnvironment) -> Result<()> {
    let facts = collect(raw)?;
    log::info!(
        "build host is {} ({} bit)",
        facts.host_dir_name(),
        facts.host_word_bits().bits()
    );
    print!("{}", environment_to_toml(raw)?);
    Ok(())
}
