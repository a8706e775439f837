//! qconf CLI — derive emulator build configuration headers.

mod commands;
mod detect;
mod manifest;
mod render;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use commands::PlatformArgs;
use manifest::QconfManifest;

#[derive(Parser)]
#[command(name = "qconf", version, about = "Emulator build configuration generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the derived configuration for one host and target
    Derive {
        #[command(flatten)]
        platform: PlatformArgs,
        /// Output format (header, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Write config-host.h and target config.h headers
    Configure {
        #[command(flatten)]
        platform: PlatformArgs,
        /// Configure every target listed in qconf.toml (or every known target)
        #[arg(long)]
        all_targets: bool,
        /// Output directory (default: [output] dir in qconf.toml, or android/config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Describe the build host as an environment file
    Host {
        /// Target to record in the description
        #[arg(long, default_value = "x86")]
        target: String,
    },
    /// List or create environment descriptions under platforms/
    Platforms {
        #[command(subcommand)]
        action: Option<PlatformsAction>,
    },
    /// List the derivation rules in evaluation order
    Rules,
}

#[derive(Subcommand)]
enum PlatformsAction {
    /// List descriptions and whether each one is valid (default)
    List,
    /// Write a new description file
    New {
        /// Description name (file stem under platforms/)
        name: String,
        /// Host OS (e.g., linux, darwin, windows)
        #[arg(long)]
        host_os: String,
        /// Host CPU (e.g., x86_64, ppc64, aarch64)
        #[arg(long)]
        host_arch: String,
        /// Target CPU
        #[arg(long)]
        target: String,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Derive { platform, format } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            let raw = platform.raw_environment(&project_dir, manifest.as_ref())?;
            commands::derive::run(&raw, format.as_deref())
        }

        Commands::Configure {
            mut platform,
            all_targets,
            out,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);

            let targets = if all_targets {
                match manifest.as_ref().map(|m| m.target_list()) {
                    Some(list) if !list.is_empty() => list.to_vec(),
                    _ => commands::configure::all_target_names(),
                }
            } else {
                Vec::new()
            };
            // The list replaces the single target, so any entry of it will do.
            let has_default = manifest.as_ref().and_then(|m| m.default_target()).is_some();
            if platform.env.is_none() && platform.target.is_none() && !has_default {
                platform.target = targets.first().cloned();
            }

            let raw = platform.raw_environment(&project_dir, manifest.as_ref())?;

            let out_dir = match out {
                Some(dir) => dir,
                None => {
                    let rel = manifest
                        .as_ref()
                        .map(|m| m.output_dir())
                        .unwrap_or(manifest::DEFAULT_OUTPUT_DIR);
                    project_dir.join(rel)
                }
            };

            commands::configure::run(&raw, &targets, &out_dir).map(|_| ())
        }

        Commands::Host { target } => {
            let (os, arch) = detect::build_host();
            let raw = qconf_facts::RawEnvironment::new(os, arch, target);
            commands::host::run(&raw)
        }

        Commands::Platforms { action } => {
            let (_, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            match action.unwrap_or(PlatformsAction::List) {
                PlatformsAction::List => commands::platforms::list(&project_dir),
                PlatformsAction::New {
                    name,
                    host_os,
                    host_arch,
                    target,
                } => commands::platforms::new(&project_dir, &name, &host_os, &host_arch, &target)
                    .map(|_| ()),
            }
        }

        Commands::Rules => commands::rules::run(),
    }
}

/// Load `qconf.toml` from `cwd` or a parent, if there is one.
fn load_manifest_optional(cwd: &Path) -> anyhow::Result<(Option<QconfManifest>, Option<PathBuf>)> {
    match QconfManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}
