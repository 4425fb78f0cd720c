use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use chara_reel_lib::{Settings, build_manifest};

use super::{display_path, runtime, spinner};
use crate::error::CliError;

/// Build the manifest once.
pub(crate) fn run_build(settings: &Settings, quiet: bool) -> Result<(), CliError> {
    let rt = runtime()?;

    let pb = spinner(quiet, "Building manifest...");
    let result = rt.block_on(build_manifest(settings));
    pb.finish_and_clear();
    let report = result?;

    log::info!(
        "{} Wrote manifest with {} characters -> {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.characters,
        display_path(&report.output, &settings.project_root)
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
    );
    match report.source {
        Some(kind) => log::info!(
            "  {}",
            format!("Videos from {kind}").if_supports_color(Stdout, |t| t.dimmed())
        ),
        None => log::info!(
            "  {}",
            "No spreadsheet or CSV data; sidecars only".if_supports_color(Stdout, |t| t.dimmed())
        ),
    }
    Ok(())
}
