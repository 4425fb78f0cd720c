use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use chara_reel_lib::Settings;
use chara_reel_lib::normalize::{NORMALIZE_CONFIG, SHEET_CSV, normalize_sheet_csv};
use chara_reel_sources::config::LOCAL_CSV;

use super::display_path;
use crate::error::CliError;

/// Convert `<assets>/sheet.csv` (or `input`) into `videos.csv`.
pub(crate) fn run_normalize(
    settings: &Settings,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let assets = settings.asset_path();
    let input = input.map_or_else(|| assets.join(SHEET_CSV), Path::to_path_buf);
    let output = output.map_or_else(|| assets.join(LOCAL_CSV), Path::to_path_buf);

    let report = normalize_sheet_csv(&input, &output, &assets.join(NORMALIZE_CONFIG))?;

    log::info!(
        "{} Wrote {} with {} rows ({} images)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        display_path(&report.output, &settings.project_root)
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
        report.rows,
        report.images,
    );
    Ok(())
}
