use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use chara_reel_lib::Settings;
use chara_reel_sources::config::{public_csv_url, read_json};
use chara_reel_sources::{SheetsConfig, SourceContext, http_client, resolve_source_map};

use super::{display_path, runtime, spinner};
use crate::error::CliError;

fn status_line(label: &str, ok: bool, detail: impl std::fmt::Display) {
    if ok {
        log::info!(
            "  {} {:<22} {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            label,
            detail,
        );
    } else {
        log::info!(
            "  {} {:<22} {}",
            "-".if_supports_color(Stdout, |t| t.dimmed()),
            label,
            detail.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

fn describe_sheet(settings: &Settings) -> (bool, String) {
    let paths = settings.source_paths();
    let config_path = paths.sheets_config();
    let root = &settings.project_root;
    if !config_path.is_file() {
        return (false, "not configured".to_string());
    }
    match read_json::<SheetsConfig>(&config_path) {
        Ok(cfg) if cfg.spreadsheet_id.is_empty() => {
            (false, "spreadsheetId missing".to_string())
        }
        Ok(cfg) => {
            let creds = paths.credentials(&cfg);
            if creds.is_file() {
                (true, format!("{} ({})", cfg.spreadsheet_id, cfg.range()))
            } else {
                (
                    false,
                    format!("credentials not found: {}", shown(&creds, root)),
                )
            }
        }
        Err(e) => (false, format!("invalid config: {e}")),
    }
}

fn shown(path: &Path, root: &Path) -> String {
    display_path(path, root).display().to_string()
}

/// Report configured sources and which one a build would use.
pub(crate) fn run_sources(settings: &Settings, quiet: bool) -> Result<(), CliError> {
    let paths = settings.source_paths();
    let root = &settings.project_root;

    log::info!(
        "{} {}",
        "Sources for".if_supports_color(Stdout, |t| t.bold()),
        shown(&settings.asset_path(), root).if_supports_color(Stdout, |t| t.cyan()),
    );

    let (sheet_ok, sheet_detail) = describe_sheet(settings);
    status_line("Spreadsheet (account)", sheet_ok, sheet_detail);

    match public_csv_url(&paths) {
        Some(url) => status_line("Published CSV", true, url),
        None => status_line("Published CSV", false, "not configured"),
    }

    let local = paths.local_csv();
    status_line(
        "Local CSV",
        local.is_file(),
        if local.is_file() {
            shown(&local, root)
        } else {
            "not found".to_string()
        },
    );
    log::info!("");

    let rt = runtime()?;
    let http = http_client(settings.http_timeout)?;
    let ctx = SourceContext::new(paths, http);

    let pb = spinner(quiet, "Resolving sources...");
    let resolved = rt.block_on(resolve_source_map(&ctx));
    pb.finish_and_clear();

    match resolved.kind {
        Some(kind) => log::info!(
            "{} {} ({} entries)",
            "Active:".if_supports_color(Stdout, |t| t.bold()),
            kind.if_supports_color(Stdout, |t| t.green()),
            resolved.map.len(),
        ),
        None => log::info!(
            "{} {}",
            "Active:".if_supports_color(Stdout, |t| t.bold()),
            "none (sidecars and defaults only)".if_supports_color(Stdout, |t| t.yellow()),
        ),
    }
    Ok(())
}
