use chara_reel_lib::{Settings, watch};

use super::runtime;
use crate::error::CliError;

/// Run the watch loop until the process is killed.
pub(crate) fn run_watch(settings: &Settings) -> Result<(), CliError> {
    let rt = runtime()?;
    rt.block_on(watch(settings))?;
    Ok(())
}
