//! TagFlip - terminal entry point.
//!
//! # Execution Flow
//!
//! 1. Load `TagFlip Data/tagflip.yaml` (defaults when absent)
//! 2. Initialize logging → `<log_dir>/<log_prefix>.<date>`
//! 3. Create the Session over the fixed rule table
//! 4. Run the TUI until the operator quits
//! 5. Log the session metrics
//!
//! Everything runs on the main thread: a scan or toggle pass blocks input
//! until it finishes.

use anyhow::Result;
use tagflip::ui::TuiController;
use tagflip::{APP_NAME, ConfigManager, RuleTable, Session, VERSION};

/// Directory holding the optional settings file
const CONFIG_DIR: &str = "TagFlip Data";

fn main() -> Result<()> {
    // Settings decide where logging goes, so they are loaded before the
    // subscriber exists; a missing-file warning here is not recorded.
    let config_manager = ConfigManager::new(CONFIG_DIR);
    let settings = config_manager.load_settings()?;

    let _guard = tagflip::logging::setup_logging_with_console(
        &settings.log_dir,
        &settings.log_prefix,
        settings.debug_mode,
        settings.console_logging,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let session = Session::new(RuleTable::default());
    let controller = TuiController::new(session)?;

    let result = controller.run();

    match &result {
        Ok(session) => tracing::info!("Session finished. {}", session.metrics().summary()),
        Err(e) => tracing::error!("TUI error: {:#}", e),
    }

    result.map(|_| ())
}
