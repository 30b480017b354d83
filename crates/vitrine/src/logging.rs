//! File logging. The terminal belongs to the UI, so logs go to a file in the
//! local data directory.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "vitrine.log";
const LOG_ENV: &str = "VITRINE_LOG";
const DEFAULT_FILTER: &str = "vitrine=info,vitrine_backdrop=info";

/// Install the global subscriber. Returns the log file path, or `None` when
/// logging could not be set up; the app runs either way.
pub fn init() -> Option<PathBuf> {
    let dir = vitrine_config::log_dir()?;
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join(LOG_FILE_NAME);
    let file = File::create(&path).ok()?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .ok()?;
    Some(path)
}
