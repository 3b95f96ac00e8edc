use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sends logs to `log_file` when one is given. The terminal belongs to the
/// card UI, so without a file nothing is logged at all.
pub fn init(log_file: Option<&Path>) {
    let Some(log_file) = log_file else {
        return;
    };

    let file = match File::create(log_file) {
        Ok(file) => file,
        Err(error) => {
            eprintln!(
                "Warning: failed to create log file {}: {error}",
                log_file.display()
            );
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}
