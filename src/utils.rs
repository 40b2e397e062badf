use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over `default_filter`. Logs go to stderr so stdout only
/// carries tool output.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Buffered writer to `path`, or to stdout when no path is given
pub fn output_writer(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}
