//! Logging and tracing setup for RakshaMitra.
//!
//! Suspicious links are reported through these logs, so the output format
//! is selectable: JSON for log shippers, plain text for a terminal.

use std::str::FromStr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "rakshamitra=info,tower_http=info";

/// Environment variable selecting the output format.
const FORMAT_VAR: &str = "RAKSHA_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" | "pretty" | "plain" => Ok(LogFormat::Text),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Initialize the tracing subscriber.
///
/// Reads the filter from `RUST_LOG` (default `rakshamitra=info,tower_http=info`)
/// and the format from `RAKSHA_LOG_FORMAT` (`json` or `text`, default `json`).
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let requested = std::env::var(FORMAT_VAR).ok();
    let format = requested
        .as_deref()
        .map(LogFormat::from_str)
        .transpose()
        .unwrap_or_else(|e| {
            eprintln!("{FORMAT_VAR}: {e}, falling back to json");
            Some(LogFormat::Json)
        })
        .unwrap_or_default();

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

/// Initialize tracing for tests (human-readable format, no JSON).
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("rakshamitra=debug")
        .try_init();
}

/// Run `f` with a thread-local subscriber and return what it logged at
/// `level` or above, as plain text.
#[cfg(test)]
pub fn capture_logs<F: FnOnce()>(level: tracing::Level, f: F) -> String {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_format() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" Text ".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::default(), LogFormat::Json);
    }

    #[test]
    fn test_capture_respects_level() {
        let output = capture_logs(tracing::Level::WARN, || {
            tracing::info!("routine");
            tracing::warn!(code = 7, "unusual");
        });
        assert!(!output.contains("routine"));
        assert!(output.contains("unusual"));
        assert!(output.contains("code=7"));
    }
}
