use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

/// Environment variable overriding the default log level
pub const LOG_LEVEL_ENV: &str = "CSS_IN_JS_LOG";

/// File sink for log records. stdout carries the protocol stream, so nothing is printed there.
struct FileLogger {
    level: LevelFilter,
    sink: Mutex<File>,
}

impl FileLogger {
    fn create(path: &Path, level: LevelFilter) -> io::Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        // one log per session
        let sink = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            level,
            sink: Mutex::new(sink),
        })
    }

    fn format_line(record: &Record) -> String {
        format!(
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format_line(record);
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{}", line);
            let _ = sink.flush();
        }
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.flush();
        }
    }
}

/// Log file location under the platform's local data directory
pub fn log_file_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let data_dir = dirs::data_local_dir().ok_or("Could not determine local data directory")?;
    Ok(data_dir.join("CssInJs").join("css_in_js_language_server.log"))
}

/// Level named by [`LOG_LEVEL_ENV`], or `Info` when unset or unparsable
pub fn level_from_env() -> LevelFilter {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|value| LevelFilter::from_str(value.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the file logger at the given level
pub fn init_logger(level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    let logger = FileLogger::create(&log_file_path()?, level)?;
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use tempfile::TempDir;

    #[test]
    fn test_records_below_level_are_filtered() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("filter.log");
        let logger = FileLogger::create(&path, LevelFilter::Warn).unwrap();

        let info = Metadata::builder().level(Level::Info).build();
        let error = Metadata::builder().level(Level::Error).build();
        assert!(!logger.enabled(&info));
        assert!(logger.enabled(&error));
    }

    #[test]
    fn test_log_writes_line_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("write.log");
        let logger = FileLogger::create(&path, LevelFilter::Debug).unwrap();

        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .target("styled")
                .args(format_args!("fragment parsed"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Trace)
                .args(format_args!("hidden"))
                .build(),
        );
        logger.flush();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("WARN  [styled] fragment parsed"));
        assert!(!written.contains("hidden"));
    }
}
