//! The operator log: an append-only, timestamped record of error events.
//!
//! Unlike the diagnostics emitted through the global `log` macros, the
//! operator log is an explicit object. It is opened at startup, handed to
//! the [`ErrorClassifier`](crate::classifier::ErrorClassifier) and flushed at
//! shutdown.

use std::{
    fmt,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use env_logger::{Builder, Env, Target, WriteStyle};
use log::{Level, LevelFilter, Log, Record};

use crate::error::{Result, StoreError};

/// Environment variable overriding the log file location.
pub const LOG_FILE_ENV: &str = "REEL_LOG_FILE";
/// Environment variable holding the operator log filter (`error` by default).
pub const LOG_FILTER_ENV: &str = "REEL_LOG";

const LOG_TARGET: &str = "reel::operator";

/// Operator-facing log sink.
pub struct OperatorLog {
    logger: env_logger::Logger,
    path: Option<PathBuf>,
}

impl OperatorLog {
    /// Opens (or creates) the log file at `path` in append mode, creating
    /// missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::OperatorLog` if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let io_err = |source: io::Error| StoreError::OperatorLog {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_err)?;

        Ok(Self {
            logger: build_logger(Box::new(file)),
            path: Some(path),
        })
    }

    /// Writes log lines to an arbitrary sink.
    pub fn to_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            logger: build_logger(writer),
            path: None,
        }
    }

    /// A log backed by a shared in-memory buffer, returned alongside it.
    pub fn in_memory() -> (Self, LogBuffer) {
        let buffer = LogBuffer::default();
        (Self::to_writer(Box::new(buffer.clone())), buffer)
    }

    /// Location of the log file: `$REEL_LOG_FILE` when set, otherwise
    /// `$XDG_STATE_HOME/reel/reel.log`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::OperatorLog` if the XDG state directory cannot be
    /// prepared.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(LOG_FILE_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        xdg::BaseDirectories::with_prefix("reel")
            .place_state_file("reel.log")
            .map_err(|source| StoreError::OperatorLog {
                path: PathBuf::from("$XDG_STATE_HOME/reel/reel.log"),
                source,
            })
    }

    /// Path of the backing file, if the log writes to one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Records one event at `level`.
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        self.logger.log(
            &Record::builder()
                .args(args)
                .level(level)
                .target(LOG_TARGET)
                .build(),
        );
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    pub fn flush(&self) {
        self.logger.flush();
    }
}

impl fmt::Debug for OperatorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorLog")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Drop for OperatorLog {
    fn drop(&mut self) {
        self.flush();
    }
}

fn build_logger(target: Box<dyn Write + Send>) -> env_logger::Logger {
    Builder::new()
        .filter_level(LevelFilter::Error)
        .parse_env(Env::new().filter(LOG_FILTER_ENV))
        .target(Target::Pipe(target))
        .write_style(WriteStyle::Never)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                jiff::Zoned::now().strftime("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .build()
}

/// Cloneable in-memory sink for [`OperatorLog::in_memory`].
#[derive(Debug, Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }

    /// Written lines, in order.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut bytes = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log buffer lock poisoned"))?;
        bytes.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
