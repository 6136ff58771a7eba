use std::fmt;
use std::io::Write;
use std::panic::Location;
use std::sync::Arc;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

const TARGET: &str = "lib_pixelmancy";

/// `info!(logger, "fmt", args..)` style wrappers over an injected [`Logger`].
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace(format_args!($($arg)+))
    };
}

macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(format_args!($($arg)+))
    };
}

macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(format_args!($($arg)+))
    };
}

macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format_args!($($arg)+))
    };
}

pub(crate) use {debug, error, info, trace};

/// Logging capability handed to an [`Image`](crate::Image) at construction.
///
/// Wraps any `log::Log` implementation. The default forwards to whatever
/// logger is installed process-wide (see [`init_logging`]).
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn Log>,
}

impl Logger {
    pub fn new(sink: impl Log + 'static) -> Self {
        Self::from_arc(Arc::new(sink))
    }

    pub fn from_arc(sink: Arc<dyn Log>) -> Self {
        Self { sink }
    }

    /// Forwards to the process-wide `log` logger.
    pub fn global() -> Self {
        Self::new(GlobalLogger)
    }

    /// Discards everything.
    pub fn silent() -> Self {
        Self::new(SilentLogger)
    }

    #[track_caller]
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        let metadata = Metadata::builder().level(level).target(TARGET).build();
        if !self.sink.enabled(&metadata) {
            return;
        }

        let location = Location::caller();
        self.sink.log(
            &Record::builder()
                .metadata(metadata)
                .args(args)
                .file(Some(location.file()))
                .line(Some(location.line()))
                .build(),
        );
    }

    #[track_caller]
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args);
    }

    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

struct GlobalLogger;

impl Log for GlobalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record) {
        log::logger().log(record);
    }

    fn flush(&self) {
        log::logger().flush();
    }
}

struct SilentLogger;

impl Log for SilentLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        false
    }

    fn log(&self, _: &Record) {}

    fn flush(&self) {}
}

/// Installs an `env_logger` subscriber on stderr for this crate's records.
pub fn init_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter(Some(TARGET), level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Capture {
        records: Mutex<Vec<(Level, String, Option<String>, Option<String>)>>,
    }

    impl Log for Capture {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Debug
        }

        fn log(&self, record: &Record) {
            self.records.lock().unwrap().push((
                record.level(),
                record.args().to_string(),
                record.file().map(str::to_owned),
                record.module_path().map(str::to_owned),
            ));
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_injected_sink_receives_records() {
        let capture = Arc::new(Capture::default());
        let logger = Logger::from_arc(capture.clone());

        error!(logger, "bad {}", 42);
        info!(logger, "fine");
        trace!(logger, "filtered out");

        let records = capture.records.lock().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, Level::Error);
        assert_eq!(records[0].1, "bad 42");
        assert!(records[0].2.as_deref().unwrap().ends_with("logging.rs"));
        // The call site is known only by file and line
        assert_eq!(records[0].3, None);
        assert_eq!(records[1].0, Level::Info);
    }

    #[test]
    fn test_silent_logger() {
        // Only checks that nothing panics without an installed subscriber
        let logger = Logger::silent();
        logger.error(format_args!("nowhere"));
        Logger::global().debug(format_args!("nowhere either"));
    }
}
