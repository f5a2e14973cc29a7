//! Rolling Logger
//!
//! Tracing subscriber that writes to one file per day (`<app>.<YYYY-MM-DD>.log`),
//! keeps a bounded number of old files, and mirrors the most recent events
//! into a circular buffer so they can be shown without touching the disk.
//! Records from the `log` facade are bridged in through `tracing-log`.

use std::collections::VecDeque;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{EnvFilter, Layer};

/// Lines kept in memory by default
pub const DEFAULT_BUFFER_LINES: usize = 500;
/// Daily files kept on disk by default
pub const DEFAULT_RETAIN_FILES: usize = 7;

/// Logger settings
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    pub dir: PathBuf,
    pub app_name: String,
    /// Used when `RUST_LOG` is not set
    pub level: LevelFilter,
    pub retain_files: usize,
    pub buffer_lines: usize,
}

impl LoggerOptions {
    pub fn new(dir: impl Into<PathBuf>, app_name: &str) -> Self {
        Self {
            dir: dir.into(),
            app_name: app_name.to_string(),
            level: LevelFilter::INFO,
            retain_files: DEFAULT_RETAIN_FILES,
            buffer_lines: DEFAULT_BUFFER_LINES,
        }
    }
}

/// Captured log entry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<5} {}: {}", self.level, self.target, self.message)
    }
}

/// Shared log entry buffer.
pub type LogBuffer = Arc<Mutex<VecDeque<LogEntry>>>;

/// Snapshot of a buffer, oldest first
pub fn recent_lines(buffer: &LogBuffer) -> Vec<String> {
    buffer
        .lock()
        .map(|entries| entries.iter().map(LogEntry::to_string).collect())
        .unwrap_or_default()
}

/// Tracing layer that keeps the last `capacity` events.
pub struct RingBufferLayer {
    buffer: LogBuffer,
    capacity: usize,
}

impl RingBufferLayer {
    pub fn new(buffer: LogBuffer, capacity: usize) -> Self {
        Self { buffer, capacity }
    }
}

impl<S> Layer<S> for RingBufferLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if self.capacity == 0 {
            return;
        }
        let metadata = event.metadata();

        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));

        let entry = LogEntry {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message,
        };

        if let Ok(mut buf) = self.buffer.lock() {
            buf.push_back(entry);
            while buf.len() > self.capacity {
                buf.pop_front();
            }
        }
    }
}

/// Extracts the `message` field from tracing events.
struct MessageVisitor<'a>(&'a mut String);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{:?}", value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            *self.0 = value.to_string();
        }
    }
}

/// Daily file appender that prunes files beyond `retain_files`
fn file_appender(options: &LoggerOptions) -> Result<RollingFileAppender, String> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&options.app_name)
        .filename_suffix("log")
        .max_log_files(options.retain_files.max(1))
        .build(&options.dir)
        .map_err(|e| format!("Failed to open log dir {}: {}", options.dir.display(), e))
}

/// Subscriber writing to the rolling file and the returned buffer
pub fn build_subscriber(options: &LoggerOptions) -> Result<(impl Subscriber + Send + Sync, LogBuffer), String> {
    let appender = file_appender(options)?;
    let buffer: LogBuffer = Arc::new(Mutex::new(VecDeque::with_capacity(options.buffer_lines)));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.level.to_string()));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true),
        )
        .with(RingBufferLayer::new(Arc::clone(&buffer), options.buffer_lines));

    Ok((subscriber, buffer))
}

/// Install the global logger with default options
pub fn init_logger(dir: impl Into<PathBuf>, app_name: &str) -> Result<LogBuffer, String> {
    init_logger_with(LoggerOptions::new(dir, app_name))
}

/// Install the global subscriber and route `log` records into it
pub fn init_logger_with(options: LoggerOptions) -> Result<LogBuffer, String> {
    let (subscriber, buffer) = build_subscriber(&options)?;

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Logger already initialized: {}", e))?;
    tracing_log::LogTracer::init().map_err(|e| format!("Failed to bridge log records: {}", e))?;

    Ok(buffer)
}
