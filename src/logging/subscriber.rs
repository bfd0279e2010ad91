//! Global tracing subscriber.
//!
//! Every event is classified once into a [`Kind`]; the console formatter and
//! the log file layer only differ in how they render that kind.
use std::fmt::{self, Write as _};
use std::fs::File;
use std::io::Write as _;
use std::sync::Mutex;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::utils::{format_utc_time, log_file_path, strip_ansi};

/// Target used for stage headers.
pub(super) const STAGE_TARGET: &str = "devsync::stage";

/// Target used for success lines.
pub(super) const SUCCESS_TARGET: &str = "devsync::success";

/// Presentation class of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stage,
    Success,
    Info,
    Debug,
    Warn,
    Error,
}

impl Kind {
    fn of(metadata: &Metadata<'_>) -> Self {
        match *metadata.level() {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => match metadata.target() {
                STAGE_TARGET => Self::Stage,
                SUCCESS_TARGET => Self::Success,
                _ => Self::Info,
            },
            _ => Self::Debug,
        }
    }

    /// Plain prefix written before the message in the log file.
    const fn tag(self) -> &'static str {
        match self {
            Self::Stage => "==> ",
            Self::Success => "  [ok] ",
            Self::Info => "  ",
            Self::Debug => "  [debug] ",
            Self::Warn => "  [warn] ",
            Self::Error => "  [error] ",
        }
    }

    /// Render `msg` for a terminal.
    fn paint(self, msg: &str) -> String {
        match self {
            Self::Stage => format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Self::Success => format!("  \x1b[32m✓\x1b[0m {msg}"),
            Self::Info => format!("  {msg}"),
            Self::Debug => format!("  \x1b[2m{msg}\x1b[0m"),
            Self::Warn => format!("\x1b[33mWARN\x1b[0m  {msg}"),
            Self::Error => format!("\x1b[31mERROR\x1b[0m {msg}"),
        }
    }
}

/// Collects the `message` field of an event.
#[derive(Default)]
struct Message(String);

impl Visit for Message {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.0);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0.clear();
            let _ = write!(self.0, "{value:?}");
        }
    }
}

fn message(event: &Event<'_>) -> String {
    let mut visitor = Message::default();
    event.record(&mut visitor);
    visitor.0
}

/// Layer writing every event to `<cache>/devsync/<mode>.log` without colors.
///
/// The file is truncated when the layer is created, so it only ever holds the
/// latest run of that mode.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<File>,
}

impl FileLayer {
    /// Create the log file for `mode`, or `None` if the cache directory is
    /// not writable.
    pub(super) fn new(mode: &str) -> Option<Self> {
        let file = File::create(log_file_path(mode)?).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: Subscriber> Layer<S> for FileLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let kind = Kind::of(event.metadata());
        let line = format!(
            "[{}] {}{}",
            format_utc_time(),
            kind.tag(),
            strip_ansi(&message(event))
        );
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }
}

/// Console event format: colored prefixes, no timestamps or targets.
struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let kind = Kind::of(event.metadata());
        writeln!(writer, "{}", kind.paint(&message(event)))
    }
}

/// Install the global subscriber for a run of `mode`.
///
/// Warnings and errors go to stderr, everything else to stdout; debug lines
/// reach the console only when `verbose` is set. The log file always gets
/// every event down to `DEBUG`. Call once, before any logging.
pub fn init_subscriber(verbose: bool, mode: &str) {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console = tracing_subscriber::fmt::layer()
        .event_format(ConsoleFormat)
        .with_writer(
            std::io::stderr
                .with_max_level(Level::WARN)
                .and(std::io::stdout.with_min_level(Level::INFO)),
        )
        .with_filter(console_level);
    let file = FileLayer::new(mode).map(|layer| layer.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();
}
