use std::fmt::Result as FmtResult;

use time::{format_description::FormatItem, macros::format_description};
use tracing::{metadata::LevelFilter, Event, Subscriber};
use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling,
};
use tracing_subscriber::{
    fmt::{
        format::Writer,
        time::{FormatTime, UtcTime},
        FmtContext, FormatEvent, FormatFields, Layer,
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer as _,
};

const LOG_DIR: &str = "./logs";
const LOG_FILE: &str = "osuapi.log";

/// Logs to stdout and to a daily rotating file.
///
/// The returned guard flushes the file writer when dropped.
pub fn init(quiet: bool) -> WorkerGuard {
    let timestamp = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

    let stdout_layer = Layer::default().event_format(EventFormat::new(timestamp, false));

    let (file_writer, guard) = NonBlocking::new(rolling::daily(LOG_DIR, LOG_FILE));

    let file_layer = Layer::default()
        .event_format(EventFormat::new(timestamp, true))
        .with_writer(file_writer);

    let stdout_filter = if quiet {
        EnvFilter::new("off")
    } else {
        filter(LevelFilter::INFO)
    };

    tracing_subscriber::registry()
        .with(stdout_layer.with_filter(stdout_filter))
        .with(file_layer.with_filter(filter(LevelFilter::DEBUG)))
        .init();

    guard
}

fn filter(default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy()
}

struct EventFormat<'f> {
    timer: UtcTime<&'f [FormatItem<'f>]>,
    /// Prefix each event with the file and line it originates from
    location: bool,
}

impl<'f> EventFormat<'f> {
    fn new(timestamp: &'f [FormatItem<'f>], location: bool) -> Self {
        Self {
            timer: UtcTime::new(timestamp),
            location,
        }
    }
}

impl<S, N> FormatEvent<S, N> for EventFormat<'_>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> FmtResult {
        self.timer.format_time(&mut writer)?;
        let metadata = event.metadata();

        write!(writer, " {:>5} ", metadata.level())?;

        if self.location {
            write!(
                writer,
                "[{}:{}] ",
                metadata.file().unwrap_or_else(|| metadata.target()),
                metadata.line().unwrap_or(0),
            )?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
