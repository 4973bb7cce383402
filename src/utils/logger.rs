use std::io;
use std::path::Path;
use std::sync::Mutex;

use backtrace::Backtrace;
use serde::Serialize;
use slog::{o, Drain, Level, Logger};

#[derive(Serialize, Debug)]
pub struct StackFrame {
    func: String,
    source: String,
    line: u32,
}

/// Captures the current call stack.
fn marshal_stack() -> Vec<StackFrame> {
    let bt = Backtrace::new();
    let mut frames = Vec::new();

    for frame in bt.frames() {
        for symbol in frame.symbols() {
            let func = symbol
                .name()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "unknown".to_owned());
            let source = symbol
                .filename()
                .map(short_source)
                .unwrap_or_else(|| "unknown".to_owned());
            let line = symbol.lineno().unwrap_or(0);

            frames.push(StackFrame { func, source, line });
        }
    }
    frames
}

/// Last two path components, e.g. `pipeline/pipeline.rs`.
fn short_source(path: &Path) -> String {
    match (path.parent().and_then(|p| p.file_name()), path.file_name()) {
        (Some(parent), Some(file)) => {
            format!("{}/{}", parent.to_string_lossy(), file.to_string_lossy())
        }
        _ => path.display().to_string(),
    }
}

/// Stack trace at the call site as a JSON array, for attaching to error records.
pub fn stack_trace() -> String {
    serde_json::to_string(&marshal_stack()).unwrap_or_default()
}

/// JSON logger on stdout (`ts`, `level`, `msg` plus record fields) that drops records
/// below `level`.
pub fn get_logger(level: Level) -> Logger {
    let drain = slog_json::Json::default(io::stdout()).fuse();
    let drain = Mutex::new(drain).fuse();
    let drain = drain.filter_level(level).fuse();
    Logger::root(drain, o!("app" => env!("CARGO_PKG_NAME")))
}

/// Logger that discards everything.
pub fn null_logger() -> Logger {
    Logger::root(slog::Discard, o!())
}
