//! Leveled, topic-tagged logging.
//!
//! Every entry is printed to the canister debug output and kept in a bounded
//! in-process ring so the latest entries can be served by a query endpoint.

use candid::CandidType;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::VecDeque};

/// Entries retained in the ring before the oldest are evicted.
pub const LOG_CAPACITY: usize = 1024;

thread_local! {
    static LOG: RefCell<LogBuffer> = RefCell::new(LogBuffer::new(LOG_CAPACITY));
}

///
/// Level
///

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, CandidType, Display, Serialize, Deserialize,
)]
pub enum Level {
    Debug, // least severe
    Info,
    Ok,
    Warn,
    Error, // most severe
}

///
/// Topic
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum Topic {
    Api,
    Config,
    Init,
    Store,
}

///
/// LogEntry
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LogEntry {
    pub seq: u64,
    pub created_at: u64,
    pub crate_name: String,
    pub topic: Option<String>,
    pub level: Level,
    pub message: String,
}

///
/// LogBuffer
///

#[derive(Debug)]
pub struct LogBuffer {
    capacity: usize,
    next_seq: u64,
    entries: VecDeque<LogEntry>,
}

impl LogBuffer {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            next_seq: 0,
            entries: VecDeque::new(),
        }
    }

    pub fn push(
        &mut self,
        crate_name: &str,
        topic: Option<&str>,
        level: Level,
        message: &str,
    ) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            seq,
            created_at: now_nanos(),
            crate_name: crate_name.to_string(),
            topic: topic.map(str::to_string),
            level,
            message: message.to_string(),
        });

        seq
    }

    /// Newest-last slice of at most `limit` entries.
    #[must_use]
    pub fn tail(&self, limit: usize) -> Vec<LogEntry> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[macro_export]
macro_rules! log {
    // =========================================
    // (1) With topic (normal + trailing comma)
    // =========================================
    ($topic:expr, $level:ident, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        $crate::log!(@inner Some(&$topic.to_string()), $crate::log::Level::$level, $fmt $(, $arg)*);
    }};

    // =========================================
    // (2) No topic (normal + trailing comma)
    // =========================================
    ($level:ident, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        $crate::log!(@inner None::<&str>, $crate::log::Level::$level, $fmt $(, $arg)*);
    }};

    // =========================================
    // INTERNAL
    // =========================================
    (@inner $topic:expr, $level:expr, $fmt:expr $(, $arg:expr)*) => {{
        let level = $level;
        let topic_opt: Option<&str> = $topic;
        let message = format!($fmt $(, $arg)*);

        $crate::log::__emit(env!("CARGO_PKG_NAME"), topic_opt, level, &message);
    }};
}

///
/// Helpers
///

#[doc(hidden)]
pub fn __emit(crate_name: &str, topic: Option<&str>, level: Level, message: &str) {
    LOG.with_borrow_mut(|log| log.push(crate_name, topic, level, message));

    let final_msg = if let Some(t) = topic {
        format!("[{t}] {message}")
    } else {
        message.to_string()
    };

    let (color, reset) = match level {
        Level::Ok => ("\x1b[32m", "\x1b[0m"),
        Level::Info => ("\x1b[34m", "\x1b[0m"),
        Level::Warn => ("\x1b[33m", "\x1b[0m"),
        Level::Error => ("\x1b[31m", "\x1b[0m"),
        Level::Debug => ("", ""),
    };

    let label = format!("{color}{:^5}{reset}", level.to_string().to_uppercase());
    print_line(&format!("{label}| {final_msg}"));
}

/// Latest `limit` entries from the process-wide ring, oldest first.
#[must_use]
pub fn entries(limit: usize) -> Vec<LogEntry> {
    LOG.with_borrow(|log| log.tail(limit))
}

/// Drop every retained entry.
pub fn clear() {
    LOG.with_borrow_mut(LogBuffer::clear);
}

#[cfg(target_arch = "wasm32")]
fn print_line(line: &str) {
    ic_cdk::println!("{line}");
}

#[cfg(not(target_arch = "wasm32"))]
fn print_line(line: &str) {
    println!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn now_nanos() -> u64 {
    ic_cdk::api::time()
}

#[cfg(not(target_arch = "wasm32"))]
#[allow(clippy::cast_possible_truncation)]
fn now_nanos() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}

///
/// TESTS
///
