//! Warnings, verbose messages and error reports
//!
//! Components never print on their own: they hand messages to a
//! [`Reporter`] supplied by the caller. [`TracingReporter`] forwards to the
//! `tracing` subscriber set up by [`crate::logging::init_logging`];
//! [`MemoryReporter`] keeps the messages for inspection.

use parking_lot::Mutex;
use std::fmt;
use tracing::{info, warn};

/// A warning, optionally naming the expression it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
    pub expr: Option<String>,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expr: None,
        }
    }

    pub fn with_expr(mut self, expr: impl Into<String>) -> Self {
        self.expr = Some(expr.into());
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expr = self.expr.as_deref().unwrap_or("");
        let gap = if !self.message.is_empty() && !expr.is_empty() {
            " "
        } else {
            ""
        };
        write!(f, "! {}{}{} !", self.message, gap, expr)
    }
}

/// User-facing rendering of an error: `!!! kind code: message expr !!!`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorReport {
    pub kind: Option<String>,
    pub code: Option<String>,
    pub message: String,
    pub expr: Option<String>,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_expr(mut self, expr: impl Into<String>) -> Self {
        self.expr = Some(expr.into());
        self
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind.as_deref().unwrap_or("");
        let code = self.code.as_deref().unwrap_or("");
        let expr = self.expr.as_deref().unwrap_or("");
        let message = self.message.as_str();

        let head_gap = if !kind.is_empty() && !code.is_empty() { " " } else { "" };
        let has_head = !kind.is_empty() || !code.is_empty();
        let has_body = !message.is_empty() || !expr.is_empty();
        let colon = if has_head && has_body { ": " } else { "" };
        let body_gap = if !message.is_empty() && !expr.is_empty() { " " } else { "" };

        write!(
            f,
            "!!! {}{}{}{}{}{}{} !!!",
            kind, head_gap, code, colon, message, body_gap, expr
        )
    }
}

/// Sink for warnings and verbose messages.
pub trait Reporter: Send + Sync {
    fn warning(&self, warning: &Warning);

    fn verbose(&self, message: &str);
}

/// Reporter that forwards to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter {
    /// Emit verbose messages; they are dropped otherwise.
    pub verbose: bool,
}

impl TracingReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for TracingReporter {
    fn warning(&self, warning: &Warning) {
        warn!(expr = warning.expr.as_deref().unwrap_or(""), "{}", warning);
    }

    fn verbose(&self, message: &str) {
        if self.verbose {
            info!("[verbose] - {}", message);
        }
    }
}

/// A message recorded by [`MemoryReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reported {
    Warning(String),
    Verbose(String),
}

/// Reporter that records every message in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    entries: Mutex<Vec<Reported>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Reported> {
        self.entries.lock().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter_map(|entry| match entry {
                Reported::Warning(text) => Some(text.clone()),
                Reported::Verbose(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Reporter for MemoryReporter {
    fn warning(&self, warning: &Warning) {
        self.entries.lock().push(Reported::Warning(warning.to_string()));
    }

    fn verbose(&self, message: &str) {
        self.entries.lock().push(Reported::Verbose(message.to_string()));
    }
}
