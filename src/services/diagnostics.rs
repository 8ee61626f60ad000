// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diagnostic sink for failed recommendation cycles.

/// A failure worth reporting. Never shown to the user as an error page.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Cycle that produced the failure
    pub sequence: u64,
    pub message: String,
}

/// Where failed-cycle diagnostics go.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, diagnostic: Diagnostic);
}

/// Default sink: structured log at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            sequence = diagnostic.sequence,
            error = %diagnostic.message,
            "Recommendation cycle failed"
        );
    }
}
