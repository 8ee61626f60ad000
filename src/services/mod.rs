// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod daily_log;
pub mod diagnostics;
pub mod recommend;
pub mod session;

pub use diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
pub use recommend::{CycleStatus, RecommendationClient, RecommendationService};
pub use session::{ProfileUpdate, Session, SessionError};
