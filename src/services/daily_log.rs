// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily log filtering: today's entries, reduced to `{fdc_id, amount}`.
//!
//! "Today" is the calendar date of `now` in `now`'s own timezone. Stored
//! timestamps are UTC and are converted into that timezone before their
//! date is compared, so an entry logged at 23:30 local time stays on the
//! local day it was eaten even when UTC has already rolled over.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{LoggedAmount, LoggedFood};

/// Whether `ts` falls on the same calendar day as `now` (in `now`'s timezone).
pub fn is_same_day<Tz: TimeZone>(ts: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    ts.with_timezone(&now.timezone()).date_naive() == now.date_naive()
}

/// Select the entries logged today and project them for the recommendation
/// request. Source order is preserved.
pub fn todays_entries<Tz: TimeZone>(log: &[LoggedFood], now: &DateTime<Tz>) -> Vec<LoggedAmount> {
    log.iter()
        .filter(|entry| is_same_day(&entry.date, now))
        .map(|entry| LoggedAmount {
            fdc_id: entry.food.fdc_id,
            amount: entry.amount.as_deref().map(parse_amount).unwrap_or(0.0),
        })
        .collect()
}

/// Read a user-entered amount.
///
/// Leading whitespace is skipped and the longest leading decimal literal is
/// used, so `"100g"` reads as 100. Anything that yields no number, or a
/// negative or non-finite one, reads as 0.
pub fn parse_amount(raw: &str) -> f64 {
    let s = raw.trim_start();
    let len = numeric_prefix_len(s.as_bytes());
    if len == 0 {
        return 0.0;
    }

    match s[..len].parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Length of the longest prefix of `b` that is a decimal float literal.
fn numeric_prefix_len(b: &[u8]) -> usize {
    let mut i = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    // Exponent only counts if at least one digit follows it
    if i < b.len() && matches!(b[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < b.len() && matches!(b[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}
