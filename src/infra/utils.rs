//! Filepath: src/infra/utils.rs
//! Utility helpers organized by small, focused structs.
//! All functions are associated fns to keep call sites
//! ergonomic, testable, and discoverable.

use std::sync::LazyLock;

use regex::Regex;

/// Leading decimal literal, as a lenient host float parser reads it
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("static float regex")
});

/// Number parsing helpers
pub struct NumberUtils;

impl NumberUtils
{
    /// Parse the longest numeric prefix of `s` after leading whitespace.
    /// `"0.3s"` gives 0.3, `"abc"` gives None.
    pub fn parse_float_lenient(s: &str) -> Option<f64>
    {
        // Find the literal at the start of the trimmed input
        let m = FLOAT_PREFIX.find(s.trim_start())?;

        // Reject overflow to infinity
        m.as_str()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    /// Render seconds without trailing zeros: 0.5 -> "0.5", 2.0 -> "2"
    pub fn fmt_seconds(v: f64) -> String
    {
        // Three decimals is finer than a video frame
        let s = format!("{v:.3}");
        let s = s
            .trim_end_matches('0')
            .trim_end_matches('.');

        // Avoid printing "-0"
        if s == "-0" { "0".to_string() } else { s.to_string() }
    }
}
