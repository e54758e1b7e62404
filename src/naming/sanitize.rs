//! Normalisation of resolved names into safe hierarchical metric paths.

use std::sync::LazyLock;

use regex::Regex;

/// Runs of characters that may not appear in a metric path segment.
pub(super) const ILLEGAL_RUN_PATTERN: &str = r"[^A-Za-z0-9_.\-]+";
/// Two or more consecutive underscores.
pub(super) const UNDERSCORE_RUN_PATTERN: &str = r"__+";
/// A dot with an underscore directly on either or both sides.
pub(super) const UNDERSCORE_AROUND_DOT_PATTERN: &str = r"_?\._?";

static ILLEGAL_RUN: LazyLock<Regex> = LazyLock::new(|| compile(ILLEGAL_RUN_PATTERN));
static UNDERSCORE_RUN: LazyLock<Regex> = LazyLock::new(|| compile(UNDERSCORE_RUN_PATTERN));
static UNDERSCORE_AROUND_DOT: LazyLock<Regex> =
    LazyLock::new(|| compile(UNDERSCORE_AROUND_DOT_PATTERN));

pub(super) fn compile(pattern: &str) -> Regex {
    // Patterns are compile-time constants covered by the tests below.
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid pattern `{pattern}`: {err}"))
}

/// Replaces every run of illegal characters with a single `_`.
pub fn replace_illegal(name: &str) -> String {
    ILLEGAL_RUN.replace_all(name, "_").into_owned()
}

/// Collapses runs of underscores into one.
pub fn collapse_underscores(name: &str) -> String {
    UNDERSCORE_RUN.replace_all(name, "_").into_owned()
}

/// Drops underscores that touch a dot.
pub fn trim_underscores_around_dots(name: &str) -> String {
    UNDERSCORE_AROUND_DOT.replace_all(name, ".").into_owned()
}

/// Applies all normalisation rules in order.
///
/// The result only contains `[A-Za-z0-9_.-]` and is stable under repeated
/// application.
pub fn sanitize(name: &str) -> String {
    let name = replace_illegal(name);
    let name = collapse_underscores(&name);
    trim_underscores_around_dots(&name)
}
