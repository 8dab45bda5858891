//! Cleanup of model output.
//!
//! Models sometimes wrap the document in a markdown code fence even when told not to.
//! This is a best-effort text normalization, not a parser.

use regex::Regex;
use std::sync::LazyLock;

/// Returned in place of an empty generation.
pub const EMPTY_OUTPUT_PLACEHOLDER: &str = "% No output generated.";

static OPENING_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*```[a-z0-9_+\-]*\s*").expect("opening fence pattern is valid")
});

static CLOSING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*```\s*$").expect("closing fence pattern is valid"));

/// Remove one leading fence (optionally tagged, e.g. ```` ```latex ````) and one trailing
/// fence, together with the whitespace that separates them from the document.
pub fn strip_code_fences(text: &str) -> String {
    let without_open = OPENING_FENCE.replace(text, "");
    CLOSING_FENCE.replace(&without_open, "").into_owned()
}

/// Strip fences and substitute [`EMPTY_OUTPUT_PLACEHOLDER`] when nothing is left.
pub fn sanitize_latex(raw: &str) -> String {
    let stripped = strip_code_fences(raw);
    if stripped.trim().is_empty() {
        EMPTY_OUTPUT_PLACEHOLDER.to_string()
    } else {
        stripped
    }
}
