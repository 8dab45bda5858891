pub mod generator;
pub mod prompt;
pub mod sanitize;

pub use generator::{LatexGenerator, DEFAULT_MODEL, GENERIC_FAILURE_MESSAGE};
pub use sanitize::{sanitize_latex, strip_code_fences, EMPTY_OUTPUT_PLACEHOLDER};
