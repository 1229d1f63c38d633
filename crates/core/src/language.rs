//! Target-language identifiers
//!
//! Languages are free-form strings handed straight to the generator, which
//! accepts an open-ended set of names. They are compared case-insensitively
//! and lower-cased to name their output directories.

/// The one language whose output is additionally bundled for the browser
pub const BUNDLING_ELIGIBLE_LANGUAGE: &str = "TypeScript";

/// Directory name used for a language's generated output
pub fn output_dir_name(language: &str) -> String {
    language.to_lowercase()
}

/// Whether `language` names the bundling-eligible language
pub fn is_bundling_eligible(language: &str) -> bool {
    language.eq_ignore_ascii_case(BUNDLING_ELIGIBLE_LANGUAGE)
}
