//! Validation trait definition

/// Validation trait for configuration structures
///
/// Returns a human-readable reason on failure; `Config::validate` wraps it
/// into a configuration error.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
