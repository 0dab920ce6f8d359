//! Named defaults substituted when a remote value is unavailable.

/// Avatar URL used when the thumbnail lookup fails.
pub const DEFAULT_AVATAR_URL: &str = "";

/// Count used when a relationship-count lookup fails.
pub const DEFAULT_COUNT: u64 = 0;

/// Username used when neither the provider nor the previous snapshot has one.
pub const PLACEHOLDER_USERNAME: &str = "unknown";

/// Display name used when neither the provider nor the previous snapshot has one.
pub const PLACEHOLDER_DISPLAY_NAME: &str = "Unknown";

/// Picks the previous value when it is non-empty, the placeholder otherwise.
pub(crate) fn carry_over(previous: Option<&str>, placeholder: &str) -> String {
    match previous {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => placeholder.to_string(),
    }
}
