//! Configuration for applying a softmap document.

/// Configuration for [`crate::Document::apply_with`].
///
/// # Example
///
/// ```rust
/// use softmap::ApplyOptions;
///
/// let options = ApplyOptions::new()
///     .with_expand_realm_members(false)
///     .with_visited_listing_limit(Some(16));
/// assert!(!options.expand_realm_members);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Emit one `METHOD` row for every class of a method's realm (default: true).
    ///
    /// When false, only the row of the realm's declaring class is emitted, for consumers that
    /// resolve inheritance on their own.
    pub expand_realm_members: bool,

    /// Maximum number of methods listed when no method of any candidate class matches an
    /// expression (default: no limit).
    pub visited_listing_limit: Option<usize>,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            expand_realm_members: true,
            visited_listing_limit: None,
        }
    }
}

impl ApplyOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether method rows are emitted for every realm member.
    #[must_use]
    pub fn with_expand_realm_members(mut self, expand: bool) -> Self {
        self.expand_realm_members = expand;
        self
    }

    /// Sets the maximum number of methods listed in "no methods match" diagnostics.
    #[must_use]
    pub fn with_visited_listing_limit(mut self, limit: Option<usize>) -> Self {
        self.visited_listing_limit = limit;
        self
    }
}
