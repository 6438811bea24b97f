//! Limit/offset pagination shared by every list endpoint.

/// Page size used when the client does not ask for one.
pub const DEFAULT_LIMIT: i64 = 50;

/// Largest page a client may request.
pub const MAX_LIMIT: i64 = 200;

/// A clamped `LIMIT`/`OFFSET` pair, safe to bind into a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Build a page from raw, user-provided values.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT),
            offset: clamp_offset(offset),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Clamp a user-provided limit into `1..=max`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
