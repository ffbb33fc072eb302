//! Domain-level constants.
//!
//! Query defaults and the literal values used by the demo run.

// =============================================================================
// Queries
// =============================================================================

/// Default cap for the sorted favorite-food query
pub const DEFAULT_QUERY_LIMIT: u64 = 2;

// =============================================================================
// Demo values
// =============================================================================

/// Food appended by the fetch-modify-save demo step
pub const DEMO_EXTRA_FOOD: &str = "hamburger";

/// Age written by the find-and-update demo step
pub const DEMO_UPDATED_AGE: i32 = 20;

/// Name whose records are removed by the bulk delete demo step
pub const DEMO_REMOVED_NAME: &str = "Mary";

/// Food searched by the chained query demo step
pub const DEMO_QUERY_FOOD: &str = "burritos";
