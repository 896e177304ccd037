/// Default page index for list endpoints (zero-based)
pub const DEFAULT_PAGE: usize = 0;

/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: usize = 50;
