/// Fixed page size for the paged client listing
pub const CLIENTES_PAGE_SIZE: i64 = 4;

/// Default validity window for issued access tokens (30 days)
pub const DEFAULT_TOKEN_VALIDITY_SECS: u64 = 2_592_000;
