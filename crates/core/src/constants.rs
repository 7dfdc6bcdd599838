/// Decimal places kept on percentages sent to the client
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Prefix used to synthesize a display name for securities without one
pub const UNNAMED_SECURITY_PREFIX: &str = "Security ";

/// Query parameter carrying a shared portfolio payload
pub const SHARE_QUERY_KEY: &str = "s";

/// Default ceiling for upstream-hitting requests per process lifetime
pub const DEFAULT_MAX_REQUESTS: u64 = 100;
