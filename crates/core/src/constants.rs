/// Constants used throughout the amalfi workspace
// Environment variable names
pub const AMALFI_LOG_VAR: &str = "AMALFI_LOG";
pub const AMALFI_MAX_RETRIES_VAR: &str = "AMALFI_MAX_RETRIES";
pub const AMALFI_RETRY_BASE_DELAY_MS_VAR: &str = "AMALFI_RETRY_BASE_DELAY_MS";
pub const AMALFI_RETRY_MAX_DELAY_MS_VAR: &str = "AMALFI_RETRY_MAX_DELAY_MS";
pub const AMALFI_RETRY_JITTER_VAR: &str = "AMALFI_RETRY_JITTER";
pub const AMALFI_MEMO_CAPACITY_VAR: &str = "AMALFI_MEMO_CAPACITY";
pub const AMALFI_MAX_CONCURRENCY_VAR: &str = "AMALFI_MAX_CONCURRENCY";

// Default log filter when AMALFI_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

// Retry defaults
pub const DEFAULT_MAX_RETRIES: usize = 3;
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 100;
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 10_000;
pub const DEFAULT_RETRY_JITTER: f64 = 0.1;

// Memoization and fan-out defaults
pub const DEFAULT_MEMO_CAPACITY: usize = 1024;
pub const DEFAULT_MAX_CONCURRENCY: usize = 64;
