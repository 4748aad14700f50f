//! Shared constants for end-to-end tests

// ============================================================================
// Jobs
// ============================================================================

/// Job duration the test server is configured with (milliseconds)
pub const TEST_JOB_DURATION_MS: u64 = 5000;

/// Identifier that is never handed out by the server
pub const UNKNOWN_JOB_ID: &str = "job_xyz999";

/// Greeting subject used in nested selections
pub const GREETING_SUBJECT: &str = "world";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
