//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use std::time::Duration;

/// Host the seeded example queries point at (the bundled mock server)
pub const DEFAULT_BASE_URL: &str = "http://localhost:8090";

/// Delay added after a response arrives so the waiting state is visible
pub const DEFAULT_ARTIFICIAL_DELAY: Duration = Duration::from_secs(1);

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "courier.log";

/// Width of the saved-query sidebar in terminal cells
pub const QUERY_SIDEBAR_WIDTH: u16 = 30;

/// Header whose value is never rendered
pub const MASKED_HEADER: &str = "Authorization";

/// Replacement text for a masked header value
pub const MASKED_VALUE: &str = "Bearer ********";

/// Application name
pub const APP_NAME: &str = "courier";
