//! Utility functions for common operations.
//!
//! - **Text formatting**: price/count display and Unicode-aware truncation
//!   for terminal rendering
//! - **URL validation**: scheme checks before handing anything to the
//!   system browser

mod text;
mod url_check;

pub use text::{display_width, format_count, format_price, posted_ago, truncate_to_width};
pub use url_check::validate_url_for_open;
