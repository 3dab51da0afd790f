mod maths_utils;
mod time_utils;

pub use maths_utils::{floor_price, pct_change, safe_ratio};
pub use time_utils::{TimeUtils, epoch_ms_to_utc, format_duration};
