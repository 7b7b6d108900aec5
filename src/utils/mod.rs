mod aggregation;
mod format;

pub use aggregation::{group_sum, round_to, GroupTotal};
pub use format::format_thousands;
