//! Status icons for table output

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    pub const SUCCESS: &'static str = "✓";

    /// Some but not all replicas ready
    pub const WARNING: &'static str = "⚠";

    pub const ERROR: &'static str = "✗";

    /// Nothing declared, e.g. a workload that does not exist
    pub const UNKNOWN: &'static str = "?";

    pub fn get_replica_icon(ready: u32, total: u32) -> &'static str {
        if total == 0 {
            Self::UNKNOWN
        } else if ready == total {
            Self::SUCCESS
        } else if ready > 0 {
            Self::WARNING
        } else {
            Self::ERROR
        }
    }

    pub fn get_ready_icon(ready: bool) -> &'static str {
        if ready {
            Self::SUCCESS
        } else {
            Self::ERROR
        }
    }
}
