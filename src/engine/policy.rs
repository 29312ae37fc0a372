//! Per-field notification thresholds.

/// Gear tier a character must exceed before a gear change is broadcast.
pub const DEFAULT_GEAR_THRESHOLD: i32 = 10;

/// Star rarity a character must exceed before a star change is broadcast.
pub const DEFAULT_STAR_THRESHOLD: i32 = 6;

/// Decides which field changes are worth a notification.
///
/// Thresholds only gate the broadcast. The persisted record is always
/// updated to the latest value so the next comparison stays correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyPolicy {
    /// Gear changes notify only when the new gear is strictly greater.
    pub gear_threshold: i32,
    /// Star changes notify only when the new star level is strictly greater.
    pub star_threshold: i32,
}

impl NotifyPolicy {
    /// Creates a policy with explicit thresholds.
    #[must_use]
    pub const fn new(gear_threshold: i32, star_threshold: i32) -> Self {
        Self {
            gear_threshold,
            star_threshold,
        }
    }

    /// Returns `true` if reaching `gear_level` should be broadcast.
    #[must_use]
    pub const fn gear_worthy(&self, gear_level: i32) -> bool {
        gear_level > self.gear_threshold
    }

    /// Returns `true` if reaching `star_level` should be broadcast.
    #[must_use]
    pub const fn star_worthy(&self, star_level: i32) -> bool {
        star_level > self.star_threshold
    }
}

impl Default for NotifyPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_GEAR_THRESHOLD, DEFAULT_STAR_THRESHOLD)
    }
}
