//! Debugging feature flags.

pub struct LogFlags {
    /// Log parent/child matching and orphan counts per degree.
    pub log_grouping: bool,

    /// Log which cascade stage produced the suggestion (and which ones declined).
    pub log_cascade: bool,

    /// Log every projection context as it is computed.
    pub log_projections: bool,

    /// Log entries skipped because their degree is not in the hierarchy.
    pub log_unknown_degrees: bool,
}

pub const DF: LogFlags = LogFlags {
    log_unknown_degrees: true,

    log_grouping: false,
    log_cascade: false,
    log_projections: false,
};
