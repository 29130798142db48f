//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone)]
pub enum Effect {
    /// Fetch one page of the catalog
    FetchList { limit: u32, offset: u32 },
    /// Fetch details for the named entry
    FetchDetails { name: String },
    /// Arm the highlight-clear timer
    ScheduleHighlightClear,
    /// Release the highlight-clear timer on list teardown
    CancelHighlightClear,
}
