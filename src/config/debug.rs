//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep the noisy ones `false` so release
//! builds remain quiet. All of them are further gated by `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit UI interaction logs (e.g., match selection, settings changes).
    pub print_ui_interactions: bool,
    /// Emit per-source dataset loading attempts and timings.
    pub print_dataset_loading: bool,
    /// Emit a summary line each time a match is (re)analysed.
    pub print_analysis: bool,
    /// Emit rows skipped while parsing the points file.
    pub print_skipped_rows: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_ui_interactions: true,
    print_dataset_loading: true,
    print_analysis: false,
    print_skipped_rows: false,
};
