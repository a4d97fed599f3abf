/// Rows between two progress reports of a basin render.
pub const PROGRESS_ROW_INTERVAL: u32 = 20;

/// Share of a basin render completed after a row, in percent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProgressEvent {
    pub percent: f64,
}

impl ProgressEvent {
    /// The report due after finishing `row` (zero based) of `height`, if any.
    /// Reports fall on every [`PROGRESS_ROW_INTERVAL`]th row and on the last.
    #[must_use]
    pub fn after_row(row: u32, height: u32) -> Option<Self> {
        let done = row + 1;
        if done % PROGRESS_ROW_INTERVAL != 0 && done != height {
            return None;
        }

        Some(Self {
            percent: 100.0 * f64::from(done) / f64::from(height),
        })
    }
}
