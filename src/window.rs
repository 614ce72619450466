//! Windowed render calculation: which rows intersect the viewport, and how
//! much spacer padding stands in for everything else.

/// The contiguous range of rows to materialize, plus spacer padding.
///
/// `top_padding + materialized heights + bottom_padding` always equals the
/// total estimated height of the row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportWindow {
    /// First materialized row (inclusive)
    pub start: usize,
    /// One past the last materialized row
    pub end: usize,
    /// Height of the spacer above the window, in cells
    pub top_padding: usize,
    /// Height of the spacer below the window, in cells
    pub bottom_padding: usize,
}

impl ViewportWindow {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

/// Estimate-then-measure height bookkeeping over a row set.
///
/// Every row starts at the per-row estimate. Once a row has actually been
/// rendered and measured, [`WindowCalculator::measure`] pins its real height.
/// Prefix offsets are rebuilt lazily on the next [`WindowCalculator::compute`]
/// call, not on measurement, so a burst of measurements during one render
/// costs a single rebuild.
#[derive(Debug, Clone)]
pub struct WindowCalculator {
    /// Height of an unmeasured row, floored at 1
    estimate: usize,
    /// Measured heights by row index; `None` falls back to the estimate
    measured: Vec<Option<usize>>,
    /// Prefix sums; `offsets[i]` is the top of row `i`, last entry is the total.
    /// Valid only when `!dirty` and `offsets.len() == row_count + 1`.
    offsets: Vec<usize>,
    dirty: bool,
}

impl WindowCalculator {
    pub fn new(estimate: usize) -> Self {
        Self {
            estimate: estimate.max(1),
            measured: Vec::new(),
            offsets: vec![0],
            dirty: true,
        }
    }

    /// Replace the per-row estimate for rows without a measurement.
    /// Non-positive values are floored at 1.
    pub fn set_estimate(&mut self, estimate: usize) {
        let estimate = estimate.max(1);
        if estimate != self.estimate {
            self.estimate = estimate;
            self.dirty = true;
        }
    }

    /// Record the rendered height of a row. Zero heights are floored at 1.
    /// Offsets recompute on the next `compute` call.
    pub fn measure(&mut self, index: usize, height: usize) {
        let height = height.max(1);
        if index >= self.measured.len() {
            self.measured.resize(index + 1, None);
        }
        if self.measured[index] != Some(height) {
            self.measured[index] = Some(height);
            self.dirty = true;
        }
    }

    /// Drop all measurements (row identities changed wholesale).
    pub fn reset_measurements(&mut self) {
        if !self.measured.is_empty() {
            self.measured.clear();
            self.dirty = true;
        }
    }

    /// Height of a single row: measured if known, the estimate otherwise.
    pub fn height_of(&self, index: usize) -> usize {
        self.measured
            .get(index)
            .copied()
            .flatten()
            .unwrap_or(self.estimate)
    }

    fn rebuild_offsets(&mut self, row_count: usize) {
        // Measurements past the end of a shrunk row set are stale.
        if self.measured.len() > row_count {
            self.measured.truncate(row_count);
        }

        self.offsets.clear();
        self.offsets.reserve(row_count + 1);
        self.offsets.push(0);
        let mut acc = 0usize;
        for i in 0..row_count {
            acc += self.height_of(i);
            self.offsets.push(acc);
        }
        self.dirty = false;
    }

    fn ensure_offsets(&mut self, row_count: usize) {
        if self.dirty || self.offsets.len() != row_count + 1 {
            self.rebuild_offsets(row_count);
        }
    }

    /// Total height of `row_count` rows under the current height table.
    pub fn total_height(&mut self, row_count: usize) -> usize {
        self.ensure_offsets(row_count);
        *self.offsets.last().unwrap_or(&0)
    }

    /// Compute the materialize window for the current scroll position.
    ///
    /// The returned `[start, end)` lies within `[0, row_count)` and is empty
    /// (with zero padding) when `row_count == 0`. `overscan` rows pad both
    /// ends of the visible range against scroll flicker.
    pub fn compute(
        &mut self,
        viewport_height: usize,
        scroll_offset: usize,
        row_count: usize,
        overscan: usize,
    ) -> ViewportWindow {
        if row_count == 0 {
            return ViewportWindow::default();
        }

        self.ensure_offsets(row_count);
        let total = *self.offsets.last().unwrap_or(&0);

        // Largest row whose top is at or above the scroll offset.
        let first_visible = self
            .offsets
            .partition_point(|&top| top <= scroll_offset)
            .saturating_sub(1)
            .min(row_count - 1);

        // First row fully below the viewport bottom.
        let viewport_bottom = scroll_offset.saturating_add(viewport_height);
        let mut last_visible = first_visible;
        while last_visible + 1 < row_count && self.offsets[last_visible + 1] < viewport_bottom {
            last_visible += 1;
        }

        let start = first_visible.saturating_sub(overscan);
        let end = (last_visible + 1 + overscan).min(row_count);

        ViewportWindow {
            start,
            end,
            top_padding: self.offsets[start],
            bottom_padding: total - self.offsets[end],
        }
    }

    /// Minimal scroll adjustment that brings `index` fully into view
    /// ("nearest" alignment). Returns the current offset unchanged when the
    /// row is already visible.
    pub fn scroll_to(
        &mut self,
        index: usize,
        viewport_height: usize,
        scroll_offset: usize,
        row_count: usize,
    ) -> usize {
        if row_count == 0 {
            return 0;
        }
        self.ensure_offsets(row_count);

        let index = index.min(row_count - 1);
        let row_top = self.offsets[index];
        let row_bottom = self.offsets[index + 1];

        if row_top < scroll_offset {
            row_top
        } else if row_bottom > scroll_offset + viewport_height {
            row_bottom.saturating_sub(viewport_height)
        } else {
            scroll_offset
        }
    }

    /// Content offset of a row's top edge
    pub fn offset_of(&mut self, index: usize, row_count: usize) -> usize {
        self.ensure_offsets(row_count);
        self.offsets
            .get(index)
            .copied()
            .unwrap_or_else(|| *self.offsets.last().unwrap_or(&0))
    }

    /// Row containing a content offset, for pointer hit-testing. `None` when
    /// the offset lies past the end of the content.
    pub fn index_at_offset(&mut self, offset: usize, row_count: usize) -> Option<usize> {
        if row_count == 0 {
            return None;
        }
        self.ensure_offsets(row_count);
        if offset >= *self.offsets.last().unwrap_or(&0) {
            return None;
        }
        Some(
            self.offsets
                .partition_point(|&top| top <= offset)
                .saturating_sub(1)
                .min(row_count - 1),
        )
    }

    /// Clamp a scroll offset so the viewport never runs past the content.
    pub fn clamp_offset(
        &mut self,
        scroll_offset: usize,
        viewport_height: usize,
        row_count: usize,
    ) -> usize {
        let total = self.total_height(row_count);
        scroll_offset.min(total.saturating_sub(viewport_height))
    }
}
