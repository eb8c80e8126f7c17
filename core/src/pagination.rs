//! Incremental "Show More" pagination over an in-memory result set.

/// Number of leading result-set elements currently rendered.
///
/// Starts at `page_size`, grows by `page_size` per `grow`, and returns to
/// `page_size` on `reset`. Never smaller than one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page_size: usize,
    visible: usize,
}

impl PageWindow {
    /// A `page_size` of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            visible: page_size,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn grow(&mut self) {
        self.visible = self.visible.saturating_add(self.page_size);
    }

    pub fn reset(&mut self) {
        self.visible = self.page_size;
    }

    /// The leading slice of `items` that should be materialized.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible.min(items.len())]
    }

    /// Whether `total` items overflow the window.
    pub fn has_more(&self, total: usize) -> bool {
        total > self.visible
    }
}
