//! Splitting flat item lists into fixed-size rows and pages.

/// One row of a paginated list.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a, T> {
    /// Zero-based row index.
    pub index: usize,
    pub items: &'a [T],
}

/// Split `items` into `ceil(len / page_size)` rows, in original order.
///
/// A page size of zero is treated as one.
pub fn paginate<T>(items: &[T], page_size: usize) -> Vec<Row<'_, T>> {
    items
        .chunks(page_size.max(1))
        .enumerate()
        .map(|(index, items)| Row { index, items })
        .collect()
}

/// Number of rows [`paginate`] produces.
pub fn row_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Server-side paging cursor (limit/offset) for catalog searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub limit: u32,
    pub offset: u32,
}

impl PageCursor {
    pub fn first(limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            offset: 0,
        }
    }

    /// One-based page number.
    pub fn page_number(&self) -> u32 {
        self.offset / self.limit.max(1) + 1
    }

    pub fn page_count(&self, total: u64) -> u32 {
        let limit = u64::from(self.limit.max(1));
        total.div_ceil(limit).max(1).min(u64::from(u32::MAX)) as u32
    }

    pub fn has_next(&self, total: u64) -> bool {
        u64::from(self.offset) + u64::from(self.limit) < total
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    pub fn next(self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            ..self
        }
    }

    pub fn previous(self) -> Self {
        Self {
            offset: self.offset.saturating_sub(self.limit),
            ..self
        }
    }
}
