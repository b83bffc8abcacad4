//! Fixed-capacity buffer that evicts its oldest entry first.

use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct RingBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Create an empty buffer. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `item`, returning the evicted oldest entry if full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    /// The newest `n` entries, oldest first.
    pub fn last_n(&self, n: usize) -> impl Iterator<Item = &T> {
        self.items.iter().skip(self.items.len().saturating_sub(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_newest_in_arrival_order() {
        let mut buf = RingBuffer::new(500);
        for i in 0..1234u32 {
            buf.push(i);
        }
        assert_eq!(buf.len(), 500);
        let kept: Vec<u32> = buf.iter().copied().collect();
        let expected: Vec<u32> = (734..1234).collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn test_push_reports_eviction() {
        let mut buf = RingBuffer::new(2);
        assert_eq!(buf.push('a'), None);
        assert_eq!(buf.push('b'), None);
        assert_eq!(buf.push('c'), Some('a'));
        assert_eq!(buf.latest(), Some(&'c'));
    }

    #[test]
    fn test_last_n() {
        let mut buf = RingBuffer::new(10);
        for i in 0..6 {
            buf.push(i);
        }
        assert_eq!(buf.last_n(3).copied().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(buf.last_n(100).count(), 6);
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut buf = RingBuffer::new(0);
        buf.push(1);
        buf.push(2);
        assert_eq!(buf.capacity(), 1);
        assert_eq!(buf.iter().copied().collect::<Vec<_>>(), vec![2]);
    }
}
