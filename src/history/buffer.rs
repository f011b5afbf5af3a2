use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 60;

/// Fixed-capacity series. Index 0 is the oldest sample, `len() - 1` the newest.
#[derive(Debug, Clone)]
pub struct RollingHistory<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> RollingHistory<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `value`, dropping the oldest sample first when full.
    pub fn append(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }

    pub fn as_sequence(&self) -> Vec<T> {
        self.data.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<T> {
        self.data.back().cloned()
    }

    /// The newest `n` samples, oldest first.
    pub fn last_n(&self, n: usize) -> Vec<T> {
        let skip = self.data.len().saturating_sub(n);
        self.data.iter().skip(skip).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T: Clone> Default for RollingHistory<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
