use std::collections::VecDeque;

/// History points kept for each chart.
pub const SERIES_CAPACITY: usize = 60;

/// Fixed-capacity FIFO of chart samples. When a push exceeds the capacity the
/// oldest sample is evicted, so the contents are always the most recent
/// `capacity` values in chronological order.
#[derive(Debug, Clone)]
pub struct RollingSeries {
    values: VecDeque<f64>,
    capacity: usize,
}

impl RollingSeries {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for RollingSeries {
    fn default() -> Self {
        Self::new(SERIES_CAPACITY)
    }
}
