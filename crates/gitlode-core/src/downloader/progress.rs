//! Progress accounting for blob downloads.

/// Files completed out of the total for one export. `completed_count` only grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DownloadProgress {
    pub completed_count: usize,
    pub total_count: usize,
}

impl DownloadProgress {
    pub fn new(total_count: usize) -> Self {
        Self {
            completed_count: 0,
            total_count,
        }
    }

    /// Fraction complete in [0.0, 1.0]; 0 when there is nothing to do.
    pub fn fraction(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        (self.completed_count as f64 / self.total_count as f64).min(1.0)
    }

    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.total_count > 0 && self.completed_count >= self.total_count
    }

    pub(crate) fn record_completed(&mut self) {
        self.completed_count = (self.completed_count + 1).min(self.total_count);
    }
}
