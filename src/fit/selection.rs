//! Model selection over sweep output.
//!
//! The sweep emits every fit; selection picks the interesting ones:
//! - a global ranking by AIC (or MSE)
//! - the best subset for every size
//!
//! Ordering is deterministic: non-finite scores sort last, ties are broken by
//! subset size and then lexicographic subset order.

use std::cmp::Ordering;

use crate::domain::{FitRecord, RankBy, SizeBatch};

/// Compare two records by `criterion`, lower first.
pub fn compare_records(criterion: RankBy, a: &FitRecord, b: &FitRecord) -> Ordering {
    compare_scores(criterion.score(a), criterion.score(b))
        .then_with(|| a.size().cmp(&b.size()))
        .then_with(|| a.subset.cmp(&b.subset))
}

fn compare_scores(a: f64, b: f64) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// The `top_n` best records by `criterion`.
pub fn rank_records(records: &[FitRecord], criterion: RankBy, top_n: usize) -> Vec<FitRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare_records(criterion, a, b));
    sorted.truncate(top_n);
    sorted
}

pub fn rank_by_aic(records: &[FitRecord], top_n: usize) -> Vec<FitRecord> {
    rank_records(records, RankBy::Aic, top_n)
}

pub fn rank_by_mse(records: &[FitRecord], top_n: usize) -> Vec<FitRecord> {
    rank_records(records, RankBy::Mse, top_n)
}

/// The best record for each subset size, in increasing size.
pub fn best_per_size(records: &[FitRecord], criterion: RankBy) -> Vec<FitRecord> {
    let mut best: Vec<FitRecord> = Vec::new();
    for r in records {
        match best.iter_mut().find(|b| b.size() == r.size()) {
            Some(slot) => {
                if compare_records(criterion, r, slot) == Ordering::Less {
                    *slot = r.clone();
                }
            }
            None => best.push(r.clone()),
        }
    }
    best.sort_by_key(FitRecord::size);
    best
}

/// Bounded top-N accumulator fed one size batch at a time.
///
/// Keeps at most `capacity` records plus the best record of every size seen, so
/// a large sweep never has to be held in memory.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    criterion: RankBy,
    capacity: usize,
    top: Vec<FitRecord>,
    per_size: Vec<FitRecord>,
}

impl Leaderboard {
    pub fn new(criterion: RankBy, capacity: usize) -> Self {
        Self {
            criterion,
            capacity,
            top: Vec::with_capacity(capacity + 1),
            per_size: Vec::new(),
        }
    }

    pub fn criterion(&self) -> RankBy {
        self.criterion
    }

    pub fn push(&mut self, record: &FitRecord) {
        if self.capacity > 0 {
            let pos = self
                .top
                .partition_point(|r| compare_records(self.criterion, r, record) != Ordering::Greater);
            if pos < self.capacity {
                self.top.insert(pos, record.clone());
                self.top.truncate(self.capacity);
            }
        }

        match self.per_size.iter_mut().find(|b| b.size() == record.size()) {
            Some(slot) => {
                if compare_records(self.criterion, record, slot) == Ordering::Less {
                    *slot = record.clone();
                }
            }
            None => {
                self.per_size.push(record.clone());
                self.per_size.sort_by_key(FitRecord::size);
            }
        }
    }

    pub fn push_batch(&mut self, batch: &SizeBatch) {
        for record in batch.records() {
            self.push(record);
        }
    }

    /// Best records overall, best first.
    pub fn top(&self) -> &[FitRecord] {
        &self.top
    }

    /// Best record per subset size, in increasing size.
    pub fn best_per_size(&self) -> &[FitRecord] {
        &self.per_size
    }

    pub fn best(&self) -> Option<&FitRecord> {
        self.top.first().or_else(|| {
            self.per_size
                .iter()
                .min_by(|a, b| compare_records(self.criterion, a, b))
        })
    }
}
