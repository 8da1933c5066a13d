use crate::models::{ApplicationRecord, Status};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub interview: usize,
    pub offer: usize,
    pub rejected: usize,
}

impl Stats {
    /// Counter labels and values in display order.
    pub fn counters(&self) -> [(&'static str, usize); 4] {
        [
            ("Total Applications", self.total),
            ("Interviews", self.interview),
            ("Offers", self.offer),
            ("Rejected", self.rejected),
        ]
    }
}

pub fn aggregate(records: &[ApplicationRecord]) -> Stats {
    let count = |status: Status| records.iter().filter(|r| r.status == status).count();
    Stats {
        total: records.len(),
        interview: count(Status::Interview),
        offer: count(Status::Offer),
        rejected: count(Status::Rejected),
    }
}
