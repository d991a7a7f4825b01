use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};

/// Half-open time interval `[start, end)` owned by a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Period {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if end <= start {
            return Err(AppError::InvalidPeriod(
                "period end must be after its start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Half-open overlap check. Periods that merely touch do not overlap:
    /// a 09:00-10:00 booking does not conflict with a 10:00-11:00 one.
    pub fn overlaps(&self, other: &Period) -> bool {
        self.start < other.end && self.end > other.start
    }
}
