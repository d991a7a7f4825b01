use chrono::{DateTime, Utc};
use garde::Validate;
use serde::Deserialize;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    #[garde(skip)]
    pub start: DateTime<Utc>,
    #[garde(skip)]
    pub end: DateTime<Utc>,
}
