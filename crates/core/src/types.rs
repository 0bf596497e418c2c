/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (time-off ranges) carry no time zone; they are
/// interpreted against the UTC date of the evaluation instant.
pub type Date = chrono::NaiveDate;

/// Wall-clock shift boundaries, interpreted in UTC.
pub type TimeOfDay = chrono::NaiveTime;
