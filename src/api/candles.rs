use chrono::{DateTime, Utc};

use crate::http::request::QueryParams;

/// Optional parameters of a candle request. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandleOptions {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// e.g. `S5`, `M1`, `H1`, `D`.
    pub granularity: Option<String>,
    pub count: Option<u32>,
    /// `midpoint` or `bidask`.
    pub candle_format: Option<String>,
    pub include_first: Option<bool>,
    pub daily_alignment: Option<u8>,
    pub alignment_timezone: Option<String>,
    pub weekly_alignment: Option<String>,
}

impl CandleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn granularity(mut self, granularity: impl Into<String>) -> Self {
        self.granularity = Some(granularity.into());
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn candle_format(mut self, candle_format: impl Into<String>) -> Self {
        self.candle_format = Some(candle_format.into());
        self
    }

    pub fn include_first(mut self, include_first: bool) -> Self {
        self.include_first = Some(include_first);
        self
    }

    pub fn daily_alignment(mut self, hour: u8) -> Self {
        self.daily_alignment = Some(hour);
        self
    }

    pub fn alignment_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.alignment_timezone = Some(timezone.into());
        self
    }

    pub fn weekly_alignment(mut self, day: impl Into<String>) -> Self {
        self.weekly_alignment = Some(day.into());
        self
    }

    /// Flattens the options together with the instrument into one query.
    pub fn to_query(&self, instrument: &str) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .push("instrument", instrument)
            .push_time("start", self.start.as_ref())
            .push_time("end", self.end.as_ref())
            .push_opt("granularity", self.granularity.as_deref())
            .push_opt("count", self.count)
            .push_opt("candleFormat", self.candle_format.as_deref())
            .push_opt("includeFirst", self.include_first)
            .push_opt("dailyAlignment", self.daily_alignment)
            .push_opt("alignmentTimezone", self.alignment_timezone.as_deref())
            .push_opt("weeklyAlignment", self.weekly_alignment.as_deref());
        query
    }
}
