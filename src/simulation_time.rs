use crate::core::units::{DAYS_PER_YEAR, HOURS_PER_DAY};
use serde::Serialize;
use std::ops::Range;
use strum::{Display, EnumIter};

// Day indices that start each month (and end the previous one). There are 13
// values so that the end of the final month is handled correctly.
// E.g. Jan is days 0-30
pub const MONTH_START_END_DAYS: [u32; 13] =
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];

#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The 0-indexed days of the year falling in this month.
    pub fn days(&self) -> Range<usize> {
        let idx = self.index();
        MONTH_START_END_DAYS[idx] as usize..MONTH_START_END_DAYS[idx + 1] as usize
    }
}

/// A single hour of the (non-leap) simulation year.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HourOfYear {
    /// day of the year, 0 to 364
    pub day: u32,
    /// hour of the day, 0 to 23
    pub hour: u32,
}

impl HourOfYear {
    pub fn new(day: u32, hour: u32) -> Self {
        Self { day, hour }
    }

    /// Index into an hourly annual series.
    pub fn series_idx(&self) -> usize {
        (self.day * HOURS_PER_DAY + self.hour) as usize
    }
}

pub fn days_of_year() -> Range<u32> {
    0..DAYS_PER_YEAR
}
