//! The fixed lodging rate table and the stay-charge algorithm.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Per-night rates in minor currency units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateTable {
    pub weekday_minor: i64,
    pub weekend_minor: i64,
    pub weekday_vehicle_minor: i64,
    pub weekend_vehicle_minor: i64,
}

/// The hotel's rate table: 120 per weekday night, 150 per weekend night,
/// with a 15/20 vehicle add-on.
pub const STANDARD_RATES: RateTable = RateTable {
    weekday_minor: 120_00,
    weekend_minor: 150_00,
    weekday_vehicle_minor: 15_00,
    weekend_vehicle_minor: 20_00,
};

impl RateTable {
    pub fn base_minor(&self, day: Weekday) -> i64 {
        if is_weekend(day) {
            self.weekend_minor
        } else {
            self.weekday_minor
        }
    }

    pub fn vehicle_minor(&self, day: Weekday) -> i64 {
        if is_weekend(day) {
            self.weekend_vehicle_minor
        } else {
            self.weekday_vehicle_minor
        }
    }
}

fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Total charge for one stay, in minor units.
///
/// One night is charged per calendar day from the entry date through the
/// exit date, inclusive. Checkouts strictly past 16:30 add one extra base
/// rate for the exit weekday, never the vehicle add-on. The lateness test
/// is the two-field comparison `hour >= 16 && minute > 30`: 16:30:00 on
/// the dot is not late, and neither is 17:20.
///
/// An exit before the entry yields no nights; the late-checkout rule is
/// still evaluated against the exit timestamp.
pub fn stay_charge_minor(
    rates: &RateTable,
    entry_time: NaiveDateTime,
    exit_time: NaiveDateTime,
    vehicle_surcharge: bool,
) -> i64 {
    let end_day = exit_time.date();
    let mut day = entry_time.date();
    let mut total = 0;

    while day <= end_day {
        total += rates.base_minor(day.weekday());
        if vehicle_surcharge {
            total += rates.vehicle_minor(day.weekday());
        }
        let Some(next) = day.succ_opt() else {
            break;
        };
        day = next;
    }

    if exit_time.hour() >= 16 && exit_time.minute() > 30 {
        total += rates.base_minor(exit_time.weekday());
    }

    total
}
