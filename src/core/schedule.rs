use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};

pub const OPENING_HOUR: u32 = 9;
pub const CLOSING_HOUR: u32 = 17;

fn on_the_hour(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

pub fn opening_time() -> NaiveTime {
    on_the_hour(OPENING_HOUR)
}

pub fn closing_time() -> NaiveTime {
    on_the_hour(CLOSING_HOUR)
}

pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Bookings open from tomorrow onward, Monday to Friday.
pub fn is_bookable_date(date: NaiveDate, today: NaiveDate) -> bool {
    is_weekday(date) && date > today
}

pub fn within_working_hours(time: NaiveTime) -> bool {
    time >= opening_time() && time <= closing_time()
}

/// Pulls an out-of-hours time onto the nearest boundary; in-range times are untouched.
pub fn clamp_to_working_hours(time: NaiveTime) -> NaiveTime {
    if time < opening_time() {
        opening_time()
    } else if time > closing_time() {
        closing_time()
    } else {
        time
    }
}

/// Hourly slots 09:00 through 17:00.
pub fn time_slots() -> Vec<NaiveTime> {
    (OPENING_HOUR..=CLOSING_HOUR).map(on_the_hour).collect()
}

pub fn available_slots(date: NaiveDate, today: NaiveDate) -> Vec<NaiveTime> {
    if is_bookable_date(date, today) {
        time_slots()
    } else {
        Vec::new()
    }
}

pub fn next_bookable_date(today: NaiveDate) -> Option<NaiveDate> {
    (1..=7)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .find(|date| is_weekday(*date))
}
