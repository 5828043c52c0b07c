use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use fit_model::sample::SamplePredicate;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// First instant of `date` in `tz`.
///
/// This is local midnight unless a clock change skips midnight, in which
/// case the day begins at the first local minute that exists.
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    (0..MINUTES_PER_DAY)
        .map(|minute| midnight + Duration::minutes(minute))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
}

/// Bounds of the local day containing `now`: its start and the start of
/// the following day.
///
/// The zone is recovered with `now.timezone()`, so `Tz::from_offset` must
/// keep the zone's transition rules (as `Local` does); a bare fixed offset
/// always yields 24-hour days.
pub fn day_bounds<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
    let tz = now.timezone();
    let today = now.date_naive();
    let start = start_of_day(&tz, today)?;
    let end = start_of_day(&tz, today.succ_opt()?)?;
    Some((start, end))
}

/// Portion of the local day that has passed at `now`, in `[0, 1)`.
///
/// The denominator is the real length of the day, so days shortened or
/// lengthened by daylight saving time count 23 or 25 hours.
pub fn fraction_of_day_elapsed<Tz: TimeZone>(now: &DateTime<Tz>) -> f64 {
    let Some((start, end)) = day_bounds(now) else {
        return 0.0;
    };
    let elapsed = now.naive_utc() - start.naive_utc();
    let length = end.naive_utc() - start.naive_utc();
    elapsed.num_milliseconds() as f64 / length.num_milliseconds() as f64
}

/// Predicate selecting samples of the local day containing `now`.
pub fn today_predicate<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<SamplePredicate> {
    let (start, end) = day_bounds(now)?;
    Some(SamplePredicate::between(
        start.with_timezone(&Utc),
        end.with_timezone(&Utc),
    ))
}

/// Whole years between `date_of_birth` and `today`; zero for births in
/// the future.
pub fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}
