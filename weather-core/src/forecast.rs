//! Reduces the three-hourly forecast to one record per calendar day.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::model::IntervalRecord;

/// Upper bound on the number of days kept from a forecast.
pub const MAX_FORECAST_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// First interval record seen for `date`.
    pub record: IntervalRecord,
}

/// Days in the order their dates first appear in the source, at most
/// [`MAX_FORECAST_DAYS`] long.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastSeries {
    days: Vec<ForecastDay>,
}

impl ForecastSeries {
    pub fn days(&self) -> &[ForecastDay] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastDay> {
        self.days.iter()
    }
}

impl<'a> IntoIterator for &'a ForecastSeries {
    type Item = &'a ForecastDay;
    type IntoIter = std::slice::Iter<'a, ForecastDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

/// Keep the first record of each calendar date, in input order, and stop once
/// seven dates are collected. No averaging is done.
pub fn normalize_forecast<I>(records: I) -> ForecastSeries
where
    I: IntoIterator<Item = IntervalRecord>,
{
    let mut seen = HashSet::new();
    let mut days = Vec::with_capacity(MAX_FORECAST_DAYS);

    for record in records {
        if days.len() == MAX_FORECAST_DAYS {
            break;
        }

        let date = record.date();
        if seen.insert(date) {
            days.push(ForecastDay { date, record });
        }
    }

    ForecastSeries { days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDateTime};

    fn parse(ts: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn record_at(timestamp: NaiveDateTime, temp: f64) -> IntervalRecord {
        IntervalRecord {
            timestamp,
            temperature_c: temp,
            feels_like_c: temp,
            humidity_pct: 50,
            wind_speed_mps: Some(1.0),
            temp_min_c: temp,
            temp_max_c: temp,
            condition: "Clouds".into(),
            description: "broken clouds".into(),
        }
    }

    fn record(ts: &str, temp: f64) -> IntervalRecord {
        record_at(parse(ts), temp)
    }

    fn three_hourly(start: &str, count: usize) -> Vec<IntervalRecord> {
        let start = parse(start);
        (0..count)
            .map(|i| record_at(start + Duration::hours(3 * i as i64), i as f64))
            .collect()
    }

    fn dates(series: &ForecastSeries) -> Vec<String> {
        series.iter().map(|d| d.date.to_string()).collect()
    }

    #[test]
    fn empty_input_gives_empty_series() {
        let series = normalize_forecast(Vec::new());
        assert!(series.is_empty());
    }

    #[test]
    fn ten_records_over_four_dates_give_four_days() {
        let records = vec![
            record("2024-03-01 18:00:00", 1.0),
            record("2024-03-01 21:00:00", 2.0),
            record("2024-03-02 00:00:00", 3.0),
            record("2024-03-02 03:00:00", 4.0),
            record("2024-03-02 06:00:00", 5.0),
            record("2024-03-03 09:00:00", 6.0),
            record("2024-03-03 12:00:00", 7.0),
            record("2024-03-03 15:00:00", 8.0),
            record("2024-03-04 00:00:00", 9.0),
            record("2024-03-04 03:00:00", 10.0),
        ];

        let series = normalize_forecast(records);

        assert_eq!(series.len(), 4);
        assert_eq!(dates(&series), ["2024-03-01", "2024-03-02", "2024-03-03", "2024-03-04"]);
    }

    #[test]
    fn first_record_of_each_date_is_representative() {
        let records = vec![
            record("2024-03-01 21:00:00", 1.0),
            record("2024-03-01 22:00:00", 99.0),
            record("2024-03-02 00:00:00", 2.0),
            record("2024-03-02 12:00:00", 99.0),
        ];

        let series = normalize_forecast(records);

        let temps: Vec<f64> = series.iter().map(|d| d.record.temperature_c).collect();
        assert_eq!(temps, [1.0, 2.0]);
    }

    #[test]
    fn dates_keep_first_seen_order_even_when_unsorted() {
        let records = vec![
            record("2024-03-02 00:00:00", 1.0),
            record("2024-03-01 00:00:00", 2.0),
            record("2024-03-02 03:00:00", 3.0),
        ];

        let series = normalize_forecast(records);
        assert_eq!(dates(&series), ["2024-03-02", "2024-03-01"]);
        assert_eq!(series.days()[0].record.temperature_c, 1.0);
    }

    #[test]
    fn caps_at_seven_days_and_drops_later_dates() {
        // 10 days of three-hourly data.
        let series = normalize_forecast(three_hourly("2024-03-01 00:00:00", 80));

        assert_eq!(series.len(), MAX_FORECAST_DAYS);
        assert_eq!(series.days()[0].date.to_string(), "2024-03-01");
        assert_eq!(series.days()[6].date.to_string(), "2024-03-07");
    }

    #[test]
    fn fewer_than_seven_dates_are_not_padded() {
        // Typical five-day/three-hour payload starting mid-day: 40 records, 6 dates.
        let input = three_hourly("2024-03-01 12:00:00", 40);
        let distinct: HashSet<_> = input.iter().map(IntervalRecord::date).collect();

        let series = normalize_forecast(input);

        assert_eq!(series.len(), distinct.len());
        assert!(series.len() <= MAX_FORECAST_DAYS);
    }

    #[test]
    fn output_never_exceeds_distinct_dates_or_cap() {
        for count in [0, 1, 7, 8, 9, 24, 56, 57, 100] {
            let input = three_hourly("2024-12-30 06:00:00", count);
            let distinct: HashSet<_> = input.iter().map(IntervalRecord::date).collect();

            let series = normalize_forecast(input.clone());

            assert!(series.len() <= MAX_FORECAST_DAYS);
            assert!(series.len() <= distinct.len());
            for day in &series {
                let first = input.iter().find(|r| r.date() == day.date).unwrap();
                assert_eq!(&day.record, first);
            }
        }
    }
}
