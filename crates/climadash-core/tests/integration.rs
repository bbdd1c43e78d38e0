//! Integration tests for climadash-core.
//!
//! These run the dashboard state container against [`MockSource`] and check
//! aggregation properties with proptest. No network is needed.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use climadash_core::dashboard::execute;
use climadash_core::{
    Command, Dashboard, DashboardConfig, DashboardView, MockSource, MonthlyAggregator,
    aggregate_daily,
};
use climadash_types::Reading;
use proptest::prelude::*;
use time::macros::datetime;
use time::{Date, Month, PrimitiveDateTime, Time, UtcOffset};

fn reading(id: usize, date: time::OffsetDateTime, temp: f64, humidity: f64) -> Reading {
    Reading {
        id: id.to_string(),
        date,
        internal_temperature: temp,
        external_temperature: temp / 2.0,
        internal_humidity: humidity,
        external_humidity: 100.0 - humidity,
    }
}

fn config(month: Month) -> DashboardConfig {
    DashboardConfig {
        page_size: 15,
        year: 2024,
        offset: UtcOffset::UTC,
        month: Some(month),
    }
}

async fn run_all(dashboard: &mut Dashboard, source: &MockSource, commands: Vec<Command>) {
    for command in commands {
        if let Some(event) = execute(source, command).await {
            dashboard.apply(event);
        }
    }
}

// ==========================================================================
// Dashboard against the mock source
// ==========================================================================

#[tokio::test]
async fn test_dashboard_first_load() {
    let readings: Vec<Reading> = (0..31)
        .map(|i| reading(i, datetime!(2024-05-01 00:00 UTC), 20.0, 50.0))
        .collect();
    let source = MockSource::new(readings);
    let mut dashboard = Dashboard::new(config(Month::May));

    let commands = dashboard.start();
    run_all(&mut dashboard, &source, commands).await;

    match dashboard.view() {
        DashboardView::Ready {
            readings,
            page,
            total_pages,
            refreshing,
        } => {
            assert_eq!(readings.len(), 15);
            assert_eq!(page, 1);
            assert_eq!(total_pages, 3);
            assert!(!refreshing);
        }
        other => panic!("unexpected view: {other:?}"),
    }

    let daily = dashboard.daily_aggregates();
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].samples, 31);
}

#[tokio::test]
async fn test_dashboard_paging_to_last_page() {
    let readings: Vec<Reading> = (0..31)
        .map(|i| reading(i, datetime!(2024-05-01 00:00 UTC), 20.0, 50.0))
        .collect();
    let source = MockSource::new(readings);
    let mut dashboard = Dashboard::new(config(Month::May));

    let commands = dashboard.start();
    run_all(&mut dashboard, &source, commands).await;

    let command = dashboard.last_page().unwrap();
    run_all(&mut dashboard, &source, vec![command]).await;

    match dashboard.view() {
        DashboardView::Ready { readings, page, .. } => {
            assert_eq!(page, 3);
            assert_eq!(readings.len(), 1);
            assert_eq!(readings[0].id, "30");
        }
        other => panic!("unexpected view: {other:?}"),
    }
    assert!(dashboard.last_page().is_none());
}

#[tokio::test]
async fn test_dashboard_empty_dataset_hides_pages() {
    let source = MockSource::default();
    let mut dashboard = Dashboard::new(config(Month::May));

    let commands = dashboard.start();
    run_all(&mut dashboard, &source, commands).await;

    assert!(!dashboard.pagination().should_render());
    assert!(matches!(
        dashboard.view(),
        DashboardView::Ready { total_pages: 0, .. }
    ));
    assert!(dashboard.daily_aggregates().is_empty());
    assert!(dashboard.month_error().is_none());
}

#[tokio::test]
async fn test_dashboard_failed_fetch_shows_error() {
    let source = MockSource::default();
    source.set_should_fail(true, Some("service down"));
    let mut dashboard = Dashboard::new(config(Month::May));

    let commands = dashboard.start();
    run_all(&mut dashboard, &source, commands).await;

    match dashboard.view() {
        DashboardView::Failed(error) => assert!(error.contains("service down")),
        other => panic!("unexpected view: {other:?}"),
    }
    assert!(dashboard.month_error().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_out_of_order_responses_keep_latest_page() {
    let readings: Vec<Reading> = (0..100)
        .map(|i| reading(i, datetime!(2024-05-01 00:00 UTC), 20.0, 50.0))
        .collect();
    let source = std::sync::Arc::new(MockSource::new(readings));
    source.set_page_delay(2, Duration::from_millis(500)).await;

    let mut dashboard = Dashboard::new(config(Month::May));
    let commands = dashboard.start();
    run_all(&mut dashboard, &source, commands).await;

    let slow = dashboard.go_to_page(2).unwrap();
    let fast = dashboard.go_to_page(3).unwrap();

    let slow_task = {
        let source = source.clone();
        tokio::spawn(async move { execute(source.as_ref(), slow).await })
    };
    let fast_task = {
        let source = source.clone();
        tokio::spawn(async move { execute(source.as_ref(), fast).await })
    };

    let fast_event = fast_task.await.unwrap().unwrap();
    assert!(dashboard.apply(fast_event));
    let slow_event = slow_task.await.unwrap().unwrap();
    assert!(!dashboard.apply(slow_event));

    match dashboard.view() {
        DashboardView::Ready { readings, page, .. } => {
            assert_eq!(page, 3);
            assert_eq!(readings[0].id, "30");
        }
        other => panic!("unexpected view: {other:?}"),
    }
}

#[tokio::test]
async fn test_month_switch_fetches_new_month() {
    let source = MockSource::new(vec![
        reading(0, datetime!(2024-05-01 08:00 UTC), 10.0, 40.0),
        reading(1, datetime!(2024-05-01 20:00 UTC), 20.0, 60.0),
        reading(2, datetime!(2024-06-10 12:00 UTC), 30.0, 70.0),
    ]);
    let mut dashboard = Dashboard::new(config(Month::May));

    let commands = dashboard.start();
    run_all(&mut dashboard, &source, commands).await;
    let may = dashboard.daily_aggregates();
    assert_eq!(may.len(), 1);
    assert!((may[0].average_internal_temperature - 15.0).abs() < 1e-9);
    assert!((may[0].average_internal_humidity - 50.0).abs() < 1e-9);

    let command = dashboard.select_month(Month::June).unwrap();
    run_all(&mut dashboard, &source, vec![command]).await;
    let june = dashboard.daily_aggregates();
    assert_eq!(june.len(), 1);
    assert_eq!(june[0].day, "2024-06-10");
    assert_eq!(source.month_calls(), 2);
}

// ==========================================================================
// Aggregation properties
// ==========================================================================

fn arb_reading() -> impl Strategy<Value = Reading> {
    (
        1u8..=12,
        1u8..=28,
        0u8..24,
        -40.0f64..60.0,
        0.0f64..100.0,
        0.0f64..100.0,
    )
        .prop_map(|(month, day, hour, temp, hum_in, hum_out)| {
            let month = Month::try_from(month).unwrap();
            let date = Date::from_calendar_date(2024, month, day).unwrap();
            let time = Time::from_hms(hour, 0, 0).unwrap();
            Reading {
                id: format!("{month}-{day}-{hour}"),
                date: PrimitiveDateTime::new(date, time).assume_utc(),
                internal_temperature: temp,
                external_temperature: -temp,
                internal_humidity: hum_in,
                external_humidity: hum_out,
            }
        })
}

proptest! {
    #[test]
    fn one_aggregate_per_distinct_day(
        readings in proptest::collection::vec(arb_reading(), 0..80),
        month in 1u8..=12,
    ) {
        let month = Month::try_from(month).unwrap();
        let daily = aggregate_daily(&readings, month);

        let expected: HashSet<Date> = readings
            .iter()
            .filter(|r| r.date.month() == month)
            .map(|r| r.date.date())
            .collect();
        prop_assert_eq!(daily.len(), expected.len());

        let keys: HashSet<&str> = daily.iter().map(|a| a.day.as_str()).collect();
        prop_assert_eq!(keys.len(), daily.len());

        let total: usize = daily.iter().map(|a| a.samples).sum();
        let in_month = readings.iter().filter(|r| r.date.month() == month).count();
        prop_assert_eq!(total, in_month);
    }

    #[test]
    fn averages_stay_within_daily_bounds(
        readings in proptest::collection::vec(arb_reading(), 1..80),
        month in 1u8..=12,
    ) {
        let month = Month::try_from(month).unwrap();
        let daily = aggregate_daily(&readings, month);

        let mut bounds: HashMap<String, (f64, f64)> = HashMap::new();
        for r in readings.iter().filter(|r| r.date.month() == month) {
            let key = climadash_core::aggregate::day_key(r.date.date());
            let entry = bounds.entry(key).or_insert((f64::MAX, f64::MIN));
            entry.0 = entry.0.min(r.internal_temperature);
            entry.1 = entry.1.max(r.internal_temperature);
        }

        for aggregate in &daily {
            let (lo, hi) = bounds[&aggregate.day];
            prop_assert!(aggregate.average_internal_temperature >= lo - 1e-9);
            prop_assert!(aggregate.average_internal_temperature <= hi + 1e-9);
        }
    }

    #[test]
    fn days_follow_first_occurrence(
        readings in proptest::collection::vec(arb_reading(), 0..80),
        month in 1u8..=12,
    ) {
        let month = Month::try_from(month).unwrap();
        let daily = aggregate_daily(&readings, month);

        let mut seen = HashSet::new();
        let order: Vec<String> = readings
            .iter()
            .filter(|r| r.date.month() == month)
            .map(|r| climadash_core::aggregate::day_key(r.date.date()))
            .filter(|key| seen.insert(key.clone()))
            .collect();
        let days: Vec<String> = daily.into_iter().map(|a| a.day).collect();
        prop_assert_eq!(days, order);
    }

    #[test]
    fn utc_aggregator_matches_free_function(
        readings in proptest::collection::vec(arb_reading(), 0..40),
        month in 1u8..=12,
    ) {
        let month = Month::try_from(month).unwrap();
        prop_assert_eq!(
            MonthlyAggregator::new(UtcOffset::UTC).aggregate(&readings, month),
            aggregate_daily(&readings, month)
        );
    }
}
