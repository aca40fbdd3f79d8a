use super::*;
use crate::error::{AppError, AppResult};
use std::num::NonZeroUsize;
use std::time::Duration;

const TOLERANCE: f64 = 1e-9;

fn capacity(value: usize) -> AppResult<NonZeroUsize> {
    NonZeroUsize::new(value).ok_or_else(|| AppError::validation("capacity must be > 0"))
}

fn close(left: f64, right: f64) -> bool {
    (left - right).abs() < TOLERANCE
}

fn expect_stats(
    stats: &SeriesStats,
    last: f64,
    min: f64,
    max: f64,
    avg: f64,
    count: usize,
) -> AppResult<()> {
    if !close(stats.last, last)
        || !close(stats.min, min)
        || !close(stats.max, max)
        || !close(stats.avg, avg)
        || stats.count != count
    {
        return Err(AppError::validation(format!(
            "unexpected stats {:?}, wanted last={} min={} max={} avg={} count={}",
            stats, last, min, max, avg, count
        )));
    }
    Ok(())
}

#[test]
fn empty_series_reports_zeroes() -> AppResult<()> {
    let series = SampleSeries::new(capacity(100)?);
    expect_stats(&series.snapshot(), 0.0, 0.0, 0.0, 0.0, 0)?;
    if !series.is_empty() {
        return Err(AppError::validation("new series should be empty"));
    }
    Ok(())
}

#[test]
fn series_evicts_oldest_first() -> AppResult<()> {
    let mut series = SampleSeries::new(capacity(2)?);
    series.record(10.0);
    series.record(20.0);
    series.record(30.0);

    if series.to_vec() != vec![20.0, 30.0] {
        return Err(AppError::validation(format!(
            "unexpected window {:?}",
            series.to_vec()
        )));
    }
    expect_stats(&series.snapshot(), 30.0, 20.0, 30.0, 25.0, 2)
}

#[test]
fn long_runs_keep_only_the_tail() -> AppResult<()> {
    let mut series = SampleSeries::new(capacity(5)?);
    for value in 0..37_u32 {
        series.record(f64::from(value));
    }

    let expected: Vec<f64> = (32..37_u32).map(f64::from).collect();
    if series.to_vec() != expected {
        return Err(AppError::validation(format!(
            "unexpected window {:?}",
            series.to_vec()
        )));
    }
    expect_stats(&series.snapshot(), 36.0, 32.0, 36.0, 34.0, 5)
}

#[test]
fn capacity_of_one_tracks_latest() -> AppResult<()> {
    let mut series = SampleSeries::new(capacity(1)?);
    series.record(7.5);
    series.record(2.5);
    expect_stats(&series.snapshot(), 2.5, 2.5, 2.5, 2.5, 1)
}

#[test]
fn mean_stays_within_bounds_for_repeated_values() -> AppResult<()> {
    let mut series = SampleSeries::new(capacity(10)?);
    for _ in 0..3 {
        series.record(0.1);
    }
    let stats = series.snapshot();
    if stats.avg < stats.min || stats.avg > stats.max {
        return Err(AppError::validation(format!("avg out of bounds: {:?}", stats)));
    }
    Ok(())
}

#[test]
fn clear_resets_series() -> AppResult<()> {
    let mut series = SampleSeries::new(capacity(4)?);
    series.record(3.0);
    series.record(9.0);
    series.clear();
    expect_stats(&series.snapshot(), 0.0, 0.0, 0.0, 0.0, 0)?;
    if series.len() != 0 {
        return Err(AppError::validation("clear should drop samples"));
    }
    Ok(())
}

#[test]
fn aggregator_reports_both_categories() -> AppResult<()> {
    let mut aggregator = LatencyAggregator::new(capacity(100)?, SamplePolicy::PassThrough);
    aggregator.record_click(10.0);
    aggregator.record_click(60.0);
    aggregator.record_click(120.0);
    aggregator.record_display(5.0);

    let stats = aggregator.statistics();
    expect_stats(&stats.click, 120.0, 10.0, 120.0, 190.0 / 3.0, 3)?;
    expect_stats(&stats.display, 5.0, 5.0, 5.0, 5.0, 1)
}

#[test]
fn statistics_snapshot_is_detached_from_later_records() -> AppResult<()> {
    let mut aggregator = LatencyAggregator::new(capacity(10)?, SamplePolicy::PassThrough);
    aggregator.record_click(42.0);

    let mut copy = aggregator.statistics();
    copy.click.last = 0.0;
    copy.click.count = 99;
    aggregator.record_click(8.0);

    expect_stats(&copy.click, 0.0, 42.0, 42.0, 42.0, 99)?;
    expect_stats(&aggregator.statistics().click, 8.0, 8.0, 42.0, 25.0, 2)
}

#[test]
fn pass_through_keeps_negative_values() -> AppResult<()> {
    let mut aggregator = LatencyAggregator::new(capacity(10)?, SamplePolicy::PassThrough);
    aggregator.record_display(-4.0);
    aggregator.record_display(6.0);

    expect_stats(&aggregator.statistics().display, 6.0, -4.0, 6.0, 1.0, 2)?;
    if aggregator.rejected_samples() != 0 {
        return Err(AppError::validation("pass-through should not reject"));
    }
    Ok(())
}

#[test]
fn strict_policy_drops_invalid_values() -> AppResult<()> {
    let mut aggregator = LatencyAggregator::new(capacity(10)?, SamplePolicy::Strict);
    aggregator.record_click(-1.0);
    aggregator.record_click(f64::NAN);
    aggregator.record_click(f64::INFINITY);
    aggregator.record_click(12.0);

    expect_stats(&aggregator.statistics().click, 12.0, 12.0, 12.0, 12.0, 1)?;
    if aggregator.rejected_samples() != 3 {
        return Err(AppError::validation(format!(
            "expected 3 rejected samples, got {}",
            aggregator.rejected_samples()
        )));
    }
    Ok(())
}

#[test]
fn subscribers_see_latest_snapshot() -> AppResult<()> {
    let mut aggregator = LatencyAggregator::new(capacity(10)?, SamplePolicy::PassThrough);
    let rx = aggregator.subscribe();
    aggregator.record_click(8.0);
    aggregator.record_display(3.0);

    let seen = *rx.borrow();
    if seen != aggregator.statistics() {
        return Err(AppError::validation("subscriber snapshot is stale"));
    }

    aggregator.clear();
    if rx.borrow().click.count != 0 || rx.borrow().display.count != 0 {
        return Err(AppError::validation("clear should publish an empty snapshot"));
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn tracker_measures_elapsed_time() -> AppResult<()> {
    let mut tracker = EventTracker::default();
    tracker.begin(LatencyKind::Click, 7);
    tokio::time::advance(Duration::from_millis(40)).await;

    let latency = tracker
        .complete(LatencyKind::Click, 7)
        .ok_or_else(|| AppError::validation("expected a completed click"))?;
    if !(40.0..41.0).contains(&latency) {
        return Err(AppError::validation(format!(
            "unexpected latency {}",
            latency
        )));
    }
    if tracker.pending() != 0 {
        return Err(AppError::validation("completed event should be removed"));
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn tracker_ignores_unknown_and_mismatched_ids() -> AppResult<()> {
    let mut tracker = EventTracker::default();
    tracker.begin(LatencyKind::Display, 1);

    if tracker.complete(LatencyKind::Display, 2).is_some() {
        return Err(AppError::validation("unknown id should not complete"));
    }
    if tracker.complete(LatencyKind::Click, 1).is_some() {
        return Err(AppError::validation("ids are scoped per kind"));
    }
    if tracker.pending() != 1 {
        return Err(AppError::validation("pending display should remain"));
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn tracker_drops_oldest_pending_when_full() -> AppResult<()> {
    let mut tracker = EventTracker::new(2);
    tracker.begin(LatencyKind::Click, 1);
    tracker.begin(LatencyKind::Click, 2);
    tracker.begin(LatencyKind::Click, 3);

    if tracker.pending() != 2 {
        return Err(AppError::validation("pending should stay bounded"));
    }
    if tracker.complete(LatencyKind::Click, 1).is_some() {
        return Err(AppError::validation("oldest event should be evicted"));
    }
    if tracker.complete(LatencyKind::Click, 3).is_none() {
        return Err(AppError::validation("newest event should remain"));
    }
    Ok(())
}
