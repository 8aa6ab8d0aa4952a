use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fleetdesk::domain::filter::FilterKey;
use fleetdesk::domain::purchase::Purchase;
use fleetdesk::repository::RecordStore;
use fleetdesk::services::export_service::{CsvQuoting, DelimitedTextExporter};
use fleetdesk::services::{ReportEngine, ReportState};
use std::time::Duration;

fn reference_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 12)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Purchases spread over the last two years, with every 50th date broken.
fn create_purchases(count: usize) -> Vec<Purchase> {
    let today = reference_now().date();
    (0..count)
        .map(|i| {
            let date = if i % 50 == 49 {
                "unknown".to_string()
            } else {
                (today - ChronoDuration::days((i % 730) as i64))
                    .format("%Y-%m-%d")
                    .to_string()
            };
            Purchase {
                id: Some(i as u64 + 1),
                date,
                vehicle_no: format!("MH12AB{:04}", i % 10_000),
                booking_hire: format!("{}", 5_000 + (i % 40) * 250),
                from_location: "Pune".to_string(),
                to_location: "Nashik".to_string(),
                transport_name: "Sai Roadlines".to_string(),
                ..Default::default()
            }
        })
        .collect()
}

fn bench_window_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_stats");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(5));

    for count in [100, 1_000, 10_000, 50_000] {
        let mut store = RecordStore::new();
        store.load(create_purchases(count));

        group.bench_with_input(BenchmarkId::new("batch", count), &store, |b, store| {
            b.iter(|| {
                black_box(ReportEngine::stats_for_all_windows(
                    store,
                    reference_now(),
                    Purchase::hire_amount,
                ))
            })
        });

        group.bench_with_input(BenchmarkId::new("per_window", count), &store, |b, store| {
            b.iter(|| {
                for key in FilterKey::WINDOWED {
                    black_box(ReportEngine::aggregate(
                        store,
                        key,
                        reference_now(),
                        Purchase::hire_amount,
                    ));
                }
            })
        });
    }

    group.finish();
}

fn bench_filter_and_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_and_export");
    group.sample_size(10);

    let mut store = RecordStore::new();
    store.load(create_purchases(20_000));
    let columns = Purchase::export_columns();

    for quoting in [CsvQuoting::Verbatim, CsvQuoting::Rfc4180] {
        let exporter = DelimitedTextExporter::new(quoting);
        group.bench_function(format!("this_year_csv_{:?}", quoting), |b| {
            b.iter(|| {
                let state = ReportState::compute(
                    &store,
                    FilterKey::ThisYear,
                    reference_now(),
                    Purchase::hire_amount,
                );
                black_box(state.export(&exporter, &columns))
            })
        });
    }

    group.finish();
}

fn bench_bulk_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_load");
    group.sample_size(10);

    for count in [1_000, 10_000] {
        let purchases = create_purchases(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &purchases, |b, purchases| {
            b.iter(|| {
                let mut store = RecordStore::new();
                store.load(purchases.clone());
                black_box(store.len())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_window_stats,
    bench_filter_and_export,
    bench_bulk_load
);
criterion_main!(benches);
