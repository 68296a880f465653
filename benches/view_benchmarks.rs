//! Benchmarks for request view derivation and photo URL normalization

#![allow(missing_docs, clippy::unwrap_used, clippy::indexing_slicing)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ridedesk_console::RequestView;
use ridedesk_core::utils::normalize_photo_url;
use ridedesk_core::{RequestRecord, RequestStatus, StatusFilter};
use std::hint::black_box;
use std::num::NonZeroUsize;

fn records(count: usize) -> Vec<RequestRecord> {
    let statuses = [
        RequestStatus::Pending,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Cancelled,
    ];
    (0..count)
        .map(|i| RequestRecord {
            request_id: format!("R{i}"),
            user_name: format!("user-{i}"),
            from_location: "Depot".to_string(),
            to_location: "Market".to_string(),
            goods_description: "Rice sacks".to_string(),
            fare: 100.0,
            status: statuses[i % statuses.len()],
            goods_photo1_url: Some(format!("/uploads/{i}.jpg")),
            ..RequestRecord::default()
        })
        .collect()
}

/// Benchmark filtering the master list at realistic sizes
fn bench_apply_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_filter");
    let page_size = NonZeroUsize::new(10).unwrap();

    for size in [100, 1_000, 10_000] {
        let mut view = RequestView::with_records(records(size), page_size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("pending", size), &size, |b, _| {
            b.iter(|| {
                view.apply_filter(black_box(StatusFilter::Only(RequestStatus::Pending)));
                view.filtered_len()
            });
        });
    }

    group.finish();
}

/// Benchmark page navigation over a filtered list
fn bench_pagination(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagination");
    let mut view = RequestView::with_records(records(10_000), NonZeroUsize::new(25).unwrap());
    view.apply_filter(StatusFilter::All);

    group.bench_function("walk_pages", |b| {
        b.iter(|| {
            view.go_to_page(1);
            let mut rows = 0;
            loop {
                rows += view.paged().count();
                if !view.next_page() {
                    break;
                }
            }
            rows
        });
    });

    group.bench_function("status_tabs", |b| b.iter(|| black_box(view.status_tabs())));

    group.finish();
}

/// Benchmark photo URL resolution
fn bench_photo_urls(c: &mut Criterion) {
    let mut group = c.benchmark_group("photo_urls");
    let urls = [
        "/uploads/a.jpg",
        "uploads/b.jpg",
        "https://cdn.test/c.jpg",
        "",
    ];

    group.throughput(Throughput::Elements(urls.len() as u64));
    group.bench_function("normalize_batch", |b| {
        b.iter(|| {
            urls.iter()
                .map(|url| normalize_photo_url(black_box(url), "http://files.test/"))
                .collect::<Vec<_>>()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_apply_filter, bench_pagination, bench_photo_urls);
criterion_main!(benches);
