use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use popcorn_park::catalog::Catalog;
use popcorn_park::model::ParkingDetails;
use popcorn_park::{CostBreakdown, DraftBooking, Movie, ParkingType};

const TITLES: [&str; 6] = ["Amaran", "Brother", "Leo", "Jailer", "Vikram", "Master"];

/// A catalog of `size` movies cycling through a handful of titles.
fn catalog(size: usize) -> Catalog {
    let movies = (0..size)
        .map(|i| Movie {
            id: i.to_string(),
            name: format!("{} {i}", TITLES[i % TITLES.len()]),
            genre: "Drama".to_string(),
            cast: String::new(),
            summary: String::new(),
            image_url: String::new(),
            ratings: Some(8.0),
            votes: Some(100),
            screen: format!("Screen {}", i % 4),
            language: "Tamil".to_string(),
            timing: "7PM".to_string(),
        })
        .collect();
    Catalog::new(movies)
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1_000, 10_000] {
        let catalog = catalog(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter(|| catalog.search(black_box("BROTHER")).count());
        });
    }

    group.finish();
}

fn bench_cost(c: &mut Criterion) {
    let draft = DraftBooking {
        movie: "Amaran".to_string(),
        seats: vec!["A1".to_string(), "A2".to_string()],
        total_cost: Some(300.into()),
        parking_details: Some(ParkingDetails {
            parking_type: Some(ParkingType::FourWheeler),
            ..Default::default()
        }),
        ..Default::default()
    };

    c.bench_function("compute_cost", |b| {
        b.iter(|| CostBreakdown::compute(black_box(&draft)));
    });
}

criterion_group!(benches, bench_search, bench_cost);
criterion_main!(benches);
