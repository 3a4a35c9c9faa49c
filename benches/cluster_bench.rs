use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geocluster::{GeoCoordinate, GeoPoint, NeverCancelled, Supercluster};

struct Place {
    id: u64,
    lng: f64,
    lat: f64,
}

impl GeoPoint for Place {
    fn id(&self) -> u64 {
        self.id
    }

    fn coordinates(&self) -> Option<GeoCoordinate> {
        Some(GeoCoordinate::new(self.lng, self.lat))
    }
}

fn sample_places(count: usize) -> Vec<Place> {
    (0..count)
        .map(|i| Place {
            id: i as u64,
            lng: -180.0 + (i as f64 * 360.0 / count as f64),
            lat: -80.0 + ((i % 160) as f64),
        })
        .collect()
}

fn bench_cluster(c: &mut Criterion) {
    let places = sample_places(5_000);

    let options = Supercluster::builder().max_zoom(16).build().unwrap();

    c.bench_function("load points", |b| {
        b.iter(|| {
            let mut cluster = Supercluster::new(options);
            cluster.load(black_box(&places));
        })
    });

    let mut cluster = Supercluster::new(options);
    cluster.load(&places);

    c.bench_function("get clusters", |b| {
        b.iter(|| {
            let _ = cluster.get_clusters(
                black_box(Some(GeoCoordinate::new(-10.0, 60.0))),
                black_box(Some(GeoCoordinate::new(10.0, -60.0))),
                black_box(6),
                black_box(None),
                &NeverCancelled,
            );
        })
    });

    c.bench_function("get all clusters", |b| {
        b.iter(|| {
            let _ = cluster.all_clusters(black_box(6), black_box(None));
        })
    });
}

criterion_group!(benches, bench_cluster);
criterion_main!(benches);
