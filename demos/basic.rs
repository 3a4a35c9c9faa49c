use geocluster::{GeoCoordinate, GeoPoint, NeverCancelled, Supercluster, SuperclusterError};

struct City {
    id: u64,
    name: &'static str,
    lng: f64,
    lat: f64,
}

impl GeoPoint for City {
    fn id(&self) -> u64 {
        self.id
    }

    fn coordinates(&self) -> Option<GeoCoordinate> {
        Some(GeoCoordinate::new(self.lng, self.lat))
    }
}

fn main() -> Result<(), SuperclusterError> {
    let cities = vec![
        City { id: 0, name: "Warsaw", lng: 20.8, lat: 52.2 },
        City { id: 1, name: "Berlin", lng: 13.4, lat: 52.5 },
        City { id: 2, name: "Amsterdam", lng: 4.9, lat: 52.4 },
    ];

    let options = Supercluster::builder()
        .point_size(40.0)
        .tile_size(512.0)
        .max_zoom(16)
        .build()?;

    let mut cluster = Supercluster::new(options);
    cluster.load(&cities);

    let clusters = cluster.get_clusters(
        Some(GeoCoordinate::new(-15.0, 60.0)),
        Some(GeoCoordinate::new(30.0, 40.0)),
        4,
        None,
        &NeverCancelled,
    )?;

    for point in clusters {
        if cluster.is_cluster(&point) {
            println!("cluster of {} points at ({:.2}, {:.2})", point.num_points, point.x, point.y);
        } else {
            let id = point.included[0];
            let name = cities.iter().find(|c| c.id == id).map(|c| c.name).unwrap_or("?");
            println!("{name} at ({:.2}, {:.2})", point.x, point.y);
        }
    }

    Ok(())
}
