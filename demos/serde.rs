use geocluster::{GeoCoordinate, GeoPoint, Supercluster, SuperclusterError, SuperclusterOptions};

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

fn main() -> Result<(), SuperclusterError> {
    let places = vec![
        Place { id: 0, lng: -77.032, lat: 38.913 },
        Place { id: 1, lng: -77.033, lat: 38.913 },
        Place { id: 2, lng: -77.034, lat: 38.913 },
    ];

    // Options can be deserialized from any serde-compatible source, not just JSON.
    let options: SuperclusterOptions = serde_json::from_str(
        r#"{
            "min_zoom": 2,
            "max_zoom": 16,
            "point_size": 40.0,
            "tile_size": 512.0,
            "node_size": 64
        }"#,
    )
    .unwrap();

    let mut cluster = Supercluster::new(options);
    cluster.load(&places);

    let clusters = cluster.all_clusters(2, None);
    let json_string = serde_json::to_string(&clusters).unwrap();

    println!("clusters at zoom 2: {json_string}");

    Ok(())
}
