//! Integration tests exercising `Supercluster` end to end through its public API, using inline
//! point literals rather than fixture files.

use geocluster::{GeoCoordinate, GeoPoint, NeverCancelled, Supercluster};

struct Place {
    id: u64,
    coordinate: Option<GeoCoordinate>,
}

impl Place {
    fn new(id: u64, lng: f64, lat: f64) -> Self {
        Place {
            id,
            coordinate: Some(GeoCoordinate::new(lng, lat)),
        }
    }

    fn without_coordinates(id: u64) -> Self {
        Place {
            id,
            coordinate: None,
        }
    }
}

impl GeoPoint for Place {
    fn id(&self) -> u64 {
        self.id
    }

    fn coordinates(&self) -> Option<GeoCoordinate> {
        self.coordinate
    }
}

fn build(places: &[Place], max_zoom: u8, point_size: f64, tile_size: f64) -> Supercluster {
    let options = Supercluster::builder()
        .max_zoom(max_zoom)
        .point_size(point_size)
        .tile_size(tile_size)
        .build()
        .expect("valid options");

    let mut cluster = Supercluster::new(options);
    cluster.load(places);
    cluster
}

#[test]
fn empty_input_builds_and_queries_cleanly() {
    let cluster = build(&[], 16, 40.0, 512.0);

    assert!(cluster.all_clusters(0, None).is_empty());

    let result = cluster
        .get_clusters(
            Some(GeoCoordinate::new(-180.0, 90.0)),
            Some(GeoCoordinate::new(180.0, -90.0)),
            0,
            None,
            &NeverCancelled,
        )
        .unwrap();

    assert!(result.is_empty());
}

#[test]
fn points_without_coordinates_are_dropped_silently() {
    let places = vec![
        Place::new(0, 10.0, 10.0),
        Place::without_coordinates(1),
        Place::new(2, 11.0, 11.0),
    ];
    let cluster = build(&places, 16, 40.0, 512.0);

    let total: u64 = cluster.all_clusters(16, None).iter().map(|p| p.num_points).sum();

    assert_eq!(total, 2);
}

#[test]
fn single_point_survives_to_the_finest_zoom() {
    let places = vec![Place::new(1, 71.367187500000014, -83.79204408779539)];
    let cluster = build(&places, 21, 40.0, 512.0);

    let result = cluster.all_clusters(21, None);

    assert_eq!(result.len(), 1);
    assert!((result[0].x - 71.367187500000014).abs() < 1e-6);
    assert!((result[0].y - (-83.79204408779539)).abs() < 1e-6);
    assert_eq!(result[0].num_points, 1);
}

#[test]
fn coincident_points_collapse_into_one_cluster() {
    let places = vec![Place::new(0, 20.8, 52.2), Place::new(1, 20.8, 52.2)];
    let cluster = build(&places, 16, 60.0, 512.0);

    let result = cluster
        .get_clusters(
            Some(GeoCoordinate::new(-15.8, 72.8)),
            Some(GeoCoordinate::new(46.3, 4.7)),
            5,
            None,
            &NeverCancelled,
        )
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].num_points, 2);
    assert_eq!(result[0].included, vec![0, 1]);
    assert!((result[0].x - 20.8).abs() < 1e-9);
    assert!((result[0].y - 52.2).abs() < 1e-9);
}

#[test]
fn three_points_form_a_pair_and_a_singleton() {
    let places = vec![
        Place::new(0, 20.81, 52.21),
        Place::new(1, 20.83, 52.23),
        Place::new(2, 22.00, 54.00),
    ];
    let cluster = build(&places, 16, 60.0, 512.0);

    let mut result = cluster.all_clusters(5, None);
    result.sort_by_key(|p| p.num_points);

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].num_points, 1);
    assert_eq!(result[0].included, vec![2]);
    assert_eq!(result[1].num_points, 2);
    assert_eq!(result[1].included, vec![0, 1]);
}

#[test]
fn antimeridian_crossing_query_matches_its_unsplit_equivalent() {
    let places = vec![
        Place::new(0, -178.989, 0.0),
        Place::new(1, -178.990, 0.0),
        Place::new(2, -178.9991, 0.0),
        Place::new(3, -178.992, 0.0),
    ];
    let cluster = build(&places, 16, 40.0, 512.0);

    let mut crossing = cluster
        .get_clusters(
            Some(GeoCoordinate::new(179.0, 10.0)),
            Some(GeoCoordinate::new(-177.0, -10.0)),
            1,
            None,
            &NeverCancelled,
        )
        .unwrap();

    let mut equivalent = cluster
        .get_clusters(
            Some(GeoCoordinate::new(-179.0, 10.0)),
            Some(GeoCoordinate::new(-177.0, -10.0)),
            1,
            None,
            &NeverCancelled,
        )
        .unwrap();

    crossing.sort_by_key(|p| p.id);
    equivalent.sort_by_key(|p| p.id);

    assert_eq!(crossing, equivalent);
}

#[test]
fn globe_spanning_box_matches_the_whole_layer() {
    let places = vec![Place::new(0, 20.8, 52.2), Place::new(1, -150.0, -40.0)];
    let cluster = build(&places, 16, 40.0, 512.0);

    let mut boxed = cluster
        .get_clusters(
            Some(GeoCoordinate::new(-180.0, 90.0)),
            Some(GeoCoordinate::new(190.0, -90.0)),
            3,
            None,
            &NeverCancelled,
        )
        .unwrap();

    let mut whole = cluster.all_clusters(3, None);

    boxed.sort_by_key(|p| p.id);
    whole.sort_by_key(|p| p.id);

    assert_eq!(boxed, whole);
}

#[test]
fn globe_spanning_box_still_honors_latitude_bounds() {
    let places = vec![
        Place::new(0, 0.0, 0.0),
        Place::new(1, 0.0, 45.0),
        Place::new(2, 0.0, -45.0),
    ];
    let cluster = build(&places, 16, 40.0, 512.0);

    let result = cluster
        .get_clusters(
            Some(GeoCoordinate::new(-180.0, 10.0)),
            Some(GeoCoordinate::new(190.0, -10.0)),
            16,
            None,
            &NeverCancelled,
        )
        .unwrap();

    let total: u64 = result.iter().map(|p| p.num_points).sum();
    assert_eq!(total, 1);
}

#[test]
fn cluster_index_survives_a_preceding_singleton_in_output_order() {
    let places = vec![
        Place::new(0, -50.0, -50.0),
        Place::new(1, 20.81, 52.21),
        Place::new(2, 20.83, 52.23),
    ];
    let cluster = build(&places, 16, 60.0, 512.0);

    let mut clustered = cluster.all_clusters(5, None);
    clustered.sort_by_key(|p| p.num_points);

    let parent = clustered[1].clone();
    assert!(cluster.is_cluster(&parent));

    let children = cluster.get_clusters_points_in_radius(parent.id);
    let total: u64 = children.iter().map(|c| c.num_points).sum();

    assert_eq!(total, parent.num_points);
}

#[test]
fn expansion_zoom_stays_within_configured_bounds() {
    let places: Vec<Place> = (0..60).map(|i| Place::new(i, (i as f64) * 0.02, (i as f64) * 0.02)).collect();
    let cluster = build(&places, 12, 80.0, 512.0);

    for point in cluster.all_clusters(0, None) {
        let expansion = cluster.get_cluster_expansion_zoom(point.id);

        assert!(expansion <= 12);
    }
}

#[test]
fn children_sum_to_parent_num_points_at_every_zoom() {
    let places: Vec<Place> = (0..80).map(|i| Place::new(i, (i as f64) * 0.015, (i as f64) * 0.015)).collect();
    let cluster = build(&places, 10, 70.0, 512.0);

    for zoom in 0..10 {
        for point in cluster.all_clusters(zoom, None) {
            if cluster.is_cluster(&point) {
                let children = cluster.get_clusters_points_in_radius(point.id);
                let total: u64 = children.iter().map(|c| c.num_points).sum();

                assert_eq!(total, point.num_points, "zoom={zoom}, cluster id={}", point.id);
            }
        }
    }
}

#[test]
fn limit_truncates_results_per_hemisphere_when_split() {
    let places = vec![
        Place::new(0, -178.989, 0.0),
        Place::new(1, -178.990, 40.0),
        Place::new(2, 178.989, 0.0),
        Place::new(3, 178.990, 40.0),
    ];
    let cluster = build(&places, 16, 1.0, 512.0);

    let result = cluster
        .get_clusters(
            Some(GeoCoordinate::new(179.0, 50.0)),
            Some(GeoCoordinate::new(-177.0, -10.0)),
            16,
            Some(1),
            &NeverCancelled,
        )
        .unwrap();

    assert_eq!(result.len(), 2);
}
