//! # Supercluster module
//!
//! The `supercluster` module provides a spatial clustering library for geographic points.
//! This is the core module that contains the `Supercluster` struct and its related functionality.
//!
//! The `Supercluster` struct is used to create a spatial clustering configuration and data
//! structure. It provides methods to load input points, retrieve clusters in a bounding box or
//! whole layer at a time, look up a cluster's children, and determine the zoom level at which a
//! specific cluster expands.
//!
//! Construction is a one-shot, bottom-up pipeline: points are projected into Web Mercator space,
//! then clustered zoom by zoom from `max_zoom` down to `min_zoom`, each level indexed by its own
//! [`KDBush`]. Once built, a `Supercluster` is immutable and every query method is safe to call
//! concurrently.

use crate::{
    cancellation::{CancellationToken, NeverCancelled},
    kdbush::KDBush,
    point::{compute_seed, project_points, GeoCoordinate, GeoPoint, Point, INFINITY_ZOOM},
    projection::{project, unproject},
    SuperclusterBuilder, SuperclusterError, SuperclusterOptions,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A precomputed level of the hierarchy: the point array at a given zoom and
/// the KD-tree indexing it by projected `(x, y)`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
struct Layer {
    /// Points or clusters produced for this zoom level.
    points: Vec<Point>,

    /// Spatial index over `points`, keyed by projected coordinates.
    tree: KDBush,
}

/// A spatial clustering configuration and data structure.
///
/// Build one with [`Supercluster::builder`], load points with [`Supercluster::load`], then query
/// it with [`Supercluster::get_clusters`], [`Supercluster::all_clusters`],
/// [`Supercluster::get_clusters_points_in_radius`], or
/// [`Supercluster::get_cluster_expansion_zoom`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Supercluster {
    /// Configuration settings.
    pub options: SuperclusterOptions,

    /// Cluster-identity seed: the smallest power of ten strictly greater than
    /// the number of coordinate-bearing input points. Zero until [`load`](Self::load) runs.
    seed: u64,

    /// One layer per zoom from `min_zoom` to `max_zoom`, plus the unclustered
    /// leaf layer at `max_zoom + 1`, indexed by `zoom - min_zoom`. Empty until
    /// [`load`](Self::load) runs.
    layers: Vec<Layer>,
}

impl Supercluster {
    /// Create a new supercluster builder instance.
    ///
    /// # Returns
    ///
    /// New supercluster builder.
    pub fn builder() -> SuperclusterBuilder {
        SuperclusterBuilder::new()
    }

    /// Create a new instance of `Supercluster` with the specified configuration settings.
    /// The instance holds no data until [`Self::load`] is called.
    ///
    /// # Arguments
    ///
    /// - `options`: The configuration options for Supercluster.
    ///
    /// # Returns
    ///
    /// New `Supercluster` instance with the given configuration.
    pub fn new(options: SuperclusterOptions) -> Self {
        #[cfg(feature = "log")]
        log::debug!("creating a new supercluster instance with options {options:?}");

        Supercluster {
            options,
            seed: 0,
            layers: Vec::new(),
        }
    }

    /// Load a set of points, performing clustering at every configured zoom level.
    ///
    /// Points with no coordinates are silently dropped; this is a deliberate design choice for
    /// bulk ingestion, not an error. Calling this a second time discards whatever was loaded
    /// before.
    ///
    /// # Arguments
    ///
    /// - `points`: The points to cluster.
    ///
    /// # Returns
    ///
    /// The supercluster instance, for chaining.
    pub fn load<P: GeoPoint>(&mut self, points: &[P]) -> &mut Self {
        #[cfg(feature = "log")]
        log::debug!("loading {} input points into supercluster", points.len());

        let projected = project_points(points);
        self.seed = compute_seed(projected.len());

        #[cfg(feature = "log")]
        log::debug!(
            "{} of {} input points have coordinates; seed={}",
            projected.len(),
            points.len(),
            self.seed
        );

        let num_layers = self.num_layers();
        let mut layers: Vec<Option<Layer>> = vec![None; num_layers];
        let mut clusters = projected;

        for zoom in (self.options.min_zoom..=self.options.max_zoom).rev() {
            let tree = build_tree(&clusters, self.options.node_size);
            let next = self.clusterize(&clusters, &tree, zoom);

            layers[self.layer_index(zoom + 1)] = Some(Layer {
                points: clusters,
                tree,
            });

            clusters = next;
        }

        let tree = build_tree(&clusters, self.options.node_size);
        layers[self.layer_index(self.options.min_zoom)] = Some(Layer {
            points: clusters,
            tree,
        });

        self.layers = layers.into_iter().map(|layer| layer.expect("every layer is installed during load")).collect();

        self
    }

    /// Query the points/clusters within a longitude/latitude bounding box at a given zoom level.
    ///
    /// `nw` is the north-west corner (larger latitude) and `se` is the south-east corner (smaller
    /// latitude); boxes that cross the antimeridian (`nw.lng > se.lng` after normalization) are
    /// handled by splitting the query into the eastern and western hemispheres and concatenating
    /// the results. A box spanning 360 degrees of longitude or more has its longitude widened to
    /// cover the whole globe but still honors the requested latitude bounds; it is equivalent to
    /// [`Self::all_clusters`] only when the latitude bounds are also unrestricted.
    ///
    /// # Arguments
    ///
    /// - `nw`: The north-west corner of the query box, or `None` if unavailable.
    /// - `se`: The south-east corner of the query box, or `None` if unavailable.
    /// - `zoom`: The zoom level to query; clamped to `[min_zoom, max_zoom]`.
    /// - `limit`: The maximum number of points to return, or `None` for no limit. Applied per
    ///   hemisphere when the query is split across the antimeridian.
    /// - `cancellation`: A token checked before the query starts and once per produced result.
    ///
    /// # Returns
    ///
    /// The matching points/clusters in geographic coordinates, or an error if either corner is
    /// missing or the query was cancelled.
    pub fn get_clusters<C: CancellationToken>(
        &self,
        nw: Option<GeoCoordinate>,
        se: Option<GeoCoordinate>,
        zoom: u8,
        limit: Option<usize>,
        cancellation: &C,
    ) -> Result<Vec<Point>, SuperclusterError> {
        if cancellation.is_cancelled() {
            return Err(cancellation.cancellation_error());
        }

        let (Some(nw), Some(se)) = (nw, se) else {
            return Err(SuperclusterError::InvalidCoordinates);
        };

        let min_lng = wrap_longitude(nw.lng);
        let max_lat = nw.lat.clamp(-90.0, 90.0);
        let max_lng = if se.lng == 180.0 { 180.0 } else { wrap_longitude(se.lng) };
        let min_lat = se.lat.clamp(-90.0, 90.0);

        if se.lng - nw.lng >= 360.0 {
            #[cfg(feature = "log")]
            log::debug!("query box spans the whole globe at zoom {zoom}");

            return self.query_box(-180.0, min_lat, 180.0, max_lat, zoom, limit, cancellation);
        }

        if min_lng > max_lng {
            #[cfg(feature = "log")]
            log::debug!("query box crosses the antimeridian at zoom {zoom}");

            let mut eastern = self.query_box(min_lng, min_lat, 180.0, max_lat, zoom, limit, cancellation)?;
            let western = self.query_box(-180.0, min_lat, max_lng, max_lat, zoom, limit, cancellation)?;

            eastern.extend(western);
            return Ok(eastern);
        }

        self.query_box(min_lng, min_lat, max_lng, max_lat, zoom, limit, cancellation)
    }

    /// Every point/cluster at a given zoom level, with no bounding box.
    ///
    /// # Arguments
    ///
    /// - `zoom`: The zoom level to query; clamped to `[min_zoom, max_zoom]`.
    /// - `limit`: The maximum number of points to return, or `None` for no limit.
    ///
    /// # Returns
    ///
    /// Up to `limit` points/clusters from that layer, in geographic coordinates.
    pub fn all_clusters(&self, zoom: u8, limit: Option<usize>) -> Vec<Point> {
        self.all_clusters_checked(zoom, limit, &NeverCancelled)
            .unwrap_or_default()
    }

    /// The immediate children of a cluster: the points/clusters at the next finer zoom level that
    /// were absorbed into it.
    ///
    /// Returns an empty vector if `cluster_id` does not identify a cluster (i.e. it is a leaf
    /// point's own id).
    ///
    /// # Arguments
    ///
    /// - `cluster_id`: The encoded identity of a cluster, as returned by a prior query.
    ///
    /// # Returns
    ///
    /// The children of the cluster, in projected coordinates.
    pub fn get_clusters_points_in_radius(&self, cluster_id: u64) -> Vec<Point> {
        if !Point::is_cluster(cluster_id, self.seed) {
            return Vec::new();
        }

        let zoom = Point::zoom_of(cluster_id);
        let index = Point::index_of(cluster_id, self.seed);

        let Some(parent) = self.layers[self.layer_index(zoom as u8)].points.get(index) else {
            return Vec::new();
        };

        let radius = self.radius(zoom as u8);
        let child_layer = &self.layers[self.layer_index(zoom as u8 + 1)];

        child_layer
            .tree
            .within(parent.x, parent.y, radius)
            .into_iter()
            .map(|id| child_layer.points[id].clone())
            .collect()
    }

    /// The smallest zoom greater than a cluster's own zoom at which it fractures into two or more
    /// children.
    ///
    /// # Arguments
    ///
    /// - `cluster_id`: The encoded identity of a cluster, as returned by a prior query.
    ///
    /// # Returns
    ///
    /// The expansion zoom, in `[min_zoom, max_zoom]`. Leaf points expand at `max_zoom`.
    pub fn get_cluster_expansion_zoom(&self, cluster_id: u64) -> u8 {
        if !Point::is_cluster(cluster_id, self.seed) {
            return self.options.max_zoom;
        }

        let mut zoom = Point::zoom_of(cluster_id);
        let mut id = cluster_id;

        while zoom < self.options.max_zoom as u32 {
            let children = self.get_clusters_points_in_radius(id);

            if children.is_empty() {
                return self.options.max_zoom;
            }

            zoom += 1;

            if children.len() != 1 {
                break;
            }

            id = children[0].id;
        }

        zoom as u8
    }

    /// Whether a point identifies a cluster rather than a carried-up original point.
    ///
    /// # Arguments
    ///
    /// - `point`: A point previously returned by a query.
    ///
    /// # Returns
    ///
    /// `true` if `point` is a cluster.
    pub fn is_cluster(&self, point: &Point) -> bool {
        Point::is_cluster(point.id, self.seed)
    }

    /// Run a single-pass greedy clustering step at zoom `z`.
    ///
    /// `points` and `tree` are the layer installed at `z + 1`; this method never mutates them —
    /// absorption bookkeeping happens on a private working copy, so the installed layer stays
    /// exactly what its own KD-tree was built from.
    fn clusterize(&self, points: &[Point], tree: &KDBush, z: u8) -> Vec<Point> {
        let radius = self.radius(z);
        let mut working = points.to_vec();
        let mut output = Vec::new();
        let mut k: u64 = 0;

        for i in 0..working.len() {
            if working[i].zoom <= z as u32 {
                continue;
            }
            working[i].zoom = z as u32;

            let (x, y) = (working[i].x, working[i].y);
            let mut weighted_x = x * working[i].num_points as f64;
            let mut weighted_y = y * working[i].num_points as f64;
            let mut num_points = working[i].num_points;
            let mut included = working[i].included.clone();
            let mut absorbed_any = false;

            for neighbor in tree.within(x, y, radius) {
                if neighbor == i || working[neighbor].zoom <= z as u32 {
                    continue;
                }

                absorbed_any = true;
                weighted_x += working[neighbor].x * working[neighbor].num_points as f64;
                weighted_y += working[neighbor].y * working[neighbor].num_points as f64;
                num_points += working[neighbor].num_points;
                included.extend(working[neighbor].included.iter().copied());
                working[neighbor].zoom = z as u32;
            }

            if absorbed_any {
                output.push(Point {
                    x: weighted_x / num_points as f64,
                    y: weighted_y / num_points as f64,
                    num_points,
                    id: Point::encode_id(self.seed, k, z as u32),
                    zoom: INFINITY_ZOOM,
                    included,
                });
            } else {
                output.push(Point {
                    zoom: INFINITY_ZOOM,
                    ..working[i].clone()
                });
            }
            k += 1;
        }

        output
    }

    /// The clustering radius at a zoom level, in projected `[0, 1]^2` units.
    fn radius(&self, z: u8) -> f64 {
        self.options.point_size / (self.options.tile_size * 2f64.powi(z as i32))
    }

    /// Number of layers the current options allocate: one per zoom from `min_zoom` to `max_zoom`,
    /// plus the leaf layer.
    fn num_layers(&self) -> usize {
        (self.options.max_zoom - self.options.min_zoom) as usize + 2
    }

    /// Map a zoom level to its position in `self.layers`.
    fn layer_index(&self, zoom: u8) -> usize {
        (zoom - self.options.min_zoom) as usize
    }

    /// Shared implementation behind [`Self::get_clusters`]'s non-split, non-globe-spanning case.
    #[allow(clippy::too_many_arguments)]
    fn query_box<C: CancellationToken>(
        &self,
        min_lng: f64,
        min_lat: f64,
        max_lng: f64,
        max_lat: f64,
        zoom: u8,
        limit: Option<usize>,
        cancellation: &C,
    ) -> Result<Vec<Point>, SuperclusterError> {
        if cancellation.is_cancelled() {
            return Err(cancellation.cancellation_error());
        }

        let zoom = zoom.clamp(self.options.min_zoom, self.options.max_zoom);
        let layer = &self.layers[self.layer_index(zoom)];

        let (min_x, max_y) = project(min_lng, min_lat);
        let (max_x, min_y) = project(max_lng, max_lat);

        let ids = layer.tree.range(min_x, min_y, max_x, max_y);
        let mut result = Vec::with_capacity(ids.len());

        for id in ids {
            if cancellation.is_cancelled() {
                return Err(cancellation.cancellation_error());
            }
            if let Some(limit) = limit {
                if result.len() >= limit {
                    break;
                }
            }

            let (lng, lat) = unproject(layer.points[id].x, layer.points[id].y);
            result.push(Point {
                x: lng,
                y: lat,
                ..layer.points[id].clone()
            });
        }

        Ok(result)
    }

    /// Shared implementation behind [`Self::all_clusters`] and the globe-spanning case of
    /// [`Self::get_clusters`].
    fn all_clusters_checked<C: CancellationToken>(
        &self,
        zoom: u8,
        limit: Option<usize>,
        cancellation: &C,
    ) -> Result<Vec<Point>, SuperclusterError> {
        if cancellation.is_cancelled() {
            return Err(cancellation.cancellation_error());
        }

        let zoom = zoom.clamp(self.options.min_zoom, self.options.max_zoom);
        let layer = &self.layers[self.layer_index(zoom)];
        let mut result = Vec::new();

        for point in &layer.points {
            if cancellation.is_cancelled() {
                return Err(cancellation.cancellation_error());
            }
            if let Some(limit) = limit {
                if result.len() >= limit {
                    break;
                }
            }

            let (lng, lat) = unproject(point.x, point.y);
            result.push(Point {
                x: lng,
                y: lat,
                ..point.clone()
            });
        }

        Ok(result)
    }
}

/// Build a KD-tree over a point layer's projected coordinates.
fn build_tree(points: &[Point], node_size: usize) -> KDBush {
    let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();

    KDBush::build(&coords, node_size)
}

/// Normalize a longitude into `[-180, 180)`.
fn wrap_longitude(lng: f64) -> f64 {
    ((lng + 180.0).rem_euclid(360.0)) - 180.0
}
