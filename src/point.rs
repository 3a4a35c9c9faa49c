//! # Point module
//!
//! The `GeoCoordinate`/`GeoPoint` inbound contract and the internal `Point`
//! type every clustering layer manipulates, plus the compact cluster
//! identity scheme: a single integer that encodes both the zoom level a
//! cluster originated at and its index within that zoom's layer.

/// A position on Earth's surface.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct GeoCoordinate {
    /// Longitude, in degrees, in `[-180, 180]`.
    pub lng: f64,

    /// Latitude, in degrees, in `[-90, 90]`.
    pub lat: f64,
}

impl GeoCoordinate {
    /// Create a new coordinate.
    ///
    /// # Arguments
    ///
    /// - `lng`: Longitude, in degrees.
    /// - `lat`: Latitude, in degrees.
    ///
    /// # Returns
    ///
    /// A new `GeoCoordinate`.
    pub fn new(lng: f64, lat: f64) -> Self {
        GeoCoordinate { lng, lat }
    }
}

/// The inbound contract: anything that can be clustered.
///
/// Implementors are not copied beyond what `id` and `coordinates` yield —
/// the engine never holds on to the implementor itself, only its two
/// projections. `coordinates` is called exactly once per point during
/// `load`, so it is fine to compute it on the fly.
pub trait GeoPoint {
    /// A stable identifier for this point.
    ///
    /// # Returns
    ///
    /// This point's identifier.
    fn id(&self) -> u64;

    /// This point's position, or `None` if it has no known coordinates.
    /// Points with no coordinates are silently dropped during `load`.
    ///
    /// # Returns
    ///
    /// This point's coordinate, if any.
    fn coordinates(&self) -> Option<GeoCoordinate>;
}

/// The sentinel zoom meaning "not yet absorbed into a cluster".
pub const INFINITY_ZOOM: u32 = 100;

/// An original point or a cluster of points, indexed at some zoom level.
///
/// `x`/`y` are projected Web Mercator coordinates while a `Point` lives
/// inside the index; query methods return a copy with `x`/`y` reverse
/// projected back to longitude/latitude.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Point {
    /// Projected x-coordinate (or longitude, once returned by a query).
    pub x: f64,

    /// Projected y-coordinate (or latitude, once returned by a query).
    pub y: f64,

    /// Number of original input points this `Point` represents.
    pub num_points: u64,

    /// Encoded identity: the original input index for a leaf, or
    /// `((seed + k) << 5) | (zoom + 1)` for a cluster. See [`is_cluster`].
    pub id: u64,

    /// Smallest zoom at which this point has been absorbed into a cluster;
    /// [`INFINITY_ZOOM`] means "not yet clustered". Working state used only
    /// during construction — not meaningful once the index is built.
    pub(crate) zoom: u32,

    /// Original input identifiers aggregated into this point, in the order
    /// they were absorbed (this point's own identifiers first).
    pub included: Vec<u64>,
}

impl Point {
    /// Whether `id` belongs to a cluster rather than an original leaf point.
    ///
    /// # Arguments
    ///
    /// - `id`: An encoded identity, as stored in [`Point::id`].
    /// - `seed`: The cluster-identity seed computed at build time.
    ///
    /// # Returns
    ///
    /// `true` if `id` identifies a cluster.
    pub fn is_cluster(id: u64, seed: u64) -> bool {
        id >= seed
    }

    /// Decode the zoom a cluster id originated at.
    ///
    /// # Arguments
    ///
    /// - `id`: A cluster identity, as stored in [`Point::id`].
    ///
    /// # Returns
    ///
    /// The zoom level the cluster was created at.
    pub fn zoom_of(id: u64) -> u32 {
        (id % 32) as u32 - 1
    }

    /// Decode a cluster id's index into its own zoom layer.
    ///
    /// # Arguments
    ///
    /// - `id`: A cluster identity, as stored in [`Point::id`].
    /// - `seed`: The cluster-identity seed computed at build time.
    ///
    /// # Returns
    ///
    /// The index of the cluster within `Indexes[zoom_of(id)].points`.
    pub fn index_of(id: u64, seed: u64) -> usize {
        ((id >> 5) - seed) as usize
    }

    /// Encode the identity of a new cluster created at `zoom` with
    /// in-layer index `k`.
    ///
    /// # Arguments
    ///
    /// - `seed`: The cluster-identity seed computed at build time.
    /// - `k`: The cluster's index within the zoom layer being produced.
    /// - `zoom`: The zoom level the cluster originates at.
    ///
    /// # Returns
    ///
    /// The encoded cluster identity.
    pub fn encode_id(seed: u64, k: u64, zoom: u32) -> u64 {
        ((seed + k) << 5) | (zoom as u64 + 1)
    }
}

/// Compute the cluster-identity seed for an input of `count` coordinate-
/// bearing points: the smallest power of ten strictly greater than `count`.
///
/// # Arguments
///
/// - `count`: The number of points with coordinates present.
///
/// # Returns
///
/// `10^(floor(log10(max(count, 1))) + 1)`, always strictly greater than
/// `count` (including `count == 0`, which seeds at 10).
pub fn compute_seed(count: usize) -> u64 {
    let digits = (count.max(1) as f64).log10().floor() as u32 + 1;

    10u64.pow(digits)
}

/// Project the coordinate-bearing subset of `points` into the internal
/// `Point` representation used by every clustering layer, dropping inputs
/// with no coordinates.
///
/// # Arguments
///
/// - `points`: The caller-supplied points to cluster.
///
/// # Returns
///
/// One `Point` per coordinate-bearing input, in input order, with `id`
/// equal to its position among the *kept* inputs.
pub fn project_points<P: GeoPoint>(points: &[P]) -> Vec<Point> {
    let mut result = Vec::with_capacity(points.len());

    for p in points {
        let Some(coordinate) = p.coordinates() else {
            continue;
        };

        let (x, y) = crate::projection::project(coordinate.lng, coordinate.lat);
        let id = result.len() as u64;

        result.push(Point {
            x,
            y,
            num_points: 1,
            id,
            zoom: INFINITY_ZOOM,
            included: vec![p.id()],
        });
    }

    result
}
