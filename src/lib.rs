#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # Supercluster
//!
//! A high-performance Rust crate for hierarchical spatial clustering of geographic point data.
//!
//! ## Documentation
//!
//! For more in-depth details, please refer to the full [documentation](https://docs.rs/geocluster).
//!
//! If you encounter any issues or have questions that are not addressed in the documentation, feel free to submit an issue on the repository.
//! This crate was initially inspired by Mapbox's supercluster [blog post](https://blog.mapbox.com/clustering-millions-of-points-on-a-map-with-supercluster-272046ec5c97).
//!
//! ## Usage
//!
//! To use the `geocluster` crate in your project, add it to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! geocluster = "0.1"
//! ```
//!
//! Implement [`GeoPoint`] for whatever type holds your data, build a [`Supercluster`], and load it:
//!
//! ```rust
//! use geocluster::{GeoCoordinate, GeoPoint, NeverCancelled, Supercluster, SuperclusterError};
//!
//! struct Place {
//!     id: u64,
//!     lng: f64,
//!     lat: f64,
//! }
//!
//! impl GeoPoint for Place {
//!     fn id(&self) -> u64 {
//!         self.id
//!     }
//!
//!     fn coordinates(&self) -> Option<GeoCoordinate> {
//!         Some(GeoCoordinate::new(self.lng, self.lat))
//!     }
//! }
//!
//! fn main() -> Result<(), SuperclusterError> {
//!     let options = Supercluster::builder().max_zoom(16).build()?;
//!     let mut cluster = Supercluster::new(options);
//!
//!     let places = vec![Place { id: 0, lng: 20.8, lat: 52.2 }];
//!     cluster.load(&places);
//!
//!     let clusters = cluster.all_clusters(0, None);
//!     println!("{} clusters at zoom 0", clusters.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Benchmarks
//!
//! We use the `criterion` crate to benchmark the performance of the `geocluster` crate.
//!
//! Benchmarks help us understand the performance characteristics of geocluster and identify areas for optimization.
//!
//! We have several benchmark scenarios to test different aspects of geocluster:
//!
//! - **Loading points**: Tests the performance of clustering a batch of points across every zoom level.
//! - **Getting clusters**: Tests the performance of a bounding-box query at a given zoom level.
//!
//! For more detailed benchmark scenarios, please refer to the `benches` directory in the repository.
//!
//! ## Safety
//!
//! This crate uses `#![forbid(unsafe_code)]` to ensure everything is implemented in 100% safe Rust.
//!
//! ## Contributing
//!
//! Thanks for your help improving the project! Issues and pull requests are welcome.

/// Supercluster builder module.
/// This module contains the builder pattern for the supercluster configuration settings.
pub mod builder;

/// Cancellation module.
/// This module contains the cancellation token used to abort a long-running query.
pub mod cancellation;

/// Supercluster error module.
/// This module contains the error types for the supercluster crate.
pub mod error;

/// KDBush module.
/// This module contains the KDBush implementation for the supercluster crate.
pub mod kdbush;

/// Point module.
/// This module contains the inbound data contract and the internal point representation.
pub mod point;

/// Projection module.
/// This module contains the Web Mercator projection used to place points on the unit square.
pub mod projection;

/// Supercluster module.
/// This module contains the supercluster implementation for the supercluster crate.
pub mod supercluster;

pub use builder::*;
pub use cancellation::*;
pub use error::*;
pub use kdbush::*;
pub use point::*;
pub use projection::*;
pub use supercluster::*;
