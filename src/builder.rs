//! # Builder module
//!
//! This module contains the builder pattern for the supercluster configuration settings.

use crate::SuperclusterError;

/// Supercluster configuration options.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SuperclusterOptions {
    /// Lowest zoom level to index.
    /// The default value is 0.
    pub min_zoom: u8,

    /// Highest zoom level to cluster points on; hard-capped at 21 because the
    /// cluster identity scheme reserves 5 bits to carry `zoom + 1`.
    /// The default value is 21.
    pub max_zoom: u8,

    /// Nominal marker diameter, in pixels; determines the clustering radius.
    /// The default value is 40.0.
    pub point_size: f64,

    /// Tile edge, in pixels (the radius is calculated relative to it).
    /// The default value is 512.0.
    pub tile_size: f64,

    /// Size of the KD-tree leaf node, affects performance.
    /// The default value is 64.
    pub node_size: usize,
}

/// Highest zoom level the cluster identity scheme can address: 5 bits are
/// reserved to carry `zoom + 1`, leaving `0..=30`, but the data model further
/// restricts valid zooms to `0..=21` (see [`crate::point`]).
pub const MAX_ZOOM_CEILING: u8 = 21;

/// Supercluster configuration options builder.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SuperclusterBuilder {
    /// Lowest zoom level to index.
    /// The default value is 0.
    pub min_zoom: Option<u8>,

    /// Highest zoom level to cluster points on.
    /// The default value is 21.
    pub max_zoom: Option<u8>,

    /// Nominal marker diameter, in pixels; determines the clustering radius.
    /// The default value is 40.0.
    pub point_size: Option<f64>,

    /// Tile edge, in pixels (the radius is calculated relative to it).
    /// The default value is 512.0.
    pub tile_size: Option<f64>,

    /// Size of the KD-tree leaf node, affects performance.
    /// The default value is 64.
    pub node_size: Option<usize>,
}

impl SuperclusterBuilder {
    /// Create a new supercluster options builder to set the options.
    ///
    /// # Returns
    ///
    /// New supercluster options builder.
    pub fn new() -> Self {
        SuperclusterBuilder::default()
    }

    /// Set the lowest zoom level to index.
    ///
    /// # Arguments
    ///
    /// - `min_zoom`: Lowest zoom level to index.
    ///
    /// # Returns
    ///
    /// The supercluster options builder.
    pub fn min_zoom(mut self, min_zoom: u8) -> Self {
        self.min_zoom = Some(min_zoom);
        self
    }

    /// Set the highest zoom level to cluster points on. Values above
    /// [`MAX_ZOOM_CEILING`] are silently clamped during [`Self::build`]
    /// rather than rejected.
    ///
    /// # Arguments
    ///
    /// - `max_zoom`: Highest zoom level to cluster points on.
    ///
    /// # Returns
    ///
    /// The supercluster options builder.
    pub fn max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = Some(max_zoom);
        self
    }

    /// Set the nominal marker diameter in pixels.
    ///
    /// # Arguments
    ///
    /// - `point_size`: Nominal marker diameter, in pixels.
    ///
    /// # Returns
    ///
    /// The supercluster options builder.
    pub fn point_size(mut self, point_size: f64) -> Self {
        self.point_size = Some(point_size);
        self
    }

    /// Set the tile edge, in pixels.
    ///
    /// # Arguments
    ///
    /// - `tile_size`: Tile edge, in pixels.
    ///
    /// # Returns
    ///
    /// The supercluster options builder.
    pub fn tile_size(mut self, tile_size: f64) -> Self {
        self.tile_size = Some(tile_size);
        self
    }

    /// Set the size of the KD-tree leaf node.
    ///
    /// # Arguments
    ///
    /// - `node_size`: Size of the KD-tree leaf node, affects performance.
    ///
    /// # Returns
    ///
    /// The supercluster options builder.
    pub fn node_size(mut self, node_size: usize) -> Self {
        self.node_size = Some(node_size);
        self
    }

    /// Build the supercluster options, validating each in turn.
    ///
    /// Options are checked in the order they appear on [`SuperclusterOptions`];
    /// the first to fail aborts and its reason is reported. `max_zoom` above
    /// [`MAX_ZOOM_CEILING`] is clamped rather than treated as an error.
    ///
    /// # Returns
    ///
    /// The validated supercluster options, or the first [`SuperclusterError::Config`]
    /// encountered.
    pub fn build(self) -> Result<SuperclusterOptions, SuperclusterError> {
        let min_zoom = self.min_zoom.unwrap_or(0);
        let max_zoom = self.max_zoom.unwrap_or(MAX_ZOOM_CEILING).min(MAX_ZOOM_CEILING);
        let point_size = self.point_size.unwrap_or(40.0);
        let tile_size = self.tile_size.unwrap_or(512.0);
        let node_size = self.node_size.unwrap_or(64);

        if min_zoom > max_zoom {
            let err = SuperclusterError::Config(format!(
                "min_zoom ({min_zoom}) must not exceed max_zoom ({max_zoom})"
            ));

            #[cfg(feature = "log")]
            log::error!("{err}");

            return Err(err);
        }
        if point_size <= 0.0 {
            let err = SuperclusterError::Config(format!(
                "point_size must be greater than zero, got {point_size}"
            ));

            #[cfg(feature = "log")]
            log::error!("{err}");

            return Err(err);
        }
        if tile_size <= 0.0 {
            let err = SuperclusterError::Config(format!(
                "tile_size must be greater than zero, got {tile_size}"
            ));

            #[cfg(feature = "log")]
            log::error!("{err}");

            return Err(err);
        }
        if node_size == 0 {
            let err = SuperclusterError::Config("node_size must be greater than zero".to_string());

            #[cfg(feature = "log")]
            log::error!("{err}");

            return Err(err);
        }

        Ok(SuperclusterOptions {
            min_zoom,
            max_zoom,
            point_size,
            tile_size,
            node_size,
        })
    }
}
