//! Common test utilities module
//!
//! Provides shared utilities for tests including:
//! - Stand-in algorithms covering each model capability
//! - Host frames used across test files

#![allow(dead_code)]

pub mod doubles;
pub mod fixtures;

pub use doubles::{
    CentroidModel, FixedCenters, MeanModel, MeanRegressor, NearestCentroid, PartitionModel,
};
pub use fixtures::{points_frame, prices_frame, weather_frame, weather_row};
