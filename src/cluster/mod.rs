//! Density-based grouping of 2D points.
//!
//! Points are first labelled by how crowded their neighborhood is, then grouped
//! by flood fill from the crowded ones.
//!
//! ## Classification
//!
//! With a radius ε and a threshold MinPts, a point is
//!
//! - **Core** if at least MinPts *other* points lie strictly within ε,
//! - **Border** if it is not Core but some Core point lies strictly within ε,
//! - **Noise** otherwise.
//!
//! ## Grouping
//!
//! Each unassigned Core point, in stored order, opens a new group and sweeps in
//! every unassigned point reachable through a chain of ε-steps that never passes
//! *through* a Border point. Group ids start at 1; 0 means "no group".
//!
//! The number of groups is discovered, not configured. Both passes are
//! brute-force O(n²).
//!
//! ## Usage
//!
//! ```rust
//! use dotscan::cluster::{Classification, Dbscan};
//! use dotscan::Point;
//!
//! let points = vec![
//!     Point::new(0, 0),
//!     Point::new(10, 0),
//!     Point::new(20, 0),
//!     Point::new(500, 500),
//! ];
//!
//! let fit = Dbscan::new(15.0, 1).fit(&points);
//! assert_eq!(fit.classification[3], Classification::Noise);
//! assert_eq!(fit.groups, vec![1, 1, 1, 0]);
//! ```

mod dbscan;
mod traits;

pub use dbscan::{
    assign, classify, Classification, Dbscan, DbscanExt, DbscanFit, GroupId, UNASSIGNED,
};
pub use traits::Clustering;
