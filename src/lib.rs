//! Density grouping for 2D points.
//!
//! `dotscan` classifies a list of placed points by local density and groups
//! them into density-connected clusters, then colors the groups from an evenly
//! hued palette.
//!
//! - [`cluster`]: Core/Border/Noise classification and group assignment
//! - [`palette`]: deterministic group colors
//! - [`session`]: point list, view-mode cycle, and per-mode coloring for a
//!   drawing shell

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod palette;
pub mod point;
pub mod session;

pub use cluster::{
    assign, classify, Classification, Clustering, Dbscan, DbscanExt, DbscanFit, GroupId,
    UNASSIGNED,
};
pub use error::{Error, Result};
pub use palette::{generate, Color, Palette};
pub use point::{distance, Point};
pub use session::{Frame, Session, SessionConfig, ViewMode};
