//! DBSCAN-style density classification and grouping of 2D points.
//!
//! # The Procedure
//!
//! Clustering runs as two loosely coupled passes over the full point set:
//!
//! 1. **Classification** ([`classify`]): every point is labelled
//!    [`Classification::Core`], [`Classification::Border`], or
//!    [`Classification::Noise`] from its local neighbor density.
//! 2. **Assignment** ([`assign`]): groups are grown from Core seeds by flood
//!    fill, reading the classification without mutating it.
//!
//! ## Core Concepts
//!
//! - **Epsilon (ε)**: neighborhood radius. Neighbors lie *strictly* within ε; a
//!   point at exactly ε is not a neighbor.
//! - **MinPts**: minimum number of *other* points within ε for a point to be
//!   Core. Points at the same coordinates do not count as each other's
//!   neighbors.
//! - **Core point**: has at least MinPts neighbors.
//! - **Border point**: not Core, but within ε of some Core point.
//! - **Noise point**: neither.
//!
//! ## Grouping Rule
//!
//! Scanning points in their stored order, each Core point that is still
//! unassigned opens the next group id (starting at 1; id 0 is
//! [`UNASSIGNED`]). Expansion then labels every unassigned point within ε of
//! the frontier, whatever its classification, and keeps expanding from every
//! newly labelled point that is not Border. Border points sit on a group's edge:
//! they take the label but never extend it.
//!
//! Because the expansion does not consult the classification beyond the Border
//! check, an assignment run against a classification in which a Noise point is
//! adjacent to the frontier will pull that point into the group.
//!
//! ## Complexity
//!
//! - **Time**: O(n²), brute force. No spatial index.
//! - **Space**: O(n) for labels and the expansion stack.

use super::traits::Clustering;
use crate::error::Result;
use crate::point::{distance, Point};

use tracing::{debug, trace};

/// Group id of a point. `0` is [`UNASSIGNED`]; real groups are `1..=K`.
pub type GroupId = usize;

/// Group id of a point that belongs to no group.
pub const UNASSIGNED: GroupId = 0;

/// Density label of a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// At least `min_pts` other points strictly within `eps`.
    Core,
    /// Not Core, but strictly within `eps` of a Core point.
    Border,
    /// Neither Core nor Border.
    Noise,
}

impl Classification {
    /// Whether this is a Core point.
    pub fn is_core(self) -> bool {
        self == Classification::Core
    }
}

/// Label every point as Core, Border, or Noise.
///
/// The returned vector is parallel to `points`. Degenerate parameters are not
/// errors: `eps <= 0.0` leaves every neighbor count at zero, so all points are
/// Noise unless `min_pts == 0`, in which case all points are trivially Core.
pub fn classify(points: &[Point], eps: f64, min_pts: usize) -> Vec<Classification> {
    // Pass 1: neighbor counts.
    let mut labels: Vec<Classification> = points
        .iter()
        .map(|&p| {
            let neighbors = points
                .iter()
                .filter(|&&q| q != p && distance(p, q) < eps)
                .count();
            if neighbors >= min_pts {
                Classification::Core
            } else {
                Classification::Noise
            }
        })
        .collect();

    // Pass 2: promote Noise next to a pass-1 Core point.
    // Border promotions never create Core points, so reading `labels` while
    // writing Border into it sees exactly the pass-1 Core set.
    for i in 0..points.len() {
        if labels[i] != Classification::Noise {
            continue;
        }
        let p = points[i];
        let near_core = points
            .iter()
            .zip(labels.iter())
            .any(|(&c, &label)| label.is_core() && c != p && distance(p, c) < eps);
        if near_core {
            labels[i] = Classification::Border;
        }
    }

    labels
}

/// Partition points into density-connected groups.
///
/// `classification` must be parallel to `points` (as produced by [`classify`]).
/// Returns one [`GroupId`] per point, [`UNASSIGNED`] for points reached from no
/// Core seed.
///
/// # Panics
///
/// Panics if `classification.len() != points.len()`.
pub fn assign(points: &[Point], classification: &[Classification], eps: f64) -> Vec<GroupId> {
    assert_eq!(
        points.len(),
        classification.len(),
        "classification must be parallel to points"
    );

    let mut groups = vec![UNASSIGNED; points.len()];
    let mut next_id: GroupId = 1;
    // Reused across seeds; always empty between expansions.
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for seed in 0..points.len() {
        if !classification[seed].is_core() || groups[seed] != UNASSIGNED {
            continue;
        }

        let members = expand(points, classification, eps, seed, next_id, &mut groups, &mut stack);
        trace!(seed, group = next_id, members, "expanded group");

        // With eps <= 0 nothing is within reach, not even the seed itself.
        if members > 0 {
            next_id += 1;
        }
    }

    groups
}

/// Flood-fill `group` outward from `seed`, returning how many points it labelled.
///
/// Each stack frame is `(center, cursor)`: the point being expanded and the
/// index its scan resumes from. Scanning a frame to completion before popping,
/// and pushing a new frame the moment a non-Border point is labelled, visits
/// points in exactly the order of the recursive formulation.
fn expand(
    points: &[Point],
    classification: &[Classification],
    eps: f64,
    seed: usize,
    group: GroupId,
    groups: &mut [GroupId],
    stack: &mut Vec<(usize, usize)>,
) -> usize {
    let mut labelled = 0;
    stack.push((seed, 0));

    while let Some(frame) = stack.last_mut() {
        let (center, cursor) = *frame;
        let hit = (cursor..points.len())
            .find(|&q| groups[q] == UNASSIGNED && distance(points[center], points[q]) < eps);

        match hit {
            Some(q) => {
                frame.1 = q + 1;
                groups[q] = group;
                labelled += 1;
                if classification[q] != Classification::Border {
                    stack.push((q, 0));
                }
            }
            None => {
                stack.pop();
            }
        }
    }

    labelled
}

/// Output of one clustering run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbscanFit {
    /// Density label per point.
    pub classification: Vec<Classification>,
    /// Group id per point; [`UNASSIGNED`] for ungrouped points.
    pub groups: Vec<GroupId>,
    /// Number of groups found; ids run `1..=n_groups`.
    pub n_groups: usize,
}

impl DbscanFit {
    /// Number of points in the run.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the run covered no points.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Count of points per classification, as `(core, border, noise)`.
    pub fn class_counts(&self) -> (usize, usize, usize) {
        self.classification
            .iter()
            .fold((0, 0, 0), |(c, b, n), label| match label {
                Classification::Core => (c + 1, b, n),
                Classification::Border => (c, b + 1, n),
                Classification::Noise => (c, b, n + 1),
            })
    }

    /// Indices of the points in `group`, in point order.
    pub fn members(&self, group: GroupId) -> Vec<usize> {
        self.groups
            .iter()
            .enumerate()
            .filter(|&(_, &g)| g == group)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Density clusterer configured with a radius and a density threshold.
#[derive(Debug, Clone)]
pub struct Dbscan {
    /// Epsilon: strict neighborhood radius.
    epsilon: f64,
    /// Minimum count of other points within epsilon for a Core point.
    min_pts: usize,
}

impl Dbscan {
    /// Create a new clusterer.
    ///
    /// # Arguments
    ///
    /// * `epsilon` - Neighborhood radius, in the same units as point coordinates.
    /// * `min_pts` - Minimum number of *other* points strictly within `epsilon`
    ///   for a point to be Core.
    pub fn new(epsilon: f64, min_pts: usize) -> Self {
        Self { epsilon, min_pts }
    }

    /// Set epsilon (neighborhood radius).
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set minimum points for core classification.
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Neighborhood radius.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Density threshold.
    pub fn min_pts(&self) -> usize {
        self.min_pts
    }

    /// Classify points with this configuration. See [`classify`].
    pub fn classify(&self, points: &[Point]) -> Vec<Classification> {
        classify(points, self.epsilon, self.min_pts)
    }

    /// Run classification and group assignment over the full point set.
    ///
    /// Every call is independent: all outputs are freshly allocated.
    pub fn fit(&self, points: &[Point]) -> DbscanFit {
        let classification = self.classify(points);
        let groups = assign(points, &classification, self.epsilon);
        let n_groups = groups.iter().copied().max().unwrap_or(UNASSIGNED);

        let fit = DbscanFit {
            classification,
            groups,
            n_groups,
        };
        let (core, border, noise) = fit.class_counts();
        debug!(
            points = points.len(),
            core,
            border,
            noise,
            groups = n_groups,
            epsilon = self.epsilon,
            min_pts = self.min_pts,
            "clustered points"
        );
        fit
    }
}

impl Default for Dbscan {
    /// `epsilon = 60.0`, `min_pts = 3`.
    fn default() -> Self {
        Self::new(60.0, 3)
    }
}

impl Clustering for Dbscan {
    fn fit_predict(&self, points: &[Point]) -> Result<Vec<GroupId>> {
        Ok(self.fit(points).groups)
    }

    /// Groups are discovered dynamically, so this returns 0.
    ///
    /// To get the actual number of groups, use [`Dbscan::fit`].
    fn n_clusters(&self) -> usize {
        0
    }
}

/// Extended interface that reports ungrouped points as `None`.
pub trait DbscanExt {
    /// Fit and predict, returning `None` for points in no group.
    fn fit_predict_with_noise(&self, points: &[Point]) -> Result<Vec<Option<GroupId>>>;

    /// Check if a label represents an ungrouped point.
    fn is_unassigned(label: GroupId) -> bool {
        label == UNASSIGNED
    }
}

impl DbscanExt for Dbscan {
    fn fit_predict_with_noise(&self, points: &[Point]) -> Result<Vec<Option<GroupId>>> {
        Ok(self
            .fit_predict(points)?
            .into_iter()
            .map(|g| if Self::is_unassigned(g) { None } else { Some(g) })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Classification::{Border, Core, Noise};

    fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_single_point_is_noise() {
        let points = pts(&[(0, 0)]);
        let fit = Dbscan::new(60.0, 3).fit(&points);
        assert_eq!(fit.classification, vec![Noise]);
        assert_eq!(fit.groups, vec![0]);
        assert_eq!(fit.n_groups, 0);
    }

    #[test]
    fn test_pair_with_min_pts_one() {
        let points = pts(&[(0, 0), (1, 0)]);
        let fit = Dbscan::new(60.0, 1).fit(&points);
        assert_eq!(fit.classification, vec![Core, Core]);
        assert_eq!(fit.groups, vec![1, 1]);
        assert_eq!(fit.n_groups, 1);
    }

    #[test]
    fn test_chain_groups_through_middle_point() {
        let points = pts(&[(0, 0), (10, 0), (20, 0)]);
        let fit = Dbscan::new(15.0, 1).fit(&points);
        assert_eq!(fit.classification, vec![Core, Core, Core]);
        assert!(distance(points[0], points[2]) >= 15.0);
        assert_eq!(fit.groups, vec![1, 1, 1]);
    }

    #[test]
    fn test_tiny_epsilon_all_noise() {
        let points = pts(&[(0, 0), (100, 0), (0, 100), (250, 250)]);
        let fit = Dbscan::new(0.001, 1).fit(&points);
        assert!(fit.classification.iter().all(|&c| c == Noise));
        assert!(fit.groups.iter().all(|&g| g == UNASSIGNED));
    }

    #[test]
    fn test_empty_input() {
        let fit = Dbscan::default().fit(&[]);
        assert!(fit.is_empty());
        assert!(fit.classification.is_empty());
        assert_eq!(fit.n_groups, 0);
    }

    #[test]
    fn test_neighbor_at_exactly_epsilon_does_not_count() {
        let points = pts(&[(0, 0), (3, 4)]);
        assert_eq!(classify(&points, 5.0, 1), vec![Noise, Noise]);
        assert_eq!(classify(&points, 5.0001, 1), vec![Core, Core]);
    }

    #[test]
    fn test_border_point() {
        // Three points tight around the origin, one at the edge of (0, 0) only.
        let points = pts(&[(0, 0), (5, 0), (0, 5), (-9, 0)]);
        let labels = classify(&points, 10.0, 2);
        assert_eq!(labels, vec![Core, Core, Core, Border]);

        let groups = assign(&points, &labels, 10.0);
        assert_eq!(groups, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_border_point_does_not_extend_group() {
        // 0..=3 form a dense knot; 4 is Border off (0, 0); 5 is only near 4.
        let points = pts(&[(0, 0), (4, 0), (0, 4), (4, 4), (-9, -3), (-17, -3)]);
        let fit = Dbscan::new(10.0, 3).fit(&points);
        assert_eq!(
            fit.classification,
            vec![Core, Core, Core, Core, Border, Noise]
        );
        assert_eq!(fit.groups, vec![1, 1, 1, 1, 1, UNASSIGNED]);
    }

    #[test]
    fn test_duplicates_are_not_neighbors() {
        let points = pts(&[(7, 7), (7, 7), (7, 7)]);
        assert_eq!(classify(&points, 60.0, 1), vec![Noise, Noise, Noise]);

        // With min_pts = 0 every point is Core; duplicates are swept into one group.
        let fit = Dbscan::new(60.0, 0).fit(&points);
        assert_eq!(fit.classification, vec![Core, Core, Core]);
        assert_eq!(fit.groups, vec![1, 1, 1]);
    }

    #[test]
    fn test_min_pts_zero_isolated_points_each_own_group() {
        let points = pts(&[(0, 0), (500, 0), (0, 500)]);
        let fit = Dbscan::new(60.0, 0).fit(&points);
        assert_eq!(fit.classification, vec![Core, Core, Core]);
        assert_eq!(fit.groups, vec![1, 2, 3]);
        assert_eq!(fit.n_groups, 3);
    }

    #[test]
    fn test_non_positive_epsilon() {
        let points = pts(&[(0, 0), (0, 0), (1, 1)]);
        for eps in [0.0, -5.0] {
            let fit = Dbscan::new(eps, 1).fit(&points);
            assert_eq!(fit.classification, vec![Noise, Noise, Noise]);
            assert_eq!(fit.groups, vec![0, 0, 0]);

            // All Core, but nothing is within reach: no group is formed.
            let fit = Dbscan::new(eps, 0).fit(&points);
            assert_eq!(fit.classification, vec![Core, Core, Core]);
            assert_eq!(fit.groups, vec![0, 0, 0]);
            assert_eq!(fit.n_groups, 0);
        }
    }

    #[test]
    fn test_groups_numbered_in_discovery_order() {
        let points = pts(&[
            // Noise first, so it can't seed anything.
            (1000, 1000),
            // Right cluster is stored before the left one.
            (500, 0),
            (505, 0),
            (500, 5),
            (0, 0),
            (5, 0),
            (0, 5),
        ]);
        let fit = Dbscan::new(20.0, 2).fit(&points);
        assert_eq!(fit.groups, vec![0, 1, 1, 1, 2, 2, 2]);
        assert_eq!(fit.members(2), vec![4, 5, 6]);
        assert_eq!(fit.class_counts(), (6, 0, 1));
    }

    #[test]
    fn test_assign_sweeps_in_noise_labelled_points() {
        // Against a hand-written classification, expansion reaches Noise points
        // adjacent to the frontier and keeps expanding through them.
        let points = pts(&[(0, 0), (10, 0), (20, 0), (30, 0)]);
        let labels = vec![Core, Noise, Noise, Border];
        assert_eq!(assign(&points, &labels, 15.0), vec![1, 1, 1, 1]);

        // A Border point stops the chain.
        let labels = vec![Core, Border, Noise, Noise];
        assert_eq!(assign(&points, &labels, 15.0), vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_assign_never_seeds_from_non_core() {
        let points = pts(&[(0, 0), (10, 0)]);
        assert_eq!(assign(&points, &[Noise, Border], 60.0), vec![0, 0]);
    }

    #[test]
    fn test_border_claimed_by_first_group() {
        // Point 4 bridges two knots but is not dense itself; the knot stored
        // first claims it and the bridge carries no expansion across.
        let points = pts(&[
            (20, 0),
            (24, 0),
            (24, -4),
            (20, -4),
            (10, 0),
            (0, 0),
            (-4, 0),
            (-4, -4),
            (0, -4),
        ]);
        let fit = Dbscan::new(10.5, 3).fit(&points);
        assert_eq!(fit.classification[4], Border);
        assert_eq!(fit.class_counts(), (8, 1, 0));
        assert_eq!(fit.groups, vec![1, 1, 1, 1, 1, 2, 2, 2, 2]);
        assert_eq!(fit.n_groups, 2);
    }

    #[test]
    fn test_long_chain_does_not_overflow_stack() {
        let points: Vec<Point> = (0..3_000).map(|i| Point::new(i * 10, 0)).collect();
        let fit = Dbscan::new(15.0, 1).fit(&points);
        assert_eq!(fit.n_groups, 1);
        assert!(fit.groups.iter().all(|&g| g == 1));
    }

    #[test]
    fn test_fit_predict_with_noise() {
        let points = pts(&[(0, 0), (5, 0), (0, 5), (900, 900)]);
        let labels = Dbscan::new(10.0, 2).fit_predict_with_noise(&points).unwrap();
        assert_eq!(labels, vec![Some(1), Some(1), Some(1), None]);
        assert_eq!(Dbscan::default().n_clusters(), 0);
    }

    #[test]
    fn test_builder() {
        let dbscan = Dbscan::default().with_epsilon(15.0).with_min_pts(4);
        assert_eq!(dbscan.epsilon(), 15.0);
        assert_eq!(dbscan.min_pts(), 4);
    }
}
