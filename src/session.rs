//! Interactive point-placing session.
//!
//! A [`Session`] owns the append-only point list, the current [`ViewMode`],
//! and the clustering configuration. The windowing shell feeds it clicks
//! ([`Session::add_point`]) and mode-cycle triggers ([`Session::advance`]),
//! and draws the `(point, color)` pairs of each returned [`Frame`] as filled
//! circles of [`SessionConfig::radius`].

use crate::cluster::{Classification, Dbscan, DbscanFit, GroupId};
use crate::error::Result;
use crate::palette::{Color, Palette, DEFAULT_SATURATION, DEFAULT_VALUE};
use crate::point::Point;

use tracing::{debug, trace};

/// What the canvas shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// Points as placed; clicks add points.
    #[default]
    Draw,
    /// Points colored by classification.
    Flags,
    /// Points colored by group.
    Groups,
}

impl ViewMode {
    const ALL: [ViewMode; 3] = [ViewMode::Draw, ViewMode::Flags, ViewMode::Groups];

    /// The mode after this one, wrapping from `Groups` back to `Draw`.
    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    epsilon: f64,
    min_pts: usize,
    radius: u32,
    canvas: (u32, u32),
    saturation: f64,
    value: f64,
}

impl SessionConfig {
    /// Default configuration: `epsilon = 60`, `min_pts = 3`, radius 10 on an
    /// 800x600 canvas, palette saturation 0.5 and value 1.0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the neighborhood radius used for clustering.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the Core density threshold.
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Set the drawn circle radius.
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the canvas size as `(width, height)`.
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas = (width, height);
        self
    }

    /// Set the group palette saturation.
    pub fn with_saturation(mut self, saturation: f64) -> Self {
        self.saturation = saturation;
        self
    }

    /// Set the group palette value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Drawn circle radius.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Canvas size as `(width, height)`.
    pub fn canvas(&self) -> (u32, u32) {
        self.canvas
    }

    /// The clusterer this configuration describes.
    pub fn dbscan(&self) -> Dbscan {
        Dbscan::new(self.epsilon, self.min_pts)
    }

    fn palette(&self, count: usize) -> Palette {
        Palette::new(count)
            .with_saturation(self.saturation)
            .with_value(self.value)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            epsilon: 60.0,
            min_pts: 3,
            radius: 10,
            canvas: (800, 600),
            saturation: DEFAULT_SATURATION,
            value: DEFAULT_VALUE,
        }
    }
}

/// One rendering of the session.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Mode the frame was rendered in.
    pub mode: ViewMode,
    /// Clustering run the colors were derived from.
    pub fit: DbscanFit,
    /// Points in insertion order, paired with their draw color.
    pub dots: Vec<(Point, Color)>,
}

/// Color of a classification in [`ViewMode::Flags`].
pub fn flag_color(label: Classification) -> Color {
    match label {
        Classification::Core => Color::GREEN,
        Classification::Border => Color::YELLOW,
        Classification::Noise => Color::RED,
    }
}

/// Look up a group color in a palette sized by point count.
///
/// Ids index the palette directly, so [`crate::cluster::UNASSIGNED`] takes
/// `palette[0]`. An id equal to the palette length (every point its own group)
/// wraps around.
fn group_color(palette: &[Color], group: GroupId) -> Color {
    palette[group % palette.len()]
}

/// Point list plus view state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: SessionConfig,
    points: Vec<Point>,
    mode: ViewMode,
}

impl Session {
    /// Start an empty session in [`ViewMode::Draw`].
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            points: Vec::new(),
            mode: ViewMode::Draw,
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Points placed so far, in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Current view mode.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Place a point. Only accepted in [`ViewMode::Draw`]; returns whether the
    /// point was added.
    pub fn add_point(&mut self, point: impl Into<Point>) -> bool {
        let point = point.into();
        if self.mode != ViewMode::Draw {
            trace!(%point, mode = ?self.mode, "ignored click outside draw mode");
            return false;
        }
        self.points.push(point);
        true
    }

    /// Advance to the next view mode and render it.
    ///
    /// Clustering reruns on every advance, including the return to `Draw`.
    pub fn advance(&mut self) -> Result<Frame> {
        let from = self.mode;
        self.mode = self.mode.next();
        debug!(?from, to = ?self.mode, points = self.points.len(), "view mode advanced");
        self.frame()
    }

    /// Cluster the current points and render them in the current mode.
    pub fn frame(&self) -> Result<Frame> {
        let fit = self.config.dbscan().fit(&self.points);

        let dots: Vec<(Point, Color)> = match self.mode {
            ViewMode::Draw => self.points.iter().map(|&p| (p, Color::BLACK)).collect(),
            ViewMode::Flags => self
                .points
                .iter()
                .zip(&fit.classification)
                .map(|(&p, &label)| (p, flag_color(label)))
                .collect(),
            ViewMode::Groups if self.points.is_empty() => Vec::new(),
            ViewMode::Groups => {
                // Sized by point count, not group count.
                let palette = self.config.palette(self.points.len()).generate()?;
                self.points
                    .iter()
                    .zip(&fit.groups)
                    .map(|(&p, &group)| (p, group_color(&palette, group)))
                    .collect()
            }
        };

        Ok(Frame {
            mode: self.mode,
            fit,
            dots,
        })
    }
}
