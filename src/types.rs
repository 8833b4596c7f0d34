//! Core data model: poses, obstacles, pedestrians, the per-tick `View`, and the
//! immutable agent configuration. Mirrors spec section 3 one-to-one.

use serde::{Deserialize, Serialize};

use crate::geom::Vec2;

/// Position plus heading, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub angle: f64,
}

impl Pose {
    pub fn new(position: Vec2, angle: f64) -> Self {
        Pose { position, angle }
    }
}

/// A static line-segment obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Obstacle {
    pub fn new(p1: Vec2, p2: Vec2) -> Self {
        Obstacle { p1, p2 }
    }
}

/// A moving pedestrian's instantaneous snapshot. Extrapolated linearly:
/// `pos(t) = position + velocity * t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pedestrian {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f64,
}

impl Pedestrian {
    pub fn new(position: Vec2, velocity: Vec2, radius: f64) -> Self {
        Pedestrian {
            position,
            velocity,
            radius,
        }
    }

    /// Extrapolated position at time `t` from this snapshot.
    pub fn position_at(&self, t: f64) -> Vec2 {
        self.position + self.velocity * t
    }

    pub fn is_stationary(&self) -> bool {
        self.velocity.norm_squared() == 0.0
    }
}

/// Axis-aligned world bounds, `(xmin, xmax, ymin, ymax)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl WorldBounds {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        WorldBounds {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }
}

/// Immutable per-tick snapshot handed to the planner: static obstacles,
/// currently perceived pedestrians, and the world bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub obstacles: Vec<Obstacle>,
    pub pedestrians: Vec<Pedestrian>,
    pub world_bounds: WorldBounds,
}

impl View {
    pub fn new(
        obstacles: Vec<Obstacle>,
        pedestrians: Vec<Pedestrian>,
        world_bounds: WorldBounds,
    ) -> Self {
        View {
            obstacles,
            pedestrians,
            world_bounds,
        }
    }
}

/// The agent's immutable kinodynamic and safety parameters.
///
/// Every constant named in spec section 6 (including the section 9 flag about
/// the rejection-threshold magic constant) is a field here rather than a
/// hard-coded literal, so a host application can tune or serialize it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub radius: f64,
    pub speed: f64,
    pub turning_speed: f64,
    pub free_margin: f64,
    pub global_nodes: usize,
    pub max_edge_global: f64,
    pub max_edge_local: f64,
    pub local_max_size: usize,
    pub safety_threshold: f64,
    /// Squared-distance rejection threshold used by the global builder to
    /// discard candidate samples too close to an already-traversable node
    /// (spec section 9, flag 4).
    pub rejection_threshold2: f64,
}

impl AgentConfig {
    pub fn new(radius: f64, speed: f64, turning_speed: f64, free_margin: f64) -> Self {
        AgentConfig {
            radius,
            speed,
            turning_speed,
            free_margin,
            global_nodes: 60,
            max_edge_global: 2.0 * radius,
            max_edge_local: 2.0 * radius,
            local_max_size: 10,
            safety_threshold: 0.9,
            rejection_threshold2: 1000.0,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig::new(5.0, 30.0, 2.0 * std::f64::consts::PI / 3.0, 2.0)
    }
}
