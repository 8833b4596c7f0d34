//! Planner façade (spec section 4.6): owns the global roadmap, drives the
//! per-tick local search, and emits waypoint lists. This is the crate's only
//! public entry point -- everything else in the crate is an implementation
//! detail reachable through it.

use log::info;
use rand::Rng;

use crate::debug::DebugSink;
use crate::error::PlanError;
use crate::geom::Vec2;
use crate::local_tree;
use crate::roadmap::GlobalRoadmap;
use crate::types::{AgentConfig, Pose, View};

/// Owns the one-time global roadmap and the rolling previous-tick waypoint
/// list used to seed the local sampler. Created once via [`ArtPlanner::init`]
/// and driven once per tick via [`ArtPlanner::plan`].
pub struct ArtPlanner {
    goal: Vec2,
    config: AgentConfig,
    roadmap: Option<GlobalRoadmap>,
    previous_waypoints: Vec<Vec2>,
}

impl ArtPlanner {
    /// Constructs a planner for `goal` with the given kinematic config. Call
    /// [`init`](Self::init) once before the first [`plan`](Self::plan) call.
    pub fn new(goal: Vec2, config: AgentConfig) -> Self {
        ArtPlanner {
            goal,
            config,
            roadmap: None,
            previous_waypoints: Vec::new(),
        }
    }

    /// One-time setup: builds the goal-rooted global roadmap against the
    /// given (typically first-tick) view. Never mutated afterward. `debug_sink`
    /// receives a `draw_line` call per roadmap edge as it is grown (spec
    /// section 6's debug-draw side channel); pass [`crate::debug::NullDebugSink`]
    /// when no visualization is needed.
    pub fn init(&mut self, view: &View, rng: &mut impl Rng, debug_sink: &mut impl DebugSink) {
        let roadmap = GlobalRoadmap::build(self.goal, view, &self.config, rng, debug_sink);
        info!("ArtPlanner initialized with {} global nodes", roadmap.nodes().len());
        self.roadmap = Some(roadmap);
    }

    /// Per-tick entry point. Returns the waypoint list produced this tick
    /// (empty on any failure per spec section 6), and remembers it to seed
    /// next tick's local sampler. `debug_sink` receives a `draw_circle` call
    /// per perceived pedestrian and a `draw_line` call per local-tree edge
    /// grown during the search.
    pub fn plan(
        &mut self,
        pose: Pose,
        view: &View,
        rng: &mut impl Rng,
        debug_sink: &mut impl DebugSink,
    ) -> Vec<Vec2> {
        if self.goal_occupied(view) {
            info!("{}", PlanError::GoalOccupied);
            self.previous_waypoints.clear();
            return Vec::new();
        }

        let roadmap = match &self.roadmap {
            Some(r) => r,
            None => {
                info!("{}", PlanError::NoFeasiblePlan);
                return Vec::new();
            }
        };

        match local_tree::plan(
            pose,
            view,
            roadmap,
            &self.config,
            &self.previous_waypoints,
            rng,
            debug_sink,
        ) {
            Some(waypoints) => {
                self.previous_waypoints = waypoints.clone();
                waypoints
            }
            None => {
                info!("{}", PlanError::NoFeasiblePlan);
                self.previous_waypoints.clear();
                Vec::new()
            }
        }
    }

    /// True iff the goal is blocked by a static obstacle within `radius`, or
    /// covered by a stationary pedestrian within its own radius.
    pub fn goal_occupied(&self, view: &View) -> bool {
        let radius2 = self.config.radius * self.config.radius;
        let obstacle_blocked = view
            .obstacles
            .iter()
            .any(|o| crate::geom::point_seg_dist2(self.goal, o.p1, o.p2) < radius2);
        if obstacle_blocked {
            return true;
        }
        view.pedestrians.iter().any(|p| {
            p.is_stationary() && (self.goal - p.position).norm_squared() < p.radius * p.radius
        })
    }

    pub fn goal(&self) -> Vec2 {
        self.goal
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn roadmap(&self) -> Option<&GlobalRoadmap> {
        self.roadmap.as_ref()
    }
}
