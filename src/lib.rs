//! ART (Anytime Roadmap Tree) navigation core.
//!
//! A two-tier sampling-based motion planner for a single circular agent
//! moving through a 2D world of static line-segment obstacles and linearly
//! extrapolated pedestrian discs:
//!
//! 1. A goal-rooted, kinodynamics-aware global roadmap (an RRT variant),
//!    grown once at [`ArtPlanner::init`] and never mutated afterward.
//! 2. A per-tick local search ([`ArtPlanner::plan`]) that first tries a
//!    direct hand-off from the agent's pose into the global roadmap and,
//!    failing that, grows a small disposable local tree biased around the
//!    agent and the previous tick's plan.
//!
//! World simulation, rendering, pedestrian visibility, the event loop,
//! scenario loading, and statistics collection are all external
//! collaborators; this crate consumes a [`View`] and a [`Pose`] and emits an
//! ordered waypoint list.

pub mod debug;
pub mod error;
pub mod geom;
pub mod local_tree;
pub mod planner;
pub mod roadmap;
pub mod safety;
pub mod sampler;
pub mod types;

pub use debug::{DebugSink, NullDebugSink};
pub use error::PlanError;
pub use geom::Vec2;
pub use planner::ArtPlanner;
pub use roadmap::{GlobalRoadmap, RoadmapNode};
pub use types::{AgentConfig, Obstacle, Pedestrian, Pose, View, WorldBounds};
