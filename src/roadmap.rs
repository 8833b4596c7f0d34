//! Global roadmap builder (spec section 4.4): a goal-rooted RRT, aware of
//! the agent's kinodynamics, grown once at `init` time. Every node carries
//! the cumulative kinodynamic time-to-goal along its parent chain; after
//! growth the node arena is sorted ascending by that cost so the local tree
//! search can try the cheapest hand-off candidates first.

use log::{debug, info};
use rand::Rng;

use crate::debug::DebugSink;
use crate::geom::{angle_diff, seg_seg_dist2, Vec2};
use crate::types::{AgentConfig, View};

/// A node in the goal-rooted global roadmap.
#[derive(Debug, Clone)]
pub struct RoadmapNode {
    pub position: Vec2,
    /// Heading the agent holds when leaving this node towards its parent.
    /// `None` only at the root (the goal), which imposes no final heading.
    pub angle: Option<f64>,
    pub parent: Option<usize>,
    pub time_to_goal: f64,
}

/// The tree rooted at the goal, immutable after construction.
#[derive(Debug, Clone)]
pub struct GlobalRoadmap {
    nodes: Vec<RoadmapNode>,
}

impl GlobalRoadmap {
    pub fn nodes(&self) -> &[RoadmapNode] {
        &self.nodes
    }

    pub fn root_index(&self) -> usize {
        0
    }

    /// Returns true if the straight segment `from`-`to` keeps clearance
    /// `radius + margin` from every static obstacle in `view`.
    fn obstacle_traversable(from: Vec2, to: Vec2, view: &View, config: &AgentConfig) -> bool {
        let needed2 = (config.radius + config.free_margin).powi(2);
        view.obstacles
            .iter()
            .all(|o| seg_seg_dist2(o.p1, o.p2, from, to) >= needed2)
    }

    fn edge_cost(new_pos: Vec2, node: &RoadmapNode, config: &AgentConfig) -> f64 {
        let linear = (new_pos - node.position).norm() / config.speed;
        let turning = match node.angle {
            None => 0.0, // root: arriving at the goal imposes no final heading
            Some(node_angle) => {
                let diff = node.position - new_pos;
                let incoming_angle = diff.y.atan2(diff.x);
                angle_diff(incoming_angle, node_angle).abs() / config.turning_speed
            }
        };
        linear + turning
    }

    /// Grows a goal-rooted RRT until it holds `config.global_nodes` nodes,
    /// then sorts the arena ascending by `time_to_goal`.
    pub fn build(
        goal: Vec2,
        view: &View,
        config: &AgentConfig,
        rng: &mut impl Rng,
        debug_sink: &mut impl DebugSink,
    ) -> Self {
        let mut nodes = vec![RoadmapNode {
            position: goal,
            angle: None,
            parent: None,
            time_to_goal: 0.0,
        }];

        while nodes.len() < config.global_nodes {
            let candidate = crate::sampler::sample_uniform(view.world_bounds, rng);

            // Nearest node reachable via an obstacle-traversable edge.
            let nearest = nodes
                .iter()
                .enumerate()
                .filter(|(_, n)| Self::obstacle_traversable(candidate, n.position, view, config))
                .map(|(i, n)| (i, (candidate - n.position).norm_squared()))
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap());

            let (nearest_idx, nearest_dist2) = match nearest {
                Some(x) => x,
                None => continue, // no traversable node: discard candidate
            };

            if nearest_dist2 < config.rejection_threshold2 {
                continue; // too close to an existing node, prevents dense clumping
            }

            // Among all obstacle-traversable nodes, pick the one minimising
            // time_to_goal + edge_cost(candidate, node).
            let best = nodes
                .iter()
                .enumerate()
                .filter(|(_, n)| Self::obstacle_traversable(candidate, n.position, view, config))
                .map(|(i, n)| (i, n.time_to_goal + Self::edge_cost(candidate, n, config)))
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap());

            let (best_idx, _) = match best {
                Some(x) => x,
                None => continue,
            };

            // Subdivide candidate -> best.position into pieces no longer than
            // max_edge_global, chaining each subdivision node's parent to the
            // immediately preceding one (spec section 9, flag 1: the
            // reference implementation's bug is corrected here).
            let parent_pos = nodes[best_idx].position;
            let diff = candidate - parent_pos;
            let length = diff.norm();
            let divisions = (length / config.max_edge_global).ceil().max(1.0) as usize;

            let mut parent_idx = best_idx;
            for d in 1..=divisions {
                let t = d as f64 / divisions as f64;
                let sub_pos = parent_pos + diff * t;
                let parent_node = &nodes[parent_idx];
                let time_to_goal = parent_node.time_to_goal + Self::edge_cost(sub_pos, parent_node, config);
                let leaving_angle = {
                    let towards_parent = parent_node.position - sub_pos;
                    towards_parent.y.atan2(towards_parent.x)
                };
                debug_sink.draw_line(parent_node.position, sub_pos);

                nodes.push(RoadmapNode {
                    position: sub_pos,
                    angle: Some(leaving_angle),
                    parent: Some(parent_idx),
                    time_to_goal,
                });
                parent_idx = nodes.len() - 1;
            }

            debug!("global roadmap: {} nodes", nodes.len());
        }

        Self::sort_by_time_to_goal(&mut nodes);

        info!("built global roadmap with {} nodes", nodes.len());
        GlobalRoadmap { nodes }
    }

    /// Sorts the arena ascending by `time_to_goal` and remaps every `parent`
    /// index through the sort permutation, so the tree stays a pure index
    /// permutation of itself (spec section 9's design note).
    fn sort_by_time_to_goal(nodes: &mut Vec<RoadmapNode>) {
        let mut order: Vec<usize> = (0..nodes.len()).collect();
        order.sort_by(|&a, &b| nodes[a].time_to_goal.partial_cmp(&nodes[b].time_to_goal).unwrap());

        let mut new_index = vec![0usize; nodes.len()];
        for (new_i, &old_i) in order.iter().enumerate() {
            new_index[old_i] = new_i;
        }

        let mut sorted = Vec::with_capacity(nodes.len());
        for &old_i in &order {
            let mut node = nodes[old_i].clone();
            node.parent = node.parent.map(|p| new_index[p]);
            sorted.push(node);
        }
        *nodes = sorted;
    }
}
