//! Local tree search (spec section 4.5): per tick, first try a direct
//! hand-off from the agent's pose into the global roadmap; if that fails,
//! grow a small, disposable tree around the agent, biased by last tick's
//! waypoints, and attempt a hand-off from every new leaf.

use log::debug;
use rand::Rng;

use crate::debug::DebugSink;
use crate::geom::Vec2;
use crate::roadmap::GlobalRoadmap;
use crate::safety::{segment_time, turn_then_straight_safeness};
use crate::sampler::PrependThenExtend;
use crate::types::{AgentConfig, Pose, View, WorldBounds};

/// A node in the per-tick local tree, rooted at the agent's current pose.
#[derive(Debug, Clone)]
struct LocalNode {
    position: Vec2,
    angle: f64,
    parent: Option<usize>,
    time: f64,
    safeness: f64,
}

/// Attempts to splice `(position, angle)` at time `start_time` (with
/// cumulative prefix safeness `start_safeness`) into the global roadmap.
/// Walks the pre-sorted node list in ascending `time_to_goal` order and
/// returns the first node whose composite plan clears `config.safety_threshold`,
/// together with the arrival time at the goal and the waypoint chain from
/// that node down to the goal.
pub fn find_globaltree(
    position: Vec2,
    angle: f64,
    roadmap: &GlobalRoadmap,
    view: &View,
    config: &AgentConfig,
    start_time: f64,
    start_safeness: f64,
) -> Option<(Vec<Vec2>, f64)> {
    for node in roadmap.nodes() {
        let safeness = start_safeness
            * turn_then_straight_safeness(position, angle, node.position, view, config, start_time);
        if safeness < config.safety_threshold {
            continue;
        }

        let mut time = start_time + segment_time(angle, position, node.position, config);
        let mut path = vec![node.position];
        let mut cumulative_safeness = safeness;
        let mut cur = node;
        let mut ok = true;

        while let Some(parent_idx) = cur.parent {
            let parent = &roadmap.nodes()[parent_idx];
            let leaving_angle = cur.angle.unwrap_or(angle);
            cumulative_safeness *= turn_then_straight_safeness(
                cur.position,
                leaving_angle,
                parent.position,
                view,
                config,
                time,
            );
            if cumulative_safeness < config.safety_threshold {
                ok = false;
                break;
            }
            time += segment_time(leaving_angle, cur.position, parent.position, config);
            path.push(parent.position);
            cur = parent;
        }

        if ok {
            return Some((path, time));
        }
    }
    None
}

/// Per-tick local search entry point (spec section 4.5, steps 1-2).
pub fn plan(
    pose: Pose,
    view: &View,
    roadmap: &GlobalRoadmap,
    config: &AgentConfig,
    previous_waypoints: &[Vec2],
    rng: &mut impl Rng,
    debug_sink: &mut impl DebugSink,
) -> Option<Vec<Vec2>> {
    for p in &view.pedestrians {
        debug_sink.draw_circle(p.position, p.radius);
    }

    // Step 1: direct hand-off from the current pose.
    if let Some((global_path, _time)) =
        find_globaltree(pose.position, pose.angle, roadmap, view, config, 0.0, 1.0)
    {
        return Some(global_path);
    }

    // Step 2: grow a local tree, biased by the previous tick's waypoints.
    debug!("direct hand-off failed, growing local tree");

    let mut nodes = vec![LocalNode {
        position: pose.position,
        angle: pose.angle,
        parent: None,
        time: 0.0,
        safeness: 1.0,
    }];

    let local_window = WorldBounds::new(
        pose.position.x - 150.0,
        pose.position.x + 150.0,
        pose.position.y - 150.0,
        pose.position.y + 150.0,
    );
    let mut generator = PrependThenExtend::new(local_window, view.world_bounds, 10);
    for &wp in previous_waypoints {
        generator.prepend(wp);
    }

    let mut best_solution: Option<(Vec<Vec2>, f64)> = None;

    let candidates = generator.generate_n(config.local_max_size, rng);
    for candidate in candidates {
        // Find the local-tree node minimizing arrival time among those whose
        // cumulative safeness to `candidate` stays >= threshold.
        let best_parent = nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| {
                let move_safeness =
                    turn_then_straight_safeness(n.position, n.angle, candidate, view, config, n.time);
                let combined = n.safeness * move_safeness;
                if combined < config.safety_threshold {
                    None
                } else {
                    let arrival = n.time + segment_time(n.angle, n.position, candidate, config);
                    Some((i, arrival))
                }
            })
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap());

        let (parent_idx, _) = match best_parent {
            Some(x) => x,
            None => continue,
        };

        // Subdivide parent -> candidate into pieces no longer than
        // max_edge_local, each subdivision's parent being the previous one.
        let parent_pos = nodes[parent_idx].position;
        let diff = candidate - parent_pos;
        let length = diff.norm();
        let divisions = (length / config.max_edge_local).ceil().max(1.0) as usize;
        let leaving_angle = diff.y.atan2(diff.x);

        let mut chain_parent = parent_idx;
        let mut abandoned = false;
        let mut new_leaves = Vec::new();

        for d in 1..=divisions {
            let t = d as f64 / divisions as f64;
            let sub_pos = parent_pos + diff * t;
            let parent_node = nodes[chain_parent].clone();
            let move_safeness = turn_then_straight_safeness(
                parent_node.position,
                parent_node.angle,
                sub_pos,
                view,
                config,
                parent_node.time,
            );
            let safeness = parent_node.safeness * move_safeness;
            if safeness < config.safety_threshold {
                abandoned = true;
                break;
            }
            let time = parent_node.time
                + segment_time(parent_node.angle, parent_node.position, sub_pos, config);

            debug_sink.draw_line(parent_node.position, sub_pos);

            nodes.push(LocalNode {
                position: sub_pos,
                angle: leaving_angle,
                parent: Some(chain_parent),
                time,
                safeness,
            });
            chain_parent = nodes.len() - 1;
            new_leaves.push(chain_parent);
        }

        if abandoned {
            continue;
        }

        for &leaf_idx in &new_leaves {
            let leaf = &nodes[leaf_idx];
            if let Some((global_path, global_time)) = find_globaltree(
                leaf.position,
                leaf.angle,
                roadmap,
                view,
                config,
                leaf.time,
                leaf.safeness,
            ) {
                let total_time = global_time;
                if best_solution
                    .as_ref()
                    .map(|(_, t)| total_time < *t)
                    .unwrap_or(true)
                {
                    let local_chain = reconstruct_chain(&nodes, leaf_idx);
                    let mut waypoints = local_chain;
                    waypoints.extend(global_path);
                    best_solution = Some((waypoints, total_time));
                }
            }
        }
    }

    best_solution.map(|(waypoints, _)| waypoints)
}

/// Positions along the local-tree chain from the root (the agent's current
/// pose) down to `leaf_idx`, per spec section 4.5 step 3.
fn reconstruct_chain(nodes: &[LocalNode], leaf_idx: usize) -> Vec<Vec2> {
    let mut chain = Vec::new();
    let mut cur = Some(leaf_idx);
    while let Some(idx) = cur {
        chain.push(nodes[idx].position);
        cur = nodes[idx].parent;
    }
    chain.reverse();
    chain
}
