//! Safety evaluator (spec section 4.3): collision-free probability of a
//! candidate move against static obstacles and linearly-extrapolated
//! pedestrians. Every test is a hard veto: the moment a single collision
//! check fails the evaluator returns `0.0`; otherwise it returns `1.0`, and
//! callers multiply these binary factors together to get the cumulative
//! path safeness used by the local tree search.

use crate::geom::{angle_diff, point_seg_dist2, seg_seg_dist2, Vec2};
use crate::types::{AgentConfig, View};

/// A safeness value in `[0, 1]`. `0.0` means "infeasible" (spec section 9's
/// tagged cost/safety outcome, modeled here by the documented invariant
/// rather than a separate sum type, since the evaluator's own definition is
/// a binary veto that only ever produces `0.0` or a running product of
/// `1.0`s).
pub type Safeness = f64;

fn clearance2(radius_a: f64, radius_b: f64, margin: f64) -> f64 {
    let r = radius_a + radius_b + margin;
    r * r
}

/// Safeness of a stationary point at time `t` with respect to every
/// currently perceived pedestrian, extrapolated linearly to `t`.
pub fn static_safeness(position: Vec2, view: &View, config: &AgentConfig, t: f64) -> Safeness {
    for p in &view.pedestrians {
        let ped_pos = p.position_at(t);
        let needed2 = clearance2(config.radius, p.radius, config.free_margin);
        if (position - ped_pos).norm_squared() < needed2 {
            return 0.0;
        }
    }
    1.0
}

/// Safeness of turning in place at `position` from heading `a1` to `a2`,
/// starting at time `t0`. The turn's duration is `|angle_diff(a1,a2)| / w`;
/// for each pedestrian we sweep its extrapolated position over the turn
/// duration and test clearance against that motion segment (spec section 9
/// flag: take the absolute value of `angle_diff`, duration is non-negative).
pub fn turn_safeness(
    position: Vec2,
    a1: f64,
    a2: f64,
    view: &View,
    config: &AgentConfig,
    t0: f64,
) -> Safeness {
    let duration = angle_diff(a1, a2).abs() / config.turning_speed;
    for p in &view.pedestrians {
        let p_t0 = p.position_at(t0);
        let p_t1 = p.position_at(t0 + duration);
        let needed2 = clearance2(config.radius, p.radius, config.free_margin);
        if point_seg_dist2(position, p_t0, p_t1) < needed2 {
            return 0.0;
        }
    }
    1.0
}

/// Straight-move safeness from `p1` to `p2` at the agent's configured
/// speed, starting at time `t0`. Checks static obstacle clearance along the
/// whole segment, then, per pedestrian, the analytic time of closest
/// approach between the agent's constant-velocity motion and the
/// pedestrian's linear extrapolation.
pub fn straight_safeness(
    p1: Vec2,
    p2: Vec2,
    view: &View,
    config: &AgentConfig,
    t0: f64,
) -> Safeness {
    if p1 == p2 {
        return static_safeness(p1, view, config, t0);
    }

    let obstacle_clearance2 = clearance2(config.radius, 0.0, config.free_margin);
    for o in &view.obstacles {
        if seg_seg_dist2(o.p1, o.p2, p1, p2) < obstacle_clearance2 {
            return 0.0;
        }
    }

    let diff = p2 - p1;
    let length = diff.norm();
    let dt = length / config.speed;
    let agent_velocity = diff / length * config.speed;

    for p in &view.pedestrians {
        let ped_pos_t0 = p.position_at(t0);
        let pd = p1 - ped_pos_t0;
        let vd = agent_velocity - p.velocity;
        let vd2 = vd.norm_squared();

        let tau = if vd2 <= f64::EPSILON {
            0.0
        } else {
            (-pd.dot(&vd) / vd2).clamp(0.0, dt)
        };

        let closest = pd + vd * tau;
        let needed2 = clearance2(config.radius, p.radius, config.free_margin);
        if closest.norm_squared() < needed2 {
            return 0.0;
        }
    }

    1.0
}

/// Combined safeness of turning from `a1` to face `p2` and then walking the
/// straight line `p1` -> `p2`, starting at time `t0`.
pub fn turn_then_straight_safeness(
    p1: Vec2,
    a1: f64,
    p2: Vec2,
    view: &View,
    config: &AgentConfig,
    t0: f64,
) -> Safeness {
    let a2 = {
        let diff = p2 - p1;
        diff.y.atan2(diff.x)
    };
    let turn_dt = angle_diff(a1, a2).abs() / config.turning_speed;
    let turn = turn_safeness(p1, a1, a2, view, config, t0);
    if turn == 0.0 {
        return 0.0;
    }
    let straight = straight_safeness(p1, p2, view, config, t0 + turn_dt);
    turn * straight
}

/// Time to travel from pose `(a1, p1)` to the state `((p2-p1).angle(), p2)`:
/// turning time plus linear move time.
pub fn segment_time(a1: f64, p1: Vec2, p2: Vec2, config: &AgentConfig) -> f64 {
    let diff = p2 - p1;
    let a2 = diff.y.atan2(diff.x);
    let turning_time = angle_diff(a1, a2).abs() / config.turning_speed;
    let move_time = diff.norm() / config.speed;
    turning_time + move_time
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Obstacle, Pedestrian, WorldBounds};

    fn config() -> AgentConfig {
        AgentConfig::new(5.0, 30.0, 2.0 * std::f64::consts::PI / 3.0, 2.0)
    }

    fn empty_view() -> View {
        View::new(vec![], vec![], WorldBounds::new(0.0, 640.0, 0.0, 480.0))
    }

    #[test]
    fn static_safeness_is_one_with_no_pedestrians() {
        let cfg = config();
        let v = empty_view();
        assert_eq!(static_safeness(Vec2::new(10.0, 10.0), &v, &cfg, 0.0), 1.0);
    }

    #[test]
    fn static_safeness_vetoes_close_pedestrian() {
        let cfg = config();
        let mut v = empty_view();
        v.pedestrians
            .push(Pedestrian::new(Vec2::new(10.0, 10.0), Vec2::new(0.0, 0.0), 5.0));
        assert_eq!(static_safeness(Vec2::new(11.0, 10.0), &v, &cfg, 0.0), 0.0);
    }

    #[test]
    fn straight_safeness_vetoes_obstacle_crossing() {
        let cfg = config();
        let mut v = empty_view();
        v.obstacles
            .push(Obstacle::new(Vec2::new(100.0, 0.0), Vec2::new(100.0, 300.0)));
        let safeness = straight_safeness(Vec2::new(50.0, 150.0), Vec2::new(150.0, 150.0), &v, &cfg, 0.0);
        assert_eq!(safeness, 0.0);
    }

    #[test]
    fn straight_safeness_clear_path_is_one() {
        let cfg = config();
        let v = empty_view();
        let safeness = straight_safeness(Vec2::new(40.0, 40.0), Vec2::new(600.0, 400.0), &v, &cfg, 0.0);
        assert_eq!(safeness, 1.0);
    }

    #[test]
    fn straight_safeness_head_on_pedestrian_vetoes_at_closest_approach() {
        let cfg = config();
        let mut v = empty_view();
        // Agent moves +x at y=240; pedestrian walks straight towards it on the same line.
        v.pedestrians.push(Pedestrian::new(
            Vec2::new(400.0, 240.0),
            Vec2::new(-30.0, 0.0),
            5.0,
        ));
        let safeness = straight_safeness(Vec2::new(100.0, 240.0), Vec2::new(500.0, 240.0), &v, &cfg, 0.0);
        assert_eq!(safeness, 0.0);
    }

    #[test]
    fn straight_safeness_perpendicular_crossing_clears_path() {
        let cfg = config();
        let mut v = empty_view();
        // Pedestrian starts on the path's line but moves perpendicular away from it fast
        // enough that the closest approach never breaches the safety margin.
        v.pedestrians.push(Pedestrian::new(
            Vec2::new(320.0, 240.0),
            Vec2::new(0.0, -30.0),
            5.0,
        ));
        let safeness = straight_safeness(Vec2::new(100.0, 240.0), Vec2::new(500.0, 240.0), &v, &cfg, 0.0);
        assert_eq!(safeness, 1.0);
    }

    #[test]
    fn straight_safeness_reduces_to_static_when_degenerate() {
        let cfg = config();
        let mut v = empty_view();
        v.pedestrians
            .push(Pedestrian::new(Vec2::new(10.0, 10.0), Vec2::new(0.0, 0.0), 5.0));
        let p = Vec2::new(10.5, 10.0);
        assert_eq!(
            straight_safeness(p, p, &v, &cfg, 0.0),
            static_safeness(p, &v, &cfg, 0.0)
        );
    }

    #[test]
    fn turn_safeness_clears_distant_stationary_pedestrian() {
        let cfg = config();
        let mut v = empty_view();
        v.pedestrians
            .push(Pedestrian::new(Vec2::new(0.0, 100.0), Vec2::new(0.0, 0.0), 5.0));
        let safeness = turn_safeness(Vec2::new(0.0, 0.0), 0.0, std::f64::consts::PI, &v, &cfg, 0.0);
        assert_eq!(safeness, 1.0);
    }

    #[test]
    fn straight_safeness_zero_relative_velocity_branch() {
        let cfg = config();
        let mut v = empty_view();
        // Pedestrian moves exactly alongside the agent: relative velocity is zero, so
        // tau* must take the explicit zero branch instead of dividing by |vd|^2.
        v.pedestrians.push(Pedestrian::new(
            Vec2::new(100.0, 240.0),
            Vec2::new(30.0, 0.0),
            5.0,
        ));
        let safeness = straight_safeness(Vec2::new(100.0, 240.0), Vec2::new(500.0, 240.0), &v, &cfg, 0.0);
        assert_eq!(safeness, 0.0);
    }

    #[test]
    fn combined_safeness_is_product_of_factors() {
        let cfg = config();
        let v = empty_view();
        let combined = turn_then_straight_safeness(
            Vec2::new(40.0, 40.0),
            0.0,
            Vec2::new(600.0, 400.0),
            &v,
            &cfg,
            0.0,
        );
        assert_eq!(combined, 1.0);
    }
}
