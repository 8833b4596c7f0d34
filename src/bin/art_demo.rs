//! Demo harness exercising `ArtPlanner` end to end against the concrete
//! scenarios of spec section 8. Not part of the planning core: parses CLI
//! args, builds a `View`, and prints the waypoint list produced per tick.
//! World simulation, rendering, and scenario loading proper belong to a
//! host application; this binary only drives the library surface.

use art_nav::debug::DebugSink;
use art_nav::{AgentConfig, ArtPlanner, Obstacle, Pedestrian, Pose, Vec2, View, WorldBounds};
use clap::{App, Arg};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Tallies the primitives the core asks to be drawn, standing in for a real
/// renderer (explicitly out of scope per spec section 1).
#[derive(Default)]
struct CountingDebugSink {
    lines: u32,
    circles: u32,
}

impl DebugSink for CountingDebugSink {
    fn draw_line(&mut self, _a: Vec2, _b: Vec2) {
        self.lines += 1;
    }
    fn draw_circle(&mut self, _center: Vec2, _radius: f64) {
        self.circles += 1;
    }
}

fn scenario_empty_world() -> (Vec2, Pose, View) {
    let goal = Vec2::new(600.0, 400.0);
    let pose = Pose::new(Vec2::new(40.0, 40.0), 0.0);
    let view = View::new(vec![], vec![], WorldBounds::new(0.0, 640.0, 0.0, 480.0));
    (goal, pose, view)
}

fn scenario_single_wall() -> (Vec2, Pose, View) {
    let goal = Vec2::new(50.0, 240.0);
    let pose = Pose::new(Vec2::new(400.0, 240.0), std::f64::consts::PI);
    let view = View::new(
        vec![Obstacle::new(Vec2::new(100.0, 0.0), Vec2::new(100.0, 300.0))],
        vec![],
        WorldBounds::new(0.0, 640.0, 0.0, 480.0),
    );
    (goal, pose, view)
}

fn scenario_crossing_pedestrian() -> (Vec2, Pose, View) {
    let goal = Vec2::new(500.0, 240.0);
    let pose = Pose::new(Vec2::new(100.0, 240.0), 0.0);
    let view = View::new(
        vec![],
        vec![Pedestrian::new(Vec2::new(320.0, 240.0), Vec2::new(0.0, -30.0), 5.0)],
        WorldBounds::new(0.0, 640.0, 0.0, 480.0),
    );
    (goal, pose, view)
}

fn scenario_goal_occupied() -> (Vec2, Pose, View) {
    let goal = Vec2::new(600.0, 400.0);
    let pose = Pose::new(Vec2::new(40.0, 40.0), 0.0);
    let view = View::new(
        vec![Obstacle::new(Vec2::new(595.0, 395.0), Vec2::new(605.0, 405.0))],
        vec![],
        WorldBounds::new(0.0, 640.0, 0.0, 480.0),
    );
    (goal, pose, view)
}

fn scenario_narrow_corridor(radius: f64, margin: f64) -> (Vec2, Pose, View) {
    let half_width = radius + margin + 0.5;
    let goal = Vec2::new(400.0, 240.0);
    let pose = Pose::new(Vec2::new(50.0, 240.0), 0.0);
    let view = View::new(
        vec![
            Obstacle::new(Vec2::new(200.0, 240.0 - half_width), Vec2::new(350.0, 240.0 - half_width)),
            Obstacle::new(Vec2::new(200.0, 240.0 + half_width), Vec2::new(350.0, 240.0 + half_width)),
        ],
        vec![Pedestrian::new(Vec2::new(275.0, 240.0), Vec2::new(0.0, 0.0), 2.0)],
        WorldBounds::new(0.0, 640.0, 0.0, 480.0),
    );
    (goal, pose, view)
}

fn run_scenario(name: &str, goal: Vec2, pose: Pose, view: View, seed: u64, config: AgentConfig) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut planner = ArtPlanner::new(goal, config);
    let mut debug_sink = CountingDebugSink::default();
    planner.init(&view, &mut rng, &mut debug_sink);

    let waypoints = planner.plan(pose, &view, &mut rng, &mut debug_sink);
    if waypoints.is_empty() {
        println!("[{name}] no feasible plan this tick ({} debug lines, {} debug circles drawn)", debug_sink.lines, debug_sink.circles);
    } else {
        println!(
            "[{name}] {} waypoints, final = {:?} ({} debug lines, {} debug circles drawn)",
            waypoints.len(),
            waypoints.last().unwrap(),
            debug_sink.lines,
            debug_sink.circles,
        );
    }
}

fn main() {
    pretty_env_logger::init();

    let matches = App::new("art_demo")
        .about("Exercises the ART navigation core against the spec's reference scenarios")
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .default_value("42")
                .help("PRNG seed, for deterministic reproduction"),
        )
        .arg(
            Arg::with_name("scenario")
                .long("scenario")
                .takes_value(true)
                .default_value("all")
                .possible_values(&["all", "empty", "wall", "pedestrian", "occupied", "corridor"])
                .help("Which reference scenario to run"),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .takes_value(true)
                .help("Path to a JSON-serialized AgentConfig; defaults to the spec's reference constants"),
        )
        .get_matches();

    let seed: u64 = matches.value_of("seed").unwrap().parse().expect("seed must be a u64");
    let scenario = matches.value_of("scenario").unwrap();
    let config = match matches.value_of("config") {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .unwrap_or_else(|e| panic!("failed to read config file {path}: {e}"));
            serde_json::from_str(&contents)
                .unwrap_or_else(|e| panic!("failed to parse config file {path}: {e}"))
        }
        None => AgentConfig::new(5.0, 30.0, 2.0 * std::f64::consts::PI / 3.0, 2.0),
    };

    let run_all = scenario == "all";

    if run_all || scenario == "empty" {
        let (goal, pose, view) = scenario_empty_world();
        run_scenario("empty_world", goal, pose, view, seed, config);
    }
    if run_all || scenario == "wall" {
        let (goal, pose, view) = scenario_single_wall();
        run_scenario("single_wall", goal, pose, view, seed, config);
    }
    if run_all || scenario == "pedestrian" {
        let (goal, pose, view) = scenario_crossing_pedestrian();
        run_scenario("crossing_pedestrian", goal, pose, view, seed, config);
    }
    if run_all || scenario == "occupied" {
        let (goal, pose, view) = scenario_goal_occupied();
        run_scenario("goal_occupied", goal, pose, view, seed, config);
    }
    if run_all || scenario == "corridor" {
        let (goal, pose, view) = scenario_narrow_corridor(config.radius, config.free_margin);
        run_scenario("narrow_corridor", goal, pose, view, seed, config);
    }
}
