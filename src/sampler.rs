//! Sample generator (spec section 4.2): a uniform rectangle sampler used by
//! the global roadmap builder, and a "prepend-then-extend" generator used by
//! the local tree search that first replays seeded points (the previous
//! tick's waypoints) and then draws from a window that grows from the
//! agent's local view rectangle out to the full world bounds.

use std::collections::VecDeque;

use rand::Rng;

use crate::geom::Vec2;
use crate::types::WorldBounds;

/// Draws a point uniformly at random from `bounds`.
pub fn sample_uniform(bounds: WorldBounds, rng: &mut impl Rng) -> Vec2 {
    let x = rng.gen_range(bounds.xmin..bounds.xmax);
    let y = rng.gen_range(bounds.ymin..bounds.ymax);
    Vec2::new(x, y)
}

/// A lazy sequence of candidate positions for the local tree search: seeded
/// points (typically last tick's waypoints) are replayed first, in order;
/// once exhausted, points are drawn from a rectangle that interpolates
/// linearly from `local_window` to `world_bounds` over `steps` draws.
pub struct PrependThenExtend {
    seeds: VecDeque<Vec2>,
    local_window: WorldBounds,
    world_bounds: WorldBounds,
    steps: usize,
    draws_since_seeds: usize,
}

impl PrependThenExtend {
    pub fn new(local_window: WorldBounds, world_bounds: WorldBounds, steps: usize) -> Self {
        PrependThenExtend {
            seeds: VecDeque::new(),
            local_window,
            world_bounds,
            steps: steps.max(1),
            draws_since_seeds: 0,
        }
    }

    /// Pushes a seed point to the back of the replay FIFO (spec section 4.2:
    /// "the next sample returns the next seed if any remain").
    pub fn prepend(&mut self, p: Vec2) {
        self.seeds.push_back(p);
    }

    fn windowed_rect(&self) -> WorldBounds {
        let i = self.draws_since_seeds;
        let t = (i as f64 / self.steps as f64).min(1.0);
        WorldBounds::new(
            lerp(self.local_window.xmin, self.world_bounds.xmin, t),
            lerp(self.local_window.xmax, self.world_bounds.xmax, t),
            lerp(self.local_window.ymin, self.world_bounds.ymin, t),
            lerp(self.local_window.ymax, self.world_bounds.ymax, t),
        )
    }

    /// Returns the next sample, consuming a seed if any remain, otherwise
    /// drawing from the current (possibly still-shrinking) window rectangle.
    pub fn next(&mut self, rng: &mut impl Rng) -> Vec2 {
        if let Some(seed) = self.seeds.pop_front() {
            return seed;
        }
        let rect = self.windowed_rect();
        self.draws_since_seeds += 1;
        sample_uniform(rect, rng)
    }

    /// Pulls exactly `n` samples in order, the discipline spec section 5
    /// requires ("candidate samples are consumed strictly in the order the
    /// sample generator emits them").
    pub fn generate_n(&mut self, n: usize, rng: &mut impl Rng) -> Vec<Vec2> {
        (0..n).map(|_| self.next(rng)).collect()
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bounds(x0: f64, x1: f64, y0: f64, y1: f64) -> WorldBounds {
        WorldBounds::new(x0, x1, y0, y1)
    }

    #[test]
    fn sample_uniform_stays_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let b = bounds(0.0, 640.0, 0.0, 480.0);
        for _ in 0..200 {
            let p = sample_uniform(b, &mut rng);
            assert!(p.x >= b.xmin && p.x < b.xmax);
            assert!(p.y >= b.ymin && p.y < b.ymax);
        }
    }

    #[test]
    fn seeds_are_replayed_before_window_samples() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut gen = PrependThenExtend::new(
            bounds(100.0, 200.0, 100.0, 200.0),
            bounds(0.0, 640.0, 0.0, 480.0),
            10,
        );
        let seed_a = Vec2::new(1.0, 2.0);
        let seed_b = Vec2::new(3.0, 4.0);
        gen.prepend(seed_a);
        gen.prepend(seed_b);

        let samples = gen.generate_n(4, &mut rng);
        assert_eq!(samples[0], seed_a);
        assert_eq!(samples[1], seed_b);
    }

    #[test]
    fn window_grows_towards_world_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let local = bounds(300.0, 340.0, 200.0, 240.0);
        let world = bounds(0.0, 640.0, 0.0, 480.0);
        let mut gen = PrependThenExtend::new(local, world, 4);

        // At i = 0 the window equals the local rect exactly.
        let first = gen.windowed_rect();
        assert!((first.xmin - local.xmin).abs() < 1e-9);
        assert!((first.xmax - local.xmax).abs() < 1e-9);

        for _ in 0..4 {
            gen.next(&mut rng);
        }
        // Past `steps` draws, t clamps to 1 and the window equals world bounds.
        let last = gen.windowed_rect();
        assert!((last.xmin - world.xmin).abs() < 1e-9);
        assert!((last.xmax - world.xmax).abs() < 1e-9);
    }

    #[test]
    fn deterministic_given_same_seed() {
        let b = bounds(0.0, 640.0, 0.0, 480.0);
        let mut rng1 = ChaCha8Rng::seed_from_u64(99);
        let mut rng2 = ChaCha8Rng::seed_from_u64(99);
        let mut g1 = PrependThenExtend::new(b, b, 5);
        let mut g2 = PrependThenExtend::new(b, b, 5);
        let s1 = g1.generate_n(5, &mut rng1);
        let s2 = g2.generate_n(5, &mut rng2);
        assert_eq!(s1, s2);
    }
}
