//! Optional debug-draw side channel (spec section 6 Outputs). The core never
//! draws anything itself; it calls out to an injected sink so a host
//! application's renderer can visualize the roadmap, the local tree, and
//! perceived pedestrians without the core depending on any graphics crate.

use crate::geom::Vec2;

pub trait DebugSink {
    fn draw_line(&mut self, a: Vec2, b: Vec2);
    fn draw_circle(&mut self, center: Vec2, radius: f64);
}

/// A sink that discards every draw call. The default for callers who don't
/// need visualization.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDebugSink;

impl DebugSink for NullDebugSink {
    fn draw_line(&mut self, _a: Vec2, _b: Vec2) {}
    fn draw_circle(&mut self, _center: Vec2, _radius: f64) {}
}
