//! Composite Gauss-Legendre quadrature on finite intervals.

/// 5-point Gauss-Legendre nodes on [-1, 1].
const GL5_NODES: [f64; 5] = [
    -0.906_179_845_938_664,
    -0.538_469_310_105_683_1,
    0.0,
    0.538_469_310_105_683_1,
    0.906_179_845_938_664,
];

/// Matching weights (sum to 2).
const GL5_WEIGHTS: [f64; 5] = [
    0.236_926_885_056_189_1,
    0.478_628_670_499_366_5,
    0.568_888_888_888_888_9,
    0.478_628_670_499_366_5,
    0.236_926_885_056_189_1,
];

/// Integrate `f` over `[a, b]` by splitting it into `panels` equal
/// sub-intervals and applying the 5-point rule on each.
pub fn integrate<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, panels: usize) -> f64 {
    let panels = panels.max(1);
    let width = (b - a) / panels as f64;
    let half = 0.5 * width;

    let mut total = 0.0;
    for p in 0..panels {
        let mid = a + (p as f64 + 0.5) * width;
        for (x, w) in GL5_NODES.iter().zip(GL5_WEIGHTS.iter()) {
            total += w * f(mid + half * x);
        }
    }
    total * half
}
