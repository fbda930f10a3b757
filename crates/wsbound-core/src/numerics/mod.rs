pub mod nodes;
pub mod numerov;
pub mod quadrature;

pub use nodes::count_radial_nodes;
pub use numerov::integrate_radial;
pub use quadrature::{normalize, probability_norm_integral};

/// Evenly spaced inclusive grid, `None` for fewer than 2 points.
pub fn linear_grid(start: f64, end: f64, count: usize) -> Option<Vec<f64>> {
    if count < 2 {
        return None;
    }

    let step = (end - start) / ((count - 1) as f64);
    let mut grid = Vec::with_capacity(count);
    for index in 0..count {
        grid.push(start + step * (index as f64));
    }
    if let Some(last) = grid.last_mut() {
        *last = end;
    }

    Some(grid)
}
