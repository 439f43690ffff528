//! Obstacle placement
//!
//! Thresholded coherent noise turns clusters of ground cells into obstacles.
//! The noise is sampled on the integer cell lattice with a per-level z offset.

use noise::{NoiseFn, ScaleBias, Simplex};

use crate::world::{CellType, Grid};

/// Simplex sampled on the integer lattice peaks near 0.7, this stretches it to about [-1, 1]
pub const LATTICE_GAIN: f64 = 1.43;

/// Default obstacle noise: simplex rescaled for lattice sampling
pub type ObstacleNoise = ScaleBias<f64, Simplex, 3>;

pub fn obstacle_noise(seed: u32) -> ObstacleNoise {
    ScaleBias::new(Simplex::new(seed)).set_scale(LATTICE_GAIN)
}

/// Turn every ground cell whose noise sample exceeds `threshold` into an obstacle.
///
/// Returns the number of cells converted. Path, base and spawn cells are never touched.
pub fn inject_obstacles<N>(grid: &mut Grid, noise: &N, seed: f64, threshold: f64) -> usize
where
    N: NoiseFn<f64, 3> + ?Sized,
{
    let targets: Vec<_> = grid
        .iter()
        .filter(|(_, cell)| cell.cell_type == CellType::Ground)
        .filter(|(pos, _)| noise.get([pos.x as f64, pos.y as f64, seed]) > threshold)
        .map(|(pos, _)| pos)
        .collect();

    for &pos in &targets {
        grid.set_type(pos, CellType::Obstacle);
    }

    targets.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Position;

    /// High on the left half, low on the right
    struct Split;

    impl NoiseFn<f64, 3> for Split {
        fn get(&self, point: [f64; 3]) -> f64 {
            if point[0] < 2.0 {
                1.0
            } else {
                -1.0
            }
        }
    }

    #[test]
    fn test_only_ground_converted() {
        let mut grid = Grid::new(5, 5);
        grid.set_type(Position::new(0, 0), CellType::Path);
        grid.set_type(Position::new(1, 1), CellType::Base);
        grid.set_type(Position::new(0, 4), CellType::Spawn);

        let converted = inject_obstacles(&mut grid, &Split, 0.5, 0.7);
        // 10 cells in the left two columns, 3 of them claimed
        assert_eq!(converted, 7);
        assert_eq!(grid.count(CellType::Obstacle), 7);
        assert_eq!(grid.cell_type(Position::new(0, 0)), Some(CellType::Path));
        assert_eq!(grid.cell_type(Position::new(1, 1)), Some(CellType::Base));
        assert_eq!(grid.cell_type(Position::new(0, 4)), Some(CellType::Spawn));
        assert_eq!(grid.cell_type(Position::new(3, 3)), Some(CellType::Ground));
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut grid = Grid::new(3, 3);
        let converted = inject_obstacles(&mut grid, &noise::Constant::new(0.7), 0.0, 0.7);
        assert_eq!(converted, 0);
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let noise = obstacle_noise(0);
        let mut a = Grid::new(21, 21);
        let mut b = Grid::new(21, 21);
        inject_obstacles(&mut a, &noise, 0.25, 0.2);
        inject_obstacles(&mut b, &noise, 0.25, 0.2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_noise_reaches_threshold() {
        let noise = obstacle_noise(0);
        for z in [0.0, 0.25, 0.5, 0.75] {
            let mut grid = Grid::new(21, 21);
            let converted = inject_obstacles(&mut grid, &noise, z, 0.7);
            assert!(converted > 0, "no obstacles at z = {}", z);
            assert!(converted < 60, "{} obstacles at z = {}", converted, z);
        }
    }

    #[test]
    fn test_default_noise_spans_unit_range() {
        let noise = obstacle_noise(0);
        let samples: Vec<f64> = (0..33)
            .flat_map(|x| (0..33).map(move |y| (x, y)))
            .flat_map(|(x, y)| (0..20).map(move |z| [x as f64, y as f64, z as f64 / 20.0]))
            .map(|point| noise.get(point))
            .collect();
        let max = samples.iter().cloned().fold(f64::MIN, f64::max);
        let min = samples.iter().cloned().fold(f64::MAX, f64::min);
        assert!(max > 0.9 && max < 1.1, "max {}", max);
        assert!(min < -0.9 && min > -1.1, "min {}", min);
    }
}
