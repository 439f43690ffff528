//! Procedural level generation
//!
//! Strands are walked from the base, the result is re-framed, then obstacles are
//! sprinkled over the remaining ground. Deadlocked walks are discarded and
//! retried from scratch up to `max_attempts` times.

pub mod base;
pub mod normalize;
pub mod obstacles;
pub mod walker;

pub use base::{choose_base, BaseEdge, BaseSite};

use noise::NoiseFn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::{ConfigError, GenerationError};
use crate::world::{Direction, Grid, Position};
use normalize::normalize;
use obstacles::{inject_obstacles, obstacle_noise, ObstacleNoise};
use walker::{walk_strands, Walk};

/// Seed of the simplex lattice; per-level variation comes from the z offset
const NOISE_SEED: u32 = 0;

/// Where enemies enter the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnCell {
    /// One step outside the grid, beyond the boundary spawn cell
    pub location: Position,
    /// Unit direction pointing into the grid
    pub direction: Direction,
}

impl SpawnCell {
    /// The boundary cell an enemy steps onto first
    pub fn entry(&self) -> Position {
        self.location.offset(self.direction)
    }
}

/// A finished level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub grid: Grid,
    /// One per strand, in strand creation order
    pub spawns: Vec<SpawnCell>,
    /// Base position after re-framing
    pub base: Position,
    /// Walk attempts used, including the successful one
    pub attempts: u32,
    /// z offset the obstacle noise was sampled at
    pub noise_seed: f64,
}

/// Level generator with an injected noise function
#[derive(Debug, Clone)]
pub struct Generator<N = ObstacleNoise> {
    config: GeneratorConfig,
    noise: N,
}

impl Generator<ObstacleNoise> {
    /// Generator using rescaled simplex noise for obstacles
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        Self::with_noise(config, obstacle_noise(NOISE_SEED))
    }
}

impl<N: NoiseFn<f64, 3>> Generator<N> {
    pub fn with_noise(config: GeneratorConfig, noise: N) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, noise })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate around an explicit base cell.
    ///
    /// The base stays fixed across retries; only the walk is redrawn.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        base: Position,
        strands: u32,
        rng: &mut R,
    ) -> Result<Level, GenerationError> {
        let (width, height) = (self.config.width, self.config.height);
        if strands == 0 {
            return Err(GenerationError::NoStrands);
        }
        if !(0..width).contains(&base.x) || !(0..height).contains(&base.y) {
            return Err(GenerationError::BaseOutOfBounds { base, width, height });
        }

        self.run(rng, |_| (base, strands))
    }

    /// Generate with base position and strand count drawn from `rng`.
    ///
    /// Each retry draws a new base.
    pub fn generate_from_seed<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Level, GenerationError> {
        let (width, height) = (self.config.width, self.config.height);
        self.run(rng, |rng| {
            let site = choose_base(rng, width, height);
            log::debug!("Base drawn on {:?} at {} with {} strands", site.edge, site.position, site.strands);
            (site.position, site.strands)
        })
    }

    /// Seed a `StdRng` and generate in derived-base mode
    pub fn generate_seeded(&self, seed: u64) -> Result<Level, GenerationError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate_from_seed(&mut rng)
    }

    /// Retry loop shared by both entry points
    fn run<R, F>(&self, rng: &mut R, mut site: F) -> Result<Level, GenerationError>
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> (Position, u32),
    {
        let config = &self.config;
        for attempt in 1..=config.max_attempts {
            let (base, strands) = site(&mut *rng);
            match walk_strands(&mut *rng, config.width, config.height, base, strands, config.step_budget) {
                Ok(walk) => return Ok(self.finish(walk, base, attempt, rng)),
                Err(deadlock) => {
                    log::debug!(
                        "Attempt {} deadlocked: strand {} stuck at {} after {} steps",
                        attempt,
                        deadlock.strand,
                        deadlock.at,
                        deadlock.steps
                    );
                }
            }
        }

        log::warn!("Level generation gave up after {} attempts", config.max_attempts);
        Err(GenerationError::Exhausted {
            attempts: config.max_attempts,
        })
    }

    /// Re-frame the walk and place obstacles
    fn finish<R: Rng + ?Sized>(&self, walk: Walk, base: Position, attempts: u32, rng: &mut R) -> Level {
        let framed = normalize(walk, base);
        let mut grid = framed.grid;

        let noise_seed: f64 = rng.gen();
        let obstacles = inject_obstacles(&mut grid, &self.noise, noise_seed, self.config.obstacle_threshold);

        log::info!(
            "Generated {}x{} level: base {}, {} spawns, {} obstacles, {} attempt(s)",
            grid.width(),
            grid.height(),
            framed.base,
            framed.spawns.len(),
            obstacles,
            attempts
        );

        Level {
            grid,
            spawns: framed.spawns,
            base: framed.base,
            attempts,
            noise_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::CellType;

    fn generator() -> Generator {
        Generator::new(GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn test_rejects_zero_strands() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = generator().generate(Position::new(10, 10), 0, &mut rng);
        assert_eq!(result.unwrap_err(), GenerationError::NoStrands);
    }

    #[test]
    fn test_rejects_base_outside() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = generator().generate(Position::new(21, 3), 2, &mut rng);
        assert!(matches!(result, Err(GenerationError::BaseOutOfBounds { .. })));
    }

    #[test]
    fn test_rejects_even_config() {
        let config = GeneratorConfig::default().with_size(20, 20);
        assert!(Generator::new(config).is_err());
    }

    #[test]
    fn test_exhaustion_surfaces() {
        let config = GeneratorConfig {
            step_budget: 1,
            max_attempts: 3,
            ..GeneratorConfig::default()
        };
        let generator = Generator::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let result = generator.generate(Position::new(10, 10), 2, &mut rng);
        assert_eq!(result.unwrap_err(), GenerationError::Exhausted { attempts: 3 });
    }

    #[test]
    fn test_explicit_base_kept() {
        let mut rng = StdRng::seed_from_u64(1);
        let level = generator().generate(Position::new(10, 10), 2, &mut rng).unwrap();
        assert_eq!(level.spawns.len(), 2);
        assert_eq!(level.grid.cell_type(level.base), Some(CellType::Base));
        assert_eq!(level.grid.count(CellType::Base), 1);
    }

    #[test]
    fn test_seeded_mode_deterministic() {
        let generator = generator();
        let a = generator.generate_seeded(1234).unwrap();
        let b = generator.generate_seeded(1234).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_spawn_entry_is_boundary_cell() {
        let level = generator().generate_seeded(77).unwrap();
        for spawn in &level.spawns {
            assert_eq!(level.grid.cell_type(spawn.entry()), Some(CellType::Spawn));
        }
    }
}
