//! Procedural starfield generation: sector-balanced primaries with size tiers,
//! plus occasional clusters of small satellite stars.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{StarfieldError, check_unit};
use crate::placement::SectorGrid;
use crate::random::RandomSource;
use crate::star::{Star, StarId, StarKind};
use crate::tier::{SATELLITE_SIZE_RANGE, SizeTier, satellite_glow};

/// Initial opacity range of primary stars.
pub const PRIMARY_OPACITY_RANGE: (f64, f64) = (0.3, 0.8);
/// Initial opacity range of satellite stars.
pub const SATELLITE_OPACITY_RANGE: (f64, f64) = (0.2, 0.6);
/// Distance of a satellite from its primary, in container percent.
pub const SATELLITE_DISTANCE_RANGE: (f64, f64) = (1.0, 4.0);

/// Settings for one starfield population.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Number of primary stars.
    pub star_count: u32,
    /// Sector grid resolution per axis.
    pub sectors_per_axis: u32,
    /// Occupied fraction above which placement stops looking for free sectors.
    pub sector_occupancy_ceiling: f64,
    /// Maximum sector draws per primary star.
    pub placement_attempt_limit: u32,
    /// Chance that a primary star spawns a cluster.
    pub cluster_probability: f64,
    /// Inclusive `(min, max)` number of satellites per cluster.
    pub cluster_size_range: (u32, u32),
    /// Fixed seed for reproducible fields. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            star_count: 200,
            sectors_per_axis: 20,
            sector_occupancy_ceiling: 0.7,
            placement_attempt_limit: 10,
            cluster_probability: 0.15,
            cluster_size_range: (1, 4),
            seed: None,
        }
    }
}

impl StarfieldConfig {
    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<(), StarfieldError> {
        if self.sectors_per_axis == 0 {
            return Err(StarfieldError::ZeroSectors);
        }
        if self.placement_attempt_limit == 0 {
            return Err(StarfieldError::ZeroAttemptLimit);
        }
        check_unit("sector_occupancy_ceiling", self.sector_occupancy_ceiling)?;
        check_unit("cluster_probability", self.cluster_probability)?;
        let (min, max) = self.cluster_size_range;
        if min == 0 || min > max {
            return Err(StarfieldError::InvalidClusterRange { min, max });
        }
        Ok(())
    }

    /// Upper bound on the number of stars one population can hold.
    pub fn max_star_count(&self) -> usize {
        self.star_count as usize * (1 + self.cluster_size_range.1 as usize)
    }
}

/// Summary of a generation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Stars placed on the sector grid.
    pub primaries: usize,
    /// Stars spawned in clusters.
    pub satellites: usize,
    /// Number of clusters spawned.
    pub clusters: usize,
    /// Distinct sectors claimed.
    pub occupied_sectors: usize,
    /// Sector draws across all primaries.
    pub total_attempts: u64,
    /// Worst-case sector draws for a single primary.
    pub max_attempts: u32,
}

/// Output of a generation pass.
#[derive(Clone, Debug)]
pub struct GeneratedField {
    /// Every generated star, each primary followed by its satellites.
    pub stars: Vec<Star>,
    /// Counters describing the pass.
    pub report: GenerationReport,
}

/// Builds starfields from a validated [`StarfieldConfig`].
#[derive(Clone, Debug)]
pub struct StarfieldGenerator {
    config: StarfieldConfig,
    seed: u64,
}

impl StarfieldGenerator {
    /// Validate `config` and fix the seed, drawing one if the config has none.
    pub fn new(config: StarfieldConfig) -> Result<Self, StarfieldError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self { config, seed })
    }

    /// The settings this generator uses.
    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    /// The seed that drives [`generate`](Self::generate).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate the field. Deterministic for a given seed.
    pub fn generate(&self) -> GeneratedField {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.generate_with(&mut rng)
    }

    /// Generate the field from an arbitrary random source.
    ///
    /// Per primary star the draws are: sector x/y (per attempt), jitter x/y,
    /// tier, size, opacity, cluster roll, then per satellite angle, distance,
    /// size and opacity after a count draw.
    pub fn generate_with<R: RandomSource + ?Sized>(&self, rng: &mut R) -> GeneratedField {
        let config = &self.config;
        let mut grid = SectorGrid::new(config.sectors_per_axis);
        let mut stars = Vec::with_capacity(config.star_count as usize);
        let mut report = GenerationReport::default();
        let mut next_id = 0u32;

        for _ in 0..config.star_count {
            let choice = grid.choose(
                rng,
                config.placement_attempt_limit,
                config.sector_occupancy_ceiling,
            );
            grid.mark(choice.sector);
            report.total_attempts += u64::from(choice.attempts);
            report.max_attempts = report.max_attempts.max(choice.attempts);

            let position = grid.position_in(choice.sector, rng);
            let (tier, size) = SizeTier::sample(rng);
            let opacity = rng.range(PRIMARY_OPACITY_RANGE.0, PRIMARY_OPACITY_RANGE.1);

            stars.push(Star::new(
                StarId(next_id),
                StarKind::Primary(tier),
                position,
                size,
                tier.glow(size),
                opacity,
            ));
            next_id += 1;
            report.primaries += 1;

            if rng.next_unit() < config.cluster_probability {
                let (min, max) = config.cluster_size_range;
                let count = min + rng.index(max - min + 1);
                for _ in 0..count {
                    let angle = rng.range(0.0, std::f64::consts::TAU);
                    let distance =
                        rng.range(SATELLITE_DISTANCE_RANGE.0, SATELLITE_DISTANCE_RANGE.1);
                    let size = rng.range(SATELLITE_SIZE_RANGE.0, SATELLITE_SIZE_RANGE.1);
                    let opacity =
                        rng.range(SATELLITE_OPACITY_RANGE.0, SATELLITE_OPACITY_RANGE.1);

                    stars.push(Star::new(
                        StarId(next_id),
                        StarKind::Satellite,
                        position.offset_polar(angle, distance),
                        size,
                        satellite_glow(size),
                        opacity,
                    ));
                    next_id += 1;
                    report.satellites += 1;
                }
                report.clusters += 1;
            }
        }

        report.occupied_sectors = grid.occupied_count();
        log::info!(
            "Generated starfield: {} primaries, {} satellites in {} clusters, {}/{} sectors occupied",
            report.primaries,
            report.satellites,
            report.clusters,
            report.occupied_sectors,
            grid.cell_count()
        );
        log::debug!(
            "Placement used {} sector draws (worst case {})",
            report.total_attempts,
            report.max_attempts
        );

        GeneratedField { stars, report }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Sector;
    use crate::random::ScriptedRandom;

    fn seeded(star_count: u32, seed: u64) -> StarfieldGenerator {
        StarfieldGenerator::new(StarfieldConfig {
            star_count,
            seed: Some(seed),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_default_config_matches_documented_values() {
        let config = StarfieldConfig::default();
        assert_eq!(config.star_count, 200);
        assert_eq!(config.sectors_per_axis, 20);
        assert_eq!(config.sector_occupancy_ceiling, 0.7);
        assert_eq!(config.placement_attempt_limit, 10);
        assert_eq!(config.cluster_probability, 0.15);
        assert_eq!(config.cluster_size_range, (1, 4));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        let zero_sectors = StarfieldConfig {
            sectors_per_axis: 0,
            ..Default::default()
        };
        assert_eq!(zero_sectors.validate(), Err(StarfieldError::ZeroSectors));

        let zero_attempts = StarfieldConfig {
            placement_attempt_limit: 0,
            ..Default::default()
        };
        assert_eq!(
            zero_attempts.validate(),
            Err(StarfieldError::ZeroAttemptLimit)
        );

        let bad_probability = StarfieldConfig {
            cluster_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            bad_probability.validate(),
            Err(StarfieldError::OutOfUnitRange {
                name: "cluster_probability",
                ..
            })
        ));

        let inverted = StarfieldConfig {
            cluster_size_range: (4, 1),
            ..Default::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(StarfieldError::InvalidClusterRange { min: 4, max: 1 })
        );
        assert!(StarfieldGenerator::new(inverted).is_err());
    }

    #[test]
    fn test_zero_stars_produces_empty_field() {
        let field = seeded(0, 1).generate();
        assert!(field.stars.is_empty());
        assert_eq!(field.report, GenerationReport::default());
    }

    #[test]
    fn test_huge_grid_generates_without_dense_allocation() {
        for star_count in [0, 1] {
            let generator = StarfieldGenerator::new(StarfieldConfig {
                star_count,
                sectors_per_axis: u32::MAX,
                seed: Some(12),
                ..Default::default()
            })
            .unwrap();
            let field = generator.generate();
            assert_eq!(field.report.primaries, star_count as usize);
            assert_eq!(field.report.occupied_sectors, star_count as usize);
        }
    }

    #[test]
    fn test_star_count_bounds() {
        for seed in 0..20 {
            let generator = seeded(200, seed);
            let field = generator.generate();
            assert_eq!(field.report.primaries, 200);
            assert!(field.stars.len() >= 200);
            assert!(field.stars.len() <= generator.config().max_star_count());
            assert_eq!(
                field.stars.len(),
                field.report.primaries + field.report.satellites
            );
        }
    }

    #[test]
    fn test_every_star_has_valid_size_and_opacity() {
        let field = seeded(1000, 42).generate();
        for star in &field.stars {
            assert!(star.size > 0.0, "star {:?} has size {}", star.id, star.size);
            assert!((0.0..=1.0).contains(&star.opacity()));
            match star.kind {
                StarKind::Primary(tier) => {
                    let (min, max) = tier.size_range();
                    assert!(star.size >= min && star.size < max);
                    assert!(star.opacity() >= 0.3 && star.opacity() < 0.8);
                    assert_eq!(star.glow, tier.glow(star.size));
                }
                StarKind::Satellite => {
                    assert!(star.size >= 0.3 && star.size < 1.3);
                    assert!(star.opacity() >= 0.2 && star.opacity() < 0.6);
                    assert_eq!(star.glow.radius, star.size);
                }
            }
        }
    }

    #[test]
    fn test_satellites_stay_near_their_primary() {
        let field = seeded(2000, 7).generate();
        let mut parent = None;
        let mut satellites = 0;
        for star in &field.stars {
            if star.is_primary() {
                parent = Some(star.position);
            } else {
                let p = parent.expect("satellite before any primary");
                let d = star.position.distance_to(p);
                assert!((1.0 - 1e-9..4.0 + 1e-9).contains(&d), "distance {d}");
                satellites += 1;
            }
        }
        assert!(satellites > 0, "2000 primaries should spawn some clusters");
    }

    #[test]
    fn test_cluster_rate_near_probability() {
        let field = seeded(5000, 3).generate();
        let rate = field.report.clusters as f64 / 5000.0;
        assert!((rate - 0.15).abs() < 0.02, "cluster rate {rate}");
    }

    #[test]
    fn test_placement_spreads_across_sectors() {
        let field = seeded(200, 11).generate();
        // 200 stars on 400 cells with retries should rarely share a sector.
        assert!(field.report.occupied_sectors >= 190);
        assert!(field.report.max_attempts <= 10);
    }

    #[test]
    fn test_saturated_grid_still_terminates() {
        let generator = StarfieldGenerator::new(StarfieldConfig {
            star_count: 500,
            sectors_per_axis: 2,
            seed: Some(5),
            ..Default::default()
        })
        .unwrap();
        let field = generator.generate();
        assert_eq!(field.report.primaries, 500);
        assert_eq!(field.report.occupied_sectors, 4);
        assert!(field.report.max_attempts <= 10);
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = seeded(300, 99).generate();
        let b = seeded(300, 99).generate();
        assert_eq!(a.stars, b.stars);
        assert_eq!(a.report, b.report);
    }

    #[test]
    fn test_different_seed_different_field() {
        let a = seeded(300, 1).generate();
        let b = seeded(300, 2).generate();
        assert_ne!(a.stars, b.stars);
    }

    #[test]
    fn test_unseeded_generator_picks_a_seed() {
        let generator = StarfieldGenerator::new(StarfieldConfig::default()).unwrap();
        let again = StarfieldGenerator::new(StarfieldConfig {
            seed: Some(generator.seed()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(generator.generate().stars, again.generate().stars);
    }

    #[test]
    fn test_single_star_without_cluster() {
        let generator = StarfieldGenerator::new(StarfieldConfig {
            star_count: 1,
            sectors_per_axis: 20,
            ..Default::default()
        })
        .unwrap();
        // sector (5, 10), jitter 0.5/0.25, tier small, size, opacity, cluster roll 0.9
        let mut rng = ScriptedRandom::new(vec![0.25, 0.5, 0.5, 0.25, 0.1, 0.5, 0.5, 0.9]);
        let field = generator.generate_with(&mut rng);

        assert_eq!(field.stars.len(), 1);
        assert_eq!(field.report.occupied_sectors, 1);
        assert_eq!(field.report.satellites, 0);

        let grid = SectorGrid::new(20);
        let base = grid.base_offset(Sector { x: 5, y: 10 });
        let star = &field.stars[0];
        assert!(star.position.x >= base.x && star.position.x < base.x + grid.jitter_extent());
        assert!(star.position.y >= base.y && star.position.y < base.y + grid.jitter_extent());
        assert_eq!(star.kind, StarKind::Primary(SizeTier::Small));
        assert!((star.size - 1.3).abs() < 1e-12);
        assert!((star.opacity() - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_scripted_cluster_spawns_requested_count() {
        let generator = StarfieldGenerator::new(StarfieldConfig {
            star_count: 1,
            ..Default::default()
        })
        .unwrap();
        // Primary draws, cluster roll 0.1 (< 0.15), count draw 0.99 -> 4 satellites.
        let mut draws = vec![0.5, 0.5, 0.5, 0.5, 0.2, 0.5, 0.5, 0.1, 0.99];
        for _ in 0..4 {
            draws.extend([0.25, 0.5, 0.5, 0.5]);
        }
        let mut rng = ScriptedRandom::new(draws);
        let field = generator.generate_with(&mut rng);
        assert_eq!(field.report.clusters, 1);
        assert_eq!(field.report.satellites, 4);
        let primary = field.stars[0].position;
        for satellite in &field.stars[1..] {
            assert_eq!(satellite.kind, StarKind::Satellite);
            assert!((satellite.position.distance_to(primary) - 2.5).abs() < 1e-9);
        }
    }
}
