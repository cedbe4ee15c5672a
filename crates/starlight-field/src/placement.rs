//! Sector-balanced placement of primary stars.
//!
//! The container is split into a square grid of sectors. Each primary star
//! prefers a sector nobody has claimed yet, but the search is capped so that
//! placement stays constant-time per star however full the grid gets.

use std::collections::HashSet;

use crate::random::RandomSource;
use crate::star::StarPosition;

/// Width of the area the grid spans, in container percent.
pub const FIELD_SPAN_PERCENT: f64 = 150.0;
/// How far the grid starts before the container's top-left corner, in percent.
pub const FIELD_MARGIN_PERCENT: f64 = 25.0;
/// Fraction of one sector's nominal width used for in-sector jitter.
pub const JITTER_FRACTION: f64 = 0.8;

/// A cell of the sector grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Sector {
    /// Column, `0..sectors_per_axis`.
    pub x: u32,
    /// Row, `0..sectors_per_axis`.
    pub y: u32,
}

/// The sector a star ended up in and how many draws it took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementChoice {
    /// Accepted sector.
    pub sector: Sector,
    /// Number of sector draws, at least 1.
    pub attempts: u32,
}

/// Occupancy markers for one generation pass.
///
/// Only claimed sectors are stored, so memory follows the star count rather
/// than the grid size.
#[derive(Clone, Debug)]
pub struct SectorGrid {
    sectors_per_axis: u32,
    occupied: HashSet<Sector>,
}

impl SectorGrid {
    /// An empty grid of `sectors_per_axis` x `sectors_per_axis` cells.
    pub fn new(sectors_per_axis: u32) -> Self {
        Self {
            sectors_per_axis,
            occupied: HashSet::new(),
        }
    }

    /// Cells per axis.
    pub fn sectors_per_axis(&self) -> u32 {
        self.sectors_per_axis
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> u64 {
        u64::from(self.sectors_per_axis) * u64::from(self.sectors_per_axis)
    }

    /// Number of distinct occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }

    /// Fraction of occupied cells in `[0, 1]`.
    pub fn occupancy(&self) -> f64 {
        let cells = self.cell_count();
        if cells == 0 {
            return 1.0;
        }
        self.occupied.len() as f64 / cells as f64
    }

    /// True once the occupied fraction has reached `ceiling`.
    pub fn is_saturated(&self, ceiling: f64) -> bool {
        self.occupied.len() as f64 >= self.cell_count() as f64 * ceiling
    }

    fn contains(&self, sector: Sector) -> bool {
        sector.x < self.sectors_per_axis && sector.y < self.sectors_per_axis
    }

    /// Whether `sector` has been claimed. Out-of-range sectors are never occupied.
    pub fn is_occupied(&self, sector: Sector) -> bool {
        self.occupied.contains(&sector)
    }

    /// Claim `sector`. Returns `true` if it was free; re-marking is a no-op.
    pub fn mark(&mut self, sector: Sector) -> bool {
        self.contains(sector) && self.occupied.insert(sector)
    }

    /// Draw sectors until a free one turns up, the grid is saturated past
    /// `ceiling`, or `attempt_limit` draws have been made. The last draw wins.
    pub fn choose<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        attempt_limit: u32,
        ceiling: f64,
    ) -> PlacementChoice {
        let limit = attempt_limit.max(1);
        let saturated = self.is_saturated(ceiling);
        let mut attempts = 0;
        loop {
            let sector = Sector {
                x: rng.index(self.sectors_per_axis),
                y: rng.index(self.sectors_per_axis),
            };
            attempts += 1;
            if saturated || attempts >= limit || !self.is_occupied(sector) {
                return PlacementChoice { sector, attempts };
            }
        }
    }

    /// Top-left corner of `sector` in container percent.
    pub fn base_offset(&self, sector: Sector) -> StarPosition {
        let n = f64::from(self.sectors_per_axis);
        StarPosition::new(
            f64::from(sector.x) / n * FIELD_SPAN_PERCENT - FIELD_MARGIN_PERCENT,
            f64::from(sector.y) / n * FIELD_SPAN_PERCENT - FIELD_MARGIN_PERCENT,
        )
    }

    /// Maximum jitter added to a sector's base offset on each axis.
    pub fn jitter_extent(&self) -> f64 {
        100.0 / f64::from(self.sectors_per_axis) * JITTER_FRACTION
    }

    /// A jittered position inside `sector`.
    pub fn position_in<R: RandomSource + ?Sized>(
        &self,
        sector: Sector,
        rng: &mut R,
    ) -> StarPosition {
        let base = self.base_offset(sector);
        let extent = self.jitter_extent();
        StarPosition::new(
            base.x + rng.next_unit() * extent,
            base.y + rng.next_unit() * extent,
        )
    }
}
