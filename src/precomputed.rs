//! Eagerly-built distance matrices shared by every coordinator step.
//!
//! The source this crate descends from built a strike↔base matrix eagerly but left
//! the water-bomber-side strike↔tank and tank↔base matrices unfinished. This version
//! completes all three, since a coordinator's inner loop needs all of them to
//! enumerate refuel/refill fallback candidates without repeating great-circle math on
//! every insertion attempt.

use crate::entities::{Base, Lightning, WaterTank};
use crate::units::Distance;

#[derive(Debug, Clone)]
pub struct PrecomputedDistances {
    /// Indexed `[strike_index][base_index]`.
    strike_to_base: Vec<Vec<Distance>>,
    /// Indexed `[strike_index][tank_index]`.
    strike_to_tank: Vec<Vec<Distance>>,
    /// Indexed `[tank_index][base_index]`.
    tank_to_base: Vec<Vec<Distance>>,
}

impl PrecomputedDistances {
    #[must_use]
    pub fn build(strikes: &[Lightning], bases: &[Base], tanks: &[WaterTank]) -> Self {
        let strike_to_base = strikes
            .iter()
            .map(|s| bases.iter().map(|b| s.location.distance(&b.location)).collect())
            .collect();
        let strike_to_tank = strikes
            .iter()
            .map(|s| tanks.iter().map(|t| s.location.distance(&t.location)).collect())
            .collect();
        let tank_to_base = tanks
            .iter()
            .map(|t| bases.iter().map(|b| t.location.distance(&b.location)).collect())
            .collect();
        PrecomputedDistances { strike_to_base, strike_to_tank, tank_to_base }
    }

    #[must_use]
    pub fn strike_to_base(&self, strike_idx: usize, base_idx: usize) -> Distance {
        self.strike_to_base[strike_idx][base_idx]
    }

    #[must_use]
    pub fn strike_to_tank(&self, strike_idx: usize, tank_idx: usize) -> Distance {
        self.strike_to_tank[strike_idx][tank_idx]
    }

    #[must_use]
    pub fn tank_to_base(&self, tank_idx: usize, base_idx: usize) -> Distance {
        self.tank_to_base[tank_idx][base_idx]
    }

    /// Index (not id) of the base nearest a given strike.
    #[must_use]
    pub fn closest_base_to_strike(&self, strike_idx: usize) -> Option<usize> {
        self.strike_to_base[strike_idx]
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.0.partial_cmp(&b.0).unwrap())
            .map(|(i, _)| i)
    }

    /// Index (not id) of the tank nearest a given strike.
    #[must_use]
    pub fn closest_tank_to_strike(&self, strike_idx: usize) -> Option<usize> {
        self.strike_to_tank[strike_idx]
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.0.partial_cmp(&b.0).unwrap())
            .map(|(i, _)| i)
    }
}
