use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::hex::Hex;

/// Read-only view of a hex map, as consumed by the path search.
pub trait HexMap {
    type Position;

    fn in_bounds(&self, hex: Hex) -> bool;

    /// Terrain and occupancy at `hex`; `None` is treated like out of bounds.
    fn map_position(&self, hex: Hex) -> Option<&Self::Position>;
}

/// Something that moves across a map.
pub trait Agent<P> {
    /// Movement speed over `position`. Zero means very slow, not impassable.
    fn speed(&self, position: &P) -> u32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Plains,
    Forest,
    Hills,
    Mountains,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapPosition {
    pub terrain: Terrain,
    #[serde(default)]
    pub occupied: bool,
}

impl MapPosition {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            occupied: false,
        }
    }
}

/// Rectangular map of `columns` x `rows` cells in doubled-height addressing.
///
/// Valid cells satisfy `0 <= x < columns`, `0 <= y < 2 * rows` and
/// `x + y` even. Positions are stored row-major, one slot per cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexGrid {
    columns: i32,
    rows: i32,
    positions: Vec<MapPosition>,
}

/// Number of cells in a `columns` x `rows` grid, rejecting sizes whose
/// doubled-height rows or cell count do not fit.
fn cell_count(columns: i32, rows: i32) -> Result<usize, ConfigError> {
    if columns < 1 {
        return Err(ConfigError::Invalid("Grid width cannot be less than 1".to_string()));
    }
    if rows < 1 {
        return Err(ConfigError::Invalid("Grid height cannot be less than 1".to_string()));
    }
    if rows > i32::MAX / 2 {
        return Err(ConfigError::Invalid(format!("Grid height {} is too large", rows)));
    }
    columns
        .checked_mul(rows)
        .and_then(|cells| usize::try_from(cells).ok())
        .ok_or_else(|| ConfigError::Invalid(format!("Grid size {}x{} is too large", columns, rows)))
}

impl HexGrid {
    pub fn new(columns: i32, rows: i32, terrain: Terrain) -> Result<Self, ConfigError> {
        let cells = cell_count(columns, rows)?;
        Ok(Self {
            columns,
            rows,
            positions: vec![MapPosition::new(terrain); cells],
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let grid: HexGrid = serde_json::from_str(json)?;
        let cells = cell_count(grid.columns, grid.rows)?;
        if grid.positions.len() != cells {
            return Err(ConfigError::Invalid(format!(
                "Expected {} positions, got {}",
                cells,
                grid.positions.len()
            )));
        }
        Ok(grid)
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// All valid cells, row by row.
    pub fn hexes(&self) -> impl Iterator<Item = Hex> + '_ {
        (0..self.rows * 2)
            .flat_map(move |y| (0..self.columns).map(move |x| Hex::new(x, y)))
            .filter(|hex| hex.is_valid())
    }

    /// In-bounds cells at distance `<= range` from `center`.
    pub fn hexes_within_range(&self, center: Hex, range: u32) -> Vec<Hex> {
        self.hexes()
            .filter(|hex| center.distance(*hex) <= range)
            .collect()
    }

    pub fn set_terrain(&mut self, hex: Hex, terrain: Terrain) -> Result<(), ConfigError> {
        self.position_mut(hex)?.terrain = terrain;
        Ok(())
    }

    pub fn set_occupied(&mut self, hex: Hex, occupied: bool) -> Result<(), ConfigError> {
        self.position_mut(hex)?.occupied = occupied;
        Ok(())
    }

    fn index(&self, hex: Hex) -> Option<usize> {
        if !self.in_bounds(hex) {
            return None;
        }
        Some((hex.y / 2) as usize * self.columns as usize + hex.x as usize)
    }

    fn position_mut(&mut self, hex: Hex) -> Result<&mut MapPosition, ConfigError> {
        let index = self.index(hex).ok_or_else(|| {
            ConfigError::Invalid(format!("Invalid hex coordinates: ({}, {})", hex.x, hex.y))
        })?;
        Ok(&mut self.positions[index])
    }
}

impl HexMap for HexGrid {
    type Position = MapPosition;

    fn in_bounds(&self, hex: Hex) -> bool {
        hex.is_valid()
            && hex.x >= 0
            && hex.x < self.columns
            && hex.y >= 0
            && hex.y < self.rows * 2
    }

    fn map_position(&self, hex: Hex) -> Option<&MapPosition> {
        self.index(hex).and_then(|i| self.positions.get(i))
    }
}

/// A unit with a per-terrain speed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    pub speeds: HashMap<Terrain, u32>,
}

impl Unit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            speeds: HashMap::new(),
        }
    }

    pub fn with_speed(mut self, terrain: Terrain, speed: u32) -> Self {
        self.speeds.insert(terrain, speed);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Agent<MapPosition> for Unit {
    fn speed(&self, position: &MapPosition) -> u32 {
        if position.occupied {
            return 0;
        }
        self.speeds.get(&position.terrain).copied().unwrap_or(0)
    }
}
