//! A* pathfinding for units on a doubled-height hex map.
//!
//! ```
//! use hex_pathfind::{find_path, Hex, HexGrid, Terrain, Unit};
//!
//! let grid = HexGrid::new(4, 4, Terrain::Plains).unwrap();
//! let scout = Unit::new("scout").with_speed(Terrain::Plains, 360);
//!
//! let path = find_path(&grid, &scout, Hex::new(0, 0), Hex::new(3, 3)).unwrap();
//! assert_eq!(path.forward().first(), Some(&Hex::new(0, 0)));
//! assert_eq!(path.cost(), 3);
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod heap;
pub mod hex;
pub mod search;

#[cfg(feature = "node")]
mod node;

pub use config::{SearchConfig, Termination};
pub use error::{ConfigError, HeapError, PathError, Result};
pub use grid::{Agent, HexGrid, HexMap, MapPosition, Terrain, Unit};
pub use heap::{HeapElement, PriorityQueue};
pub use hex::Hex;
pub use search::{find_path, Path, PathSearch};
