use napi::bindgen_prelude::*;
use napi_derive::napi;

use crate::config::SearchConfig;
use crate::error::PathError;
use crate::grid::{HexGrid, HexMap, Unit};
use crate::hex::Hex;
use crate::search::PathSearch;

#[napi(object)]
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl From<Point> for Hex {
    fn from(point: Point) -> Self {
        Hex::new(point.x, point.y)
    }
}

impl From<Hex> for Point {
    fn from(hex: Hex) -> Self {
        Point { x: hex.x, y: hex.y }
    }
}

fn to_napi_error(err: impl std::fmt::Display) -> napi::Error {
    napi::Error::new(Status::InvalidArg, err.to_string())
}

#[napi]
pub struct HexPathfinder {
    grid: HexGrid,
    config: SearchConfig,
}

#[napi]
impl HexPathfinder {
    #[napi(constructor)]
    pub fn new(grid_json: String, config_json: Option<String>) -> Result<Self> {
        let grid = HexGrid::from_json(&grid_json).map_err(to_napi_error)?;
        let config = match config_json {
            Some(json) => SearchConfig::from_json(&json).map_err(to_napi_error)?,
            None => SearchConfig::default(),
        };
        Ok(HexPathfinder { grid, config })
    }

    #[napi(getter)]
    pub fn get_columns(&self) -> i32 {
        self.grid.columns()
    }

    #[napi(getter)]
    pub fn get_rows(&self) -> i32 {
        self.grid.rows()
    }

    #[napi(getter)]
    pub fn get_grid(&self) -> Result<String> {
        serde_json::to_string(&self.grid).map_err(|err| {
            napi::Error::from_reason(format!("Failed to serialize grid to JSON: {}", err))
        })
    }

    /// Path from `start` to `goal` inclusive, or `null` when unreachable.
    #[napi]
    pub fn find_path(&self, unit_json: String, start: Point, goal: Point) -> Result<Option<Vec<Point>>> {
        let unit = Unit::from_json(&unit_json).map_err(to_napi_error)?;
        let search = PathSearch::new(&self.grid, self.config.clone());

        match search.find_path(&unit, start.into(), goal.into()) {
            Ok(path) => Ok(Some(path.forward().into_iter().map(Point::from).collect())),
            Err(PathError::NotFound { .. }) => Ok(None),
            Err(err) => Err(to_napi_error(err)),
        }
    }

    #[napi]
    pub fn distance(&self, a: Point, b: Point) -> u32 {
        Hex::from(a).distance(b.into())
    }

    #[napi]
    pub fn neighbours(&self, point: Point) -> Vec<Point> {
        Hex::from(point)
            .neighbours()
            .into_iter()
            .filter(|hex| self.grid.in_bounds(*hex))
            .map(Point::from)
            .collect()
    }

    #[napi]
    pub fn hexes_in_range(&self, center: Point, range: u32) -> Vec<Point> {
        self.grid
            .hexes_within_range(center.into(), range)
            .into_iter()
            .map(Point::from)
            .collect()
    }

    #[napi]
    pub fn line(&self, a: Point, b: Point) -> Vec<Point> {
        Hex::from(a).line_to(b.into()).into_iter().map(Point::from).collect()
    }

    #[napi]
    pub fn nearest_hex(&self, x: f64, y: f64, size: f64) -> Point {
        Hex::nearest(x, y, size).into()
    }
}
