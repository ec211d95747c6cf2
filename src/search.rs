//! A* search over a hex map.
//!
//! The frontier is a [`PriorityQueue`] ordered by `cost + distance(goal)`.
//! Step costs come from the agent's speed over the entered cell, scaled by
//! [`SearchConfig::base_unit`]. Hex distance is admissible as long as no step
//! costs less than one, which holds while no speed exceeds `base_unit`.

use std::collections::HashMap;

use log::{debug, trace};

use crate::config::{SearchConfig, Termination};
use crate::error::{PathError, Result};
use crate::grid::{Agent, HexMap};
use crate::heap::PriorityQueue;
use crate::hex::Hex;

/// A found path, stored goal first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    hexes: Vec<Hex>,
    cost: u32,
    expanded: usize,
}

impl Path {
    /// Hexes from goal back to start.
    pub fn hexes(&self) -> &[Hex] {
        &self.hexes
    }

    /// Hexes from start to goal.
    pub fn forward(&self) -> Vec<Hex> {
        self.hexes.iter().rev().copied().collect()
    }

    pub fn into_hexes(self) -> Vec<Hex> {
        self.hexes
    }

    /// Total movement cost of the path.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Number of frontier nodes expanded while searching.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of moves (edges) on the path.
    pub fn steps(&self) -> usize {
        self.hexes.len() - 1
    }

    pub fn start(&self) -> Hex {
        self.hexes[self.hexes.len() - 1]
    }

    pub fn goal(&self) -> Hex {
        self.hexes[0]
    }
}

/// A* path search bound to one map.
pub struct PathSearch<'a, M> {
    map: &'a M,
    config: SearchConfig,
}

impl<'a, M: HexMap> PathSearch<'a, M> {
    pub fn new(map: &'a M, config: SearchConfig) -> Self {
        Self { map, config }
    }

    pub fn with_defaults(map: &'a M) -> Self {
        Self::new(map, SearchConfig::default())
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find the cheapest path for `agent` from `start` to `goal`.
    ///
    /// Returns [`PathError::NotFound`] when the frontier runs dry before the
    /// goal is reached.
    pub fn find_path<A>(&self, agent: &A, start: Hex, goal: Hex) -> Result<Path>
    where
        A: Agent<M::Position>,
    {
        trace!(
            "[PathSearch] find_path: start=({},{}) goal=({},{})",
            start.x,
            start.y,
            goal.x,
            goal.y
        );

        if !self.map.in_bounds(start) || self.map.map_position(start).is_none() {
            debug!("[PathSearch] start ({},{}) out of bounds", start.x, start.y);
            return Err(PathError::OutOfBounds(start));
        }

        if start == goal {
            return Ok(Path {
                hexes: vec![start],
                cost: 0,
                expanded: 0,
            });
        }

        // the heap needs at least one slot
        let mut frontier = PriorityQueue::new(self.config.initial_capacity.max(1))?;
        let mut cost_so_far: HashMap<Hex, u32> = HashMap::new();
        let mut came_from: HashMap<Hex, Hex> = HashMap::new();

        cost_so_far.insert(start, 0);
        frontier.insert(0, start);

        let mut found = false;
        let mut expanded = 0;

        while !found && !frontier.is_empty() {
            let current = frontier.extract_min()?;
            let current_cost = match cost_so_far.get(&current.node) {
                Some(&cost) => cost,
                None => continue,
            };

            if self.config.termination == Termination::OnExtraction {
                // superseded by a cheaper entry for the same hex
                if current.priority > current_cost.saturating_add(current.node.distance(goal)) {
                    continue;
                }
                if current.node == goal {
                    found = true;
                    break;
                }
            }

            if let Some(limit) = self.config.max_expansions {
                if expanded >= limit {
                    debug!("[PathSearch] FAILED: expansion limit {} reached", limit);
                    return Err(PathError::ExpansionLimit(expanded));
                }
            }
            expanded += 1;
            trace!(
                "[PathSearch] expand ({},{}) cost={} frontier={}",
                current.node.x,
                current.node.y,
                current_cost,
                frontier.len()
            );

            for next in current.node.neighbours() {
                if !self.map.in_bounds(next) {
                    continue;
                }
                let Some(position) = self.map.map_position(next) else {
                    continue;
                };
                let Some(step_cost) = self.config.step_cost(agent.speed(position)) else {
                    continue;
                };

                let new_cost = current_cost.saturating_add(step_cost);
                let improved = cost_so_far.get(&next).map_or(true, |&cost| new_cost < cost);
                if improved {
                    cost_so_far.insert(next, new_cost);
                    came_from.insert(next, current.node);
                    frontier.insert(new_cost.saturating_add(next.distance(goal)), next);
                }

                if self.config.termination == Termination::OnDiscovery && next == goal {
                    found = true;
                    break;
                }
            }
        }

        if !found {
            debug!(
                "[PathSearch] FAILED: no path from ({},{}) to ({},{}) after {} expansions",
                start.x, start.y, goal.x, goal.y, expanded
            );
            return Err(PathError::NotFound { start, goal });
        }

        let hexes = reconstruct(&came_from, start, goal)?;
        let cost = cost_so_far.get(&goal).copied().unwrap_or_default();

        debug!(
            "[PathSearch] found path: {} steps, cost {}, {} expansions",
            hexes.len() - 1,
            cost,
            expanded
        );

        Ok(Path {
            hexes,
            cost,
            expanded,
        })
    }
}

/// Walk `came_from` back from `goal` to `start`.
fn reconstruct(came_from: &HashMap<Hex, Hex>, start: Hex, goal: Hex) -> Result<Vec<Hex>> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = *came_from
            .get(&current)
            .ok_or(PathError::NotFound { start, goal })?;
        path.push(current);
    }
    Ok(path)
}

/// Search `map` with the default configuration.
pub fn find_path<M, A>(map: &M, agent: &A, start: Hex, goal: Hex) -> Result<Path>
where
    M: HexMap,
    A: Agent<M::Position>,
{
    PathSearch::with_defaults(map).find_path(agent, start, goal)
}
