use std::fmt;
use std::str::FromStr;

use anyhow::Context;

use crate::common::Position;
use crate::error::MapError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Open,
    Wall,
    Slope(Direction),
}

impl Cell {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Cell::Open),
            '#' => Some(Cell::Wall),
            '^' => Some(Cell::Slope(Direction::North)),
            'v' => Some(Cell::Slope(Direction::South)),
            '>' => Some(Cell::Slope(Direction::East)),
            '<' => Some(Cell::Slope(Direction::West)),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Open => '.',
            Cell::Wall => '#',
            Cell::Slope(Direction::North) => '^',
            Cell::Slope(Direction::South) => 'v',
            Cell::Slope(Direction::East) => '>',
            Cell::Slope(Direction::West) => '<',
        }
    }

    pub fn is_passable(self) -> bool {
        self != Cell::Wall
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    pub height: usize,
    pub width: usize,
    pub grid: Vec<Vec<Cell>>, // Indexed as grid[y][x]
    pub entry: Position,
    pub exit: Position,
}

impl Map {
    pub fn parse<S: AsRef<str>>(raw_lines: &[S]) -> Result<Self, MapError> {
        let mut rows: Vec<&str> = raw_lines
            .iter()
            .map(|line| line.as_ref().trim_end_matches('\r'))
            .collect();
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        if rows.len() < 2 {
            return Err(MapError::Malformed(format!(
                "need at least two rows, got {}",
                rows.len()
            )));
        }

        let width = rows[0].chars().count();
        if width == 0 {
            return Err(MapError::Malformed("first row is empty".to_string()));
        }

        let mut grid = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let cells = row
                .chars()
                .enumerate()
                .map(|(x, ch)| {
                    Cell::from_symbol(ch).ok_or_else(|| {
                        MapError::Malformed(format!("unknown symbol {ch:?} at ({x}, {y})"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if cells.len() != width {
                return Err(MapError::Malformed(format!(
                    "row {y} has width {}, expected {width}",
                    cells.len()
                )));
            }
            grid.push(cells);
        }

        let mut map = Map {
            height: grid.len(),
            width,
            grid,
            entry: (0, 0),
            exit: (0, 0),
        };
        map.entry = map.find_entry()?;
        map.exit = map.find_exit()?;

        Ok(map)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("failed to read map {path}"))?;
        content
            .parse::<Map>()
            .with_context(|| format!("failed to parse map {path}"))
    }

    pub fn find_entry(&self) -> Result<Position, MapError> {
        self.unique_open_cell(0)
            .map_err(|found| MapError::NoEntryPoint { found })
    }

    pub fn find_exit(&self) -> Result<Position, MapError> {
        self.unique_open_cell(self.height - 1)
            .map_err(|found| MapError::NoExitPoint { found })
    }

    // Err carries the number of open cells when it is not exactly one.
    fn unique_open_cell(&self, y: usize) -> Result<Position, usize> {
        let open: Vec<usize> = self.grid[y]
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Open)
            .map(|(x, _)| x)
            .collect();
        match open.as_slice() {
            [x] => Ok((*x, y)),
            _ => Err(open.len()),
        }
    }

    pub fn cell(&self, (x, y): Position) -> Cell {
        self.grid[y][x]
    }

    pub fn is_passable(&self, pos: Position) -> bool {
        self.cell(pos).is_passable()
    }

    pub fn has_slopes(&self) -> bool {
        self.grid
            .iter()
            .flatten()
            .any(|cell| matches!(cell, Cell::Slope(_)))
    }

    fn step(&self, (x, y): Position, (dx, dy): (isize, isize)) -> Option<Position> {
        let new_x = x.checked_add_signed(dx)?;
        let new_y = y.checked_add_signed(dy)?;
        if new_x < self.width && new_y < self.height && self.grid[new_y][new_x].is_passable() {
            Some((new_x, new_y))
        } else {
            None
        }
    }

    /// Positions reachable in one move from `pos`.
    ///
    /// With `directed` set, a slope only lets you continue downhill, so it has at
    /// most one neighbor. Otherwise every passable orthogonal cell counts.
    pub fn neighbors(&self, pos: Position, directed: bool) -> Vec<Position> {
        if directed {
            if let Cell::Slope(direction) = self.cell(pos) {
                return self.step(pos, direction.delta()).into_iter().collect();
            }
        }

        let directions = [(0, -1), (0, 1), (-1, 0), (1, 0)]; // Up, down, left, right
        directions
            .iter()
            .filter_map(|&delta| self.step(pos, delta))
            .collect()
    }

    /// Number of passable orthogonal neighbors, ignoring slopes.
    pub fn degree(&self, pos: Position) -> usize {
        self.neighbors(pos, false).len()
    }
}

impl FromStr for Map {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        Map::parse(&lines)
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
