use serde::{Deserialize, Serialize};

use crate::world::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        let dx = (self.x as i32 - other.x as i32).unsigned_abs();
        let dy = (self.y as i32 - other.y as i32).unsigned_abs();
        dx + dy
    }
}

/// What a box drops when destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoxContent {
    Empty,
    RangeUp,
    BombUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    RangeUp,
    BombUp,
}

/// Static cell content. Bombs and agents live in separate collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Floor,
    Wall,
    Box(BoxContent),
    Item(ItemKind),
}

impl Tile {
    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor | Tile::Item(_))
    }

    /// Flame rays pass over floor only; everything else is hit and stops
    /// the ray.
    pub fn stops_flame(self) -> bool {
        !matches!(self, Tile::Floor)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: u8,
    height: u8,
    tiles: Vec<Tile>,
    flames: Vec<bool>,
}

impl Grid {
    pub fn new(width: u8, height: u8) -> Self {
        let cells = width as usize * height as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::Floor; cells],
            flames: vec![false; cells],
        }
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn index(&self, pos: Pos) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    #[inline]
    pub fn tile(&self, pos: Pos) -> Tile {
        self.tiles[self.index(pos)]
    }

    pub fn set_tile(&mut self, pos: Pos, tile: Tile) {
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    #[inline]
    pub fn flame(&self, pos: Pos) -> bool {
        self.flames[self.index(pos)]
    }

    pub fn set_flame(&mut self, pos: Pos) {
        let idx = self.index(pos);
        self.flames[idx] = true;
    }

    pub(crate) fn set_flame_index(&mut self, idx: usize) {
        self.flames[idx] = true;
    }

    pub fn clear_flames(&mut self) {
        self.flames.fill(false);
    }

    /// Neighbor cell after stepping `dir`, `None` when the step leaves the
    /// grid. `Stay` resolves to the cell itself.
    pub fn neighbor(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        self.offset(pos, dx, dy)
    }

    pub fn offset(&self, pos: Pos, dx: i16, dy: i16) -> Option<Pos> {
        let x = pos.x as i16 + dx;
        let y = pos.y as i16 + dy;
        if x < 0 || y < 0 || x >= self.width as i16 || y >= self.height as i16 {
            return None;
        }
        Some(Pos::new(x as u8, y as u8))
    }

    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let width = self.width;
        let height = self.height;
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos::new(x, y)))
    }

    pub fn box_count(&self) -> u32 {
        self.tiles
            .iter()
            .filter(|tile| matches!(tile, Tile::Box(_)))
            .count() as u32
    }
}
