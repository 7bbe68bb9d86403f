use serde::{Deserialize, Serialize};

use crate::constants::{BOMB_FUSE_TICKS, MOVE_HISTORY_LEN};
use crate::error::RuleCode;
use crate::grid::{Grid, ItemKind, Pos, Tile};

pub type AgentId = u8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Stay,
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::Stay,
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Stay => (0, 0),
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

/// One turn of intent: step (or stay), optionally leaving a bomb on the
/// cell the agent ends the turn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub dir: Direction,
    pub drop_bomb: bool,
}

impl Move {
    pub fn stay() -> Self {
        Self {
            dir: Direction::Stay,
            drop_bomb: false,
        }
    }

    /// Engine-facing form of this move, given where the agent stands.
    pub fn to_action(self, from: Pos, grid: &Grid) -> Action {
        let target = grid.neighbor(from, self.dir).unwrap_or(from);
        if self.drop_bomb {
            Action::Bomb {
                x: target.x,
                y: target.y,
            }
        } else {
            Action::Move {
                x: target.x,
                y: target.y,
            }
        }
    }
}

/// The single output produced per turn, consumed by the emitting layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Move { x: u8, y: u8 },
    Bomb { x: u8, y: u8 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bomb {
    pub pos: Pos,
    pub owner: AgentId,
    pub range: u8,
    pub countdown: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    pub id: AgentId,
    pub pos: Pos,
    pub blast_range: u8,
    pub bombs_available: u8,
    pub bomb_capacity: u8,
    pub alive: bool,
}

/// Complete decoded world state for one turn, plus the planning bookkeeping
/// (reward tallies, recent positions, search depth) carried through
/// simulated futures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub turn: u32,
    pub grid: Grid,
    pub bombs: Vec<Bomb>,
    pub agents: Vec<AgentState>,
    pub me: AgentId,
    pub boxes_remaining: u32,
    pub boxes_destroyed: u32,
    pub items_collected: u32,
    pub recent_moves: Vec<Pos>,
    pub depth: u8,
    pub dead: bool,
}

impl WorldSnapshot {
    pub fn new(grid: Grid, agents: Vec<AgentState>, me: AgentId) -> Self {
        let boxes_remaining = grid.box_count();
        let mut world = Self {
            turn: 0,
            grid,
            bombs: Vec::new(),
            agents,
            me,
            boxes_remaining,
            boxes_destroyed: 0,
            items_collected: 0,
            recent_moves: Vec::with_capacity(MOVE_HISTORY_LEN),
            depth: 0,
            dead: false,
        };
        if let Some(agent) = world.agents.iter().find(|a| a.id == me) {
            let pos = agent.pos;
            world.push_recent(pos);
        }
        world
    }

    pub fn my_agent(&self) -> &AgentState {
        self.agents
            .iter()
            .find(|a| a.id == self.me)
            .expect("snapshot always carries the planning agent")
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentState> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn bomb_at(&self, pos: Pos) -> Option<&Bomb> {
        self.bombs.iter().find(|b| b.pos == pos)
    }

    pub fn push_recent(&mut self, pos: Pos) {
        if self.recent_moves.len() == MOVE_HISTORY_LEN {
            self.recent_moves.remove(0);
        }
        self.recent_moves.push(pos);
    }

    /// Apply one agent's move for this turn. Illegal steps (blocked tile,
    /// occupied cell, off-grid) degrade to staying put rather than erroring:
    /// coordinates outside the grid are never dereferenced.
    pub fn apply_move(&mut self, id: AgentId, mv: Move) {
        let Some(idx) = self.agents.iter().position(|a| a.id == id) else {
            return;
        };
        if !self.agents[idx].alive {
            return;
        }
        let from = self.agents[idx].pos;

        if mv.dir != Direction::Stay {
            if let Some(target) = self.grid.neighbor(from, mv.dir) {
                if self.grid.tile(target).is_walkable() && self.bomb_at(target).is_none() {
                    self.agents[idx].pos = target;
                    if let Tile::Item(kind) = self.grid.tile(target) {
                        self.grid.set_tile(target, Tile::Floor);
                        let agent = &mut self.agents[idx];
                        match kind {
                            ItemKind::RangeUp => agent.blast_range += 1,
                            ItemKind::BombUp => {
                                agent.bomb_capacity += 1;
                                agent.bombs_available += 1;
                            }
                        }
                        if id == self.me {
                            self.items_collected += 1;
                        }
                    }
                }
            }
        }

        let here = self.agents[idx].pos;
        if mv.drop_bomb && self.agents[idx].bombs_available > 0 && self.bomb_at(here).is_none() {
            let range = self.agents[idx].blast_range;
            self.bombs.push(Bomb {
                pos: here,
                owner: id,
                range,
                countdown: BOMB_FUSE_TICKS,
            });
            self.agents[idx].bombs_available -= 1;
        }

        if id == self.me {
            self.push_recent(here);
        }
    }

    pub fn validate_invariants(&self) -> Result<(), RuleCode> {
        if self.agent(self.me).is_none() {
            return Err(RuleCode::UnknownSelfAgent);
        }

        for (i, bomb) in self.bombs.iter().enumerate() {
            if bomb.countdown == 0 || bomb.countdown > BOMB_FUSE_TICKS {
                return Err(RuleCode::BombCountdownRange);
            }
            if !self.grid.contains(bomb.pos) || !self.grid.tile(bomb.pos).is_walkable() {
                return Err(RuleCode::BombOnBlockedTile);
            }
            if self.bombs[..i].iter().any(|other| other.pos == bomb.pos) {
                return Err(RuleCode::BombCellCollision);
            }
        }

        for agent in &self.agents {
            if !self.grid.contains(agent.pos) {
                return Err(RuleCode::AgentOutOfBounds);
            }
            if agent.alive && !self.grid.tile(agent.pos).is_walkable() {
                return Err(RuleCode::AgentInsideTerrain);
            }
            if agent.bombs_available > agent.bomb_capacity {
                return Err(RuleCode::AgentBombAccounting);
            }
        }

        if self.boxes_remaining != self.grid.box_count() {
            return Err(RuleCode::BoxCountMismatch);
        }

        for pos in self.grid.cells() {
            if self.grid.flame(pos) && self.grid.tile(pos) == Tile::Wall {
                return Err(RuleCode::FlameOnWall);
            }
        }

        Ok(())
    }
}
