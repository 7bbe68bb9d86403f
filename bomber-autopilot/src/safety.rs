//! Escape and trap analysis for one candidate move. The deeply nested
//! special cases of the game ("already on a bomb", "enemy adjacent",
//! "first ply only") are kept as named sub-checks combined by explicit
//! boolean logic.

use bomber_core::constants::BOMB_FUSE_TICKS;
use bomber_core::physics::{ray_reaches, synchronized_fuses};
use bomber_core::{Direction, HazardGrid, Move, Pos, WorldSnapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SafetyVerdict {
    pub move_safe: bool,
    pub bomb_safe: bool,
}

impl SafetyVerdict {
    fn unsafe_both() -> Self {
        Self {
            move_safe: false,
            bomb_safe: false,
        }
    }
}

/// Judge one candidate move from the planning agent's current position.
/// `first_ply` enables the opponent-reactive checks that only make sense on
/// the real turn boundary.
pub fn assess(
    world: &WorldSnapshot,
    hazards: &HazardGrid,
    mv: Move,
    first_ply: bool,
) -> SafetyVerdict {
    let me = world.my_agent();
    let from = me.pos;

    let target = match candidate_cell(world, from, mv.dir) {
        Some(pos) => pos,
        None => return SafetyVerdict::unsafe_both(),
    };

    let mut move_safe = true;
    if let Some(bomb) = world.bomb_at(from) {
        // leaving (or staying over) a counting bomb needs a guaranteed way
        // out of its blast line
        move_safe = axis_escape(world, hazards, target, bomb.pos, bomb.range).is_some();
    }
    if move_safe && first_ply && neighbor_trap(world, target) {
        move_safe = false;
    }

    let mut bomb_safe = false;
    if me.bombs_available > 0 && world.bomb_at(target).is_none() && !hazards.is_hot(from) {
        if let Some(steps) = axis_escape(world, hazards, target, target, me.blast_range) {
            bomb_safe = blast_timing(world, target, steps, first_ply);
        }
    }

    SafetyVerdict { move_safe, bomb_safe }
}

/// Resolve the candidate cell, `None` when the step is not traversable.
/// Staying put is always traversable (the agent may be standing on its own
/// bomb).
fn candidate_cell(world: &WorldSnapshot, from: Pos, dir: Direction) -> Option<Pos> {
    if dir == Direction::Stay {
        return Some(from);
    }
    let target = world.grid.neighbor(from, dir)?;
    if world.grid.tile(target).is_walkable() && world.bomb_at(target).is_none() {
        Some(target)
    } else {
        None
    }
}

fn is_open(world: &WorldSnapshot, pos: Pos) -> bool {
    world.grid.tile(pos).is_walkable() && world.bomb_at(pos).is_none()
}

/// Sub-check: from `start`, can the agent reach a cell outside the blast
/// line of a bomb at `bomb_pos` before running out of room? Walks outward
/// along the shared axis up to the bomb's range, accepting either a
/// perpendicular exit or a safe cell past the range. Returns the number of
/// steps to safety, `None` when every way out is blocked. `Some(0)` means
/// `start` is already clear.
pub fn axis_escape(
    world: &WorldSnapshot,
    hazards: &HazardGrid,
    start: Pos,
    bomb_pos: Pos,
    range: u8,
) -> Option<u32> {
    if start != bomb_pos && !ray_reaches(&world.grid, &world.bombs, bomb_pos, range, start) {
        return Some(0);
    }

    let outward: Vec<(i16, i16)> = if start == bomb_pos {
        vec![(1, 0), (-1, 0), (0, 1), (0, -1)]
    } else {
        vec![(
            (start.x as i16 - bomb_pos.x as i16).signum(),
            (start.y as i16 - bomb_pos.y as i16).signum(),
        )]
    };

    let mut best: Option<u32> = None;
    for (dx, dy) in outward {
        let mut cursor = start;
        let mut steps = 0u32;
        loop {
            if perpendicular_exit(world, hazards, cursor, dx, dy, bomb_pos, range) {
                let total = steps + 1;
                best = Some(best.map_or(total, |b| b.min(total)));
                break;
            }
            let Some(next) = world.grid.offset(cursor, dx, dy) else {
                break;
            };
            if !is_open(world, next) || hazards.is_hot(next) {
                break;
            }
            steps += 1;
            cursor = next;
            if bomb_pos.manhattan(cursor) > range as u32 {
                best = Some(best.map_or(steps, |b| b.min(steps)));
                break;
            }
        }
    }
    best
}

/// A sideways step only counts as an exit when the cell it lands on is
/// itself clear of the bomb's blast cross.
fn perpendicular_exit(
    world: &WorldSnapshot,
    hazards: &HazardGrid,
    cell: Pos,
    dx: i16,
    dy: i16,
    bomb_pos: Pos,
    range: u8,
) -> bool {
    for (px, py) in [(dy, dx), (-dy, -dx)] {
        if let Some(side) = world.grid.offset(cell, px, py) {
            if is_open(world, side)
                && !hazards.is_hot(side)
                && !ray_reaches(&world.grid, &world.bombs, bomb_pos, range, side)
            {
                return true;
            }
        }
    }
    false
}

/// Sub-check (first ply only): true when an adjacent opponent could seal
/// the candidate cell by bombing this turn. Trapped means no perpendicular
/// exit distinct from the opponent's cell exists.
pub fn neighbor_trap(world: &WorldSnapshot, candidate: Pos) -> bool {
    for opponent in &world.agents {
        if opponent.id == world.me || !opponent.alive || opponent.bombs_available == 0 {
            continue;
        }
        if opponent.pos.manhattan(candidate) != 1 {
            continue;
        }
        let ox = (opponent.pos.x as i16 - candidate.x as i16).signum();
        let oy = (opponent.pos.y as i16 - candidate.y as i16).signum();
        let mut has_exit = false;
        for (px, py) in [(oy, ox), (-oy, -ox)] {
            if let Some(side) = world.grid.offset(candidate, px, py) {
                if is_open(world, side) {
                    has_exit = true;
                    break;
                }
            }
        }
        if !has_exit {
            return true;
        }
    }
    false
}

/// Sub-check: with `steps_to_safety` ticks needed to clear the danger zone
/// of a bomb placed at `pos`, no armed bomb whose blast line covers `pos`
/// may go off first. On the first ply an adjacent-line opponent is treated
/// as a fresh bomb with a full fuse.
pub fn blast_timing(
    world: &WorldSnapshot,
    pos: Pos,
    steps_to_safety: u32,
    first_ply: bool,
) -> bool {
    let forced = synchronized_fuses(&world.grid, &world.bombs);
    for (bomb, fuse) in world.bombs.iter().zip(&forced) {
        if ray_reaches(&world.grid, &world.bombs, bomb.pos, bomb.range, pos)
            && (*fuse as u32) <= steps_to_safety
        {
            return false;
        }
    }

    if first_ply {
        for opponent in &world.agents {
            if opponent.id == world.me || !opponent.alive || opponent.bombs_available == 0 {
                continue;
            }
            if ray_reaches(
                &world.grid,
                &world.bombs,
                opponent.pos,
                opponent.blast_range,
                pos,
            ) && (BOMB_FUSE_TICKS as u32) <= steps_to_safety
            {
                return false;
            }
        }
    }

    true
}
