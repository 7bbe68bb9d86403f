//! Tick resolution: fuse synchronization, flame propagation, chained
//! detonations. Pure over (grid, bombs, agents); the caller applies the
//! agents' moves for the turn before resolving.

use crate::grid::{BoxContent, Grid, ItemKind, Pos, Tile};
use crate::world::{Bomb, WorldSnapshot};

pub(crate) const AXES: [(i16, i16); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Everything a simultaneous detonation wave touches, before any of it is
/// committed to the world.
pub(crate) struct BlastWave {
    pub flames: Vec<bool>,
    pub detonated: Vec<bool>,
    pub boxes_hit: Vec<(Pos, usize)>,
    pub items_hit: Vec<Pos>,
}

/// Trace the blast of every seed bomb, chaining into any bomb a ray reaches.
/// Rays stop at the first non-floor tile or bomb; walls are the only
/// obstruction left unmarked.
pub(crate) fn propagate_blast(grid: &Grid, bombs: &[Bomb], seeds: &[usize]) -> BlastWave {
    let mut wave = BlastWave {
        flames: vec![false; grid.cell_count()],
        detonated: vec![false; bombs.len()],
        boxes_hit: Vec::new(),
        items_hit: Vec::new(),
    };

    let mut worklist: Vec<usize> = Vec::with_capacity(seeds.len());
    for &seed in seeds {
        if !wave.detonated[seed] {
            wave.detonated[seed] = true;
            worklist.push(seed);
        }
    }

    while let Some(current) = worklist.pop() {
        let bomb = &bombs[current];
        wave.flames[grid.index(bomb.pos)] = true;

        for (dx, dy) in AXES {
            let mut cursor = bomb.pos;
            for _ in 0..bomb.range {
                let Some(next) = grid.offset(cursor, dx, dy) else {
                    break;
                };
                cursor = next;

                if let Some(hit) = bombs.iter().position(|b| b.pos == cursor) {
                    wave.flames[grid.index(cursor)] = true;
                    if !wave.detonated[hit] {
                        wave.detonated[hit] = true;
                        worklist.push(hit);
                    }
                    break;
                }

                match grid.tile(cursor) {
                    Tile::Wall => break,
                    Tile::Box(_) => {
                        wave.flames[grid.index(cursor)] = true;
                        if !wave.boxes_hit.iter().any(|(pos, _)| *pos == cursor) {
                            wave.boxes_hit.push((cursor, current));
                        }
                        break;
                    }
                    Tile::Item(_) => {
                        wave.flames[grid.index(cursor)] = true;
                        if !wave.items_hit.contains(&cursor) {
                            wave.items_hit.push(cursor);
                        }
                        break;
                    }
                    Tile::Floor => {
                        wave.flames[grid.index(cursor)] = true;
                    }
                }
            }
        }
    }

    wave
}

/// Earliest tick each bomb can go off, folding in every chain that can
/// force it early. Forced ticks only ever decrease, so the relaxation
/// reaches a fixpoint; the result is independent of bomb order.
pub fn synchronized_fuses(grid: &Grid, bombs: &[Bomb]) -> Vec<u8> {
    let mut forced: Vec<u8> = bombs.iter().map(|b| b.countdown).collect();
    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..bombs.len() {
            for j in 0..bombs.len() {
                if i == j || forced[j] <= forced[i] {
                    continue;
                }
                if blast_covers(grid, bombs, i, j) {
                    forced[j] = forced[i];
                    changed = true;
                }
            }
        }
    }
    forced
}

/// Whether bomb `i`'s blast reaches bomb `j`'s cell: same row or column,
/// within range, nothing in between that would stop the ray first.
fn blast_covers(grid: &Grid, bombs: &[Bomb], i: usize, j: usize) -> bool {
    ray_reaches(grid, bombs, bombs[i].pos, bombs[i].range, bombs[j].pos)
}

/// Whether an unobstructed blast ray from `origin` with `range` reaches
/// `target`. Used for chain synchronization and for threat timing.
pub fn ray_reaches(
    grid: &Grid,
    bombs: &[Bomb],
    origin: Pos,
    range: u8,
    target: Pos,
) -> bool {
    if origin == target {
        return true;
    }
    if origin.x != target.x && origin.y != target.y {
        return false;
    }
    if origin.manhattan(target) > range as u32 {
        return false;
    }

    let dx = (target.x as i16 - origin.x as i16).signum();
    let dy = (target.y as i16 - origin.y as i16).signum();
    let mut cursor = origin;
    loop {
        cursor = match grid.offset(cursor, dx, dy) {
            Some(next) => next,
            None => return false,
        };
        if cursor == target {
            return true;
        }
        if grid.tile(cursor).stops_flame() || bombs.iter().any(|b| b.pos == cursor) {
            return false;
        }
    }
}

/// Advance the world by one tick: synchronize chained fuses, burn one tick
/// off every countdown, resolve every detonation reached this tick, and
/// return bomb slots to their owners.
pub fn resolve_tick(world: &mut WorldSnapshot) {
    world.grid.clear_flames();
    world.turn += 1;

    if world.bombs.is_empty() {
        return;
    }

    let forced = synchronized_fuses(&world.grid, &world.bombs);
    for (bomb, fuse) in world.bombs.iter_mut().zip(&forced) {
        bomb.countdown = *fuse;
    }
    for bomb in &mut world.bombs {
        bomb.countdown = bomb.countdown.saturating_sub(1);
    }

    let seeds: Vec<usize> = world
        .bombs
        .iter()
        .enumerate()
        .filter(|(_, bomb)| bomb.countdown == 0)
        .map(|(i, _)| i)
        .collect();
    if seeds.is_empty() {
        return;
    }

    let wave = propagate_blast(&world.grid, &world.bombs, &seeds);

    for (idx, hot) in wave.flames.iter().enumerate() {
        if *hot {
            world.grid.set_flame_index(idx);
        }
    }

    for agent in &mut world.agents {
        if agent.alive && world.grid.flame(agent.pos) {
            agent.alive = false;
        }
    }
    if !world.my_agent().alive {
        world.dead = true;
    }

    // Boxes open after all rays are traced: a drop revealed this tick is
    // never consumed by the blast that revealed it.
    for (pos, bomb_idx) in &wave.boxes_hit {
        let Tile::Box(content) = world.grid.tile(*pos) else {
            continue;
        };
        let revealed = match content {
            BoxContent::Empty => Tile::Floor,
            BoxContent::RangeUp => Tile::Item(ItemKind::RangeUp),
            BoxContent::BombUp => Tile::Item(ItemKind::BombUp),
        };
        world.grid.set_tile(*pos, revealed);
        world.boxes_remaining = world.boxes_remaining.saturating_sub(1);
        if world.bombs[*bomb_idx].owner == world.me {
            world.boxes_destroyed += 1;
        }
    }

    for pos in &wave.items_hit {
        if matches!(world.grid.tile(*pos), Tile::Item(_)) {
            world.grid.set_tile(*pos, Tile::Floor);
        }
    }

    let mut kept = Vec::with_capacity(world.bombs.len());
    for (i, bomb) in world.bombs.drain(..).enumerate() {
        if wave.detonated[i] {
            if let Some(owner) = world.agents.iter_mut().find(|a| a.id == bomb.owner) {
                if owner.bombs_available < owner.bomb_capacity {
                    owner.bombs_available += 1;
                }
            }
        } else {
            kept.push(bomb);
        }
    }
    world.bombs = kept;
}

#[cfg(test)]
mod tests;
