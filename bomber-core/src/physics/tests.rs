use super::*;
use crate::constants::{STARTING_BLAST_RANGE, STARTING_BOMB_CAPACITY};
use crate::world::AgentState;

fn agent(id: u8, pos: Pos) -> AgentState {
    AgentState {
        id,
        pos,
        blast_range: STARTING_BLAST_RANGE,
        bombs_available: STARTING_BOMB_CAPACITY,
        bomb_capacity: STARTING_BOMB_CAPACITY,
        alive: true,
    }
}

fn open_world(width: u8, height: u8) -> WorldSnapshot {
    WorldSnapshot::new(Grid::new(width, height), vec![agent(0, Pos::new(0, 0))], 0)
}

fn bomb(pos: Pos, owner: u8, range: u8, countdown: u8) -> Bomb {
    Bomb {
        pos,
        owner,
        range,
        countdown,
    }
}

#[test]
fn countdown_one_bomb_detonates_and_is_removed() {
    let mut world = open_world(7, 7);
    world.agents[0].bombs_available = 0;
    world.bombs.push(bomb(Pos::new(3, 3), 0, 2, 1));

    resolve_tick(&mut world);

    assert!(world.bombs.is_empty());
    assert!(world.grid.flame(Pos::new(3, 3)));
    assert!(world.grid.flame(Pos::new(5, 3)));
    assert!(!world.grid.flame(Pos::new(6, 3)));
    // owner gets the slot back
    assert_eq!(world.agents[0].bombs_available, 1);
}

#[test]
fn refund_is_capped_at_capacity() {
    let mut world = open_world(7, 7);
    world.agents[0].bombs_available = world.agents[0].bomb_capacity;
    world.bombs.push(bomb(Pos::new(3, 3), 0, 1, 1));

    resolve_tick(&mut world);

    assert_eq!(
        world.agents[0].bombs_available,
        world.agents[0].bomb_capacity
    );
}

#[test]
fn countdown_decrements_without_detonation() {
    let mut world = open_world(5, 5);
    world.bombs.push(bomb(Pos::new(2, 2), 0, 2, 4));

    resolve_tick(&mut world);

    assert_eq!(world.bombs.len(), 1);
    assert_eq!(world.bombs[0].countdown, 3);
    assert!(!world.grid.flame(Pos::new(2, 2)));
}

#[test]
fn chain_synchronization_pulls_covered_bombs_forward() {
    let mut world = open_world(9, 3);
    world.bombs.push(bomb(Pos::new(1, 1), 0, 3, 5));
    world.bombs.push(bomb(Pos::new(3, 1), 0, 3, 8));

    let forced = synchronized_fuses(&world.grid, &world.bombs);
    assert_eq!(forced, vec![5, 5]);

    // Both detonate on the same tick once the earlier fuse runs out.
    for _ in 0..4 {
        resolve_tick(&mut world);
        assert_eq!(world.bombs.len(), 2);
    }
    resolve_tick(&mut world);
    assert!(world.bombs.is_empty());
}

#[test]
fn synchronization_propagates_across_a_whole_chain() {
    let grid = Grid::new(13, 1);
    let bombs = vec![
        bomb(Pos::new(0, 0), 0, 2, 1),
        bomb(Pos::new(2, 0), 0, 2, 6),
        bomb(Pos::new(4, 0), 0, 2, 8),
    ];
    assert_eq!(synchronized_fuses(&grid, &bombs), vec![1, 1, 1]);
}

#[test]
fn walls_shield_everything_behind_them() {
    let mut world = open_world(7, 1);
    world.grid.set_tile(Pos::new(3, 0), Tile::Wall);
    world
        .grid
        .set_tile(Pos::new(4, 0), Tile::Box(BoxContent::Empty));
    world.boxes_remaining = 1;
    world.bombs.push(bomb(Pos::new(1, 0), 0, 5, 1));

    resolve_tick(&mut world);

    assert!(!world.grid.flame(Pos::new(3, 0)));
    assert!(!world.grid.flame(Pos::new(4, 0)));
    assert_eq!(world.grid.tile(Pos::new(4, 0)), Tile::Box(BoxContent::Empty));
    assert_eq!(world.boxes_remaining, 1);
}

#[test]
fn boxes_reveal_their_content_exactly_once() {
    let mut world = open_world(9, 1);
    world
        .grid
        .set_tile(Pos::new(2, 0), Tile::Box(BoxContent::Empty));
    world
        .grid
        .set_tile(Pos::new(6, 0), Tile::Box(BoxContent::RangeUp));
    world.boxes_remaining = 2;
    world.bombs.push(bomb(Pos::new(4, 0), 0, 2, 1));

    resolve_tick(&mut world);

    assert_eq!(world.grid.tile(Pos::new(2, 0)), Tile::Floor);
    assert_eq!(
        world.grid.tile(Pos::new(6, 0)),
        Tile::Item(ItemKind::RangeUp)
    );
    assert_eq!(world.boxes_remaining, 0);
    assert_eq!(world.boxes_destroyed, 2);
}

#[test]
fn bomb_box_drops_survive_the_blast_that_opened_them() {
    let mut world = open_world(5, 1);
    world
        .grid
        .set_tile(Pos::new(3, 0), Tile::Box(BoxContent::BombUp));
    world.boxes_remaining = 1;
    world.bombs.push(bomb(Pos::new(1, 0), 0, 4, 1));

    resolve_tick(&mut world);

    assert_eq!(world.grid.tile(Pos::new(3, 0)), Tile::Item(ItemKind::BombUp));
}

#[test]
fn ground_items_are_destroyed_and_stop_the_ray() {
    let mut world = open_world(7, 1);
    world
        .grid
        .set_tile(Pos::new(3, 0), Tile::Item(ItemKind::RangeUp));
    world
        .grid
        .set_tile(Pos::new(5, 0), Tile::Box(BoxContent::Empty));
    world.boxes_remaining = 1;
    world.bombs.push(bomb(Pos::new(1, 0), 0, 5, 1));

    resolve_tick(&mut world);

    assert_eq!(world.grid.tile(Pos::new(3, 0)), Tile::Floor);
    // the item absorbed the ray; the box behind it is untouched
    assert_eq!(world.grid.tile(Pos::new(5, 0)), Tile::Box(BoxContent::Empty));
    assert_eq!(world.boxes_remaining, 1);
}

#[test]
fn flame_on_the_agent_cell_is_terminal() {
    let mut world = open_world(5, 5);
    world.agents[0].pos = Pos::new(2, 2);
    world.bombs.push(bomb(Pos::new(2, 4), 0, 3, 1));

    resolve_tick(&mut world);

    assert!(!world.agents[0].alive);
    assert!(world.dead);
}

#[test]
fn opponent_deaths_do_not_mark_the_state_terminal() {
    let mut world = WorldSnapshot::new(
        Grid::new(7, 7),
        vec![agent(0, Pos::new(0, 0)), agent(1, Pos::new(3, 3))],
        0,
    );
    world.bombs.push(bomb(Pos::new(3, 5), 1, 3, 1));

    resolve_tick(&mut world);

    assert!(world.agents[0].alive);
    assert!(!world.agents[1].alive);
    assert!(!world.dead);
}

#[test]
fn boxes_destroyed_credits_the_detonating_owner() {
    let mut world = WorldSnapshot::new(
        Grid::new(9, 1),
        vec![agent(0, Pos::new(0, 0)), agent(1, Pos::new(8, 0))],
        0,
    );
    world
        .grid
        .set_tile(Pos::new(6, 0), Tile::Box(BoxContent::Empty));
    world.boxes_remaining = 1;
    world.bombs.push(bomb(Pos::new(4, 0), 1, 2, 1));

    resolve_tick(&mut world);

    assert_eq!(world.boxes_remaining, 0);
    assert_eq!(world.boxes_destroyed, 0);
}

#[test]
fn triggered_bombs_detonate_in_the_same_pass() {
    let mut world = open_world(9, 1);
    // seed bomb reaches the second; the second's own fuse is far off
    world.bombs.push(bomb(Pos::new(1, 0), 0, 3, 1));
    world.bombs.push(bomb(Pos::new(3, 0), 0, 3, 8));

    resolve_tick(&mut world);

    assert!(world.bombs.is_empty());
    // the chained bomb's flame reached past its own cell
    assert!(world.grid.flame(Pos::new(6, 0)));
}

#[test]
fn bombs_block_rays_from_other_bombs() {
    let mut world = open_world(9, 1);
    world.bombs.push(bomb(Pos::new(1, 0), 0, 6, 1));
    world.bombs.push(bomb(Pos::new(3, 0), 0, 1, 8));
    world
        .grid
        .set_tile(Pos::new(6, 0), Tile::Box(BoxContent::Empty));
    world.boxes_remaining = 1;

    resolve_tick(&mut world);

    // the first ray stopped at the chained bomb; the chained bomb's short
    // range does not reach the box either
    assert_eq!(world.grid.tile(Pos::new(6, 0)), Tile::Box(BoxContent::Empty));
    assert_eq!(world.boxes_remaining, 1);
}
