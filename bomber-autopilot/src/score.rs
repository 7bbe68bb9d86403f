//! State evaluation. Weights are tuning knobs, not structural contracts.

use serde::{Deserialize, Serialize};

use bomber_core::{Pos, Tile, WorldSnapshot};

/// Normalizer for the power-up term; collecting this many items saturates
/// the reward.
const ITEM_SATURATION: f64 = 8.0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Weights {
    pub box_weight: f64,
    pub item_weight: f64,
    pub approach_weight: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            box_weight: 1.0,
            item_weight: 0.35,
            approach_weight: 0.12,
        }
    }
}

/// Score a resulting state: normalized destroyed boxes, normalized
/// collected power-ups, and a nearest-box approach term that keeps
/// movement purposeful when nothing is exploding. Death dominates
/// everything.
pub fn score(world: &WorldSnapshot, weights: &Weights) -> f64 {
    if world.dead {
        return f64::NEG_INFINITY;
    }

    let total_boxes = world.boxes_destroyed + world.boxes_remaining;
    let box_term = if total_boxes > 0 {
        world.boxes_destroyed as f64 / total_boxes as f64
    } else {
        0.0
    };

    let item_term = (world.items_collected as f64 / ITEM_SATURATION).min(1.0);

    let approach_term = nearest_box_distance(world)
        .map(|dist| 1.0 / (1.0 + dist as f64))
        .unwrap_or(0.0);

    weights.box_weight * box_term
        + weights.item_weight * item_term
        + weights.approach_weight * approach_term
}

fn nearest_box_distance(world: &WorldSnapshot) -> Option<u32> {
    let me = world.my_agent().pos;
    world
        .grid
        .cells()
        .filter(|pos| matches!(world.grid.tile(*pos), Tile::Box(_)))
        .map(|pos| Pos::manhattan(me, pos))
        .min()
}
