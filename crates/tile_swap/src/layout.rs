// Where tiles are drawn and where they were last measured.
//
// Slots are laid out in world space, centered on the origin. Measurements are
// taken back in screen space (top-left origin, y down) so they can be compared
// directly with cursor positions.

use std::collections::HashMap;

use bevy::prelude::*;
use widget_helpers::input::world_to_screen;

use crate::controller::DragController;
use crate::tile::{Tile, TileId};

/// Visual position `index` in the row. Which tile it shows comes from the
/// controller's current order.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSlot {
    pub index: usize,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    /// Size of each tile in world units
    pub tile_size: Vec2,
    /// Horizontal space between two neighbouring tiles
    pub gap: f32,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            tile_size: Vec2::new(100.0, 100.0),
            gap: 10.0,
        }
    }
}

impl RowLayout {
    pub fn row_width(&self, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        let count = count as f32;
        self.tile_size.x.mul_add(count, self.gap * (count - 1.0))
    }

    /// World-space center of slot `index` in a row of `count` tiles.
    pub fn slot_center(&self, index: usize, count: usize) -> Vec2 {
        let left = -self.row_width(count) / 2.0;
        let x = (self.tile_size.x + self.gap).mul_add(index as f32, left + self.tile_size.x / 2.0);
        Vec2::new(x, 0.0)
    }
}

/// Closed screen-space bounding boxes keyed by tile id.
///
/// Keyed by identity rather than position so a measurement can never be
/// attributed to whichever tile happens to occupy a slot later.
#[derive(Resource, Debug, Clone, Default)]
pub struct TileLayout {
    bounds: HashMap<TileId, Rect>,
}

impl TileLayout {
    pub fn bounds(&self, id: TileId) -> Option<Rect> {
        self.bounds.get(&id).copied()
    }

    pub fn insert(&mut self, id: TileId, bounds: Rect) {
        self.bounds.insert(id, bounds);
    }

    pub fn clear(&mut self) {
        self.bounds.clear();
    }

    /// Index of the tile whose box contains `point`. Edges count as inside and
    /// the last tile in row order wins when boxes overlap.
    pub fn tile_at(&self, tiles: &[Tile], point: Vec2) -> Option<usize> {
        let mut found = None;
        for (index, tile) in tiles.iter().enumerate() {
            if self.bounds(tile.id).is_some_and(|bounds| bounds.contains(point)) {
                found = Some(index);
            }
        }
        found
    }
}

/// Re-measures every slot from its rendered sprite.
pub fn measure_tiles(
    camera: Query<(&Camera, &GlobalTransform)>,
    controller: Res<DragController>,
    slots: Query<(&TileSlot, &GlobalTransform, &Sprite)>,
    mut layout: ResMut<TileLayout>,
) {
    layout.clear();

    for (slot, transform, sprite) in &slots {
        let Some(tile) = controller.tiles().get(slot.index) else {
            continue;
        };
        let half_size = sprite.custom_size.unwrap_or(Vec2::ONE) / 2.0;
        let center = transform.translation().truncate();

        let top_left = world_to_screen(&camera, center + Vec2::new(-half_size.x, half_size.y));
        let bottom_right = world_to_screen(&camera, center + Vec2::new(half_size.x, -half_size.y));
        let (Some(top_left), Some(bottom_right)) = (top_left, bottom_right) else {
            continue;
        };

        layout.insert(tile.id, Rect::from_corners(top_left, bottom_right));
    }
}
