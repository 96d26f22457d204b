// Drag-and-drop state machine: Idle -> Dragging on begin_drag, Dragging on every
// update_drag, back to Idle on end_drag. Tiles are only ever reordered by swapping two.

use bevy::prelude::*;
use thiserror::Error;

use crate::layout::TileLayout;
use crate::tile::{Tile, TileId};

#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragError {
    #[error("No tile at index {index}, the row has {len} tiles")]
    UnknownTile { index: usize, len: usize },

    #[error("Tile {0} has not been measured")]
    MissingMeasurement(TileId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    source_index: usize,
    grab_offset: Vec2,
    floating_position: Vec2,
}

impl DragSession {
    pub const fn source_index(&self) -> usize {
        self.source_index
    }

    /// Pointer position relative to the dragged tile's top-left corner at grab time.
    pub const fn grab_offset(&self) -> Vec2 {
        self.grab_offset
    }

    /// Top-left corner of the floating copy, in screen space.
    pub const fn floating_position(&self) -> Vec2 {
        self.floating_position
    }
}

/// A swap committed when a drag ended over another tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapCommit {
    pub source_index: usize,
    pub target_index: usize,
    pub source_id: TileId,
    pub target_id: TileId,
}

#[derive(Resource, Debug, Default)]
pub struct DragController {
    tiles: Vec<Tile>,
    session: Option<DragSession>,
    drop_target: Option<usize>,
}

impl DragController {
    pub const fn new(tiles: Vec<Tile>) -> Self {
        Self {
            tiles,
            session: None,
            drop_target: None,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub const fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub const fn drop_target(&self) -> Option<usize> {
        self.drop_target
    }

    pub const fn phase(&self) -> DragPhase {
        if self.session.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn dragged_tile(&self) -> Option<&Tile> {
        self.tiles.get(self.session?.source_index)
    }

    fn tile(&self, index: usize) -> Result<&Tile, DragError> {
        self.tiles.get(index).ok_or(DragError::UnknownTile {
            index,
            len: self.tiles.len(),
        })
    }

    /// Grabs the tile at `tile_index` with the pointer at `pointer`.
    ///
    /// Nothing changes when the tile does not exist or has not been measured.
    /// An already running session is replaced.
    pub fn begin_drag(
        &mut self,
        tile_index: usize,
        pointer: Vec2,
        layout: &TileLayout,
    ) -> Result<(), DragError> {
        let tile = self.tile(tile_index)?;
        let bounds = layout
            .bounds(tile.id)
            .ok_or(DragError::MissingMeasurement(tile.id))?;

        if let Some(previous) = self.session {
            debug!(
                "Replacing drag of tile at {} with tile at {tile_index}",
                previous.source_index
            );
        }

        let top_left = bounds.min;
        self.session = Some(DragSession {
            source_index: tile_index,
            grab_offset: pointer - top_left,
            floating_position: top_left,
        });
        self.drop_target = None;

        Ok(())
    }

    /// Moves the floating copy under the pointer and finds the tile below it.
    pub fn update_drag(&mut self, pointer: Vec2, layout: &TileLayout) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        // Recomputed from the grab offset every time, never accumulated.
        session.floating_position = pointer - session.grab_offset;
        let source_index = session.source_index;

        let mut target = None;
        for (index, tile) in self.tiles.iter().enumerate() {
            if index == source_index {
                continue;
            }
            // Unmeasured tiles are skipped, the rest of the scan still runs.
            let Some(bounds) = layout.bounds(tile.id) else {
                continue;
            };
            if bounds.contains(pointer) {
                target = Some(index);
            }
        }
        self.drop_target = target;
    }

    /// Ends the session, swapping the dragged tile with the drop target if there is one.
    pub fn end_drag(&mut self) -> Option<SwapCommit> {
        let session = self.session.take()?;
        let target_index = self.drop_target.take()?;
        if target_index == session.source_index {
            return None;
        }

        let commit = SwapCommit {
            source_index: session.source_index,
            target_index,
            source_id: self.tile(session.source_index).ok()?.id,
            target_id: self.tile(target_index).ok()?.id,
        };
        self.swap(commit.source_index, commit.target_index).ok()?;

        Some(commit)
    }

    /// Exchanges the tiles at `a` and `b`. Every other tile keeps its slot.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), DragError> {
        self.tile(a)?;
        self.tile(b)?;
        self.tiles.swap(a, b);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE_SIZE: f32 = 100.0;
    const PITCH: f32 = 110.0;

    fn row() -> DragController {
        let tiles = ["#aa0000", "#00aa00", "#0000aa", "#aaaa00", "#00aaaa"]
            .iter()
            .zip(1..)
            .map(|(hex, id)| Tile::from_hex(TileId(id), hex).expect("valid hex"))
            .collect();
        DragController::new(tiles)
    }

    // Slot `i` spans x in [i * PITCH, i * PITCH + TILE_SIZE], y in [0, TILE_SIZE].
    fn slot_bounds(index: usize) -> Rect {
        let left = index as f32 * PITCH;
        Rect::new(left, 0.0, left + TILE_SIZE, TILE_SIZE)
    }

    fn measured(controller: &DragController) -> TileLayout {
        let mut layout = TileLayout::default();
        for (index, tile) in controller.tiles().iter().enumerate() {
            layout.insert(tile.id, slot_bounds(index));
        }
        layout
    }

    fn center(index: usize) -> Vec2 {
        slot_bounds(index).center()
    }

    fn ids(controller: &DragController) -> Vec<u32> {
        controller.tiles().iter().map(|tile| tile.id.0).collect()
    }

    #[test]
    fn drag_onto_another_tile_swaps_them() {
        let mut controller = row();
        let layout = measured(&controller);

        controller
            .begin_drag(0, slot_bounds(0).min + Vec2::new(5.0, 5.0), &layout)
            .expect("tile 0 is measured");
        controller.update_drag(center(2), &layout);
        assert_eq!(controller.drop_target(), Some(2), "pointer is over C");

        let commit = controller.end_drag().expect("drop over C commits");
        assert_eq!(ids(&controller), vec![3, 2, 1, 4, 5], "A and C traded places");
        assert_eq!(commit.source_id, TileId(1), "A was dragged");
        assert_eq!(commit.target_id, TileId(3), "C was the target");
        assert_eq!(controller.phase(), DragPhase::Idle, "session is over");
        assert_eq!(controller.drop_target(), None, "target is cleared");
    }

    #[test]
    fn drop_outside_every_tile_changes_nothing() {
        let mut controller = row();
        let layout = measured(&controller);

        controller
            .begin_drag(1, center(1), &layout)
            .expect("tile 1 is measured");
        controller.update_drag(Vec2::new(-500.0, 500.0), &layout);

        assert_eq!(controller.drop_target(), None, "nothing under the pointer");
        assert_eq!(controller.end_drag(), None, "no commit");
        assert_eq!(ids(&controller), vec![1, 2, 3, 4, 5], "order unchanged");
        assert!(!controller.is_dragging(), "session is over");
    }

    #[test]
    fn dragged_tile_is_never_its_own_target() {
        let mut controller = row();
        let layout = measured(&controller);

        controller
            .begin_drag(0, center(0), &layout)
            .expect("tile 0 is measured");
        for point in [slot_bounds(0).min, center(0), slot_bounds(0).max] {
            controller.update_drag(point, &layout);
            assert_eq!(controller.drop_target(), None, "own slot is excluded");
        }

        assert_eq!(controller.end_drag(), None, "no commit");
        assert_eq!(ids(&controller), vec![1, 2, 3, 4, 5], "order unchanged");
    }

    #[test]
    fn floating_position_follows_grab_offset_exactly() {
        let mut controller = row();
        let layout = measured(&controller);
        let grab = slot_bounds(3).min + Vec2::new(12.5, 40.0);

        controller
            .begin_drag(3, grab, &layout)
            .expect("tile 3 is measured");
        let session = *controller.session().expect("dragging");
        assert_eq!(session.grab_offset(), Vec2::new(12.5, 40.0), "offset from top-left");
        assert_eq!(session.floating_position(), slot_bounds(3).min, "starts in its slot");

        for pointer in [
            Vec2::new(0.0, 0.0),
            Vec2::new(1000.0, -250.0),
            Vec2::new(333.3, 77.7),
        ] {
            controller.update_drag(pointer, &layout);
            let session = controller.session().expect("still dragging");
            assert_eq!(session.grab_offset(), Vec2::new(12.5, 40.0), "offset is constant");
            assert_eq!(
                session.floating_position(),
                pointer - Vec2::new(12.5, 40.0),
                "position is pointer minus offset"
            );
        }
    }

    #[test]
    fn target_boundaries_are_inclusive() {
        let mut controller = row();
        let layout = measured(&controller);

        controller
            .begin_drag(0, center(0), &layout)
            .expect("tile 0 is measured");

        let target = slot_bounds(1);
        for corner in [
            target.min,
            target.max,
            Vec2::new(target.min.x, target.max.y),
            Vec2::new(target.max.x, target.min.y),
        ] {
            controller.update_drag(corner, &layout);
            assert_eq!(controller.drop_target(), Some(1), "corner {corner} hits");
        }

        controller.update_drag(Vec2::new(target.max.x + 0.5, target.min.y), &layout);
        assert_eq!(controller.drop_target(), None, "just outside misses");
    }

    #[test]
    fn last_overlapping_tile_wins() {
        let mut controller = row();
        let mut layout = measured(&controller);
        // Stack tiles 2 and 4 on top of tile 1.
        layout.insert(TileId(3), slot_bounds(1));
        layout.insert(TileId(5), slot_bounds(1));

        controller
            .begin_drag(0, center(0), &layout)
            .expect("tile 0 is measured");
        controller.update_drag(center(1), &layout);

        assert_eq!(controller.drop_target(), Some(4), "last in row order wins");
    }

    #[test]
    fn target_follows_the_pointer() {
        let mut controller = row();
        let layout = measured(&controller);

        controller
            .begin_drag(2, center(2), &layout)
            .expect("tile 2 is measured");
        controller.update_drag(center(4), &layout);
        assert_eq!(controller.drop_target(), Some(4), "over E");
        controller.update_drag(Vec2::new(-50.0, -50.0), &layout);
        assert_eq!(controller.drop_target(), None, "left every tile");
        controller.update_drag(center(1), &layout);
        assert_eq!(controller.drop_target(), Some(1), "over B");

        controller.end_drag().expect("drop over B commits");
        assert_eq!(ids(&controller), vec![1, 3, 2, 4, 5], "B and C traded places");
    }

    #[test]
    fn unmeasured_tile_cannot_be_grabbed() {
        let mut controller = row();
        let mut layout = measured(&controller);
        layout.clear();
        layout.insert(TileId(2), slot_bounds(1));

        assert_eq!(
            controller.begin_drag(0, center(0), &layout),
            Err(DragError::MissingMeasurement(TileId(1))),
            "tile 1 has no bounds"
        );
        assert!(controller.session().is_none(), "no session was created");
    }

    #[test]
    fn unmeasured_tiles_are_skipped_while_dragging() {
        let mut controller = row();
        let full = measured(&controller);
        let mut partial = TileLayout::default();
        partial.insert(TileId(1), slot_bounds(0));
        partial.insert(TileId(4), slot_bounds(3));

        controller
            .begin_drag(0, center(0), &full)
            .expect("tile 0 is measured");
        controller.update_drag(center(2), &partial);
        assert_eq!(controller.drop_target(), None, "C has no bounds");
        controller.update_drag(center(3), &partial);
        assert_eq!(controller.drop_target(), Some(3), "D is still found");
    }

    #[test]
    fn unknown_tile_cannot_be_grabbed() {
        let mut controller = row();
        let layout = measured(&controller);

        assert_eq!(
            controller.begin_drag(5, Vec2::ZERO, &layout),
            Err(DragError::UnknownTile { index: 5, len: 5 }),
            "index past the end"
        );
        assert_eq!(controller.phase(), DragPhase::Idle, "still idle");
    }

    #[test]
    fn second_grab_replaces_the_session() {
        let mut controller = row();
        let layout = measured(&controller);

        controller
            .begin_drag(0, center(0), &layout)
            .expect("tile 0 is measured");
        controller.update_drag(center(1), &layout);
        assert_eq!(controller.drop_target(), Some(1), "over B");

        controller
            .begin_drag(4, center(4), &layout)
            .expect("tile 4 is measured");
        let session = controller.session().expect("dragging");
        assert_eq!(session.source_index(), 4, "new source");
        assert_eq!(controller.drop_target(), None, "old target dropped");
        assert_eq!(
            controller.dragged_tile().map(|tile| tile.id),
            Some(TileId(5)),
            "E is in hand"
        );
    }

    #[test]
    fn update_without_session_is_ignored() {
        let mut controller = row();
        let layout = measured(&controller);

        controller.update_drag(center(1), &layout);

        assert!(controller.session().is_none(), "no session appears");
        assert_eq!(controller.drop_target(), None, "no target without a session");
    }

    #[test]
    fn release_without_session_is_a_no_op() {
        let mut controller = row();

        assert_eq!(controller.end_drag(), None, "nothing to commit");
        assert_eq!(ids(&controller), vec![1, 2, 3, 4, 5], "order unchanged");
    }

    #[test]
    fn swap_only_touches_the_two_slots() {
        for (a, b) in [(0, 4), (1, 3), (4, 2), (2, 2)] {
            let mut controller = row();
            let before = ids(&controller);

            controller.swap(a, b).expect("indices are in range");
            let after = ids(&controller);

            for index in 0..before.len() {
                let expected = if index == a {
                    before.get(b)
                } else if index == b {
                    before.get(a)
                } else {
                    before.get(index)
                };
                assert_eq!(after.get(index), expected, "slot {index} after swapping {a} and {b}");
            }
        }
    }

    #[test]
    fn swap_is_its_own_inverse() {
        let mut controller = row();

        controller.swap(1, 3).expect("in range");
        controller.swap(1, 3).expect("in range");

        assert_eq!(ids(&controller), vec![1, 2, 3, 4, 5], "back to the start");
    }

    #[test]
    fn swap_out_of_range_leaves_order_alone() {
        let mut controller = row();

        assert_eq!(
            controller.swap(0, 9),
            Err(DragError::UnknownTile { index: 9, len: 5 }),
            "index past the end"
        );
        assert_eq!(ids(&controller), vec![1, 2, 3, 4, 5], "order unchanged");
    }
}
