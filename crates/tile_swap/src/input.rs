use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};
use widget_helpers::input::{just_pressed_screen_position, just_released};

use crate::controller::{DragController, DragPhase, SwapCommit};
use crate::layout::TileLayout;

/// Sent every time a drop reorders the row.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilesSwapped(pub SwapCommit);

/// Starts a session when the pointer goes down on a tile. Runs only while idle.
pub fn grab_tile_on_press(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    layout: Res<TileLayout>,
    mut controller: ResMut<DragController>,
    mut next_phase: ResMut<NextState<DragPhase>>,
) {
    let Some(pointer) = just_pressed_screen_position(&buttons, &windows) else {
        return;
    };
    let Some(index) = layout.tile_at(controller.tiles(), pointer) else {
        return;
    };

    if let Err(err) = controller.begin_drag(index, pointer, &layout) {
        warn!("Drag not started: {err}");
        return;
    }

    // A click shorter than a frame never reaches the release system.
    if just_released(&buttons) {
        debug!("Tile at {index} clicked without dragging");
        controller.end_drag();
        return;
    }

    debug!("Grabbed tile at {index} with pointer at {pointer}");
    next_phase.set(DragPhase::Dragging);
}

/// Feeds every pointer move of the frame to the controller, in delivery order.
///
/// Moves buffered just before the session started all precede the latest
/// cursor position, so replaying them leaves the same end state.
pub fn follow_pointer(
    mut moves: EventReader<CursorMoved>,
    layout: Res<TileLayout>,
    mut controller: ResMut<DragController>,
) {
    for cursor in moves.read() {
        controller.update_drag(cursor.position, &layout);
    }
}

/// Ends the session on release, committing a swap when there is a drop target.
pub fn drop_tile_on_release(
    buttons: Res<ButtonInput<MouseButton>>,
    mut controller: ResMut<DragController>,
    mut next_phase: ResMut<NextState<DragPhase>>,
    mut swapped: EventWriter<TilesSwapped>,
) {
    if !just_released(&buttons) {
        return;
    }

    match controller.end_drag() {
        Some(commit) => {
            info!(
                "Swapped tile {} (slot {}) with tile {} (slot {})",
                commit.source_id, commit.source_index, commit.target_id, commit.target_index
            );
            swapped.send(TilesSwapped(commit));
        }
        None => debug!("Released without a drop target"),
    }

    next_phase.set(DragPhase::Idle);
}
