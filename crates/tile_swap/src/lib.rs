pub mod controller;
pub mod input;
pub mod layout;
pub mod render;
pub mod tile;

use bevy::prelude::*;
use controller::{DragController, DragPhase};
use input::{TilesSwapped, drop_tile_on_release, follow_pointer, grab_tile_on_press};
use layout::{RowLayout, TileLayout, measure_tiles};
use render::{
    TileStyle, place_floating_tile, setup_camera, spawn_floating_tile, spawn_row, sync_slots,
};
use tile::initial_tiles;

#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
enum TileSwapSet {
    Measure,
    Input,
    Render,
}

/// A row of colored tiles that can be swapped by dragging one onto another.
pub struct TileSwapPlugin;

impl Plugin for TileSwapPlugin {
    fn build(&self, app: &mut App) {
        let controller = match initial_tiles() {
            Ok(tiles) => DragController::new(tiles),
            Err(err) => {
                error!("Could not build the initial row: {err}");
                DragController::default()
            }
        };

        app.insert_resource(controller)
            .init_resource::<TileLayout>()
            .init_resource::<RowLayout>()
            .init_resource::<TileStyle>()
            .init_state::<DragPhase>()
            .enable_state_scoped_entities::<DragPhase>()
            .add_event::<TilesSwapped>()
            .configure_sets(
                Update,
                (
                    TileSwapSet::Measure,
                    TileSwapSet::Input,
                    TileSwapSet::Render,
                )
                    .chain(),
            )
            .add_systems(Startup, (setup_camera, spawn_row))
            .add_systems(Update, measure_tiles.in_set(TileSwapSet::Measure))
            .add_systems(
                Update,
                (
                    grab_tile_on_press.run_if(in_state(DragPhase::Idle)),
                    // Only listen to moves and releases while a session exists.
                    (follow_pointer, drop_tile_on_release)
                        .chain()
                        .run_if(in_state(DragPhase::Dragging)),
                )
                    .chain()
                    .in_set(TileSwapSet::Input),
            )
            .add_systems(OnEnter(DragPhase::Dragging), spawn_floating_tile)
            .add_systems(
                Update,
                (
                    sync_slots.run_if(resource_changed::<DragController>),
                    place_floating_tile.run_if(in_state(DragPhase::Dragging)),
                )
                    .in_set(TileSwapSet::Render),
            );
    }
}

pub fn run() {
    widget_helpers::get_default_app(env!("CARGO_PKG_NAME"))
        .add_plugins(TileSwapPlugin)
        .run();
}
