use bevy::prelude::*;
use widget_helpers::input::screen_to_world;

use crate::controller::{DragController, DragPhase};
use crate::layout::{RowLayout, TileLayout, TileSlot};

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct TileStyle {
    pub label_color: Color,
    pub label_size: f32,
    /// Outline drawn around the current drop target
    pub highlight_color: Color,
    pub highlight_width: f32,
    /// Depth of the floating copy, above every slot
    pub floating_depth: f32,
}

impl Default for TileStyle {
    fn default() -> Self {
        Self {
            label_color: Color::WHITE,
            label_size: 40.0,
            highlight_color: Color::BLACK,
            highlight_width: 6.0,
            floating_depth: 10.0,
        }
    }
}

#[derive(Component)]
pub struct TileLabel;

#[derive(Component)]
pub struct DropHighlight;

#[derive(Component)]
pub struct FloatingTile;

pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn label_bundle(text: String, style: &TileStyle) -> impl Bundle {
    (
        Text2d::new(text),
        TextFont {
            font_size: style.label_size,
            ..default()
        },
        TextColor(style.label_color),
        Transform::from_xyz(0.0, 0.0, 1.0),
        TileLabel,
    )
}

pub fn spawn_row(
    mut commands: Commands,
    controller: Res<DragController>,
    row: Res<RowLayout>,
    style: Res<TileStyle>,
) {
    let count = controller.tiles().len();
    let outline_size = row.tile_size + Vec2::splat(style.highlight_width * 2.0);

    for (index, tile) in controller.tiles().iter().enumerate() {
        commands
            .spawn((
                Sprite::from_color(tile.color, row.tile_size),
                Transform::from_translation(row.slot_center(index, count).extend(0.0)),
                TileSlot { index },
            ))
            .with_children(|parent| {
                parent.spawn(label_bundle(tile.id.to_string(), &style));
                parent.spawn((
                    Sprite::from_color(style.highlight_color, outline_size),
                    Transform::from_xyz(0.0, 0.0, -1.0),
                    Visibility::Hidden,
                    DropHighlight,
                ));
            });
    }

    info!("Spawned a row of {count} tiles");
}

/// Paints every slot with the tile it currently holds. The dragged tile's slot
/// goes fully transparent and the drop target gets its outline.
pub fn sync_slots(
    controller: Res<DragController>,
    style: Res<TileStyle>,
    mut slots: Query<(&TileSlot, &mut Sprite, &Children)>,
    mut labels: Query<(&mut Text2d, &mut TextColor), With<TileLabel>>,
    mut highlights: Query<&mut Visibility, With<DropHighlight>>,
) {
    let source_index = controller.session().map(|session| session.source_index());

    for (slot, mut sprite, children) in &mut slots {
        let Some(tile) = controller.tiles().get(slot.index) else {
            continue;
        };
        let alpha = if source_index == Some(slot.index) { 0.0 } else { 1.0 };
        let is_target = controller.drop_target() == Some(slot.index);

        sprite.color = tile.color.with_alpha(alpha);

        for &child in children.iter() {
            if let Ok((mut text, mut text_color)) = labels.get_mut(child) {
                text.0 = tile.id.to_string();
                text_color.0 = style.label_color.with_alpha(alpha);
            }
            if let Ok(mut visibility) = highlights.get_mut(child) {
                *visibility = if is_target {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
        }
    }
}

/// Spawns the copy that follows the pointer. It is despawned with the session.
pub fn spawn_floating_tile(
    mut commands: Commands,
    controller: Res<DragController>,
    row: Res<RowLayout>,
    style: Res<TileStyle>,
) {
    let Some(tile) = controller.dragged_tile() else {
        return;
    };

    commands
        .spawn((
            Sprite::from_color(tile.color, row.tile_size),
            Transform::from_xyz(0.0, 0.0, style.floating_depth),
            // Hidden until the first placement so it never flashes at the origin.
            Visibility::Hidden,
            FloatingTile,
            StateScoped(DragPhase::Dragging),
        ))
        .with_child(label_bundle(tile.id.to_string(), &style));
}

/// Places the floating copy so its top-left corner sits at the session's floating position.
pub fn place_floating_tile(
    camera: Query<(&Camera, &GlobalTransform)>,
    controller: Res<DragController>,
    layout: Res<TileLayout>,
    mut floating: Query<(&mut Transform, &mut Visibility), With<FloatingTile>>,
) {
    let (Some(session), Some(tile)) = (controller.session(), controller.dragged_tile()) else {
        return;
    };
    let Some(bounds) = layout.bounds(tile.id) else {
        return;
    };
    let screen_center = session.floating_position() + bounds.size() / 2.0;
    let Some(world_center) = screen_to_world(&camera, screen_center) else {
        return;
    };

    for (mut transform, mut visibility) in &mut floating {
        transform.translation.x = world_center.x;
        transform.translation.y = world_center.y;
        *visibility = Visibility::Inherited;
    }
}
