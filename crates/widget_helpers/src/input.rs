// Pointer helpers working in screen space.
//
// Positions are logical window pixels with the origin at the top-left corner
// and y growing downwards, the same frame a browser reports `clientX`/`clientY` in.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Button that drives pointer interactions.
pub const POINTER_BUTTON: MouseButton = MouseButton::Left;

pub fn cursor_screen_position(windows: &Query<&Window, With<PrimaryWindow>>) -> Option<Vec2> {
    windows.get_single().ok()?.cursor_position()
}

pub fn just_pressed_screen_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    windows: &Query<&Window, With<PrimaryWindow>>,
) -> Option<Vec2> {
    if button_input.just_pressed(POINTER_BUTTON) {
        cursor_screen_position(windows)
    } else {
        None
    }
}

// The release must be observed even when the cursor has left the window,
// so no position is attached to it.
pub fn just_released(button_input: &Res<ButtonInput<MouseButton>>) -> bool {
    button_input.just_released(POINTER_BUTTON)
}

/// Converts a screen-space point to the 2D world position under it.
pub fn screen_to_world(
    camera: &Query<(&Camera, &GlobalTransform)>,
    position: Vec2,
) -> Option<Vec2> {
    let (camera, camera_transform) = camera.get_single().ok()?;

    camera
        .viewport_to_world_2d(camera_transform, position)
        .ok()
}

/// Converts a 2D world position to screen space.
pub fn world_to_screen(
    camera: &Query<(&Camera, &GlobalTransform)>,
    position: Vec2,
) -> Option<Vec2> {
    let (camera, camera_transform) = camera.get_single().ok()?;

    camera
        .world_to_viewport(camera_transform, position.extend(0.0))
        .ok()
}
