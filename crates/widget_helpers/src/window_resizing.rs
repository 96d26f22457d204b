// Largest surface extent WebGL2 guarantees; configuring a bigger one panics in wgpu.
#[cfg(target_arch = "wasm32")]
const MAX_SURFACE_EXTENT: f32 = 2048.0;

// Keeps the primary window matched to the browser viewport so the tile row
// stays centered when the page is resized.
#[cfg(target_arch = "wasm32")]
pub fn handle_browser_resize(
    mut primary_query: bevy::ecs::system::Query<
        &mut bevy::window::Window,
        bevy::ecs::query::With<bevy::window::PrimaryWindow>,
    >,
) {
    let Some(browser_window) = web_sys::window() else {
        return;
    };
    let (Ok(inner_width), Ok(inner_height)) =
        (browser_window.inner_width(), browser_window.inner_height())
    else {
        return;
    };
    let (Some(width), Some(height)) = (inner_width.as_f64(), inner_height.as_f64()) else {
        return;
    };

    let width = (width as f32).min(MAX_SURFACE_EXTENT);
    let height = (height as f32).min(MAX_SURFACE_EXTENT);

    for mut window in &mut primary_query {
        let resolution = &window.resolution;
        if (resolution.width() - width).abs() > f32::EPSILON
            || (resolution.height() - height).abs() > f32::EPSILON
        {
            bevy::log::debug!("Resizing canvas to {width}x{height}");
            window.resolution.set(width, height);
        }
    }
}
