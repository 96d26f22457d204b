// Boots the widget inside the page's canvas.

use wasm_bindgen::prelude::*;
use web_sys::console;

pub(crate) fn main_wasm() -> Result<(), JsValue> {
    let Some(window) = web_sys::window() else {
        return Err(JsValue::from_str("tile_swap needs a browser window"));
    };
    let location = window.location().href().unwrap_or_default();

    console::log_1(&format!("Starting tile_swap on {location}").into());
    tile_swap::run();
    Ok(())
}
