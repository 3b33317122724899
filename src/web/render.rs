// Canvas 2D drawing of the stage: stretched background, sprites in depth
// order, then the banner on top.

use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use super::loader::Images;
use crate::engine::Stage;

pub(super) fn draw(
    ctx: &CanvasRenderingContext2d,
    stage: &Stage,
    images: &Images,
) -> Result<(), JsValue> {
    let (w, h) = stage.viewport();
    let (w, h) = (w as f64, h as f64);
    ctx.set_global_alpha(1.0);
    ctx.clear_rect(0.0, 0.0, w, h);

    if let Some(img) = stage.background().and_then(|key| images.get(key)) {
        ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, w, h)?;
    }

    for (_, sprite) in stage.draw_order() {
        if !sprite.visible || sprite.alpha <= 0.0 {
            continue;
        }
        let Some(img) = images.get(&sprite.texture) else {
            continue;
        };
        let b = sprite.bounds();
        if b.width <= 0.0 || b.height <= 0.0 {
            continue;
        }
        ctx.set_global_alpha(sprite.alpha.min(1.0) as f64);
        ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            b.x as f64,
            b.y as f64,
            b.width as f64,
            b.height as f64,
        )?;
    }
    ctx.set_global_alpha(1.0);

    if let Some(banner) = stage.banner() {
        ctx.set_font(&format!("{}px sans-serif", banner.font_px));
        ctx.set_fill_style_str(&banner.color);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(&banner.text, banner.x as f64, banner.y as f64)?;
    }
    Ok(())
}
