use slide_core::{CropRect, PixelBuffer, Puzzle, Slot, TileSet, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, ImageData};

// Non-deprecated helper to set the stroke style via property assignment.
pub fn set_stroke_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(color),
    );
}

pub fn init_canvas(
    document: &Document,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let cv = document
        .get_element_by_id("cv")
        .ok_or_else(|| JsValue::from_str("canvas #cv not found"))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = cv
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((cv, ctx))
}

pub fn clear(ctx: &CanvasRenderingContext2d, cv: &HtmlCanvasElement) {
    ctx.clear_rect(0.0, 0.0, cv.width() as f64, cv.height() as f64);
}

/// Draw the uploaded image where the viewport currently places it.
pub fn draw_preview(
    ctx: &CanvasRenderingContext2d,
    cv: &HtmlCanvasElement,
    image: &HtmlImageElement,
    viewport: &Viewport,
) -> Result<(), JsValue> {
    clear(ctx, cv);
    let r = viewport.drawn_rect();
    ctx.draw_image_with_html_image_element_and_dw_and_dh(image, r.x, r.y, r.width, r.height)
}

/// Read back a region of the canvas as the puzzle's source picture.
pub fn read_pixels(ctx: &CanvasRenderingContext2d, crop: CropRect) -> Result<PixelBuffer, JsValue> {
    let data = ctx.get_image_data(
        crop.x as f64,
        crop.y as f64,
        crop.width as f64,
        crop.height as f64,
    )?;
    PixelBuffer::new(data.width(), data.height(), data.data().0)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Upload every tile once so redraws are plain `putImageData` calls.
pub fn tile_images(tiles: &TileSet) -> Result<Vec<ImageData>, JsValue> {
    tiles
        .tiles()
        .iter()
        .map(|t| ImageData::new_with_u8_clamped_array_and_sh(Clamped(t.data()), t.width(), t.height()))
        .collect()
}

/// Draw the board: each tile in its current slot, then the grid lines.
/// A solved board also gets the missing tile back.
pub fn render(
    ctx: &CanvasRenderingContext2d,
    cv: &HtmlCanvasElement,
    puzzle: &Puzzle,
    tiles: &[ImageData],
    grid_color: &str,
) -> Result<(), JsValue> {
    let width = cv.width() as f64;
    let height = cv.height() as f64;
    let grid = puzzle.grid();
    let n = grid.size() as f64;
    ctx.clear_rect(0.0, 0.0, width, height);

    for (i, slot) in puzzle.arrangement().slots().iter().enumerate() {
        let tile = match slot {
            Slot::Tile(id) => id.index(),
            Slot::Empty if puzzle.is_solved() => i,
            Slot::Empty => continue,
        };
        let Some(img) = tiles.get(tile) else {
            continue;
        };
        let (x, y) = grid.index_to_xy(i);
        ctx.put_image_data(img, x as f64 * (width / n), y as f64 * (height / n))?;
    }

    draw_grid(ctx, grid.size(), width, height, grid_color);
    Ok(())
}

fn draw_grid(ctx: &CanvasRenderingContext2d, size: usize, width: f64, height: f64, color: &str) {
    set_stroke_style(ctx, color);
    ctx.set_line_width(1.0);
    let n = size as f64;
    // 0..=n so the outer border is drawn too
    for i in 0..=size {
        let t = i as f64;
        ctx.begin_path();
        ctx.move_to(0.0, height / n * t);
        ctx.line_to(width, height / n * t);
        ctx.stroke();
        ctx.begin_path();
        ctx.move_to(width / n * t, 0.0);
        ctx.line_to(width / n * t, height);
        ctx.stroke();
    }
}
