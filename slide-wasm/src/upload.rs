use std::cell::RefCell;
use std::rc::Rc;

use slide_core::{CanvasSize, Stage, Viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Event, File, FileReader, HtmlElement, HtmlImageElement, HtmlInputElement};

use crate::state::State;
use crate::{canvas, stages, utils};

// Wires up the upload button and the hidden file input behind it.
pub fn attach_file_input(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc: Document = state.borrow().document.clone();
    let Some(input) = doc.get_element_by_id("imageFile") else {
        log::warn!("file input #imageFile not found, uploads disabled");
        return Ok(());
    };
    let input: HtmlInputElement = input.dyn_into()?;

    if let Some(btn) = doc.get_element_by_id("upload") {
        let btn: HtmlElement = btn.dyn_into()?;
        let input_for_click = input.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            input_for_click.click();
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    let st = state.clone();
    let input_for_closure = input.clone();
    let onchange = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_e: Event| {
        let Some(files) = input_for_closure.files() else {
            log::warn!("no file list on input");
            return;
        };
        let window = st.borrow().window.clone();
        if files.length() != 1 {
            utils::alert(&window, "Error: Expected exactly 1 file");
            return;
        }
        let Some(file) = files.item(0) else {
            return;
        };
        if !file.type_().starts_with("image/") {
            utils::alert(&window, "Error: Expected an image file");
            return;
        }
        if let Err(e) = read_image(st.clone(), file) {
            log::error!("failed to read file: {e:?}");
        }
    }));
    input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
    onchange.forget();
    Ok(())
}

fn read_image(state: Rc<RefCell<State>>, file: File) -> Result<(), JsValue> {
    let reader = FileReader::new()?;
    // Clone the FileReader for use inside the onload closure
    let reader_for_closure = reader.clone();
    let name = file.name();
    let onload = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_ev: Event| {
        let url = match reader_for_closure.result() {
            Ok(v) => v.as_string().unwrap_or_default(),
            Err(e) => {
                log::error!("reading {name} failed: {e:?}");
                return;
            }
        };
        if url.is_empty() {
            log::warn!("{name} is empty or unreadable");
            return;
        }
        let st = state.clone();
        let name = name.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match decode_image(&url).await {
                Ok(img) => {
                    if let Err(e) = image_loaded(&st, img) {
                        log::error!("could not show {name}: {e:?}");
                    }
                }
                Err(e) => {
                    log::error!("could not decode {name}: {e:?}");
                    utils::alert(&st.borrow().window, "Error: Could not load that image");
                }
            }
        });
    }));
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.read_as_data_url(&file)?;
    onload.forget();
    Ok(())
}

async fn decode_image(url: &str) -> Result<HtmlImageElement, JsValue> {
    let img = HtmlImageElement::new()?;
    img.set_src(url);
    JsFuture::from(img.decode()).await?;
    Ok(img)
}

/// Keep the new image, fit it to the canvas and show it on the upload step.
fn image_loaded(st: &Rc<RefCell<State>>, img: HtmlImageElement) -> Result<(), JsValue> {
    {
        let mut s = st.borrow_mut();
        log::info!("loaded {}x{} image", img.natural_width(), img.natural_height());
        s.reset_canvas_size();
        let canvas_size = CanvasSize::from((s.canvas.width() as f64, s.canvas.height() as f64));
        let image_size = CanvasSize::from((img.natural_width() as f64, img.natural_height() as f64));
        s.viewport = Some(Viewport::fit(image_size, canvas_size));
        s.image = Some(img);
    }
    stages::go(st, Stage::ImageUpload)
}

/// Redraw the image preview for the upload and resize steps.
pub fn draw_preview(s: &State) -> Result<(), JsValue> {
    match (&s.image, &s.viewport) {
        (Some(img), Some(vp)) => canvas::draw_preview(&s.ctx, &s.canvas, img, vp),
        _ => {
            canvas::clear(&s.ctx, &s.canvas);
            Ok(())
        }
    }
}
