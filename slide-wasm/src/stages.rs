use std::cell::RefCell;
use std::rc::Rc;

use slide_core::{CanvasSize, Stage, Viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, HtmlInputElement};

use crate::listeners::Listeners;
use crate::state::State;
use crate::{play, upload, utils};

/// Leave the current step and enter `stage`. Starting the puzzle can fail
/// (nothing of the image left on the canvas); the player then stays on the
/// resize step.
pub fn go(st: &Rc<RefCell<State>>, stage: Stage) -> Result<(), JsValue> {
    {
        let mut s = st.borrow_mut();
        // detaches the previous step's canvas handlers
        s.canvas_listeners = None;
        s.view = None;
    }
    let entered = match stage {
        Stage::ImageUpload => {
            enter_upload(st)?;
            Stage::ImageUpload
        }
        Stage::ImageResize => {
            enter_resize(st)?;
            Stage::ImageResize
        }
        Stage::Puzzle => match play::enter(st) {
            Ok(()) => Stage::Puzzle,
            Err(e) => {
                log::error!("could not start the puzzle: {e:?}");
                let msg = e.as_string().unwrap_or_else(|| "could not cut the image".to_string());
                utils::alert(&st.borrow().window, &format!("Error: {msg}"));
                st.borrow_mut().view = None;
                enter_resize(st)?;
                Stage::ImageResize
            }
        },
    };
    let mut s = st.borrow_mut();
    s.stage = entered;
    update_controls(&s);
    Ok(())
}

fn enter_upload(st: &Rc<RefCell<State>>) -> Result<(), JsValue> {
    let s = &mut *st.borrow_mut();
    s.reset_canvas_size();
    // the upload step always shows the image fitted, whatever was done to it later
    if let Some(img) = &s.image {
        let canvas_size = CanvasSize::from((s.canvas.width() as f64, s.canvas.height() as f64));
        let image_size = CanvasSize::from((img.natural_width() as f64, img.natural_height() as f64));
        s.viewport = Some(Viewport::fit(image_size, canvas_size));
    }
    upload::draw_preview(s)
}

fn enter_resize(st: &Rc<RefCell<State>>) -> Result<(), JsValue> {
    let listeners = attach_drag(st)?;
    let s = &mut *st.borrow_mut();
    s.canvas_listeners = Some(listeners);
    s.reset_canvas_size();
    if let (Some(vp), Some(zoom)) = (&s.viewport, zoom_input(s)) {
        zoom.set_value(&format!("{:.2}", vp.zoom()));
    }
    upload::draw_preview(s)
}

fn zoom_input(s: &State) -> Option<HtmlInputElement> {
    s.document
        .get_element_by_id("zoom")?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

/// Drag-to-move on the canvas, mouse and touch.
fn attach_drag(st: &Rc<RefCell<State>>) -> Result<Listeners, JsValue> {
    let target: EventTarget = st.borrow().canvas.clone().into();
    let mut listeners = Listeners::new(target);

    for kind in ["mousedown", "touchstart"] {
        let st = st.clone();
        listeners.on(kind, move |e| {
            let s = &mut *st.borrow_mut();
            if let (Some(pt), Some(vp)) = (utils::pointer_position(&e, &s.canvas), s.viewport.as_mut()) {
                vp.begin_drag(pt.0, pt.1);
            }
        })?;
    }

    for kind in ["mousemove", "touchmove"] {
        let st = st.clone();
        listeners.on(kind, move |e| {
            let s = &mut *st.borrow_mut();
            let Some(vp) = s.viewport.as_mut() else {
                return;
            };
            if !vp.is_dragging() {
                return;
            }
            // keep the page from scrolling under the finger
            e.prevent_default();
            if let Some(pt) = utils::pointer_position(&e, &s.canvas) {
                vp.drag_to(pt.0, pt.1);
            }
            if let Err(err) = upload::draw_preview(s) {
                log::error!("redraw failed: {err:?}");
            }
        })?;
    }

    for kind in ["mouseup", "mouseleave", "touchend", "touchcancel"] {
        let st = st.clone();
        listeners.on(kind, move |_e| {
            if let Some(vp) = st.borrow_mut().viewport.as_mut() {
                vp.end_drag();
            }
        })?;
    }

    Ok(listeners)
}

/// Zoom slider of the resize step.
pub fn attach_zoom(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let Some(input) = zoom_input(&state.borrow()) else {
        return Ok(());
    };
    let st = state.clone();
    let input_read = input.clone();
    let oninput = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        let s = &mut *st.borrow_mut();
        if s.stage != Stage::ImageResize {
            return;
        }
        let (Ok(z), Some(vp)) = (input_read.value().parse::<f64>(), s.viewport.as_mut()) else {
            return;
        };
        vp.set_zoom(z);
        if let Err(err) = upload::draw_preview(s) {
            log::error!("redraw failed: {err:?}");
        }
    }));
    input.set_oninput(Some(oninput.as_ref().unchecked_ref()));
    oninput.forget();
    Ok(())
}

/// Back / Next buttons.
pub fn attach_navigation(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();
    for (id, forward) in [("back", false), ("next", true)] {
        let Some(btn) = utils::html_element(&doc, id) else {
            continue;
        };
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let (current, has_image) = {
                let s = st.borrow();
                (s.stage, s.image.is_some())
            };
            let target = if forward {
                if !current.next_enabled(has_image) {
                    return;
                }
                current.next()
            } else {
                if !current.back_enabled() {
                    return;
                }
                current.back()
            };
            if let Err(e) = go(&st, target) {
                log::error!("switching to {target:?} failed: {e:?}");
            }
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }
    Ok(())
}

/// Show the prompt and the controls that belong to the current step.
pub fn update_controls(s: &State) {
    let doc = &s.document;
    let stage = s.stage;
    utils::set_text(doc, "prompt", stage.prompt());
    utils::set_enabled(doc, "back", stage.back_enabled());
    utils::set_visible(doc, "back", stage.back_enabled());
    let next = stage.next_enabled(s.image.is_some());
    utils::set_enabled(doc, "next", next);
    utils::set_visible(doc, "next", next);
    utils::set_visible(doc, "upload", stage == Stage::ImageUpload);
    utils::set_visible(doc, "zoom", stage == Stage::ImageResize);
    utils::set_visible(doc, "reshuffle", stage == Stage::Puzzle);
    utils::set_visible(doc, "timer", stage == Stage::Puzzle);
    let solved = s.view.as_ref().is_some_and(|v| v.puzzle.is_solved());
    utils::set_visible(doc, "banner", solved);
}
