use std::cell::RefCell;
use std::rc::Rc;

use log::LevelFilter;
use slide_core::Stage;
use wasm_bindgen::prelude::*;

mod canvas;
mod config;
mod listeners;
mod logger;
mod play;
mod stages;
mod state;
mod upload;
mod utils;

use state::{STATE, State};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logger::init(LevelFilter::Info);
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let (canvas, ctx) = canvas::init_canvas(&document)?;

    let config = config::load_config(&window, &canvas);
    log::set_max_level(config.level_filter());
    log::info!("{0}x{0} puzzle, canvas {1}x{2}", config.size, config.canvas_width, config.canvas_height);

    let state = Rc::new(RefCell::new(State::new(window, document, canvas, ctx, config)));
    STATE.with(|st| st.replace(Some(state.clone())));

    attach_ui(state.clone())?;
    let letters = play::build_banner(&state.borrow().document)?;
    state.borrow_mut().banner_letters = letters;
    stages::go(&state, Stage::ImageUpload)
}

fn attach_ui(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    upload::attach_file_input(state.clone())?;
    stages::attach_zoom(state.clone())?;
    stages::attach_navigation(state.clone())?;
    play::attach_reshuffle(state)
}

/// Shuffle the current picture again. Does nothing outside the puzzle step.
#[wasm_bindgen]
pub fn reshuffle() -> Result<(), JsValue> {
    match state::current() {
        Some(st) => play::reshuffle(&st),
        None => Ok(()),
    }
}

/// The board as JSON, or `undefined` when no puzzle is on screen.
#[wasm_bindgen]
pub fn snapshot() -> Option<String> {
    let st = state::current()?;
    let s = st.borrow();
    let view = s.view.as_ref()?;
    match serde_json::to_string(&view.puzzle.snapshot()) {
        Ok(json) => Some(json),
        Err(e) => {
            log::error!("snapshot failed: {e}");
            None
        }
    }
}
