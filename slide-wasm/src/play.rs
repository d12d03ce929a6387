use std::cell::RefCell;
use std::rc::Rc;

use slide_core::palette::{BANNER_TEXT, Banner};
use slide_core::{CanvasSize, ClickOutcome, Puzzle, Stopwatch};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, MouseEvent};

use crate::listeners::{Interval, Listeners};
use crate::state::State;
use crate::{canvas, stages, utils};

const CLOCK_TICK_MS: i32 = 1000;
const BANNER_TICK_MS: i32 = 50;

/// Everything that exists only while the puzzle step is shown.
pub struct PuzzleView {
    pub puzzle: Puzzle,
    /// Tile pictures indexed by tile id.
    pub tiles: Vec<web_sys::ImageData>,
    pub stopwatch: Stopwatch,
    pub banner: Banner,
    clock: Option<Interval>,
    banner_ticker: Option<Interval>,
}

/// Cut the visible picture into tiles, shuffle them and start the clock.
pub fn enter(st: &Rc<RefCell<State>>) -> Result<(), JsValue> {
    {
        let s = &mut *st.borrow_mut();
        let image = s.image.as_ref().ok_or("no image loaded")?;
        let viewport = s.viewport.ok_or("no image loaded")?;
        let crop = viewport.crop_rect().ok_or("the image is outside the frame")?;
        let grid = s.config.grid().map_err(to_js)?;

        s.reset_canvas_size();
        canvas::draw_preview(&s.ctx, &s.canvas, image, &viewport)?;
        let source = canvas::read_pixels(&s.ctx, crop)?;
        let tiles = slide_core::slice(&source, grid).map_err(to_js)?;
        log::debug!(
            "cut {}x{} crop into {} tiles of {}x{}",
            crop.width,
            crop.height,
            tiles.len(),
            tiles.tile_width(),
            tiles.tile_height()
        );

        // size the canvas to the tiles so every tile lands on whole pixels
        let (w, h) = tiles.covered_size();
        s.canvas.set_width(w);
        s.canvas.set_height(h);

        let puzzle = Puzzle::new(grid, s.config.shuffler(grid), &mut s.rng);
        s.view = Some(PuzzleView {
            puzzle,
            tiles: canvas::tile_images(&tiles)?,
            stopwatch: Stopwatch::default(),
            banner: Banner::default(),
            clock: None,
            banner_ticker: None,
        });
    }
    let listeners = attach_click(st)?;
    st.borrow_mut().canvas_listeners = Some(listeners);
    start_clock(st)?;
    redraw(&st.borrow())
}

fn to_js(e: slide_core::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

pub fn redraw(s: &State) -> Result<(), JsValue> {
    match &s.view {
        Some(view) => canvas::render(&s.ctx, &s.canvas, &view.puzzle, &view.tiles, &s.config.grid_color),
        None => Ok(()),
    }
}

fn attach_click(st: &Rc<RefCell<State>>) -> Result<Listeners, JsValue> {
    let target: EventTarget = st.borrow().canvas.clone().into();
    let mut listeners = Listeners::new(target);
    let st = st.clone();
    listeners.on("click", move |e: Event| {
        let Some(me) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        let outcome = {
            let s = &mut *st.borrow_mut();
            let (x, y) = utils::event_canvas_coords(me, &s.canvas);
            let size = CanvasSize::from((s.canvas.width() as f64, s.canvas.height() as f64));
            match s.view.as_mut() {
                Some(view) => view.puzzle.apply_click(x, y, size),
                None => return,
            }
        };
        if outcome.changed()
            && let Err(err) = redraw(&st.borrow())
        {
            log::error!("redraw failed: {err:?}");
        }
        if let ClickOutcome::Solved { .. } = outcome
            && let Err(err) = celebrate(&st)
        {
            log::error!("could not show the banner: {err:?}");
        }
    })?;
    Ok(listeners)
}

/// (Re)start the stopwatch and its once-a-second display.
fn start_clock(st: &Rc<RefCell<State>>) -> Result<(), JsValue> {
    let window = st.borrow().window.clone();
    let ticking = st.clone();
    let clock = Interval::new(&window, CLOCK_TICK_MS, move || {
        show_time(&ticking.borrow());
    })?;
    let mut s = st.borrow_mut();
    if let Some(view) = s.view.as_mut() {
        view.stopwatch.start(js_sys::Date::now());
        view.clock = Some(clock);
        view.banner_ticker = None;
    }
    show_time(&s);
    stages::update_controls(&s);
    Ok(())
}

fn show_time(s: &State) {
    if let Some(view) = &s.view {
        utils::set_text(&s.document, "timer", &view.stopwatch.display(js_sys::Date::now()));
    }
}

/// Freeze the clock and let the banner cycle its colours.
fn celebrate(st: &Rc<RefCell<State>>) -> Result<(), JsValue> {
    let window = st.borrow().window.clone();
    let animating = st.clone();
    let ticker = Interval::new(&window, BANNER_TICK_MS, move || {
        let s = &mut *animating.borrow_mut();
        if let Some(view) = s.view.as_mut() {
            view.banner.tick();
        }
        paint_banner(s);
    })?;
    let s = &mut *st.borrow_mut();
    if let Some(view) = s.view.as_mut() {
        view.stopwatch.stop(js_sys::Date::now());
        view.clock = None;
        view.banner_ticker = Some(ticker);
    }
    show_time(s);
    paint_banner(s);
    stages::update_controls(s);
    Ok(())
}

fn paint_banner(s: &State) {
    let Some(view) = &s.view else {
        return;
    };
    let colors = view.banner.colors(s.banner_letters.len());
    for (letter, color) in s.banner_letters.iter().zip(colors) {
        if let Err(e) = letter.set_attribute("style", &format!("color: {color}")) {
            log::warn!("banner colour not applied: {e:?}");
        }
    }
}

/// Fill `#banner` with one span per letter so each can get its own colour.
pub fn build_banner(doc: &Document) -> Result<Vec<Element>, JsValue> {
    let Some(banner) = doc.get_element_by_id("banner") else {
        return Ok(Vec::new());
    };
    banner.set_text_content(None);
    BANNER_TEXT
        .chars()
        .map(|c| {
            let span = doc.create_element("span")?;
            span.set_text_content(Some(&c.to_string()));
            banner.append_child(&span)?;
            Ok(span)
        })
        .collect()
}

/// New shuffle of the same picture; the clock starts over.
pub fn reshuffle(st: &Rc<RefCell<State>>) -> Result<(), JsValue> {
    {
        let s = &mut *st.borrow_mut();
        let Some(view) = s.view.as_mut() else {
            return Ok(());
        };
        view.puzzle.reshuffle(&mut s.rng);
    }
    start_clock(st)?;
    redraw(&st.borrow())
}

pub fn attach_reshuffle(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let Some(btn) = utils::html_element(&state.borrow().document, "reshuffle") else {
        return Ok(());
    };
    let st = state.clone();
    let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        if let Err(e) = reshuffle(&st) {
            log::error!("reshuffle failed: {e:?}");
        }
    }));
    btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
    onclick.forget();
    Ok(())
}
