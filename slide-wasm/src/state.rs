use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use slide_core::{PuzzleConfig, Stage, Viewport};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlImageElement, Window};

use crate::listeners::Listeners;
use crate::play::PuzzleView;

/// Global application state stored behind an `Rc<RefCell<_>>` so it can be
/// shared across the WASM callbacks.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub config: PuzzleConfig,
    pub stage: Stage,
    pub image: Option<HtmlImageElement>,
    pub viewport: Option<Viewport>,
    pub view: Option<PuzzleView>,
    /// Canvas listeners of the current stage; replaced on every stage change.
    pub canvas_listeners: Option<Listeners>,
    pub banner_letters: Vec<Element>,
    pub rng: SmallRng,
}

impl State {
    pub fn new(
        window: Window,
        document: Document,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        config: PuzzleConfig,
    ) -> Self {
        State {
            window,
            document,
            canvas,
            ctx,
            config,
            stage: Stage::ImageUpload,
            image: None,
            viewport: None,
            view: None,
            canvas_listeners: None,
            banner_letters: Vec::new(),
            rng: SmallRng::seed_from_u64(entropy_seed()),
        }
    }

    pub fn reset_canvas_size(&self) {
        self.canvas.set_width(self.config.canvas_width);
        self.canvas.set_height(self.config.canvas_height);
    }
}

fn entropy_seed() -> u64 {
    let random = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    random ^ js_sys::Date::now() as u64
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}

pub fn current() -> Option<Rc<RefCell<State>>> {
    STATE.with(|st| st.borrow().clone())
}
