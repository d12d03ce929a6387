use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, Window};

/// Event listeners attached to one target for as long as this value lives.
/// Dropping it detaches every listener it added.
pub struct Listeners {
    target: EventTarget,
    handlers: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl Listeners {
    pub fn new(target: EventTarget) -> Self {
        Listeners {
            target,
            handlers: Vec::new(),
        }
    }

    pub fn on<F>(&mut self, kind: &'static str, f: F) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let cb = Closure::<dyn FnMut(Event)>::wrap(Box::new(f));
        self.target
            .add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())?;
        self.handlers.push((kind, cb));
        Ok(())
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for (kind, cb) in self.handlers.drain(..) {
            if let Err(e) = self
                .target
                .remove_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
            {
                log::warn!("failed to remove {kind} listener: {e:?}");
            }
        }
    }
}

/// A `setInterval` timer, cleared on drop.
pub struct Interval {
    window: Window,
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new<F>(window: &Window, millis: i32, f: F) -> Result<Self, JsValue>
    where
        F: FnMut() + 'static,
    {
        let callback = Closure::<dyn FnMut()>::wrap(Box::new(f));
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis,
        )?;
        Ok(Interval {
            window: window.clone(),
            handle,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.handle);
    }
}
