use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlButtonElement, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent, Window};

/// Convert client coordinates into canvas internal pixel coordinates
/// so hit testing works even if CSS scales the canvas element.
pub fn event_canvas_coords(e: &MouseEvent, cv: &HtmlCanvasElement) -> (f64, f64) {
    client_to_canvas(e.client_x() as f64, e.client_y() as f64, cv)
}

fn client_to_canvas(x: f64, y: f64, cv: &HtmlCanvasElement) -> (f64, f64) {
    let rect = cv.get_bounding_client_rect();
    (
        (x - rect.left()) * (cv.width() as f64) / rect.width().max(1.0),
        (y - rect.top()) * (cv.height() as f64) / rect.height().max(1.0),
    )
}

/// Canvas position of a mouse event or of the first finger of a touch event.
pub fn pointer_position(e: &Event, cv: &HtmlCanvasElement) -> Option<(f64, f64)> {
    if let Some(me) = e.dyn_ref::<MouseEvent>() {
        return Some(event_canvas_coords(me, cv));
    }
    let te = e.dyn_ref::<TouchEvent>()?;
    let touch = te.touches().item(0)?;
    Some(client_to_canvas(
        touch.client_x() as f64,
        touch.client_y() as f64,
        cv,
    ))
}

pub fn html_element(doc: &Document, id: &str) -> Option<HtmlElement> {
    doc.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

pub fn set_text(doc: &Document, id: &str, text: &str) {
    if let Some(el) = html_element(doc, id) {
        el.set_inner_text(text);
    }
}

pub fn set_visible(doc: &Document, id: &str, visible: bool) {
    if let Some(el) = html_element(doc, id) {
        el.set_hidden(!visible);
    }
}

pub fn set_enabled(doc: &Document, id: &str, enabled: bool) {
    if let Some(btn) = doc
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
    {
        btn.set_disabled(!enabled);
    }
}

pub fn alert(window: &Window, msg: &str) {
    if window.alert_with_message(msg).is_err() {
        log::warn!("alert failed: {msg}");
    }
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_encoding::percent_decode_str(&s)
        .decode_utf8_lossy()
        .to_string()
}
