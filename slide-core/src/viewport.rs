//! Placement of the uploaded image on the canvas while the player zooms and
//! drags it into position, and the region that becomes the puzzle picture.

use serde::{Deserialize, Serialize};

use crate::geometry::CanvasSize;

pub const MIN_ZOOM: f64 = 0.01;
pub const MAX_ZOOM: f64 = 1.0;

/// Integer pixel rectangle on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Floating point rectangle in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    image: CanvasSize,
    canvas: CanvasSize,
    offset: (f64, f64),
    zoom: f64,
    drag: Option<(f64, f64)>,
}

impl Viewport {
    /// Shrink images that do not fit (never enlarge) and center them.
    pub fn fit(image: CanvasSize, canvas: CanvasSize) -> Self {
        let sx = if image.width > canvas.width {
            canvas.width / image.width
        } else {
            1.0
        };
        let sy = if image.height > canvas.height {
            canvas.height / image.height
        } else {
            1.0
        };
        let zoom = sx.min(sy);
        let offset = (
            (canvas.width - image.width * zoom) / 2.0,
            (canvas.height - image.height * zoom) / 2.0,
        );
        Viewport {
            image,
            canvas,
            offset,
            zoom,
            drag: None,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Change the zoom level, keeping the image centre where it is.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let diff = self.zoom - zoom;
        self.offset.0 += self.image.width / 2.0 * diff;
        self.offset.1 += self.image.height / 2.0 * diff;
        self.zoom = zoom;
    }

    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.drag = Some((x, y));
    }

    pub fn drag_to(&mut self, x: f64, y: f64) {
        let Some((dx, dy)) = self.drag else {
            return;
        };
        self.offset.0 += x - dx;
        self.offset.1 += y - dy;
        self.drag = Some((x, y));
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Where the scaled image lands on the canvas.
    pub fn drawn_rect(&self) -> Rect {
        Rect {
            x: self.offset.0,
            y: self.offset.1,
            width: self.image.width * self.zoom,
            height: self.image.height * self.zoom,
        }
    }

    /// Part of the canvas covered by the image, or `None` when it has been
    /// dragged out of sight.
    pub fn crop_rect(&self) -> Option<CropRect> {
        let r = self.drawn_rect();
        let x0 = r.x.max(0.0).ceil();
        let y0 = r.y.max(0.0).ceil();
        let x1 = (r.x + r.width).min(self.canvas.width).floor();
        let y1 = (r.y + r.height).min(self.canvas.height).floor();
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(CropRect {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(w: f64, h: f64) -> CanvasSize {
        CanvasSize::from((w, h))
    }

    #[test]
    fn large_image_is_scaled_and_centered() {
        let vp = Viewport::fit(size(600.0, 300.0), size(300.0, 300.0));
        assert_eq!(vp.zoom(), 0.5);
        assert_eq!(vp.offset(), (0.0, 75.0));
        assert_eq!(
            vp.crop_rect(),
            Some(CropRect {
                x: 0,
                y: 75,
                width: 300,
                height: 150
            })
        );
    }

    #[test]
    fn small_image_is_centered_unscaled() {
        let vp = Viewport::fit(size(100.0, 50.0), size(300.0, 300.0));
        assert_eq!(vp.zoom(), 1.0);
        assert_eq!(vp.offset(), (100.0, 125.0));
    }

    #[test]
    fn zoom_pivots_on_image_center() {
        let mut vp = Viewport::fit(size(200.0, 200.0), size(300.0, 300.0));
        assert_eq!(vp.offset(), (50.0, 50.0));
        vp.set_zoom(0.5);
        assert_eq!(vp.offset(), (100.0, 100.0));
        let r = vp.drawn_rect();
        assert_eq!((r.width, r.height), (100.0, 100.0));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut vp = Viewport::fit(size(200.0, 200.0), size(300.0, 300.0));
        vp.set_zoom(5.0);
        assert_eq!(vp.zoom(), MAX_ZOOM);
        vp.set_zoom(0.0);
        assert_eq!(vp.zoom(), MIN_ZOOM);
        vp.set_zoom(f64::NAN);
        assert_eq!(vp.zoom(), MIN_ZOOM);
    }

    #[test]
    fn drag_moves_image_only_while_held() {
        let mut vp = Viewport::fit(size(300.0, 300.0), size(300.0, 300.0));
        vp.drag_to(50.0, 50.0);
        assert_eq!(vp.offset(), (0.0, 0.0));

        vp.begin_drag(10.0, 10.0);
        vp.drag_to(30.0, 15.0);
        vp.drag_to(40.0, 5.0);
        assert_eq!(vp.offset(), (30.0, -5.0));
        vp.end_drag();
        assert!(!vp.is_dragging());
        vp.drag_to(0.0, 0.0);
        assert_eq!(vp.offset(), (30.0, -5.0));
    }

    #[test]
    fn crop_is_clipped_to_canvas() {
        let mut vp = Viewport::fit(size(300.0, 300.0), size(300.0, 300.0));
        vp.begin_drag(0.0, 0.0);
        vp.drag_to(100.0, -50.0);
        assert_eq!(
            vp.crop_rect(),
            Some(CropRect {
                x: 100,
                y: 0,
                width: 200,
                height: 250
            })
        );
    }

    #[test]
    fn image_dragged_away_has_no_crop() {
        let mut vp = Viewport::fit(size(100.0, 100.0), size(300.0, 300.0));
        vp.begin_drag(0.0, 0.0);
        vp.drag_to(400.0, 0.0);
        assert_eq!(vp.crop_rect(), None);
    }

    #[test]
    fn fractional_edges_round_inward() {
        let mut vp = Viewport::fit(size(101.0, 101.0), size(300.0, 300.0));
        // offset (99.5, 99.5), image ends at 200.5
        assert_eq!(
            vp.crop_rect(),
            Some(CropRect {
                x: 100,
                y: 100,
                width: 100,
                height: 100
            })
        );
        vp.set_zoom(1.0);
        assert_eq!(vp.offset(), (99.5, 99.5));
    }
}
