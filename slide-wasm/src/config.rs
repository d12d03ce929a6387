use slide_core::PuzzleConfig;
use web_sys::{HtmlCanvasElement, Window};

use crate::utils::get_query_param;

/// Settings come from the canvas `data-config` JSON, then `?n=` and
/// `?moves=` in the page URL win over it.
pub fn load_config(window: &Window, canvas: &HtmlCanvasElement) -> PuzzleConfig {
    let mut cfg = match canvas.get_attribute("data-config") {
        Some(text) => PuzzleConfig::from_json(&text).unwrap_or_else(|e| {
            log::warn!("ignoring data-config: {e}");
            PuzzleConfig::default()
        }),
        None => PuzzleConfig::default(),
    };
    if let Ok(search) = window.location().search() {
        apply_query(&mut cfg, &search);
    }
    cfg.sanitized()
}

pub fn apply_query(cfg: &mut PuzzleConfig, search: &str) {
    if let Some(n) = get_query_param(search, "n") {
        match n.parse() {
            Ok(size) => cfg.size = size,
            Err(_) => log::warn!("ignoring n={n}"),
        }
    }
    if let Some(moves) = get_query_param(search, "moves") {
        match moves.parse() {
            Ok(m) => cfg.shuffle_moves = Some(m),
            Err(_) => log::warn!("ignoring moves={moves}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", 3, None)]
    #[case("?n=4", 4, None)]
    #[case("?n=5&moves=40", 5, Some(40))]
    #[case("?n=four&moves=-1", 3, None)]
    fn query_overrides(#[case] search: &str, #[case] size: usize, #[case] moves: Option<usize>) {
        let mut cfg = PuzzleConfig::default();
        apply_query(&mut cfg, search);
        assert_eq!(cfg.size, size);
        assert_eq!(cfg.shuffle_moves, moves);
    }

    #[test]
    fn out_of_range_size_is_sanitized_later() {
        let mut cfg = PuzzleConfig::default();
        apply_query(&mut cfg, "?n=12");
        assert_eq!(cfg.size, 12);
        assert_eq!(cfg.sanitized().size, 3);
    }
}
