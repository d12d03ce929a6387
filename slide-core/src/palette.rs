pub const GRID_COLOR: &str = "#ff0000";

pub const BANNER_TEXT: &str = "Congratulations!";

/// Colours the banner letters cycle through.
pub const BANNER_COLORS: [&str; 6] = [
    "#A800FF", // vivid violet
    "#0079FF", // azure
    "#00F11D", // electric green
    "#FFEF00", // canary yellow
    "#FF7F00", // orange
    "#FF0900", // candy apple red
];

/// Rainbow state of the congratulations banner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Banner {
    offset: usize,
}

impl Banner {
    /// Colour of each of `letters` letters for the current frame.
    pub fn colors(&self, letters: usize) -> Vec<&'static str> {
        (0..letters).map(|i| banner_color(self.offset + i)).collect()
    }

    /// Advance one frame; every letter takes its right neighbour's colour.
    pub fn tick(&mut self) {
        self.offset = (self.offset + 1) % BANNER_COLORS.len();
    }
}

pub fn banner_color(i: usize) -> &'static str {
    BANNER_COLORS[i % BANNER_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_cycle_through_palette() {
        let banner = Banner::default();
        let colors = banner.colors(BANNER_TEXT.chars().count());
        assert_eq!(colors.len(), 16);
        assert_eq!(colors[0], "#A800FF");
        assert_eq!(colors[6], "#A800FF");
        assert_eq!(colors[5], "#FF0900");
    }

    #[test]
    fn tick_shifts_colors() {
        let mut banner = Banner::default();
        let first = banner.colors(4);
        banner.tick();
        let second = banner.colors(4);
        assert_eq!(&second[..3], &first[1..]);
        for _ in 0..5 {
            banner.tick();
        }
        assert_eq!(banner, Banner::default());
    }
}
