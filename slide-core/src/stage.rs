/// Steps of the page, in the order the player goes through them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    #[default]
    ImageUpload,
    ImageResize,
    Puzzle,
}

impl Stage {
    pub fn next(self) -> Stage {
        match self {
            Stage::ImageUpload => Stage::ImageResize,
            Stage::ImageResize | Stage::Puzzle => Stage::Puzzle,
        }
    }

    pub fn back(self) -> Stage {
        match self {
            Stage::ImageUpload | Stage::ImageResize => Stage::ImageUpload,
            Stage::Puzzle => Stage::ImageResize,
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Stage::ImageUpload => "To begin, upload an image!",
            Stage::ImageResize => "Now resize and center the face!",
            Stage::Puzzle => "Click the pieces to move them around",
        }
    }

    pub fn back_enabled(self) -> bool {
        self != Stage::ImageUpload
    }

    /// Next is offered on the upload step only once an image is loaded.
    pub fn next_enabled(self, image_loaded: bool) -> bool {
        match self {
            Stage::ImageUpload => image_loaded,
            Stage::ImageResize => true,
            Stage::Puzzle => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_and_back() {
        let s = Stage::default();
        assert_eq!(s, Stage::ImageUpload);
        assert_eq!(s.next(), Stage::ImageResize);
        assert_eq!(s.next().next(), Stage::Puzzle);
        assert_eq!(Stage::Puzzle.next(), Stage::Puzzle);
        assert_eq!(Stage::Puzzle.back(), Stage::ImageResize);
        assert_eq!(Stage::ImageResize.back(), Stage::ImageUpload);
        assert_eq!(Stage::ImageUpload.back(), Stage::ImageUpload);
    }

    #[test]
    fn buttons() {
        assert!(!Stage::ImageUpload.back_enabled());
        assert!(!Stage::ImageUpload.next_enabled(false));
        assert!(Stage::ImageUpload.next_enabled(true));
        assert!(Stage::ImageResize.back_enabled());
        assert!(Stage::ImageResize.next_enabled(true));
        assert!(!Stage::Puzzle.next_enabled(true));
    }
}
