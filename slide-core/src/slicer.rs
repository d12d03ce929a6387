use crate::Error;
use crate::arrangement::TileId;
use crate::geometry::Grid;

const BYTES_PER_PIXEL: usize = 4;

/// RGBA8 pixels, row-major, as handed out by a 2D canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, Error> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(Error::BufferLength {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(PixelBuffer {
            width,
            height,
            data,
        })
    }

    /// Fully transparent buffer.
    pub fn blank(width: u32, height: u32) -> Self {
        PixelBuffer {
            width,
            height,
            data: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let at = self.offset(x, y);
        [
            self.data[at],
            self.data[at + 1],
            self.data[at + 2],
            self.data[at + 3],
        ]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let at = self.offset(x, y);
        self.data[at..at + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) outside buffer");
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Copy out a `w`×`h` block whose top left corner is at (`x`, `y`).
    fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> PixelBuffer {
        let row_bytes = w as usize * BYTES_PER_PIXEL;
        let mut data = Vec::with_capacity(row_bytes * h as usize);
        for row in y..y + h {
            let start = self.offset(x, row);
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        PixelBuffer {
            width: w,
            height: h,
            data,
        }
    }
}

/// The picture cut into one buffer per grid slot, indexed by [`TileId`].
///
/// The buffer of the last slot is kept too; it is the picture under the
/// empty square and is only shown once the puzzle is complete, if at all.
#[derive(Clone, Debug)]
pub struct TileSet {
    grid: Grid,
    tile_width: u32,
    tile_height: u32,
    tiles: Vec<PixelBuffer>,
}

impl TileSet {
    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn get(&self, id: TileId) -> &PixelBuffer {
        &self.tiles[id.index()]
    }

    pub fn tiles(&self) -> &[PixelBuffer] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Size of the picture the tiles cover, remainder pixels excluded.
    pub fn covered_size(&self) -> (u32, u32) {
        let n = self.grid.size() as u32;
        (self.tile_width * n, self.tile_height * n)
    }
}

/// Cut `source` into `N²` tiles of `⌊W/N⌋ × ⌊H/N⌋` pixels in row-major order.
///
/// Pixels past the last full column or row are dropped.
pub fn slice(source: &PixelBuffer, grid: Grid) -> Result<TileSet, Error> {
    let n = grid.size() as u32;
    if source.width < n || source.height < n {
        return Err(Error::ImageTooSmall {
            width: source.width,
            height: source.height,
            size: grid.size(),
        });
    }
    let tile_width = source.width / n;
    let tile_height = source.height / n;
    let (rest_w, rest_h) = (source.width % n, source.height % n);
    if rest_w > 0 || rest_h > 0 {
        log::debug!(
            "{}x{} image does not divide by {n}, dropping {rest_w}px on the right and {rest_h}px at the bottom",
            source.width,
            source.height
        );
    }

    let tiles = (0..grid.slots())
        .map(|i| {
            let (x, y) = grid.index_to_xy(i);
            source.crop(
                x as u32 * tile_width,
                y as u32 * tile_height,
                tile_width,
                tile_height,
            )
        })
        .collect();

    Ok(TileSet {
        grid,
        tile_width,
        tile_height,
        tiles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Every pixel encodes its own coordinates so crops can be checked.
    fn coordinate_image(w: u32, h: u32) -> PixelBuffer {
        let mut img = PixelBuffer::blank(w, h);
        for y in 0..h {
            for x in 0..w {
                img.set_pixel(x, y, [x as u8, y as u8, 0, 255]);
            }
        }
        img
    }

    #[test]
    fn rejects_wrong_byte_count() {
        assert_eq!(
            PixelBuffer::new(2, 2, vec![0; 15]),
            Err(Error::BufferLength {
                width: 2,
                height: 2,
                expected: 16,
                actual: 15
            })
        );
        assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn cuts_in_row_major_order() {
        let grid = Grid::new(3).unwrap();
        let tiles = slice(&coordinate_image(30, 30), grid).unwrap();
        assert_eq!(tiles.len(), 9);
        assert_eq!((tiles.tile_width(), tiles.tile_height()), (10, 10));
        for i in 0..9 {
            let (x, y) = grid.index_to_xy(i);
            let tile = tiles.get(TileId::new(i));
            assert_eq!((tile.width(), tile.height()), (10, 10));
            assert_eq!(tile.pixel(0, 0), [x as u8 * 10, y as u8 * 10, 0, 255]);
            assert_eq!(tile.pixel(9, 9), [x as u8 * 10 + 9, y as u8 * 10 + 9, 0, 255]);
        }
    }

    #[rstest]
    #[case(31, 30, 3, (10, 10))]
    #[case(32, 35, 3, (10, 11))]
    #[case(100, 75, 4, (25, 18))]
    #[case(2, 2, 2, (1, 1))]
    fn floors_tile_size(#[case] w: u32, #[case] h: u32, #[case] n: usize, #[case] tile: (u32, u32)) {
        let tiles = slice(&coordinate_image(w, h), Grid::new(n).unwrap()).unwrap();
        assert_eq!((tiles.tile_width(), tiles.tile_height()), tile);
        assert_eq!(tiles.len(), n * n);
        assert!(tiles.tiles().iter().all(|t| (t.width(), t.height()) == tile));
    }

    #[test]
    fn remainder_is_dropped_at_the_far_edge() {
        let grid = Grid::new(3).unwrap();
        let tiles = slice(&coordinate_image(32, 31), grid).unwrap();
        assert_eq!(tiles.covered_size(), (30, 30));
        // the bottom right tile ends at pixel 29, columns 30 and 31 are gone
        let last = tiles.get(TileId::new(8));
        assert_eq!(last.pixel(9, 9), [29, 29, 0, 255]);
    }

    #[rstest]
    #[case(2, 9)]
    #[case(9, 2)]
    #[case(0, 0)]
    fn rejects_images_smaller_than_the_grid(#[case] w: u32, #[case] h: u32) {
        let err = slice(&PixelBuffer::blank(w, h), Grid::new(3).unwrap()).unwrap_err();
        assert_eq!(
            err,
            Error::ImageTooSmall {
                width: w,
                height: h,
                size: 3
            }
        );
    }
}
