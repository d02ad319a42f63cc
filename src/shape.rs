//! Tetromino shapes, scaled bitmaps and the falling piece.

use rand::Rng;

/// Tetromino kinds (I, O, T, S, Z, J, L).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoKind {
    pub const ALL: [Self; 7] = [Self::I, Self::O, Self::T, Self::S, Self::Z, Self::J, Self::L];

    /// Canonical outline in its 4x4 / 3x3 / 2x2 box, row-major.
    pub fn canonical(self) -> Bitmap {
        const I: [&[u8]; 4] = [&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]];
        const O: [&[u8]; 2] = [&[1, 1], &[1, 1]];
        const T: [&[u8]; 3] = [&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]];
        const S: [&[u8]; 3] = [&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]];
        const Z: [&[u8]; 3] = [&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]];
        const J: [&[u8]; 3] = [&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]];
        const L: [&[u8]; 3] = [&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]];
        let rows: &[&[u8]] = match self {
            Self::I => &I[..],
            Self::O => &O[..],
            Self::T => &T[..],
            Self::S => &S[..],
            Self::Z => &Z[..],
            Self::J => &J[..],
            Self::L => &L[..],
        };
        Bitmap::from_rows(rows)
    }
}

/// Binary occupancy matrix, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    rows: usize,
    cols: usize,
    bits: Vec<bool>,
}

impl Bitmap {
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            bits: vec![false; rows * cols],
        }
    }

    /// Builds a bitmap from rows of 0/1; short rows are padded with 0.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut out = Self::empty(rows.len(), cols);
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                out.set(r, c, v != 0);
            }
        }
        out
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> bool {
        r < self.rows && c < self.cols && self.bits[r * self.cols + c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, v: bool) {
        if r < self.rows && c < self.cols {
            self.bits[r * self.cols + c] = v;
        }
    }

    /// Set cells as `(row, col)`, row-major order.
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(|(i, _)| (i / self.cols, i % self.cols))
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Clockwise quarter turn: an R x C bitmap becomes C x R with
    /// `new[c][R-1-r] = old[r][c]`.
    pub fn rotated_cw(&self) -> Self {
        let mut out = Self::empty(self.cols, self.rows);
        for (r, c) in self.filled() {
            out.set(c, self.rows - 1 - r, true);
        }
        out
    }
}

/// Expands every set cell of `canonical` into a filled `scale x scale` block.
pub fn scale_shape(canonical: &Bitmap, scale: usize) -> Bitmap {
    let mut out = Bitmap::empty(canonical.rows() * scale, canonical.cols() * scale);
    for (r, c) in canonical.filled() {
        for dr in 0..scale {
            for dc in 0..scale {
                out.set(r * scale + dr, c * scale + dc, true);
            }
        }
    }
    out
}

/// Falling piece: scaled bitmap, colour tag and top-left position in grid cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: TetrominoKind,
    pub bitmap: Bitmap,
    pub color: u8,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub fn new(kind: TetrominoKind, color: u8, scale: usize) -> Self {
        Self {
            kind,
            bitmap: scale_shape(&kind.canonical(), scale),
            color,
            x: 0,
            y: 0,
        }
    }

    /// Puts the piece at the top row, horizontally centred in a grid `grid_width` wide.
    pub fn center(&mut self, grid_width: usize) {
        self.x = ((grid_width as i32 - self.bitmap.cols() as i32) / 2).max(0);
        self.y = 0;
    }

    /// Grid coordinates of every set bitmap cell at the current position.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.bitmap
            .filled()
            .map(|(r, c)| (self.x + c as i32, self.y + r as i32))
    }

    /// True if the piece covers grid cell `(x, y)`.
    pub fn covers(&self, x: i32, y: i32) -> bool {
        let (c, r) = (x - self.x, y - self.y);
        c >= 0 && r >= 0 && self.bitmap.get(r as usize, c as usize)
    }
}

/// Uniform shape, uniform colour from `0..palette_size`, centred at the top.
pub fn random_piece<R: Rng + ?Sized>(
    rng: &mut R,
    grid_width: usize,
    scale: usize,
    palette_size: u8,
) -> Piece {
    let kind = TetrominoKind::ALL[rng.gen_range(0..TetrominoKind::ALL.len())];
    let color = rng.gen_range(0..palette_size.max(1));
    let mut piece = Piece::new(kind, color, scale);
    piece.center(grid_width);
    piece
}
