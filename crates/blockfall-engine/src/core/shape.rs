use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest width or height a [`Shape`] may have.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Error returned when building a [`Shape`] from runtime data.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape must have at least one row and one column")]
    Empty,
    #[display("shape row {row} has {actual} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("shape is {width}x{height}, larger than 4x4")]
    TooLarge { width: usize, height: usize },
    #[display("invalid shape cell {ch:?} at row {row} (expected '#' or '.')")]
    InvalidCell { row: usize, ch: char },
}

/// An immutable rectangular occupancy matrix.
///
/// The local origin is the top-left cell. `true` marks an occupied cell.
/// Shapes are small `Copy` values backed by a fixed 4×4 array; only the
/// `width × height` region is meaningful, the rest is always vacant.
///
/// # Example
///
/// ```
/// use blockfall_engine::Shape;
///
/// let t = Shape::from_rows([[1, 1, 1], [0, 1, 0]]);
/// assert_eq!((t.width(), t.height()), (3, 2));
///
/// let rotated = t.rotated_clockwise();
/// assert_eq!((rotated.width(), rotated.height()), (2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: usize,
    height: usize,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Builds a shape from a literal matrix of `0`/`1` values.
    ///
    /// Row lengths are consistent by construction. Zero or oversized
    /// dimensions abort compilation when evaluated in `const` context and
    /// panic otherwise.
    #[must_use]
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W >= 1 && H >= 1, "shape must have at least one row and one column");
        assert!(
            W <= MAX_SHAPE_SIZE && H <= MAX_SHAPE_SIZE,
            "shape exceeds the 4x4 bounding box"
        );
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            width: W,
            height: H,
            cells,
        }
    }

    /// Builds a shape from runtime rows, rejecting empty, ragged, or oversized input.
    pub fn try_from_rows<R>(rows: &[R]) -> Result<Self, ShapeError>
    where
        R: AsRef<[bool]>,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if width == 0 || height == 0 {
            return Err(ShapeError::Empty);
        }
        for (y, row) in rows.iter().enumerate() {
            let actual = row.as_ref().len();
            if actual != width {
                return Err(ShapeError::Ragged {
                    row: y,
                    expected: width,
                    actual,
                });
            }
        }
        if width > MAX_SHAPE_SIZE || height > MAX_SHAPE_SIZE {
            return Err(ShapeError::TooLarge { width, height });
        }

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (dst, src) in cells.iter_mut().zip(rows) {
            dst[..width].copy_from_slice(src.as_ref());
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns whether the local cell `(x, y)` is occupied.
    ///
    /// Cells outside the shape's bounds are reported as vacant.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y][x]
    }

    /// Iterates over the rows of the shape, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..self.height]
            .iter()
            .map(|row| &row[..self.width])
    }

    /// Iterates over occupied cells as local `(x, y)` pairs in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, occupied)| **occupied)
                .map(move |(x, _)| (x, y))
        })
    }

    /// Returns the shape turned 90° clockwise.
    ///
    /// Equivalent to reversing the row order and transposing, so a `w × h`
    /// shape becomes `h × w`.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in cells.iter_mut().enumerate().take(self.width) {
            for (x, cell) in row.iter_mut().enumerate().take(self.height) {
                *cell = self.cells[self.height - 1 - x][y];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    fn row_string(row: &[bool]) -> String {
        row.iter().map(|&c| if c { '#' } else { '.' }).collect()
    }
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Format: one string per row, e.g. ["###", ".#."]
        serializer.collect_seq(self.rows().map(Self::row_string))
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let lines = Vec::<String>::deserialize(deserializer)?;
        let mut rows = Vec::with_capacity(lines.len());
        for (y, line) in lines.iter().enumerate() {
            let row = line
                .chars()
                .map(|ch| match ch {
                    '#' => Ok(true),
                    '.' => Ok(false),
                    _ => Err(ShapeError::InvalidCell { row: y, ch }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map_err(serde::de::Error::custom)?;
            rows.push(row);
        }
        Self::try_from_rows(&rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascii(shape: &Shape) -> Vec<String> {
        shape.rows().map(Shape::row_string).collect()
    }

    #[test]
    fn test_from_rows_dimensions() {
        let shape = Shape::from_rows([[1, 1, 0], [0, 1, 1]]);
        assert_eq!(shape.width(), 3);
        assert_eq!(shape.height(), 2);
        assert_eq!(ascii(&shape), vec!["##.", ".##"]);
    }

    #[test]
    fn test_is_occupied_out_of_bounds_is_vacant() {
        let shape = Shape::from_rows([[1, 1], [1, 1]]);
        assert!(shape.is_occupied(1, 1));
        assert!(!shape.is_occupied(2, 0));
        assert!(!shape.is_occupied(0, 2));
    }

    #[test]
    fn test_occupied_cells_row_major() {
        let shape = Shape::from_rows([[1, 1, 1], [0, 1, 0]]);
        let cells: Vec<_> = shape.occupied_cells().collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (1, 1)]);
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let shape = Shape::from_rows([[1, 1, 1], [0, 1, 0]]);
        let rotated = shape.rotated_clockwise();
        assert_eq!(ascii(&rotated), vec![".#", "##", ".#"]);
    }

    #[test]
    fn test_rotate_l_clockwise() {
        let shape = Shape::from_rows([[1, 1, 1], [1, 0, 0]]);
        let rotated = shape.rotated_clockwise();
        assert_eq!(ascii(&rotated), vec!["##", ".#", ".#"]);
    }

    #[test]
    fn test_rotate_i_swaps_dimensions() {
        let shape = Shape::from_rows([[1, 1, 1, 1]]);
        let rotated = shape.rotated_clockwise();
        assert_eq!((rotated.width(), rotated.height()), (1, 4));
        assert_eq!(ascii(&rotated), vec!["#", "#", "#", "#"]);
        assert_eq!(rotated.rotated_clockwise(), shape);
    }

    #[test]
    fn test_four_rotations_return_original() {
        let shapes = [
            Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
            Shape::from_rows([[1, 1, 1], [0, 0, 1]]),
            Shape::from_rows([[1, 1], [1, 1]]),
        ];
        for shape in shapes {
            let mut rotated = shape;
            for _ in 0..4 {
                rotated = rotated.rotated_clockwise();
            }
            assert_eq!(rotated, shape, "four rotations should be the identity");
        }
    }

    #[test]
    fn test_try_from_rows_errors() {
        let empty: [Vec<bool>; 0] = [];
        assert_eq!(Shape::try_from_rows(&empty), Err(ShapeError::Empty));
        assert_eq!(
            Shape::try_from_rows(&[Vec::<bool>::new()]),
            Err(ShapeError::Empty)
        );
        assert_eq!(
            Shape::try_from_rows(&[vec![true, true], vec![true]]),
            Err(ShapeError::Ragged {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            Shape::try_from_rows(&[vec![true; 5]]),
            Err(ShapeError::TooLarge {
                width: 5,
                height: 1
            })
        );
    }

    #[test]
    fn test_try_from_rows_matches_const_constructor() {
        let runtime = Shape::try_from_rows(&[[true, true, false], [false, true, true]]).unwrap();
        assert_eq!(runtime, Shape::from_rows([[1, 1, 0], [0, 1, 1]]));
    }

    #[test]
    fn test_shape_serialization() {
        let shape = Shape::from_rows([[0, 1, 1], [1, 1, 0]]);
        let serialized = serde_json::to_string(&shape).unwrap();
        assert_eq!(serialized, "[\".##\",\"##.\"]");

        let deserialized: Shape = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, shape);
    }

    #[test]
    fn test_shape_deserialization_error_cases() {
        assert!(serde_json::from_str::<Shape>("[]").is_err());
        assert!(serde_json::from_str::<Shape>("[\"##\", \"#\"]").is_err());
        assert!(serde_json::from_str::<Shape>("[\"#x\"]").is_err());
        assert!(serde_json::from_str::<Shape>("[\"#####\"]").is_err());
    }
}
