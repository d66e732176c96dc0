use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// The seven piece kinds, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

/// Fixed color tag of a catalog shape.
///
/// Locked board cells store this tag; renderers map it to pixels via [`ShapeColor::rgb`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeColor {
    Cyan,
    Yellow,
    Magenta,
    Orange,
    Blue,
    Green,
    Red,
}

impl ShapeColor {
    /// Returns the display color as an `(r, g, b)` triple.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            ShapeColor::Cyan => (0, 255, 255),
            ShapeColor::Yellow => (255, 255, 0),
            ShapeColor::Magenta => (255, 0, 255),
            ShapeColor::Orange => (255, 165, 0),
            ShapeColor::Blue => (0, 0, 255),
            ShapeColor::Green => (0, 255, 0),
            ShapeColor::Red => (255, 0, 0),
        }
    }
}

/// One catalog slot: a shape paired with its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub color: ShapeColor,
}

/// The process-wide shape catalog, indexed by [`ShapeKind`].
pub static CATALOG: [CatalogEntry; ShapeKind::LEN] = [
    CatalogEntry {
        kind: ShapeKind::I,
        shape: Shape::from_rows([[1, 1, 1, 1]]),
        color: ShapeColor::Cyan,
    },
    CatalogEntry {
        kind: ShapeKind::O,
        shape: Shape::from_rows([[1, 1], [1, 1]]),
        color: ShapeColor::Yellow,
    },
    CatalogEntry {
        kind: ShapeKind::T,
        shape: Shape::from_rows([[1, 1, 1], [0, 1, 0]]),
        color: ShapeColor::Magenta,
    },
    CatalogEntry {
        kind: ShapeKind::L,
        shape: Shape::from_rows([[1, 1, 1], [1, 0, 0]]),
        color: ShapeColor::Orange,
    },
    CatalogEntry {
        kind: ShapeKind::J,
        shape: Shape::from_rows([[1, 1, 1], [0, 0, 1]]),
        color: ShapeColor::Blue,
    },
    CatalogEntry {
        kind: ShapeKind::S,
        shape: Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
        color: ShapeColor::Green,
    },
    CatalogEntry {
        kind: ShapeKind::Z,
        shape: Shape::from_rows([[0, 1, 1], [1, 1, 0]]),
        color: ShapeColor::Red,
    },
];

impl ShapeKind {
    pub const LEN: usize = 7;
    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    #[must_use]
    pub fn entry(self) -> &'static CatalogEntry {
        &CATALOG[self as usize]
    }

    #[must_use]
    pub fn shape(self) -> Shape {
        self.entry().shape
    }

    #[must_use]
    pub fn color(self) -> ShapeColor {
        self.entry().color
    }
}

/// Uniform draw over the seven kinds, with replacement.
impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}
