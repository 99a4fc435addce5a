//! Pieces module - tetromino shape table
//!
//! Every (kind, rotation) pair is spelled out explicitly rather than derived by
//! matrix rotation. The vertical orientations sit one row *above* the anchor
//! (e.g. vertical I occupies dy in -1..=2 at dx = 1), which is what gives the
//! classic rule set its spawn and rotation feel. There is no kick table: a
//! rotation either lands in a legal cell set or is rejected by the caller.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to the piece anchor
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the anchor
pub type PieceShape = [MinoOffset; 4];

/// Immutable (kind, rotation) -> shape table
///
/// Indexed by `[kind.index() - 1][rotation.index()]`. Pieces hold a
/// `&'static ShapeTable`, normally [`CLASSIC_SHAPES`].
#[derive(PartialEq, Eq)]
pub struct ShapeTable {
    shapes: [[PieceShape; 4]; 7],
}

impl std::fmt::Debug for ShapeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeTable").finish_non_exhaustive()
    }
}

impl ShapeTable {
    pub const fn new(shapes: [[PieceShape; 4]; 7]) -> Self {
        Self { shapes }
    }

    /// Get the mino offsets for a piece kind and rotation
    pub fn shape_of(&self, kind: PieceKind, rotation: Rotation) -> PieceShape {
        self.shapes[(kind.index() - 1) as usize][rotation.index() as usize]
    }

    /// Same as [`ShapeTable::shape_of`] for a raw rotation index (reduced mod 4)
    pub fn shape_of_index(&self, kind: PieceKind, rotation: i32) -> PieceShape {
        self.shape_of(kind, Rotation::from_index(rotation))
    }
}

const I_FLAT: PieceShape = [(0, 0), (1, 0), (2, 0), (3, 0)];
const I_UPRIGHT: PieceShape = [(1, -1), (1, 0), (1, 1), (1, 2)];

const O_BLOCK: PieceShape = [(0, 0), (1, 0), (0, 1), (1, 1)];

const S_FLAT: PieceShape = [(1, 0), (2, 0), (0, 1), (1, 1)];
const S_UPRIGHT: PieceShape = [(0, 0), (0, 1), (1, -1), (1, 0)];

const Z_FLAT: PieceShape = [(0, 0), (1, 0), (1, 1), (2, 1)];
const Z_UPRIGHT: PieceShape = [(1, -1), (1, 0), (0, 0), (0, 1)];

/// The classic shape table
pub const CLASSIC_SHAPES: ShapeTable = ShapeTable::new([
    // I: two distinct orientations
    [I_FLAT, I_UPRIGHT, I_FLAT, I_UPRIGHT],
    // O: rotation is a no-op
    [O_BLOCK, O_BLOCK, O_BLOCK, O_BLOCK],
    // T
    [
        [(0, 0), (1, 0), (2, 0), (1, 1)],
        [(1, -1), (1, 0), (1, 1), (0, 0)],
        [(0, 0), (1, 0), (2, 0), (1, -1)],
        [(1, -1), (1, 0), (1, 1), (2, 0)],
    ],
    // S
    [S_FLAT, S_UPRIGHT, S_FLAT, S_UPRIGHT],
    // Z
    [Z_FLAT, Z_UPRIGHT, Z_FLAT, Z_UPRIGHT],
    // J
    [
        [(0, 0), (1, 0), (2, 0), (0, 1)],
        [(1, -1), (1, 0), (1, 1), (0, 1)],
        [(0, 0), (1, 0), (2, 0), (2, -1)],
        [(1, -1), (1, 0), (1, 1), (2, -1)],
    ],
    // L
    [
        [(0, 0), (1, 0), (2, 0), (2, 1)],
        [(1, -1), (1, 0), (1, 1), (0, -1)],
        [(0, 0), (1, 0), (2, 0), (0, -1)],
        [(1, -1), (1, 0), (1, 1), (2, 1)],
    ],
]);

/// Get the classic shape for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    CLASSIC_SHAPES.shape_of(kind, rotation)
}

/// Get the spawn (rotation 0) shape for a piece kind
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, Rotation::North)
}
