//! Piece module - the falling tetromino as a pure coordinate transform
//!
//! A piece is a kind, a rotation and an anchor. It knows nothing about the
//! board: movement and rotation always succeed, and the caller decides whether
//! the result is legal (rolling back with the inverse operation if not).

use crate::pieces::{PieceShape, ShapeTable, CLASSIC_SHAPES};
use crate::types::{PieceKind, Rotation, SPAWN_X, SPAWN_Y};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    shapes: &'static ShapeTable,
}

impl Piece {
    /// Create a piece at an arbitrary anchor using the classic shapes
    pub fn new(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Self {
        Self::with_table(kind, rotation, x, y, &CLASSIC_SHAPES)
    }

    pub fn with_table(
        kind: PieceKind,
        rotation: Rotation,
        x: i8,
        y: i8,
        shapes: &'static ShapeTable,
    ) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
            shapes,
        }
    }

    /// Create a piece at the top-centre spawn anchor, rotation 0
    pub fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, Rotation::North, SPAWN_X, SPAWN_Y)
    }

    /// Shift the anchor; no bounds checking
    pub fn translate(&mut self, dx: i8, dy: i8) {
        self.x += dx;
        self.y += dy;
    }

    pub fn rotate_cw(&mut self) {
        self.rotation = self.rotation.rotate_cw();
    }

    pub fn rotate_ccw(&mut self) {
        self.rotation = self.rotation.rotate_ccw();
    }

    /// Rotate one step; `rotate(!clockwise)` undoes it
    pub fn rotate(&mut self, clockwise: bool) {
        if clockwise {
            self.rotate_cw();
        } else {
            self.rotate_ccw();
        }
    }

    /// Mino offsets for the current rotation
    pub fn offsets(&self) -> PieceShape {
        self.shapes.shape_of(self.kind, self.rotation)
    }

    /// Absolute board cells (anchor + offsets)
    pub fn cells(&self) -> PieceShape {
        let mut cells = self.offsets();
        for cell in &mut cells {
            cell.0 += self.x;
            cell.1 += self.y;
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_anchor() {
        let piece = Piece::spawn(PieceKind::T);
        assert_eq!((piece.x, piece.y), (3, 0));
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!(piece.cells(), [(3, 0), (4, 0), (5, 0), (4, 1)]);
    }

    #[test]
    fn test_translate_has_no_bounds() {
        let mut piece = Piece::spawn(PieceKind::O);
        piece.translate(-10, -10);
        assert_eq!(piece.cells(), [(-7, -10), (-6, -10), (-7, -9), (-6, -9)]);
    }

    #[test]
    fn test_rotate_and_back() {
        let mut piece = Piece::spawn(PieceKind::L);
        let before = piece.cells();
        piece.rotate(true);
        assert_ne!(piece.cells(), before);
        piece.rotate(false);
        assert_eq!(piece.cells(), before);
    }

    #[test]
    fn test_vertical_i_sits_above_anchor() {
        let mut piece = Piece::spawn(PieceKind::I);
        piece.rotate_cw();
        assert_eq!(piece.cells(), [(4, -1), (4, 0), (4, 1), (4, 2)]);
    }
}
