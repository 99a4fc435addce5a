//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::{get_spawn_shape, GameSnapshot};
use crate::fb::{piece_color, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(20, 20, 30);
const GRID_FG: Rgb = Rgb::new(50, 50, 60);
const BORDER: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const LABEL: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
const VALUE: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const HELP: CellStyle = CellStyle::fg(Rgb::new(150, 150, 160)).dim();

/// Rows of key help under the side panel.
pub const KEY_HELP: [&str; 7] = [
    "←→  move",
    "↑   rotate",
    "Z   rotate ccw",
    "↓   soft drop",
    "SPC hard drop",
    "P   pause",
    "N   new  Q quit",
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Renders the well, the falling piece and the side panel.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up a terminal glyph.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered well in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        fb.draw_border(start_x, start_y, frame_w, frame_h, BORDER);

        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match snap.cell(x as usize, y as usize) {
                    Some(kind) => self.draw_block(fb, start_x, start_y, x, y, kind),
                    None => {
                        let style = CellStyle::fg(GRID_FG).on(WELL_BG);
                        self.fill_cell(fb, start_x, start_y, x, y, '·', style)
                    }
                }
            }
        }

        if let Some(active) = snap.current {
            for &(x, y) in active.cells.iter() {
                // Cells above the well are not drawn.
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    self.draw_block(fb, start_x, start_y, x as u16, y as u16, active.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.paused {
            self.draw_overlay(fb, start_x, start_y, "PAUSED");
        } else if snap.game_over {
            self.draw_overlay(fb, start_x, start_y, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle::fg(piece_color(kind)).on(WELL_BG).bold();
        self.fill_cell(fb, start_x, start_y, x, y, '█', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + x * self.cell_w;
        let py = start_y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let mut y = start_y;
        for (label, value) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("COMBO", snap.combo),
        ] {
            fb.put_str(panel_x, y, label, LABEL);
            fb.put_u32(panel_x, y + 1, value, VALUE);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", LABEL);
        y += 1;
        self.draw_preview(fb, panel_x, y, snap.next);
        y += 3;

        if y + KEY_HELP.len() as u16 <= viewport.height {
            for (i, line) in KEY_HELP.iter().enumerate() {
                fb.put_str(panel_x, y + i as u16, line, HELP);
            }
        }
    }

    /// Next piece in its spawn orientation, two rows tall.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::fg(piece_color(kind)).bold();
        for &(dx, dy) in get_spawn_shape(kind).iter() {
            if dx < 0 || dy < 0 {
                continue;
            }
            let px = x + dx as u16 * self.cell_w;
            fb.fill_rect(px, y + dy as u16, self.cell_w, 1, '█', style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, text: &str) {
        let (frame_w, frame_h) = self.frame_size();
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        fb.put_str_centered(start_x, frame_w, start_y + frame_h / 2, text, style);
    }
}
