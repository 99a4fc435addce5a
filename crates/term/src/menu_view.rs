//! Full-screen menus: start menu, difficulty picker, game-over summary and the
//! high-score table.

use crate::core::FinalStats;
use crate::fb::{piece_color, CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;
use crate::types::{PieceKind, HIGH_SCORES_SHOWN};

const TITLE: &str = "B L O C K F A L L";
const ITEM: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const SELECTED: CellStyle = CellStyle::fg(Rgb::new(0, 0, 0))
    .on(Rgb::new(220, 220, 220))
    .bold();
const ERROR: CellStyle = CellStyle::fg(Rgb::new(230, 90, 90));
const HINT: CellStyle = CellStyle::fg(Rgb::new(150, 150, 160)).dim();
const HEADING: CellStyle = CellStyle::fg(Rgb::new(255, 255, 255)).bold();

/// What the game-over screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverSummary {
    pub stats: FinalStats,
    pub rank: Option<usize>,
    pub saved: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MenuView;

impl MenuView {
    /// A title, a vertical list of items with one highlighted, and a hint line.
    pub fn render_menu(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        heading: &str,
        items: &[&str],
        selected: usize,
    ) {
        let top = self.begin(fb, viewport, items.len() as u16 + 6);
        let w = viewport.width;

        fb.put_str_centered(0, w, top + 2, heading, HEADING);

        let item_w = items.iter().map(|s| s.chars().count()).max().unwrap_or(0) as u16 + 4;
        let item_x = w.saturating_sub(item_w) / 2;
        for (i, item) in items.iter().enumerate() {
            let y = top + 4 + i as u16;
            let style = if i == selected { SELECTED } else { ITEM };
            fb.fill_rect(item_x, y, item_w, 1, ' ', style);
            fb.put_str_centered(item_x, item_w, y, item, style);
        }

        let hint_y = top + 5 + items.len() as u16;
        fb.put_str_centered(0, w, hint_y, "↑↓ choose  ENTER select  Q quit", HINT);
    }

    pub fn render_game_over(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        summary: &GameOverSummary,
    ) {
        let top = self.begin(fb, viewport, 10);
        let w = viewport.width;
        let x = w.saturating_sub(18) / 2;

        fb.put_str_centered(0, w, top + 2, "GAME OVER", HEADING);

        let rows = [
            ("Final score", summary.stats.score),
            ("Level", summary.stats.level),
            ("Lines", summary.stats.lines),
        ];
        for (i, (label, value)) in rows.iter().enumerate() {
            let y = top + 4 + i as u16;
            fb.put_str(x, y, label, ITEM);
            fb.put_u32(x + 13, y, *value, HEADING);
        }

        let y = top + 8;
        match (summary.saved, summary.rank) {
            (false, _) => {
                fb.put_str_centered(0, w, y, "Score could not be saved", ERROR);
            }
            (true, Some(rank)) => {
                let end = fb.put_str(x, y, "New high score #", HEADING);
                fb.put_u32(end, y, rank as u32, HEADING);
            }
            (true, None) => {}
        }

        fb.put_str_centered(0, w, top + 10, "ENTER continue", HINT);
    }

    pub fn render_high_scores(&self, fb: &mut FrameBuffer, viewport: Viewport, scores: &[u32]) {
        let top = self.begin(fb, viewport, HIGH_SCORES_SHOWN as u16 + 7);
        let w = viewport.width;
        let x = w.saturating_sub(16) / 2;

        fb.put_str_centered(0, w, top + 2, "HIGH SCORES", HEADING);
        fb.put_str(x, top + 4, "Rank    Score", ITEM);
        fb.put_str(x, top + 5, "-------------", HINT);

        if scores.is_empty() {
            fb.put_str_centered(0, w, top + 6, "No scores yet", ITEM);
        }
        for (i, score) in scores.iter().take(HIGH_SCORES_SHOWN).enumerate() {
            let y = top + 6 + i as u16;
            let end = fb.put_u32(x, y, i as u32 + 1, ITEM);
            fb.put_char(end, y, '.', ITEM);
            fb.put_u32(x + 8, y, *score, HEADING);
        }

        fb.put_str_centered(0, w, top + 7 + HIGH_SCORES_SHOWN as u16, "ESC back", HINT);
    }

    /// Clear the screen, draw the title and return the top row of the content.
    fn begin(&self, fb: &mut FrameBuffer, viewport: Viewport, content_h: u16) -> u16 {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let top = viewport.height.saturating_sub(content_h + 2) / 2;

        // Title letters take the piece palette in turn.
        let title_w = TITLE.chars().count() as u16;
        let mut x = viewport.width.saturating_sub(title_w) / 2;
        for (i, ch) in TITLE.chars().enumerate() {
            let kind = PieceKind::ALL[(i / 2) % PieceKind::ALL.len()];
            fb.put_char(x, top, ch, CellStyle::fg(piece_color(kind)).bold());
            x += 1;
        }
        top
    }
}
