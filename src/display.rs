//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! world-pixel positions into terminal cells and queues crossterm commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::assets::Sprite;
use crate::constants::{BACKGROUND_REPEAT, WIN_SCORE, WORLD_HEIGHT, WORLD_WIDTH};
use crate::entities::{BoundingBox, GameState};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_CLEAR: Color = Color::White;
const C_STAR: Color = Color::White;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_MESSAGE: Color = Color::Black;

const SPRITE_GLYPH: &str = "█";
const STAR_GLYPH: &str = "·";

/// Background texture rows repeat every this many world pixels.
const STAR_BAND: i32 = 20;

const HINT: &str = "← → / A D : Move   SPACE : Shoot   Q : Quit";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Cell rectangle on screen; `col1` and `row1` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellRect {
    pub col0: u16,
    pub row0: u16,
    pub col1: u16,
    pub row1: u16,
}

/// Maps the fixed-size world onto a `cols × rows` grid of terminal cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// Play area for a terminal of the given size; the last row is kept
    /// for the HUD.
    pub fn for_terminal(width: u16, height: u16) -> Self {
        Viewport {
            cols: width.max(1),
            rows: height.saturating_sub(1).max(1),
        }
    }

    fn col_of(&self, x: i32) -> i32 {
        (x * self.cols as i32).div_euclid(WORLD_WIDTH)
    }

    fn row_of(&self, y: i32) -> i32 {
        (y * self.rows as i32).div_euclid(WORLD_HEIGHT)
    }

    /// World y at the top edge of screen row `row`.
    fn world_y_of(&self, row: u16) -> i32 {
        row as i32 * WORLD_HEIGHT / self.rows as i32
    }

    /// Project a world box onto the grid, clipped to the screen.  Any box
    /// that touches the screen covers at least one cell.
    pub fn project(&self, bounds: &BoundingBox) -> Option<CellRect> {
        let col0 = self.col_of(bounds.left);
        let row0 = self.row_of(bounds.top);
        let col1 = self.col_of(bounds.right).max(col0 + 1);
        let row1 = self.row_of(bounds.bottom).max(row0 + 1);

        let (cols, rows) = (self.cols as i32, self.rows as i32);
        if col1 <= 0 || row1 <= 0 || col0 >= cols || row0 >= rows {
            return None;
        }
        Some(CellRect {
            col0: col0.max(0) as u16,
            row0: row0.max(0) as u16,
            col1: col1.min(cols) as u16,
            row1: row1.min(rows) as u16,
        })
    }
}

/// Top edges of the background copies for a scroll offset.  The first copy
/// sits at `offset % height`, each further copy one image height above.
pub fn background_offsets(scroll_offset: i32, height: i32) -> Vec<i32> {
    let base = if height > 0 { scroll_offset % height } else { 0 };
    (0..BACKGROUND_REPEAT).map(|i| base - i * height).collect()
}

/// The message overlaid once the score hits the win threshold exactly.
pub fn win_message() -> [String; 2] {
    [
        format!("Congratulations, you've hit {} points!", WIN_SCORE),
        "The game is now over.".to_string(),
    ]
}

fn tint(sprite: &Sprite) -> Color {
    let [r, g, b] = sprite.tint;
    Color::Rgb { r, g, b }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(C_CLEAR))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_background(out, state, view)?;

    draw_sprite(
        out,
        view,
        &BoundingBox::new(state.player.x, state.player.y, state.player.width, state.player.height),
        &state.player.sprite,
    )?;
    for projectile in &state.projectiles {
        draw_sprite(out, view, &projectile.bounds(), &projectile.sprite)?;
    }
    for enemy in &state.enemies {
        draw_sprite(out, view, &enemy.bounds(), &enemy.sprite)?;
    }

    if state.score == WIN_SCORE {
        draw_win_message(out, view)?;
    }
    draw_hud(out, state, view)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_background<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let height = state.background.height;
    if height <= 0 {
        return Ok(());
    }
    let tops = background_offsets(state.scroll_offset, height);

    out.queue(style::SetBackgroundColor(tint(&state.background)))?;
    out.queue(style::SetForegroundColor(C_STAR))?;

    for row in 0..view.rows {
        let world_y = view.world_y_of(row);
        // Only rows covered by one of the copies are painted.
        let Some(top) = tops.iter().find(|&&t| world_y >= t && world_y < t + height) else {
            continue;
        };
        let band = (world_y - top) / STAR_BAND;

        let line: String = (0..view.cols as i32)
            .map(|col| {
                if (col * 7 + band * 13) % 23 == 0 {
                    STAR_GLYPH
                } else {
                    " "
                }
            })
            .collect();
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(line))?;
    }

    out.queue(style::SetBackgroundColor(C_CLEAR))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    bounds: &BoundingBox,
    sprite: &Sprite,
) -> std::io::Result<()> {
    let Some(cells) = view.project(bounds) else {
        return Ok(());
    };
    let line = SPRITE_GLYPH.repeat((cells.col1 - cells.col0) as usize);

    out.queue(style::SetForegroundColor(tint(sprite)))?;
    for row in cells.row0..cells.row1 {
        out.queue(cursor::MoveTo(cells.col0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_win_message<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let lines = win_message();
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetBackgroundColor(C_CLEAR))?;
    out.queue(style::SetForegroundColor(C_MESSAGE))?;
    for (i, msg) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

/// Score and controls on the row below the play area.
fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(Color::Black))?;
    out.queue(cursor::MoveTo(0, view.rows))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;

    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    let score = format!("Score: {:>2}/{}", state.score, WIN_SCORE);
    out.queue(Print(&score))?;

    out.queue(cursor::MoveTo(score.chars().count() as u16 + 3, view.rows))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(HINT))?;
    Ok(())
}
