//! Text renderer for terminals
//!
//! Scales the playfield onto the character grid. A cell shows whatever the
//! playfield contains under it, with the ground drawn over pipes and the
//! bird drawn over pipes (same layering as the sprite version).

use std::io::Write;

use crossterm::style::Print;
use crossterm::{cursor, queue, terminal};

use super::Renderer;
use crate::error::Result;
use crate::sim::{GamePhase, Rect, Snapshot};

const SKY: char = ' ';
const PIPE: char = '#';
const GROUND: char = '=';
const BIRD: char = '@';

/// Playfield heights of the overlay text, in playfield units
const SCORE_Y: f32 = 50.0;
const GAME_OVER_Y: f32 = 200.0;

const STATUS_LINE: &str = " space/up/enter: flap   q/esc: quit";

/// Draw a snapshot as `rows` lines of `cols` characters
///
/// The last row is a status line; the rest is playfield.
pub fn rasterize(snapshot: &Snapshot, cols: u16, rows: u16) -> Vec<String> {
    let cols = cols as usize;
    let rows = rows as usize;
    if cols == 0 || rows == 0 {
        return Vec::new();
    }

    let field_rows = rows.saturating_sub(1).max(1);
    let cell_w = snapshot.screen_width / cols as f32;
    let cell_h = snapshot.screen_height / field_rows as f32;
    let show_bird = snapshot.phase != GamePhase::Start;

    let mut grid: Vec<Vec<char>> = (0..field_rows)
        .map(|r| {
            let top = r as f32 * cell_h;
            (0..cols)
                .map(|c| {
                    let cell = Rect::new(c as f32 * cell_w, top, cell_w, cell_h);
                    if top + cell_h / 2.0 >= snapshot.ground_y {
                        GROUND
                    } else if show_bird && cell.overlaps(&snapshot.bird) {
                        BIRD
                    } else if snapshot
                        .pipes
                        .iter()
                        .any(|p| cell.overlaps(&p.top) || cell.overlaps(&p.bottom))
                    {
                        PIPE
                    } else {
                        SKY
                    }
                })
                .collect()
        })
        .collect();

    let row_at = |y: f32| ((y / cell_h) as usize).min(field_rows - 1);
    match snapshot.phase {
        GamePhase::Start => {
            overlay(&mut grid, row_at(SCORE_Y), "GET READY");
            overlay(&mut grid, row_at(SCORE_Y) + 1, "press space to flap");
        }
        GamePhase::Playing => {
            overlay(&mut grid, row_at(SCORE_Y), &snapshot.score.to_string());
        }
        GamePhase::GameOver => {
            overlay(&mut grid, row_at(SCORE_Y), &snapshot.score.to_string());
            overlay(&mut grid, row_at(GAME_OVER_Y), "GAME OVER");
            overlay(&mut grid, row_at(GAME_OVER_Y) + 1, "press space to restart");
        }
    }

    let mut lines: Vec<String> = grid.into_iter().map(|row| row.into_iter().collect()).collect();
    if rows > 1 {
        let status: String = STATUS_LINE.chars().take(cols).collect();
        lines.push(format!("{status:<cols$}"));
    }
    lines
}

/// Write `text` centered on `row`, clipped to the grid
fn overlay(grid: &mut [Vec<char>], row: usize, text: &str) {
    let Some(line) = grid.get_mut(row) else {
        return;
    };
    let len = text.chars().count();
    let start = line.len().saturating_sub(len) / 2;
    for (slot, ch) in line.iter_mut().skip(start).zip(text.chars()) {
        *slot = ch;
    }
}

/// Draws snapshots to a crossterm-compatible writer
pub struct TerminalRenderer<W: Write> {
    out: W,
    /// Fixed grid size; `None` follows the real terminal size
    size: Option<(u16, u16)>,
    last_size: Option<(u16, u16)>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            size: None,
            last_size: None,
        }
    }

    /// Render into a grid of fixed size (for non-tty writers)
    pub fn with_size(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            size: Some((cols, rows)),
            last_size: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()> {
        let (cols, rows) = match self.size {
            Some(size) => size,
            None => terminal::size()?,
        };
        if self.last_size != Some((cols, rows)) {
            queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
            self.last_size = Some((cols, rows));
        }
        for (row, line) in rasterize(snapshot, cols, rows).iter().enumerate() {
            queue!(self.out, cursor::MoveTo(0, row as u16), Print(line))?;
        }
        self.out.flush()?;
        Ok(())
    }
}
