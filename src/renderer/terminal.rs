//! Terminal renderer
//!
//! World pixels map onto a fixed character grid (10 px per column, 20 px per
//! row). A frame is composed into a [`Canvas`] first and then written out row
//! by row, so composition can be tested without a terminal.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use super::{Frame, Renderer};
use crate::sim::{Bounds, Facing, GamePhase, PlatformStyle, Rect};

pub const CELL_WIDTH: f32 = 10.0;
pub const CELL_HEIGHT: f32 = 20.0;
pub const COLUMNS: u16 = 80;
pub const ROWS: u16 = 30;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SKY: Color = Color::Reset;
const C_GROUND: Color = Color::DarkYellow;
const C_LEDGE: Color = Color::DarkRed;
const C_COIN: Color = Color::Yellow;
const C_ENEMY: Color = Color::Red;
const C_FLAG: Color = Color::Green;
const C_POLE: Color = Color::Grey;
const C_PLAYER: Color = Color::Blue;
const C_HUD: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE_BAD: Color = Color::Red;
const C_TITLE_GOOD: Color = Color::Green;
const C_TEXT: Color = Color::White;

const CONTROLS_HINT: &str = "Arrows/WASD: Move | Space: Jump | R: Restart Level | ESC: Menu";

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: C_SKY,
};

/// A character grid the size of the screen
#[derive(Debug, Clone)]
pub struct Canvas {
    cells: Vec<Cell>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            cells: vec![BLANK; COLUMNS as usize * ROWS as usize],
        }
    }
}

impl Canvas {
    /// Compose a whole frame
    pub fn from_frame(frame: &Frame<'_>) -> Self {
        let mut canvas = Self::default();
        canvas.compose(frame);
        canvas
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col < 0 || row < 0 || col >= COLUMNS as i32 || row >= ROWS as i32 {
            return;
        }
        self.cells[row as usize * COLUMNS as usize + col as usize] = Cell { ch, color };
    }

    /// Fill the cells covered by a world-space rectangle
    fn fill(&mut self, rect: Rect, camera_x: f32, ch: char, color: Color) {
        let first_col = ((rect.left() - camera_x) / CELL_WIDTH).floor() as i32;
        let last_col = ((rect.right() - camera_x) / CELL_WIDTH).ceil() as i32;
        let first_row = (rect.top() / CELL_HEIGHT).floor() as i32;
        let last_row = (rect.bottom() / CELL_HEIGHT).ceil() as i32;

        for row in first_row..last_row.max(first_row + 1) {
            for col in first_col..last_col.max(first_col + 1) {
                self.put(col, row, ch, color);
            }
        }
    }

    fn text(&mut self, col: i32, row: i32, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, color);
        }
    }

    fn centered(&mut self, row: i32, text: &str, color: Color) {
        let col = (COLUMNS as i32 - text.chars().count() as i32) / 2;
        self.text(col.max(0), row, text, color);
    }

    /// Characters of one row, for inspection
    pub fn row_text(&self, row: u16) -> String {
        let start = row as usize * COLUMNS as usize;
        self.cells[start..start + COLUMNS as usize]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    fn compose(&mut self, frame: &Frame<'_>) {
        let cam = frame.camera_x;

        for platform in frame.platforms {
            let (ch, color) = match platform.style {
                PlatformStyle::Ground => ('▒', C_GROUND),
                PlatformStyle::Ledge => ('█', C_LEDGE),
            };
            self.fill(platform.rect, cam, ch, color);
        }

        for coin in &frame.coins {
            let mut rect = coin.bounds();
            rect.pos.y += coin.bob_offset();
            self.fill(rect, cam, 'o', C_COIN);
        }

        for enemy in &frame.enemies {
            let rect = enemy.bounds();
            // Two-frame shuffle
            let ch = if enemy.animation < crate::consts::ENEMY_ANIMATION_PERIOD / 2 {
                'M'
            } else {
                'W'
            };
            self.fill(rect, cam, ch, C_ENEMY);
        }

        if let Some(flag) = frame.flag {
            let pole = Rect::new(flag.pos.x, flag.pos.y, 1.0, flag.size.y);
            self.fill(pole, cam, '|', C_POLE);
            let banner_col = ((flag.pos.x - cam) / CELL_WIDTH).floor() as i32 + 1;
            let banner_row = (flag.pos.y / CELL_HEIGHT).floor() as i32;
            let banner = if flag.wave.sin() >= 0.0 { ">>" } else { "> " };
            self.text(banner_col, banner_row, banner, C_FLAG);
        }

        if frame.player_visible {
            let player = frame.player;
            self.fill(player.bounds(), cam, '#', C_PLAYER);
            let head_col = ((player.pos.x - cam) / CELL_WIDTH).floor() as i32;
            let head_row = (player.pos.y / CELL_HEIGHT).floor() as i32;
            let face = match player.facing {
                Facing::Left => "<o ",
                Facing::Right => " o>",
            };
            self.text(head_col, head_row, face, C_PLAYER);
        }

        self.draw_hud(frame);
        self.draw_overlay(frame);
    }

    fn draw_hud(&mut self, frame: &Frame<'_>) {
        let hud = &frame.hud;
        self.text(2, 0, &format!("Lives: {}", hud.lives), C_HUD);
        self.text(20, 0, &format!("Score: {}", hud.score), C_HUD);
        self.text(44, 0, &format!("Coins: {}", hud.coins), C_HUD);
        self.text(
            64,
            0,
            &format!("Level: {}/{}", hud.level, hud.final_level),
            C_HUD,
        );

        if frame.phase == GamePhase::Playing && frame.show_controls {
            self.centered(ROWS as i32 - 1, CONTROLS_HINT, C_HINT);
        }
    }

    fn draw_overlay(&mut self, frame: &Frame<'_>) {
        let lines = frame.overlay_lines();
        if lines.is_empty() {
            return;
        }

        let title_color = match frame.phase {
            GamePhase::GameOver => C_TITLE_BAD,
            GamePhase::Menu => C_TITLE_BAD,
            _ => C_TITLE_GOOD,
        };

        let start_row = (ROWS as i32 - lines.len() as i32 * 2) / 2;
        for (i, line) in lines.iter().enumerate() {
            let row = start_row + i as i32 * 2;
            // Blank band behind the text so it reads over the level
            for col in 0..COLUMNS as i32 {
                self.put(col, row, ' ', C_SKY);
            }
            let color = if i == 0 { title_color } else { C_TEXT };
            self.centered(row, line, color);
        }
    }
}

/// Draws frames to a terminal in raw mode
pub struct TerminalRenderer<W: Write> {
    out: W,
    canvas: Canvas,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            canvas: Canvas::default(),
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> std::io::Result<()> {
        self.canvas.clear();
        self.canvas.compose(frame);

        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        for row in 0..ROWS {
            self.out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * COLUMNS as usize;
            let cells = &self.canvas.cells[start..start + COLUMNS as usize];

            // One colour change per run of same-coloured cells
            let mut run = String::new();
            let mut run_color = cells[0].color;
            for cell in cells {
                if cell.color != run_color {
                    self.out.queue(style::SetForegroundColor(run_color))?;
                    self.out.queue(Print(&run))?;
                    run.clear();
                    run_color = cell.color;
                }
                run.push(cell.ch);
            }
            self.out.queue(style::SetForegroundColor(run_color))?;
            self.out.queue(Print(&run))?;
        }

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, ROWS))?;
        self.out.flush()
    }
}
