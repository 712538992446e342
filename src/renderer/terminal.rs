//! Character-grid renderer for ANSI terminals
//!
//! Each packet is stamped as its shape glyph over a footprint of
//! `ceil(radius)` cells; the player is drawn last as `@`. Row 0 carries the
//! HUD, the board starts on row 1.

use std::io::{self, Write};

use crossterm::{cursor, queue, style, terminal};

use super::FrameSink;
use crate::sim::{Bounds, FrameSnapshot, Shape};

/// Rows reserved above the board for the HUD
const BOARD_OFFSET: u16 = 1;

pub const PLAYER_GLYPH: char = '@';

pub struct TerminalRenderer<W: Write> {
    out: W,
    width: usize,
    height: usize,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, bounds: Bounds) -> Self {
        Self {
            out,
            width: bounds.width as usize,
            height: bounds.height as usize,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for TerminalRenderer<W> {
    fn present(&mut self, frame: &FrameSnapshot) -> io::Result<()> {
        let grid = rasterize(frame, self.width, self.height);

        let hud = format!(
            "Packets: {}  Amount: {:.2}  Time left: {:.1}s  (WASD/arrows move, Q quits)",
            frame.collected_count,
            frame.collected_amount,
            frame.remaining_ms as f64 / 1000.0,
        );
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            style::Print(hud),
            terminal::Clear(terminal::ClearType::UntilNewLine),
        )?;
        for (y, row) in grid.iter().enumerate() {
            let line: String = row.iter().collect();
            queue!(
                self.out,
                cursor::MoveTo(0, y as u16 + BOARD_OFFSET),
                style::Print(line),
            )?;
        }
        self.out.flush()
    }
}

/// Build the `height × width` character grid for a frame
pub fn rasterize(frame: &FrameSnapshot, width: usize, height: usize) -> Vec<Vec<char>> {
    let mut grid = vec![vec![' '; width]; height];

    for c in &frame.collectibles {
        let cx = c.pos.x.round() as i64;
        let cy = c.pos.y.round() as i64;
        let r = c.radius.ceil() as i64;
        for dy in -r..=r {
            for dx in -r..=r {
                if covers(c.shape, dx, dy, r) {
                    plot(&mut grid, cx + dx, cy + dy, c.symbol);
                }
            }
        }
    }

    plot(
        &mut grid,
        frame.player.pos.x.round() as i64,
        frame.player.pos.y.round() as i64,
        PLAYER_GLYPH,
    );
    grid
}

fn plot(grid: &mut [Vec<char>], x: i64, y: i64, ch: char) {
    if x < 0 || y < 0 {
        return;
    }
    if let Some(cell) = grid
        .get_mut(y as usize)
        .and_then(|row| row.get_mut(x as usize))
    {
        *cell = ch;
    }
}

/// Whether offset `(dx, dy)` from the centre belongs to the shape's footprint
fn covers(shape: Shape, dx: i64, dy: i64, r: i64) -> bool {
    let dist = ((dx * dx + dy * dy) as f64).sqrt();
    let r_f = r as f64;
    match shape {
        Shape::Circle => dist <= r_f,
        Shape::Square => dx.abs() <= r && dy.abs() <= r,
        Shape::Triangle => dy >= -r && dy <= 0 && dx.abs() <= r + dy,
        Shape::Diamond => dx.abs() + dy.abs() <= r,
        Shape::Heart => {
            let half = r / 2;
            dx * dx + (dy + half) * (dy + half) <= r * r
                || dx * dx + (dy - half) * (dy - half) <= r * r
        }
        Shape::Star => dist <= r_f && (dx == 0 || dy == 0 || dx.abs() == dy.abs()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{CollectibleView, DVec2, PlayerView, SizeTier};

    fn frame(collectibles: Vec<CollectibleView>, player: DVec2) -> FrameSnapshot {
        FrameSnapshot {
            tick: 3,
            remaining_ms: 2500,
            player: PlayerView {
                pos: player,
                radius: 1.5,
            },
            collectibles,
            collected_count: 2,
            collected_amount: 7.25,
        }
    }

    fn view(shape: Shape, radius: f64, x: f64, y: f64) -> CollectibleView {
        CollectibleView {
            id: 0,
            shape,
            size: SizeTier::Medium,
            radius,
            pos: DVec2::new(x, y),
            symbol: shape.symbol(),
        }
    }

    #[test]
    fn test_circle_footprint() {
        let f = frame(vec![view(Shape::Circle, 0.6, 5.0, 5.0)], DVec2::new(0.0, 0.0));
        let grid = rasterize(&f, 10, 10);
        assert_eq!(grid[5][5], '●');
        assert_eq!(grid[4][5], '●');
        assert_eq!(grid[5][6], '●');
        assert_eq!(grid[4][4], ' ');
        assert_eq!(grid[0][0], PLAYER_GLYPH);
    }

    #[test]
    fn test_square_and_star_footprints() {
        let f = frame(
            vec![
                view(Shape::Square, 1.0, 2.0, 2.0),
                view(Shape::Star, 2.5, 12.0, 5.0),
            ],
            DVec2::new(19.0, 9.0),
        );
        let grid = rasterize(&f, 20, 10);
        assert_eq!(grid[1][1], '■');
        assert_eq!(grid[3][3], '■');
        assert_eq!(grid[7][14], '★');
        assert_eq!(grid[8][15], ' ');
        assert_eq!(grid[5][15], '★');
        assert_eq!(grid[6][14], ' ');
    }

    #[test]
    fn test_edges_clip() {
        let f = frame(vec![view(Shape::Diamond, 2.5, 0.0, 0.0)], DVec2::new(50.0, 50.0));
        let grid = rasterize(&f, 4, 4);
        assert_eq!(grid[0][0], '♦');
        assert_eq!(grid[0][3], '♦');
        assert_eq!(grid[3][0], '♦');
        assert_eq!(grid[3][3], ' ');
        // Off-board player is simply not drawn
        assert!(grid.iter().flatten().all(|&ch| ch != PLAYER_GLYPH));
    }

    #[test]
    fn test_player_drawn_over_packets() {
        let f = frame(vec![view(Shape::Heart, 1.0, 2.0, 2.0)], DVec2::new(2.2, 1.8));
        let grid = rasterize(&f, 5, 5);
        assert_eq!(grid[2][2], PLAYER_GLYPH);
    }

    #[test]
    fn test_present_writes_hud() {
        let f = frame(Vec::new(), DVec2::new(1.0, 1.0));
        let mut renderer = TerminalRenderer::new(Vec::new(), Bounds::new(4.0, 2.0));
        renderer.present(&f).unwrap();
        let text = String::from_utf8_lossy(&renderer.into_inner()).into_owned();
        assert!(text.contains("Packets: 2"));
        assert!(text.contains("Amount: 7.25"));
        assert!(text.contains("Time left: 2.5s"));
        assert!(text.contains('@'));
    }
}
