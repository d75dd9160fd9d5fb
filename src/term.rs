use std::io::{self, Stdout, Write, stdout};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::{Attribute, Color};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::world::{Frame, World};
use crate::{Coords, Grid};

// Party mode cycles through the six colors after black.
const PARTY_COLORS: u8 = 6;

/// Something the game loop can paint the world onto.
pub trait Screen {
    /// Repaints everything: snake, food and score.
    fn draw_world(&mut self, world: &World) -> io::Result<()>;

    /// Paints only the cells a tick changed.
    fn draw_frame(&mut self, frame: &Frame) -> io::Result<()>;
}

/// Cell color picker. In party mode every painted cell takes the next color.
#[derive(Debug, Clone)]
pub struct Palette {
    color: u8,
    party: bool,
}

impl Palette {
    pub fn new(color: u8, party: bool) -> Self {
        Palette { color, party }
    }

    pub fn next(&mut self) -> u8 {
        if self.party {
            let c = self.color % PARTY_COLORS + 2;
            self.color = (self.color % PARTY_COLORS + 1) % PARTY_COLORS;
            c
        } else {
            self.color
        }
    }
}

pub struct TermManager {
    stdout: Stdout,
    palette: Palette,
}

impl TermManager {
    pub fn new(palette: Palette) -> Self {
        TermManager { stdout: stdout(), palette }
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn grid(&self) -> io::Result<Grid> {
        let (w, h) = terminal::size()?;
        Ok(Grid::new(w, h))
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn paint(&mut self, pos: Coords) -> io::Result<()> {
        let color = self.palette.next();
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1))?;

        match ansi_color(color) {
            Some(c) => queue!(self.stdout, style::SetBackgroundColor(c), style::Print(' '))?,
            None => queue!(self.stdout, style::SetAttribute(Attribute::Reverse), style::Print(' '))?,
        }

        queue!(self.stdout, style::ResetColor, style::SetAttribute(Attribute::Reset))
    }

    fn erase(&mut self, pos: Coords) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(' '))
    }

    fn print_score(&mut self, score: u64) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(0, 0), style::Print(score))
    }
}

impl Screen for TermManager {
    fn draw_world(&mut self, world: &World) -> io::Result<()> {
        self.clear()?;

        for pos in world.foods() {
            self.paint(pos)?;
        }
        for pos in world.snake().body() {
            self.paint(pos)?;
        }

        self.print_score(world.score())?;
        self.flush()
    }

    fn draw_frame(&mut self, frame: &Frame) -> io::Result<()> {
        if let Some(tail) = frame.vacated_tail {
            self.erase(tail)?;
        }
        for pos in &frame.spawned {
            self.paint(*pos)?;
        }
        // Eaten food sits under the new head, which is painted over it.
        self.paint(frame.new_head)?;

        self.print_score(frame.score)?;
        self.flush()
    }
}

/// Color indices follow the usual 8-color terminal order, shifted by one so
/// that 0 means "reverse video in the default colors".
fn ansi_color(index: u8) -> Option<Color> {
    match index {
        1 => Some(Color::Black),
        2 => Some(Color::DarkRed),
        3 => Some(Color::DarkGreen),
        4 => Some(Color::DarkYellow),
        5 => Some(Color::DarkBlue),
        6 => Some(Color::DarkMagenta),
        7 => Some(Color::DarkCyan),
        8 => Some(Color::Grey),
        9 => Some(Color::White),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_palette_is_fixed() {
        let mut palette = Palette::new(3, false);
        assert_eq!(palette.next(), 3);
        assert_eq!(palette.next(), 3);
    }

    #[test]
    fn test_party_palette_cycles() {
        let mut palette = Palette::new(3, true);
        let colors: Vec<u8> = (0..7).map(|_| palette.next()).collect();
        assert_eq!(colors, vec![5, 6, 7, 2, 3, 4, 5]);
    }

    #[test]
    fn test_party_palette_survives_high_start() {
        let mut palette = Palette::new(250, true);
        let colors: Vec<u8> = (0..10).map(|_| palette.next()).collect();
        assert_eq!(colors, vec![6, 7, 2, 3, 4, 5, 6, 7, 2, 3]);
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(ansi_color(0), None);
        assert_eq!(ansi_color(3), Some(Color::DarkGreen));
        assert_eq!(ansi_color(9), Some(Color::White));
    }
}
