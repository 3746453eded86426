//! Color types with automatic degradation support

use crate::terminal::TerminalCapabilities;

/// Color representation, degraded to what the terminal supports at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// True color RGB
    Rgb(u8, u8, u8),
    /// 16-color ANSI
    Ansi16(AnsiColor),
}

/// 16-color ANSI palette, in escape-code order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

const ANSI_PALETTE: [(AnsiColor, (u8, u8, u8)); 16] = [
    (AnsiColor::Black, (0, 0, 0)),
    (AnsiColor::Red, (170, 0, 0)),
    (AnsiColor::Green, (0, 170, 0)),
    (AnsiColor::Yellow, (170, 85, 0)),
    (AnsiColor::Blue, (0, 0, 170)),
    (AnsiColor::Magenta, (170, 0, 170)),
    (AnsiColor::Cyan, (0, 170, 170)),
    (AnsiColor::White, (170, 170, 170)),
    (AnsiColor::BrightBlack, (85, 85, 85)),
    (AnsiColor::BrightRed, (255, 85, 85)),
    (AnsiColor::BrightGreen, (85, 255, 85)),
    (AnsiColor::BrightYellow, (255, 255, 85)),
    (AnsiColor::BrightBlue, (85, 85, 255)),
    (AnsiColor::BrightMagenta, (255, 85, 255)),
    (AnsiColor::BrightCyan, (85, 255, 255)),
    (AnsiColor::BrightWhite, (255, 255, 255)),
];

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }

    pub fn white() -> Self {
        Color::Rgb(255, 255, 255)
    }

    pub fn black() -> Self {
        Color::Rgb(0, 0, 0)
    }

    pub fn dark_gray() -> Self {
        Color::Rgb(128, 128, 128)
    }

    fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Ansi16(a) => a.to_rgb(),
        }
    }

    /// Foreground escape sequence for the given capabilities
    pub fn degrade(&self, caps: &TerminalCapabilities) -> String {
        self.sequence(caps, false)
    }

    /// Background escape sequence for the given capabilities
    pub fn bg(&self, caps: &TerminalCapabilities) -> String {
        self.sequence(caps, true)
    }

    fn sequence(&self, caps: &TerminalCapabilities, background: bool) -> String {
        if let Color::Ansi16(a) = self {
            return a.code(background);
        }

        let (r, g, b) = self.to_rgb();
        let layer = if background { 48 } else { 38 };
        if caps.truecolor {
            format!("\x1b[{};2;{};{};{}m", layer, r, g, b)
        } else if caps.colors_256 {
            format!("\x1b[{};5;{}m", layer, rgb_to_256(r, g, b))
        } else {
            nearest_ansi16(r, g, b).code(background)
        }
    }
}

impl AnsiColor {
    fn index(self) -> u8 {
        ANSI_PALETTE
            .iter()
            .position(|(c, _)| *c == self)
            .unwrap_or(15) as u8
    }

    fn to_rgb(self) -> (u8, u8, u8) {
        ANSI_PALETTE[self.index() as usize].1
    }

    fn code(self, background: bool) -> String {
        let idx = self.index();
        let base = match (idx < 8, background) {
            (true, false) => 30,
            (true, true) => 40,
            (false, false) => 90 - 8,
            (false, true) => 100 - 8,
        };
        format!("\x1b[{}m", base + idx as u16)
    }
}

/// Convert RGB to 256-color palette index
pub(crate) fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return ((r - 8) / 10) + 232;
    }

    let scale = |c: u8| (c as u16 * 5 / 255) as u8;
    16 + 36 * scale(r) + 6 * scale(g) + scale(b)
}

/// Closest ANSI 16 color by squared RGB distance
pub(crate) fn nearest_ansi16(r: u8, g: u8, b: u8) -> AnsiColor {
    let distance = |(pr, pg, pb): (u8, u8, u8)| {
        let d = |a: u8, b: u8| (a as i32 - b as i32).pow(2);
        d(r, pr) + d(g, pg) + d(b, pb)
    };

    ANSI_PALETTE
        .iter()
        .min_by_key(|(_, rgb)| distance(*rgb))
        .map(|(c, _)| *c)
        .unwrap_or(AnsiColor::White)
}
