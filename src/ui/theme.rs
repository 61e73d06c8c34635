use crate::parser::token::TokenKind;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub identifier: Color,
    pub symbol: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub production: Color,       // Yellow for production names
    pub muted_production: Color, // Muted yellow for enclosing productions
}

impl Theme {
    /// Color of a token of this kind, in the token pane and tree leaves
    pub fn token_color(&self, kind: TokenKind) -> Color {
        match kind {
            TokenKind::Keyword | TokenKind::KeywordConstant => self.keyword,
            TokenKind::Identifier => self.identifier,
            TokenKind::Symbol | TokenKind::UnaryOp => self.symbol,
            TokenKind::IntegerConstant => self.number,
            TokenKind::StringConstant => self.string,
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),         // Blue for keywords
    string: Color::Rgb(250, 179, 135),          // Orange for strings
    number: Color::Rgb(250, 179, 135),          // Orange for numbers
    identifier: Color::Rgb(148, 226, 213),      // Teal for names
    symbol: Color::Rgb(205, 214, 244),          // Plain for symbols
    border_focused: Color::Rgb(249, 226, 175),  // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),   // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),    // Slightly lighter BG for current line
    production: Color::Rgb(249, 226, 175),      // Yellow for productions
    muted_production: Color::Rgb(180, 165, 120), // Muted yellow for the stack below the top
};
