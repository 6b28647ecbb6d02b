use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use tetrion_engine::{GameState, SessionState};

use crate::view::widgets::{BoardDisplay, PieceDisplay, StatsDisplay, color, style};

/// Full game screen: stats on the left, the board in the middle and the
/// next shape on the right. Pause and game over are shown as a popup over
/// the board.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    game: &'a GameState,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> GameDisplay<'a> {
    pub fn new(game: &'a GameState) -> Self {
        Self {
            game,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    pub fn height(&self) -> u16 {
        let board = BoardDisplay::new(self.game.board()).block(Block::bordered());
        board.height()
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let state = self.game.state();
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match state {
            SessionState::Playing => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };

        let game_board = BoardDisplay::new(self.game.board())
            .falling_piece(*self.game.piece())
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let next_panel = PieceDisplay::new().shape(self.game.next_shape()).block(
            Block::bordered()
                .title(Line::from("NEXT").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let stats = StatsDisplay::new(self.game).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        let popup = match state {
            SessionState::Playing => None,
            SessionState::Paused => Some((
                "PAUSED",
                Style::new().fg(color::BLACK).bg(color::YELLOW),
            )),
            SessionState::GameOver => Some((
                "GAME OVER!!",
                Style::new().fg(color::WHITE).bg(color::RED),
            )),
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use tetrion_engine::PieceSeed;

    use super::*;

    fn render_to_string(game: &GameState) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        GameDisplay::new(game).render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_pause_popup() {
        let mut game = GameState::with_seed(20, 10, PieceSeed::from_bytes([1; 16]));
        assert!(!render_to_string(&game).contains("PAUSED"));
        game.set_paused(true);
        assert!(render_to_string(&game).contains("PAUSED"));
    }

    #[test]
    fn test_side_panels_rendered() {
        let game = GameState::with_seed(20, 10, PieceSeed::from_bytes([1; 16]));
        let screen = render_to_string(&game);
        assert!(screen.contains("STATS"));
        assert!(screen.contains("NEXT"));
        assert!(screen.contains("LEVEL:"));
    }
}
