//! Board rendering for the tic-tac-toe GUI

use egui::{CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::{Board, Mark, Square, GRID_SIZE};

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 100.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell, if any
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        turn: Mark,
        last_move: Option<Square>,
        suggested_move: Option<Square>,
        winning_line: Option<[Square; 3]>,
        game_over: bool,
    ) -> Option<Square> {
        let available_size = ui.available_size();

        // Square board fitted to the available space
        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / GRID_SIZE as f32;

        let (response, painter) =
            ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());

        self.board_rect = response.rect;

        // Draw board background
        painter.rect_filled(self.board_rect, CornerRadius::same(6), BOARD_BG);

        // Draw grid lines
        self.draw_grid(&painter);

        // Draw placed marks
        self.draw_marks(&painter, board);

        // Draw last move marker
        if let Some(sq) = last_move {
            self.draw_last_move_marker(&painter, sq);
        }

        // Draw winning line highlight
        if let Some(line) = winning_line {
            self.draw_winning_line(&painter, &line);
        }

        // Draw suggested move
        if let Some(sq) = suggested_move {
            self.draw_suggestion(&painter, sq, turn);
        }

        // Handle hover preview and click
        let mut clicked = None;

        if !game_over {
            if let Some(pointer_pos) = response.hover_pos() {
                if let Some(sq) = self.screen_to_board(pointer_pos) {
                    let is_valid = board.is_empty(sq);

                    self.draw_hover_preview(&painter, sq, turn, is_valid);

                    if response.clicked() && is_valid {
                        clicked = Some(sq);
                    }
                }
            }
        }

        clicked
    }

    /// Draw the two vertical and two horizontal grid lines
    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let span = GRID_SIZE as f32 * self.cell_size;

        for i in 1..GRID_SIZE {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            // Vertical line
            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            let end = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN + span);
            painter.line_segment([start, end], stroke);

            // Horizontal line
            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            let end = self.board_rect.min + Vec2::new(BOARD_MARGIN + span, offset);
            painter.line_segment([start, end], stroke);
        }
    }

    /// Draw all placed marks
    fn draw_marks(&self, painter: &Painter, board: &Board) {
        for sq in Square::all() {
            if let Some(mark) = board.get(sq) {
                self.draw_mark(painter, sq, mark, 1.0);
            }
        }
    }

    /// Draw a single mark; `alpha` below 1.0 gives the hover preview
    fn draw_mark(&self, painter: &Painter, sq: Square, mark: Mark, alpha: f32) {
        let center = self.cell_center(sq);
        let radius = self.cell_size * MARK_RADIUS_RATIO;
        let width = self.cell_size * MARK_STROKE_RATIO;

        match mark {
            Mark::X => {
                let color = if alpha < 1.0 {
                    mark_preview(X_COLOR)
                } else {
                    X_COLOR
                };
                let stroke = Stroke::new(width, color);
                let d = Vec2::new(radius, radius);
                painter.line_segment([center - d, center + d], stroke);
                let d = Vec2::new(radius, -radius);
                painter.line_segment([center - d, center + d], stroke);
            }
            Mark::O => {
                let color = if alpha < 1.0 {
                    mark_preview(O_COLOR)
                } else {
                    O_COLOR
                };
                painter.circle_stroke(center, radius, Stroke::new(width, color));
            }
        }
    }

    /// Draw last move marker
    fn draw_last_move_marker(&self, painter: &Painter, sq: Square) {
        let center = self.cell_center(sq);
        let offset = self.cell_size * 0.38;
        painter.circle_filled(
            center + Vec2::new(offset, -offset),
            LAST_MOVE_MARKER_RADIUS,
            LAST_MOVE_MARKER,
        );
    }

    /// Draw winning line highlight through the three cells
    fn draw_winning_line(&self, painter: &Painter, line: &[Square; 3]) {
        let stroke = Stroke::new(6.0, WIN_HIGHLIGHT);

        // Extend slightly past the end cells
        let start = self.cell_center(line[0]);
        let end = self.cell_center(line[2]);
        let dir = (end - start).normalized() * self.cell_size * 0.35;
        painter.line_segment([start - dir, end + dir], stroke);
    }

    /// Draw move suggestion
    fn draw_suggestion(&self, painter: &Painter, sq: Square, turn: Mark) {
        let center = self.cell_center(sq);
        let color = match turn {
            Mark::X => mark_preview(X_COLOR),
            Mark::O => mark_preview(O_COLOR),
        };

        painter.circle_filled(center, self.cell_size * MARK_RADIUS_RATIO, color);
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "?",
            egui::FontId::proportional(self.cell_size * 0.3),
            TEXT_PRIMARY,
        );
    }

    /// Draw hover preview
    fn draw_hover_preview(&self, painter: &Painter, sq: Square, turn: Mark, is_valid: bool) {
        if is_valid {
            self.draw_mark(painter, sq, turn, 0.4);
        } else {
            painter.circle_filled(
                self.cell_center(sq),
                self.cell_size * MARK_RADIUS_RATIO,
                hover_invalid(),
            );
        }
    }

    /// Convert screen coordinates to a board cell
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Square> {
        let relative = screen_pos - self.board_rect.min;
        let col = ((relative.x - BOARD_MARGIN) / self.cell_size).floor() as i32;
        let row = ((relative.y - BOARD_MARGIN) / self.cell_size).floor() as i32;

        if col >= 0 && col < GRID_SIZE as i32 && row >= 0 && row < GRID_SIZE as i32 {
            Some(Square::from_row_col(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Center of a cell in screen coordinates
    pub fn cell_center(&self, sq: Square) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + (sq.col() as f32 + 0.5) * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + (sq.row() as f32 + 0.5) * self.cell_size;
        Pos2::new(x, y)
    }
}
