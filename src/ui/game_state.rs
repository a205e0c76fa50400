//! Game session state for the GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::rules::{outcome, winning_line, Outcome};
use crate::{Board, Engine, Mark, MoveResult, Square, Strategy};

/// Pause before an engine move is applied, so replies don't land in the
/// same frame as the human's click
const ENGINE_MOVE_DELAY: Duration = Duration::from_millis(500);

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs engine
    PvE { human_mark: Mark },
    /// Two players sharing the screen (hotseat)
    PvP,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE {
            human_mark: Mark::X,
        }
    }
}

/// Engine computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        started: Instant,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub engine_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            engine_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_engine_time(&mut self, duration: Duration) {
        self.engine_time = Some(duration);
    }
}

/// Main game state
///
/// The board snapshot is the single source of truth: whose turn it is
/// and whether the game is over are derived from it on every call, never
/// cached where they could drift.
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub strategy: Strategy,
    pub last_move: Option<Square>,
    pub move_history: Vec<Square>,
    pub last_engine_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Square>,
    pub message: Option<String>,
}

impl GameState {
    pub fn new(mode: GameMode) -> Self {
        Self {
            board: Board::new(),
            mode,
            strategy: Strategy::default(),
            last_move: None,
            move_history: Vec::new(),
            last_engine_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
        }
    }

    pub fn reset(&mut self) {
        self.board = Board::new();
        self.last_move = None;
        self.move_history.clear();
        self.last_engine_result = None;
        self.ai_state = AiState::Idle;
        self.move_timer = MoveTimer::default();
        self.suggested_move = None;
        self.message = None;
    }

    /// Side to move, derived from board occupancy
    pub fn turn(&self) -> Mark {
        self.board.to_move()
    }

    /// Game status, derived from the board
    pub fn outcome(&self) -> Outcome {
        outcome(&self.board)
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome() != Outcome::InProgress
    }

    /// Squares of the completed line, if any
    pub fn winning_line(&self) -> Option<[Square; 3]> {
        winning_line(&self.board)
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_mark } => self.turn() == human_mark,
            GameMode::PvP => true,
        }
    }

    /// Check if it's the engine's turn
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_mark } => self.turn() != human_mark,
            GameMode::PvP => false,
        }
    }

    /// Check if the engine is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt to place the human's mark at the given cell
    pub fn try_play(&mut self, sq: Square) -> Result<(), String> {
        if self.is_game_over() {
            return Err("Game is over".to_string());
        }

        if self.is_ai_thinking() {
            return Err("Engine is thinking".to_string());
        }

        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        if !self.board.is_empty(sq) {
            return Err("Cell is already taken".to_string());
        }

        self.execute_move(sq);
        Ok(())
    }

    /// Apply a move (for both human and engine)
    fn execute_move(&mut self, sq: Square) {
        match self.board.play(sq) {
            Ok(next) => {
                self.board = next;
                self.move_history.push(sq);
                self.last_move = Some(sq);
                self.suggested_move = None;
                self.message = None;
                self.move_timer.stop();
                if !self.is_game_over() {
                    self.move_timer.start();
                }
            }
            Err(err) => {
                // Callers filter on legality first, so this is a bug
                log::error!("rejected move {sq}: {err}");
                self.message = Some(err.to_string());
            }
        }
    }

    /// Start the engine thinking on a worker thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.is_game_over() {
            return;
        }

        let board = self.board;
        let strategy = self.strategy;
        let (tx, rx) = channel();

        thread::spawn(move || {
            let mut engine = Engine::with_strategy(strategy);
            match engine.choose_move(&board) {
                Ok(result) => {
                    let _ = tx.send(result);
                }
                // Dropping the sender surfaces as a disconnect
                Err(err) => log::error!("engine rejected board: {err}"),
            }
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            started: Instant::now(),
        };
    }

    /// Apply the engine's move once it has arrived and the thinking pause
    /// has elapsed
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking { receiver, started } => {
                if started.elapsed() < ENGINE_MOVE_DELAY {
                    return;
                }
                match receiver.try_recv() {
                    Ok(result) => Some((result, started.elapsed())),
                    Err(TryRecvError::Empty) => None,
                    Err(TryRecvError::Disconnected) => {
                        self.ai_state = AiState::Idle;
                        self.message = Some("Engine error".to_string());
                        return;
                    }
                }
            }
            AiState::Idle => None,
        };

        if let Some((move_result, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.last_engine_result = Some(move_result);
            self.move_timer.set_engine_time(elapsed);

            if let Some(sq) = move_result.best_move {
                self.execute_move(sq);
            } else {
                self.message = Some("Engine found no move".to_string());
            }
        }
    }

    /// Get the engine's thinking time so far
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { started, .. } => Some(started.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Request a move suggestion for the side to move (hint)
    pub fn request_suggestion(&mut self) {
        if self.is_game_over() || self.is_ai_thinking() {
            return;
        }

        let mut engine = Engine::with_strategy(self.strategy);
        match engine.choose_move(&self.board) {
            Ok(result) => {
                self.suggested_move = result.best_move;
                self.last_engine_result = Some(result);
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    /// Undo the last move
    pub fn undo(&mut self) {
        if self.move_history.is_empty() || self.is_ai_thinking() {
            return;
        }

        // For PvE, undo two moves (human + engine)
        let undo_count = match self.mode {
            GameMode::PvE { .. } if self.move_history.len() >= 2 => 2,
            _ => 1,
        };
        self.move_history
            .truncate(self.move_history.len() - undo_count);

        // Replay from scratch; turn order falls out of the board itself
        let mut board = Board::new();
        let mut last = None;
        for &sq in &self.move_history {
            match board.play(sq) {
                Ok(next) => {
                    board = next;
                    last = Some(sq);
                }
                Err(err) => {
                    log::error!("history replay rejected {sq}: {err}");
                    break;
                }
            }
        }

        self.board = board;
        self.last_move = last;
        self.suggested_move = None;
        self.message = None;
        self.move_timer.start();
    }
}
