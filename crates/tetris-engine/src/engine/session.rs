use std::{mem, time::Duration};

use crate::{
    PieceCollisionError,
    core::{Board, Piece, PieceKind},
};

use super::{
    config::GameConfig,
    events::{GameEvent, TickReport},
    generator::PieceGenerator,
    input::InputSnapshot,
    movement,
    scoring::Scoring,
    timing::{Action, ActionTimers},
};

/// Tick number of the first game tick.
pub const FIRST_TICK: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    /// A freshly spawned piece overlapped the stack. Only a quit request is
    /// accepted from here.
    GameOver,
    Exited,
}

/// A single game from the first piece to game over or quit.
///
/// The active piece is always marked on the board while playing, so
/// [`GameSession::board`] is everything a renderer needs besides the next
/// piece and the counters.
///
/// # Example
///
/// ```
/// use tetris_engine::{GameConfig, GameSession, InputSnapshot, SessionState};
///
/// let mut session = GameSession::with_seed(GameConfig::default(), 0, 1);
/// assert_eq!(session.board().occupied_count(), 4);
///
/// let report = session.tick(&InputSnapshot::IDLE);
/// assert!(report.redraw);
///
/// let quit = InputSnapshot {
///     quit: true,
///     ..InputSnapshot::IDLE
/// };
/// session.tick(&quit);
/// assert_eq!(session.state(), SessionState::Exited);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    active: Piece,
    next: PieceKind,
    generator: PieceGenerator,
    scoring: Scoring,
    timers: ActionTimers,
    state: SessionState,
    tick: u64,
}

impl GameSession {
    /// Starts a game as if `level` levels had already been cleared.
    #[must_use]
    pub fn new(config: GameConfig, level: usize) -> Self {
        Self::with_generator(config, level, PieceGenerator::new())
    }

    /// Starts a game whose piece sequence is fixed by `seed`.
    #[must_use]
    pub fn with_seed(config: GameConfig, level: usize, seed: u64) -> Self {
        Self::with_generator(config, level, PieceGenerator::with_seed(seed))
    }

    fn with_generator(config: GameConfig, level: usize, mut generator: PieceGenerator) -> Self {
        let board = Board::new(config.width, config.height);
        let first = generator.next_kind();
        Self::start(config, board, first, generator, level)
            .expect("spawn cells of an empty board are free")
    }

    /// Starts a game on a prepared board with a chosen first piece.
    ///
    /// The board dimensions override those of `config`. Fails if the first
    /// piece cannot be placed.
    pub fn from_board(
        config: GameConfig,
        board: Board,
        first: PieceKind,
        seed: u64,
    ) -> Result<Self, PieceCollisionError> {
        let config = GameConfig {
            width: board.width(),
            height: board.height(),
            ..config
        };
        Self::start(config, board, first, PieceGenerator::with_seed(seed), 0)
    }

    fn start(
        config: GameConfig,
        mut board: Board,
        first: PieceKind,
        mut generator: PieceGenerator,
        level: usize,
    ) -> Result<Self, PieceCollisionError> {
        let (active, blocked) = movement::spawn(&board, first);
        if blocked {
            return Err(PieceCollisionError);
        }
        board.place(active.cells(), active.kind());
        let next = generator.next_kind();
        Ok(Self {
            config,
            board,
            active,
            next,
            generator,
            scoring: Scoring::with_level_offset(level),
            timers: ActionTimers::new(FIRST_TICK),
            state: SessionState::Playing,
            tick: FIRST_TICK,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece. After game over this is the piece that failed to
    /// spawn and is not on the board.
    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        &self.active
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    #[must_use]
    pub fn completed_lines(&self) -> usize {
        self.scoring.completed_lines()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.scoring.level()
    }

    #[must_use]
    pub fn descent_delay(&self) -> u64 {
        self.scoring.descent_delay()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of the tick that will run next.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Game time elapsed, paused ticks included.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.config.ticks_to_duration(self.tick - FIRST_TICK)
    }

    /// Runs one game tick against the keys currently held.
    ///
    /// Order within a tick: quit, automatic descent (and lock), pause toggle,
    /// then while not paused track selection, left, right, rotate, and soft
    /// or hard drop.
    pub fn tick(&mut self, input: &InputSnapshot) -> TickReport {
        let mut report = TickReport::default();
        match self.state {
            SessionState::Exited => return report,
            SessionState::GameOver => {
                if input.quit {
                    self.state = SessionState::Exited;
                }
                return report;
            }
            SessionState::Playing | SessionState::Paused => {}
        }

        if input.quit {
            self.state = SessionState::Exited;
            return report;
        }

        if self.state.is_playing() {
            self.auto_descend(&mut report);
            if self.state.is_game_over() {
                report.redraw = true;
                return report;
            }
        }

        if input.pause && self.timers.try_fire(Action::Pause, self.tick) {
            self.toggle_pause(&mut report);
        }
        if self.state.is_paused() {
            self.tick += 1;
            return report;
        }

        if let Some(track) = input.track
            && self.timers.try_fire(Action::SelectTrack, self.tick)
        {
            report.push(GameEvent::TrackSelected(track));
        }
        self.handle_moves(input);

        report.redraw = true;
        self.tick += 1;
        report
    }

    fn toggle_pause(&mut self, report: &mut TickReport) {
        let (state, event) = match self.state {
            SessionState::Playing => (SessionState::Paused, GameEvent::Paused),
            SessionState::Paused => (SessionState::Playing, GameEvent::Resumed),
            SessionState::GameOver | SessionState::Exited => return,
        };
        self.state = state;
        report.push(event);
        report.redraw = true;
    }

    fn auto_descend(&mut self, report: &mut TickReport) {
        self.timers
            .set_delay(Action::Descent, self.scoring.descent_delay());
        if !self.timers.try_fire(Action::Descent, self.tick) {
            return;
        }
        if movement::can_move_down(&self.board, &self.active) {
            movement::translate(&mut self.board, &mut self.active, 0, 1);
        } else {
            self.lock(report);
        }
    }

    /// Clears full rows, then brings in the next piece.
    ///
    /// The locked piece's cells are already on the board.
    fn lock(&mut self, report: &mut TickReport) {
        let cleared = self.board.find_and_remove_full_rows();
        if cleared > 0 {
            self.scoring.record_cleared(cleared);
            report.push(GameEvent::LinesCleared(cleared));
        }

        let kind = mem::replace(&mut self.next, self.generator.next_kind());
        let (piece, blocked) = movement::spawn(&self.board, kind);
        self.active = piece;
        if blocked {
            self.state = SessionState::GameOver;
            report.push(GameEvent::GameOver);
            return;
        }
        self.board.place(piece.cells(), kind);
    }

    fn handle_moves(&mut self, input: &InputSnapshot) {
        let tick = self.tick;
        let (board, piece) = (&mut self.board, &mut self.active);

        if input.move_left
            && self.timers.try_fire(Action::MoveLeft, tick)
            && movement::can_move_left(board, piece)
        {
            movement::translate(board, piece, -1, 0);
        }
        if input.move_right
            && self.timers.try_fire(Action::MoveRight, tick)
            && movement::can_move_right(board, piece)
        {
            movement::translate(board, piece, 1, 0);
        }
        if input.rotate && self.timers.try_fire(Action::Rotate, tick) {
            movement::try_rotate(board, piece);
        }

        if !self.timers.is_ready(Action::SoftDrop, tick) {
            return;
        }
        if input.soft_drop {
            if movement::can_move_down(board, piece) {
                movement::translate(board, piece, 0, 1);
            }
            self.timers.fire(Action::SoftDrop, tick);
        } else if input.hard_drop && self.timers.try_fire(Action::HardDrop, tick) {
            movement::drop_to_floor(board, piece);
            self.timers.fire(Action::SoftDrop, tick);
            self.timers.force(Action::Descent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Track, core::Position};

    const HARD_DROP: InputSnapshot = InputSnapshot {
        hard_drop: true,
        ..InputSnapshot::IDLE
    };

    fn session() -> GameSession {
        GameSession::with_seed(GameConfig::default(), 0, 3)
    }

    fn run(session: &mut GameSession, input: &InputSnapshot, ticks: usize) -> Vec<TickReport> {
        (0..ticks).map(|_| session.tick(input)).collect()
    }

    fn shifted(cells: &[Position; 4], dx: i32, dy: i32) -> [Position; 4] {
        cells.map(|cell| Position::new(cell.x + dx, cell.y + dy))
    }

    #[test]
    fn test_first_piece_is_placed_at_creation() {
        let session = session();
        assert!(session.state().is_playing());
        assert_eq!(session.ticks(), FIRST_TICK);
        assert_eq!(session.board().occupied_count(), 4);
        assert!(movement::is_on_board(session.board(), session.active_piece()));
        assert_eq!(session.duration(), Duration::ZERO);
    }

    #[test]
    fn test_auto_descent_cadence_at_level_zero() {
        let mut session = session();
        let start = *session.active_piece().cells();

        run(&mut session, &InputSnapshot::IDLE, 16);
        assert_eq!(session.active_piece().cells(), &start);

        session.tick(&InputSnapshot::IDLE);
        assert_eq!(session.active_piece().cells(), &shifted(&start, 0, 1));

        run(&mut session, &InputSnapshot::IDLE, 15);
        assert_eq!(session.active_piece().cells(), &shifted(&start, 0, 1));
        session.tick(&InputSnapshot::IDLE);
        assert_eq!(session.active_piece().cells(), &shifted(&start, 0, 2));
    }

    #[test]
    fn test_high_level_descends_every_other_tick() {
        let mut session = GameSession::with_seed(GameConfig::default(), 14, 3);
        assert_eq!(session.descent_delay(), 1);
        let start = *session.active_piece().cells();
        // Ready once more than one tick has passed since the last descent.
        run(&mut session, &InputSnapshot::IDLE, 2);
        assert_eq!(session.active_piece().cells(), &start);
        run(&mut session, &InputSnapshot::IDLE, 4);
        assert_eq!(session.active_piece().cells(), &shifted(&start, 0, 2));
    }

    #[test]
    fn test_held_move_repeats_after_delay() {
        let mut session = session();
        let start = *session.active_piece().cells();
        let left = InputSnapshot {
            move_left: true,
            ..InputSnapshot::IDLE
        };

        run(&mut session, &left, 5);
        assert_eq!(session.active_piece().cells(), &start);
        session.tick(&left);
        assert_eq!(session.active_piece().cells(), &shifted(&start, -1, 0));
        run(&mut session, &left, 5);
        assert_eq!(session.active_piece().cells(), &shifted(&start, -2, 0));
    }

    #[test]
    fn test_left_and_right_cancel_out() {
        let mut session = session();
        let start = *session.active_piece().cells();
        let both = InputSnapshot {
            move_left: true,
            move_right: true,
            ..InputSnapshot::IDLE
        };
        run(&mut session, &both, 6);
        assert_eq!(session.active_piece().cells(), &start);
    }

    #[test]
    fn test_quit_exits_immediately() {
        let mut session = session();
        let quit = InputSnapshot {
            quit: true,
            ..InputSnapshot::IDLE
        };
        let report = session.tick(&quit);
        assert!(!report.redraw);
        assert!(session.state().is_exited());
        assert_eq!(session.ticks(), FIRST_TICK);

        let board = session.board().clone();
        run(&mut session, &HARD_DROP, 30);
        assert_eq!(session.board(), &board);
        assert_eq!(session.ticks(), FIRST_TICK);
    }

    #[test]
    fn test_pause_freezes_the_game() {
        let mut session = session();
        let pause = InputSnapshot {
            pause: true,
            ..InputSnapshot::IDLE
        };

        let reports = run(&mut session, &pause, 12);
        assert!(session.state().is_paused());
        assert!(reports[11].contains(GameEvent::Paused));
        assert!(reports[..11].iter().all(|r| r.events.is_empty()));

        let board = session.board().clone();
        let reports = run(&mut session, &HARD_DROP, 100);
        assert_eq!(session.board(), &board);
        assert!(reports.iter().all(|r| !r.redraw));
        assert_eq!(session.ticks(), 113);

        let report = session.tick(&pause);
        assert!(report.contains(GameEvent::Resumed));
        assert!(session.state().is_playing());
    }

    #[test]
    fn test_pause_toggle_is_debounced() {
        let mut session = session();
        let pause = InputSnapshot {
            pause: true,
            ..InputSnapshot::IDLE
        };
        run(&mut session, &pause, 12);
        assert!(session.state().is_paused());
        run(&mut session, &pause, 10);
        assert!(session.state().is_paused());
        session.tick(&pause);
        assert!(session.state().is_playing());
    }

    #[test]
    fn test_hard_drop_then_lock_on_next_tick() {
        let mut session = session();
        let first = *session.active_piece();

        run(&mut session, &HARD_DROP, 11);
        assert_eq!(session.active_piece(), &first);

        session.tick(&HARD_DROP);
        let dropped = *session.active_piece();
        assert_eq!(dropped.cells().iter().map(|c| c.y).max(), Some(19));
        assert_eq!(session.board().occupied_count(), 4);

        let report = session.tick(&InputSnapshot::IDLE);
        assert!(report.events.is_empty(), "{report:?}");
        assert_eq!(report.lines_cleared(), 0);
        assert_ne!(session.active_piece().cells(), dropped.cells());
        assert!(session.active_piece().cells().iter().any(|c| c.y == 0));
        assert_eq!(session.board().occupied_count(), 8);
        assert!(dropped.cells().iter().all(|&c| session.board().is_occupied(c)));
    }

    #[test]
    fn test_soft_drop_takes_precedence_over_hard_drop() {
        let mut session = session();
        let start = *session.active_piece().cells();
        let both = InputSnapshot {
            soft_drop: true,
            hard_drop: true,
            ..InputSnapshot::IDLE
        };
        run(&mut session, &both, 12);
        // Soft drop fired on ticks 6 and 11.
        assert_eq!(session.active_piece().cells(), &shifted(&start, 0, 2));
    }

    #[test]
    fn test_next_piece_becomes_active() {
        let mut session = session();
        let next = session.next_piece();
        run(&mut session, &HARD_DROP, 12);
        session.tick(&InputSnapshot::IDLE);
        assert_eq!(session.active_piece().kind(), next);
    }

    #[test]
    fn test_track_selection_is_debounced() {
        let mut session = session();
        let input = InputSnapshot {
            track: Some(Track::Menuet),
            ..InputSnapshot::IDLE
        };
        let reports = run(&mut session, &input, 22);
        let selected: Vec<u64> = (FIRST_TICK..)
            .zip(&reports)
            .filter(|(_, r)| r.contains(GameEvent::TrackSelected(Track::Menuet)))
            .map(|(tick, _)| tick)
            .collect();
        assert_eq!(selected, [12]);
        let report = session.tick(&input);
        assert!(report.contains(GameEvent::TrackSelected(Track::Menuet)));
    }

    #[test]
    fn test_track_selection_waits_while_paused() {
        let mut session = session();
        let input = InputSnapshot {
            pause: true,
            track: Some(Track::RussianSong),
            ..InputSnapshot::IDLE
        };
        let reports = run(&mut session, &input, 12);
        assert!(session.state().is_paused());
        assert!(reports.iter().all(|r| r.events.iter().all(|e| !e.is_track_selected())));
    }

    #[test]
    fn test_game_over_when_spawn_is_blocked() {
        let board: Board = "
            ..........
            ...1111...
            ..........
            ..........
        "
        .parse()
        .unwrap();
        let mut session =
            GameSession::from_board(GameConfig::default(), board, PieceKind::I, 5).unwrap();
        assert_eq!(session.config().height, 4);

        let reports = run(&mut session, &InputSnapshot::IDLE, 17);
        let last = reports.last().unwrap();
        assert!(last.contains(GameEvent::GameOver));
        assert!(last.redraw);
        assert!(session.state().is_game_over());

        // The blocked piece is never written to the board.
        let board = session.board().clone();
        assert_eq!(board.occupied_count(), 8);
        run(&mut session, &HARD_DROP, 20);
        assert_eq!(session.board(), &board);

        session.tick(&InputSnapshot {
            quit: true,
            ..InputSnapshot::IDLE
        });
        assert!(session.state().is_exited());
    }

    #[test]
    fn test_from_board_rejects_blocked_first_piece() {
        let board: Board = "
            ....2.....
            ..........
        "
        .parse()
        .unwrap();
        assert!(GameSession::from_board(GameConfig::default(), board, PieceKind::O, 0).is_err());
    }

    #[test]
    fn test_duration_follows_ticks() {
        let mut session = session();
        run(&mut session, &InputSnapshot::IDLE, 80);
        assert_eq!(session.duration(), Duration::from_secs(2));
    }
}
