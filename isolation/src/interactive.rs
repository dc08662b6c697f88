use isolation_agents::{ai_move, AiError};
use isolation_core::{
    generate_legal_moves, Cell, Coord, GameState, MoveList, Player, Square, BOARD_SIZE,
};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    style::{Color as TermColor, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
    ExecutableCommand,
};
use std::io::{self, Write};
use tracing::debug;

pub struct InteractiveGame {
    state: GameState,
    cursor_pos: (u8, u8), // (x, y) in 0-5 range
    legal_moves: MoveList,
    message: String,
}

impl InteractiveGame {
    pub fn new() -> Self {
        let state = GameState::new();
        let legal_moves = generate_legal_moves(&state);
        Self {
            state,
            cursor_pos: (1, 1),
            legal_moves,
            message: String::from("Use hjkl to move, Enter to move your queen, q to quit"),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(Hide)?;
        stdout.execute(Clear(ClearType::All))?;

        let result = self.game_loop();

        // Cleanup
        stdout.execute(Show)?;
        terminal::disable_raw_mode()?;
        stdout.execute(Clear(ClearType::All))?;
        stdout.execute(MoveTo(0, 0))?;

        result
    }

    fn game_loop(&mut self) -> io::Result<()> {
        loop {
            if let Some(winner) = self.state.winner() {
                self.message = format!("Game over. {} wins! n=new game, q=quit", winner);
            }

            self.draw_board()?;

            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                if kind != KeyEventKind::Press {
                    continue;
                }
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('h') | KeyCode::Left => self.move_cursor(0, -1),
                    KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1, 0),
                    KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1, 0),
                    KeyCode::Char('l') | KeyCode::Right => self.move_cursor(0, 1),
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        if self.handle_selection() {
                            // Player made a move, now engine's turn
                            self.engine_move()?;
                        }
                    }
                    KeyCode::Char('n') => self.new_game(),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn move_cursor(&mut self, dx: i8, dy: i8) {
        let target = Coord::new(self.cursor_pos.0 as i8 + dx, self.cursor_pos.1 as i8 + dy);
        if let Some(square) = target.to_square() {
            self.cursor_pos = (square.x(), square.y());
        }
    }

    fn cursor_square(&self) -> Option<Square> {
        Square::new(self.cursor_pos.0, self.cursor_pos.1)
    }

    /// Tries to move the human's token to the cursor. Returns true on success.
    fn handle_selection(&mut self) -> bool {
        if self.state.is_finished() || self.state.side_to_move() != Player::One {
            return false;
        }

        let Some(target) = self.cursor_square() else {
            return false;
        };

        match self.state.attempt_move(Coord::from(target)) {
            Ok(()) => {
                self.message = format!("Moved to {}", target);
                self.legal_moves.clear();
                true
            }
            Err(e) => {
                self.message = format!("Invalid move: {}", e);
                false
            }
        }
    }

    fn engine_move(&mut self) -> io::Result<()> {
        if self.state.is_finished() {
            return Ok(());
        }

        self.message = String::from("Engine thinking...");
        self.draw_board()?;

        match ai_move(&mut self.state) {
            Ok(to) => {
                debug!(%to, "engine replied");
                self.message = format!("Engine played: {}", to);
            }
            Err(AiError::NoLegalMove { winner }) => {
                self.message = format!("Engine is stuck. {} wins!", winner);
            }
            Err(e) => {
                self.message = format!("Engine error: {}", e);
            }
        }

        self.legal_moves = generate_legal_moves(&self.state);
        Ok(())
    }

    fn new_game(&mut self) {
        self.state = GameState::new();
        self.legal_moves = generate_legal_moves(&self.state);
        self.cursor_pos = (1, 1);
        self.message = String::from("New game started!");
    }

    fn draw_board(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(Clear(ClearType::All))?;
        stdout.execute(MoveTo(0, 0))?;

        // Title
        println!("Isolation - Interactive Mode (vim keys: hjkl)\r");
        println!("Commands: Enter=move here, n=new, q=quit\r");
        println!("\r");

        // Board with coordinates
        print!("   ");
        for y in 0..BOARD_SIZE {
            print!("{} ", y);
        }
        println!("\r");
        println!("  ┌────────────┐\r");

        for x in 0..BOARD_SIZE {
            print!("{} │", x);

            for y in 0..BOARD_SIZE {
                let Some(square) = Square::new(x, y) else {
                    continue;
                };

                let is_cursor = self.cursor_pos == (x, y);
                let is_legal_move = self.legal_moves.contains(square);

                // Set background color
                if is_cursor {
                    stdout.execute(SetBackgroundColor(TermColor::Yellow))?;
                } else if is_legal_move {
                    stdout.execute(SetBackgroundColor(TermColor::Blue))?;
                } else if (x + y) % 2 == 0 {
                    stdout.execute(SetBackgroundColor(TermColor::DarkGrey))?;
                } else {
                    stdout.execute(SetBackgroundColor(TermColor::Black))?;
                }

                match self.state.cell(square) {
                    Cell::Occupied(Player::One) => {
                        stdout.execute(SetForegroundColor(TermColor::White))?;
                        print!("♕ ");
                    }
                    Cell::Occupied(Player::Two) => {
                        stdout.execute(SetForegroundColor(TermColor::Magenta))?;
                        print!("♛ ");
                    }
                    Cell::Blocked => {
                        stdout.execute(SetForegroundColor(TermColor::Red))?;
                        print!("╳ ");
                    }
                    Cell::Empty => print!("  "),
                }

                stdout.execute(ResetColor)?;
            }

            println!("│{}\r", x);
        }

        println!("  └────────────┘\r");
        println!("\r");

        // Game info
        match self.state.winner() {
            Some(winner) => println!("{} wins\r", winner),
            None => println!("{} to move\r", self.state.side_to_move()),
        }

        // Status message
        println!("\r");
        println!("{}\r", self.message);

        stdout.flush()?;
        Ok(())
    }
}
