use crate::game_state::{GameState, GameStatus, PromotionError};
use crate::movelist::MoveList;
use crate::piece::PieceType;
use crate::r#move::Move;
use crate::square::Square;

use log::info;
use regex::Regex;
use rustyline::config::Configurer;
use rustyline::Editor;
use thiserror::Error;

/// Text front end: reads commands from a line editor and drives a game.
/// It holds no rules of its own, every decision goes through `GameState`.
pub struct Console {
    state: GameState,
    legal_moves: MoveList,
    editor: Editor<()>,
}

impl Default for Console {
    fn default() -> Self {
        let mut editor = Editor::<()>::new();
        editor.set_auto_add_history(true);
        editor.set_check_cursor_position(true);
        let mut state = GameState::new();
        let legal_moves = state.get_valid_moves();
        Console {
            state,
            legal_moves,
            editor,
        }
    }
}

impl Console {
    pub fn run(&mut self) {
        println!("{}", self.state);
        while let Ok(line) = self.editor.readline("chess> ") {
            match self.handle_command(&line) {
                Ok(ConsoleOkCode::ShouldQuit) => break,
                Ok(ConsoleOkCode::OkCommand) => (),
                Err(ConsoleError::NoCommand) => (),
                Err(ConsoleError::MissingArg(arg)) => {
                    eprintln!("Missing an argument: {} {} <- here", line.trim(), arg)
                }
                Err(e) => eprintln!("{}", e),
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn handle_command(&mut self, line: &str) -> Result<ConsoleOkCode, ConsoleError> {
        let args_regex = Self::args_regex();
        let mut args = args_regex.find_iter(line).map(|m| m.as_str());
        let cmd = if let Some(c) = args.next() {
            c
        } else {
            return Err(ConsoleError::NoCommand);
        };

        let allowed_while_pending = matches!(cmd, "promote" | "undo" | "show" | "status" | "quit");
        if self.state.pending_promotion().is_some() && !allowed_while_pending {
            return Err(ConsoleError::PromotionPending);
        }

        match cmd {
            "show" => println!("{}", self.state),
            "moves" => match args.next() {
                Some(s) => {
                    let origin = Self::parse_square(s)?;
                    let targets: Vec<String> = self
                        .legal_moves
                        .targets_from(origin)
                        .map(|t| t.notation())
                        .collect();
                    println!("{}", targets.join(" "))
                }
                None => println!("{}", self.legal_moves),
            },
            "play" => {
                let notation = args
                    .next()
                    .ok_or_else(|| ConsoleError::MissingArg(String::from("<move>")))?;
                let (origin, target) = Move::parse(notation)
                    .ok_or_else(|| ConsoleError::IllegalMove(String::from(notation)))?;
                let mv = *self
                    .legal_moves
                    .find(origin, target)
                    .ok_or_else(|| ConsoleError::IllegalMove(String::from(notation)))?;
                self.state.make(mv);
                info!("played {}", mv);
                if let Some(pending) = self.state.pending_promotion() {
                    println!(
                        "{} pawn promotes on {}: promote <q|r|b|n>",
                        pending.color, pending.square
                    );
                } else {
                    self.refresh();
                }
            }
            "promote" => {
                let choice = args
                    .next()
                    .ok_or_else(|| ConsoleError::MissingArg(String::from("<q|r|b|n>")))?;
                let piece_type = choice
                    .chars()
                    .next()
                    .and_then(PieceType::from_char)
                    .ok_or_else(|| ConsoleError::BadCommand(format!("promote {}", choice)))?;
                self.state.promote(piece_type)?;
                self.refresh();
            }
            "undo" => {
                self.state.unmake();
                self.refresh();
            }
            "new" => {
                self.state.reset();
                self.refresh();
            }
            "status" => println!(
                "{} (halfmove clock {})",
                self.state.status(),
                self.state.halfmove_clock()
            ),
            "log" => {
                for line in self.state.move_log() {
                    println!("{}", line)
                }
            }
            "attacked" => {
                let s = args
                    .next()
                    .ok_or_else(|| ConsoleError::MissingArg(String::from("<square>")))?;
                let sq = Self::parse_square(s)?;
                println!("{}", self.state.square_under_attack(sq))
            }
            "perft" => {
                let depth = args
                    .next()
                    .ok_or_else(|| ConsoleError::MissingArg(String::from("<depth>")))?
                    .parse::<u32>()
                    .map_err(|_| ConsoleError::BadCommand(String::from(line.trim())))?;
                let mut scratch = self.state.clone();
                println!("{}", crate::perft(&mut scratch, depth))
            }
            "quit" => return Ok(ConsoleOkCode::ShouldQuit),
            _ => return Err(ConsoleError::BadCommand(String::from(cmd))),
        }

        Ok(ConsoleOkCode::OkCommand)
    }

    /// Recomputes the legal moves and announces anything worth a caption
    fn refresh(&mut self) {
        self.legal_moves = self.state.get_valid_moves();
        println!("{}", self.state);
        let status = self.state.status();
        if status != GameStatus::InProgress {
            println!("{}", status);
        }
        if status.is_over() {
            info!("game over: {}", status);
        }
    }

    fn parse_square(s: &str) -> Result<Square, ConsoleError> {
        Square::parse(s)
            .filter(|_| s.len() == 2)
            .ok_or_else(|| ConsoleError::BadSquare(String::from(s)))
    }

    fn args_regex() -> Regex {
        Regex::new(r#"(".*?"|[^"\s]+)"#).unwrap()
    }
}

enum ConsoleOkCode {
    OkCommand,
    ShouldQuit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("no command given")]
    NoCommand,
    #[error("unknown or badly formed command: {0}")]
    BadCommand(String),
    #[error("missing an argument: {0}")]
    MissingArg(String),
    #[error("not a square: {0}")]
    BadSquare(String),
    #[error("badly formatted or illegal move: {0}")]
    IllegalMove(String),
    #[error("a promotion is pending: promote <q|r|b|n>")]
    PromotionPending,
    #[error(transparent)]
    Promotion(#[from] PromotionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::castling::CastlingRights;
    use crate::piece::Color;

    fn console() -> Console {
        Console::default()
    }

    #[test]
    fn plays_and_undoes_moves() {
        let mut c = console();
        assert!(c.handle_command("play e2e4").is_ok());
        assert_eq!(c.state().side_to_move(), Color::Black);
        assert_eq!(c.legal_moves.len(), 20);
        assert!(c.handle_command("undo").is_ok());
        assert_eq!(c.state().side_to_move(), Color::White);
        assert!(c.state().history().is_empty());
    }

    #[test]
    fn rejects_illegal_and_malformed_input() {
        let mut c = console();
        let err = |c: &mut Console, line: &str| c.handle_command(line).err();
        assert_eq!(
            err(&mut c, "play e2e5"),
            Some(ConsoleError::IllegalMove(String::from("e2e5")))
        );
        assert_eq!(
            err(&mut c, "play"),
            Some(ConsoleError::MissingArg(String::from("<move>")))
        );
        assert_eq!(err(&mut c, "   "), Some(ConsoleError::NoCommand));
        assert_eq!(
            err(&mut c, "castle"),
            Some(ConsoleError::BadCommand(String::from("castle")))
        );
        assert_eq!(
            err(&mut c, "attacked z9"),
            Some(ConsoleError::BadSquare(String::from("z9")))
        );
        assert_eq!(
            err(&mut c, "promote q"),
            Some(ConsoleError::Promotion(PromotionError::NotPending))
        );
    }

    #[test]
    fn promotion_blocks_other_commands_until_chosen() {
        let mut c = console();
        let board = Board::from_diagram([
            "....k...",
            ".P......",
            "........",
            "........",
            "........",
            "........",
            "........",
            "....K...",
        ])
        .unwrap();
        c.state = GameState::from_board(board, Color::White, CastlingRights::none()).unwrap();
        c.legal_moves = c.state.get_valid_moves();

        c.handle_command("play b7b8").unwrap();
        assert_eq!(c.handle_command("play e8e7").err(), Some(ConsoleError::PromotionPending));
        assert_eq!(
            c.handle_command("promote k").err(),
            Some(ConsoleError::Promotion(PromotionError::InvalidPiece(PieceType::King)))
        );
        c.handle_command("promote n").unwrap();
        let b8 = c.state().piece_at(Square::parse("b8").unwrap());
        assert_eq!(b8.map(|p| p.piece_type), Some(PieceType::Knight));
        assert!(c.handle_command("play e8e7").is_ok());
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut c = console();
        assert!(matches!(c.handle_command("quit"), Ok(ConsoleOkCode::ShouldQuit)));
    }

    #[test]
    fn new_restarts_the_game() {
        let mut c = console();
        c.handle_command("play g1f3").unwrap();
        c.handle_command("new").unwrap();
        assert!(c.state().history().is_empty());
        assert_eq!(c.legal_moves.len(), 20);
    }
}
