use crate::game::Game;
use crate::presenter;
use crate::square::square_representation;
use log::debug;
use regex::Regex;
use rustyline::config::Configurer;
use rustyline::Editor;

/// Interactive shell around one [`Game`], for driving the engine by hand.
pub struct Console {
    game: Game,
    editor: Editor<()>,
    unicode: bool,
}

impl Default for Console {
    fn default() -> Self {
        let mut editor = Editor::<()>::new();
        editor.set_auto_add_history(true);
        Console {
            game: Game::new(),
            editor,
            unicode: true,
        }
    }
}

impl Console {
    pub fn run(&mut self) {
        while let Ok(line) = self.editor.readline("arbiter> ") {
            match self.handle_command(&line) {
                Ok(CommandOutcome::ShouldQuit) => break,
                Err(ConsoleErrCode::BadCommand(cmd)) => {
                    eprintln!("Unknown or badly formed command: {}", cmd)
                }
                Err(ConsoleErrCode::BadMove(reason)) => {
                    eprintln!("Move rejected: {}", reason)
                }
                Err(ConsoleErrCode::MissingArg(arg)) => {
                    eprintln!("Missing an argument: {} {} <- here", line.trim(), arg)
                }
                _ => (),
            }
        }
    }

    fn handle_command(&mut self, line: &str) -> Result<CommandOutcome, ConsoleErrCode> {
        let args_regex = Self::args_regex();
        let mut args = args_regex.find_iter(line).map(|m| m.as_str());
        let cmd = if let Some(c) = args.next() {
            c
        } else {
            return Err(ConsoleErrCode::NoCommand);
        };
        debug!("console command: {}", cmd);
        match cmd {
            "new" => self.game = Game::new(),
            "position" => match args.next() {
                Some("startpos") => self.game = Game::new(),
                Some(first) => {
                    let mut fen = first.trim_matches('"').to_string();
                    for extra in args {
                        fen.push(' ');
                        fen.push_str(extra.trim_matches('"'));
                    }
                    match Game::from_position_string(&fen) {
                        Ok(game) => self.game = game,
                        Err(e) => return Err(ConsoleErrCode::BadCommand(e.to_string())),
                    }
                }
                None => return Err(ConsoleErrCode::MissingArg(String::from("<startpos | fen>"))),
            },
            "move" => {
                let first = if let Some(a) = args.next() {
                    a.to_string()
                } else {
                    return Err(ConsoleErrCode::MissingArg(String::from("<move>")));
                };
                let (from, to, promotion) = if let Some(second) = args.next() {
                    (first, second.to_string(), args.next().map(String::from))
                } else if first.len() == 4 || first.len() == 5 {
                    (
                        first[0..2].to_string(),
                        first[2..4].to_string(),
                        first.get(4..5).map(String::from),
                    )
                } else {
                    return Err(ConsoleErrCode::BadMove(first));
                };
                match self.game.make_move(&from, &to, promotion.as_deref()) {
                    Ok(report) => {
                        println!("{}  {}", report.notation, report.position);
                        if report.checkmate {
                            println!("checkmate");
                        } else if report.check {
                            println!("check");
                        }
                    }
                    Err(e) => return Err(ConsoleErrCode::BadMove(e.to_string())),
                }
            }
            "moves" => {
                let pos = if let Some(a) = args.next() {
                    a
                } else {
                    return Err(ConsoleErrCode::MissingArg(String::from("<square>")));
                };
                match self.game.legal_moves_for(pos) {
                    Ok(list) => {
                        let names: Vec<String> = list
                            .into_iter()
                            .filter_map(square_representation)
                            .collect();
                        println!("{}", names.join(" "))
                    }
                    Err(e) => return Err(ConsoleErrCode::BadMove(e.to_string())),
                }
            }
            "show" => {
                let art = if self.unicode {
                    presenter::pretty_board(self.game.board())
                } else {
                    presenter::pretty_board_ascii(self.game.board())
                };
                print!("{}", art);
                let captured = self.game.board().captured_pieces();
                if !captured.is_empty() {
                    let taken: Vec<String> = captured.iter().map(|p| p.to_string()).collect();
                    println!("captured: {}", taken.join(" "));
                }
            }
            "fen" => println!("{}", self.game.to_position_string()),
            "history" => {
                for (i, mv) in self.game.history().iter().enumerate() {
                    println!("{}. {}", i + 1, mv.notation)
                }
            }
            "status" => {
                let side = self.game.side_to_move();
                if self.game.in_checkmate(side) {
                    println!("{} is checkmated", side.name());
                } else if self.game.in_stalemate(side) {
                    println!("{} is stalemated", side.name());
                } else if self.game.in_check(side) {
                    println!("{} is in check", side.name());
                } else {
                    println!("{} to move", side.name());
                }
            }
            "unicode" => self.unicode = args.next().unwrap_or("on") == "on",
            "quit" => return Ok(CommandOutcome::ShouldQuit),
            _ => return Err(ConsoleErrCode::BadCommand(String::from(cmd))),
        }

        Ok(CommandOutcome::OkCommand)
    }

    fn args_regex() -> Regex {
        Regex::new(r#"(".*?"|[^"\s]+)"#).unwrap()
    }
}

enum CommandOutcome {
    OkCommand,
    ShouldQuit,
}

enum ConsoleErrCode {
    NoCommand,
    BadCommand(String),
    BadMove(String),
    MissingArg(String),
}
