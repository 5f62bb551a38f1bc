use std::{
    error::Error,
    fmt::{self, Display, Formatter, Write as _},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    str::FromStr,
};

use crate::{
    board::Board,
    board_display::BoardDisplay,
    color::{Color, ParseColorError},
    coord::{ParseSquareError, Square},
    game::Game,
    misc::strip_prefix_token,
    snapshot::{ParseSnapshotError, Snapshot},
    status::GameStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Input {
    Help,
    Flip,
    Reset,
    Quit,
    Export,
    Automate(Option<Color>),
    Import(Color, Snapshot),
    Select(Square),
    Move(Square, Square),
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "reset" => Ok(Input::Reset),
            "quit" | "exit" => Ok(Input::Quit),
            "export" => Ok(Input::Export),
            s => {
                if let Some(arg) = strip_prefix_token(s, "automate") {
                    if arg == "none" {
                        Ok(Input::Automate(None))
                    } else {
                        Ok(Input::Automate(Some(arg.parse()?)))
                    }
                } else if let Some(arg) = strip_prefix_token(s, "import") {
                    let (side, snapshot) = arg.split_once(char::is_whitespace).unwrap_or((arg, ""));
                    Ok(Input::Import(side.parse()?, snapshot.trim_start().parse()?))
                } else if s.len() == 2 {
                    Ok(Input::Select(s.parse()?))
                } else {
                    match s.split_at_checked(2) {
                        Some((from, to)) => Ok(Input::Move(from.parse()?, to.parse()?)),
                        None => Ok(Input::Select(s.parse()?)),
                    }
                }
            }
        }
    }
}

/// Interactive loop over a [`Game`], one command per line.
pub fn repl() -> io::Result<()> {
    let input = stdin().lock();
    let mut output = stdout().lock();
    let mut error = stderr().lock();

    let mut lines = input.lines();

    let mut game = Game::new();
    let mut info = String::new();
    let mut highlighted = Vec::new();
    let mut update = true;
    let mut view = Color::White;
    let mut first_time = true;
    loop {
        if update {
            info.clear();
            match game.game_status() {
                GameStatus::Ongoing => {
                    writeln!(&mut info, "{} plays", game.side_to_move()).unwrap();
                }
                status @ GameStatus::Check(_) => {
                    writeln!(&mut info, "{} plays", game.side_to_move()).unwrap();
                    writeln!(&mut info, "{status}").unwrap();
                }
                status => writeln!(&mut info, "{status}").unwrap(),
            }
        }
        if first_time {
            writeln!(&mut info, "type `help` for instructions").unwrap();
            first_time = false;
        }
        update = false;
        writeln!(
            output,
            "{}",
            BoardDisplay {
                board: game.board(),
                view,
                highlighted: &highlighted,
                info: &info,
            },
        )?;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(text) = lines.next() else {
                return Ok(());
            };
            let input = match text?.trim().parse() {
                Ok(input) => input,
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    writeln!(error, "for available commands, enter `help`")?;
                    continue;
                }
            };
            match input {
                Input::Help => {
                    writeln!(output, "flip                    - flip the board")?;
                    writeln!(output, "reset                   - reset to starting position")?;
                    writeln!(output, "automate <white|black>  - let that side play itself")?;
                    writeln!(output, "automate none           - turn automation off")?;
                    writeln!(output, "export                  - export the position")?;
                    writeln!(output, "import <w|b> <position> - import a position")?;
                    writeln!(output, "quit                    - quit the game")?;
                    writeln!(output, "e2                      - view valid moves")?;
                    writeln!(output, "e2e4                    - play the move")?;
                    writeln!(output, "e1g1                    - perform castling")?;
                }
                Input::Flip => {
                    view = !view;
                }
                Input::Reset => {
                    game.reset();
                    update = true;
                    highlighted.clear();
                }
                Input::Quit => return Ok(()),
                Input::Export => {
                    writeln!(output, "{}", game.board_snapshot())?;
                }
                Input::Automate(color) => {
                    game.set_automation(color);
                    update = true;
                    highlighted.clear();
                }
                Input::Import(side, snapshot) => {
                    game = Game::from_board(Board::from_snapshot(&snapshot, side));
                    update = true;
                    highlighted.clear();
                }
                Input::Select(position) => {
                    let Some(destinations) = game.valid_moves(position) else {
                        writeln!(error, "Error: no movable piece on {position}")?;
                        continue;
                    };
                    highlighted.clear();
                    highlighted.push(position);
                    highlighted.extend(destinations.keys().copied());
                }
                Input::Move(from, to) => {
                    if !game.request_move(from, to) {
                        writeln!(error, "Error: {from}{to} is an invalid move")?;
                        continue;
                    }
                    highlighted.clear();
                    highlighted.push(from);
                    highlighted.push(to);
                    update = true;
                }
            }
            break;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseInputError {
    Square(ParseSquareError),
    Snapshot(ParseSnapshotError),
    Color(ParseColorError),
}
impl From<ParseSquareError> for ParseInputError {
    fn from(value: ParseSquareError) -> Self {
        ParseInputError::Square(value)
    }
}
impl From<ParseSnapshotError> for ParseInputError {
    fn from(value: ParseSnapshotError) -> Self {
        ParseInputError::Snapshot(value)
    }
}
impl From<ParseColorError> for ParseInputError {
    fn from(value: ParseColorError) -> Self {
        ParseInputError::Color(value)
    }
}
impl Display for ParseInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseInputError::Square(err) => write!(f, "{err}")?,
            ParseInputError::Snapshot(err) => write!(f, "{err}")?,
            ParseInputError::Color(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseInputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseInputError::Square(err) => Some(err),
            ParseInputError::Snapshot(err) => Some(err),
            ParseInputError::Color(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{color::Color, coord::Square, repl::Input};

    #[test]
    fn commands_parse() {
        assert_eq!("flip".parse(), Ok(Input::Flip));
        assert_eq!("automate none".parse(), Ok(Input::Automate(None)));
        assert_eq!(
            "automate black".parse(),
            Ok(Input::Automate(Some(Color::Black))),
        );
        assert_eq!(
            "e2".parse(),
            Ok(Input::Select(Square::new(4, 1))),
        );
        assert_eq!(
            "e2e4".parse(),
            Ok(Input::Move(Square::new(4, 1), Square::new(4, 3))),
        );
        assert!("automaton".parse::<Input>().is_err());
        assert!("e9".parse::<Input>().is_err());
    }
}
