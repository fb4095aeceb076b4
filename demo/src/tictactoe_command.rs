use std::io::{self, BufRead, Write};

use common::config::TicTacToeSettings;
use common::log;
use common::tictactoe::{AdversarialSearch, GameStatus, Mark, SearchOutcome, Square, TicTacToeGame};
use common::GameError;

pub struct TicTacToeOptions {
    pub self_play: bool,
}

pub fn run(settings: &TicTacToeSettings, options: TicTacToeOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut game = TicTacToeGame::new(settings)?;
    log!("AI plays {} using {:?}", game.ai_mark(), settings.strategy);

    if options.self_play {
        self_play(&mut game, settings)?;
        print_result(&game);
    } else {
        let stdin = io::stdin();
        play_against_human(&mut game, &mut stdin.lock())?;
    }
    Ok(())
}

fn print_result(game: &TicTacToeGame) {
    println!("{}", game.board());
    println!("{}", status_message(game.status()));
}

/// The configured AI drives its own mark; a second engine with the same
/// strategy answers for the other side.
fn self_play(game: &mut TicTacToeGame, settings: &TicTacToeSettings) -> Result<(), GameError> {
    let other = AdversarialSearch::new(game.ai_mark().opponent().unwrap_or_default())?;
    let other_mark = other.ai_mark();

    while !game.status().is_over() {
        if game.is_ai_turn() {
            let outcome = game.play_ai_turn()?;
            print_move(game.ai_mark(), outcome);
        } else {
            let mut scratch = *game.board();
            let outcome = other.search(&mut scratch, settings.strategy)?;
            game.place_mark(outcome.best_move)?;
            print_move(other_mark, outcome);
        }
    }
    Ok(())
}

fn print_move(mark: Mark, outcome: SearchOutcome) {
    println!(
        "{} plays {} (score {}, {} nodes)",
        mark, outcome.best_move, outcome.score, outcome.nodes_visited
    );
}

/// Plays games until the input closes or the human declines a rematch.
fn play_against_human(game: &mut TicTacToeGame, input: &mut impl BufRead) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if !play_one_game(game, input)? {
            log!("Input closed, abandoning game");
            return Ok(());
        }
        print_result(game);

        print!("Play again? (y/n): ");
        io::stdout().flush()?;
        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 || !answer.trim().eq_ignore_ascii_case("y") {
            return Ok(());
        }
        game.reset();
    }
}

/// `Ok(false)` when the input ran out before the game ended.
fn play_one_game(game: &mut TicTacToeGame, input: &mut impl BufRead) -> Result<bool, Box<dyn std::error::Error>> {
    while !game.status().is_over() {
        if game.is_ai_turn() {
            let outcome = game.play_ai_turn()?;
            println!("AI plays {}", outcome.best_move);
            continue;
        }

        println!("{}", game.board());
        print!("{} to move (row col): ", game.current_mark());
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }

        let square = match parse_square(&line) {
            Some(square) => square,
            None => {
                println!("Enter a move as two numbers, e.g. `1 2`");
                continue;
            }
        };
        if let Err(e) = game.place_mark(square) {
            println!("{}", e);
        }
    }
    Ok(true)
}

fn parse_square(line: &str) -> Option<Square> {
    let mut parts = line.split_whitespace().map(str::parse::<usize>);
    let row = parts.next()?.ok()?;
    let col = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Square::new(row, col))
}

fn status_message(status: GameStatus) -> &'static str {
    match status {
        GameStatus::InProgress => "Game abandoned",
        GameStatus::XWon => "X wins",
        GameStatus::OWon => "O wins",
        GameStatus::Draw => "Draw",
    }
}
