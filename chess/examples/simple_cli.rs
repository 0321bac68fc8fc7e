// Simple command-line application to move pieces around

use fenboard::{board::PrettyStyle, Board, Move};
use std::env;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

fn main() {
    env_logger::init();

    let fen = env::args().nth(1);
    let mut board = match Board::new(fen.as_deref()) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Bad FEN: {}", e);
            return;
        }
    };
    let mut stdin = io::stdin().lock();

    loop {
        println!("{}", board.pretty(PrettyStyle::Utf8));
        println!("{}", board.summary());
        print!("Move (like \"e2 e4\", empty to quit): ");
        io::stdout().flush().unwrap();
        let mut s = String::new();
        if stdin.read_line(&mut s).unwrap() == 0 {
            break;
        }
        let s = s.trim();
        if s.is_empty() {
            break;
        }

        let mv = match Move::from_str(s) {
            Ok(mv) => mv,
            Err(e) => {
                println!("Bad move: {}", e);
                println!();
                continue;
            }
        };

        if let Some(p) = board.get(mv.src()) {
            let legal: Vec<_> = p.legal_moves(&board).iter().map(|c| c.to_string()).collect();
            println!("{} at {} may go to: {}", p, p.coord(), legal.join(" "));
        }

        match board.make_move(mv) {
            Ok(Some(captured)) => println!("Captured {} at {}", captured, captured.coord()),
            Ok(None) => {}
            Err(e) => println!("Cannot move: {}", e),
        }
        println!();
    }

    println!("{}", board.as_fen());
}
