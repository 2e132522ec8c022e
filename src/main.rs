//! Headless autoplay runner (default binary).
//!
//! Plays a seeded round to completion by greedily taking the first legal
//! placement each turn, then prints the final board and score. Useful as a
//! smoke test of the whole engine and as an API usage example.
//!
//! Usage: `blockgrid [seed] [max-placements]`

use anyhow::{Context, Result};

use blockgrid::core::{Round, ShapeCatalog};
use blockgrid::types::{
    GridPos, InstanceId, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_HAND_SIZE,
};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let seed = parse_or(args.next(), 1, "seed")?;
    let max_placements = parse_or(args.next(), 500, "max-placements")?;

    let catalog = ShapeCatalog::default_set();
    let mut round: Round<u32> = Round::new(
        DEFAULT_BOARD_WIDTH,
        DEFAULT_BOARD_HEIGHT,
        DEFAULT_HAND_SIZE,
        catalog,
        seed,
    );

    println!(
        "seed {seed}: {}x{} board, hand of {}",
        DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT, DEFAULT_HAND_SIZE
    );

    let mut next_tag: u32 = 0;
    let mut placements: u32 = 0;

    while !round.game_over() && placements < max_placements {
        let Some((id, origin, mask_len)) = first_legal_move(&round) else {
            break;
        };

        let tags: Vec<Option<u32>> = (0..mask_len)
            .map(|_| {
                next_tag += 1;
                Some(next_tag)
            })
            .collect();

        let outcome = round
            .request_place(id, origin, tags)
            .with_context(|| format!("placing instance {id} at {origin}"))?;
        placements += 1;

        if outcome.score_delta > 0 {
            println!(
                "placement {placements}: cleared {} cells at {origin} for +{} (total {})",
                outcome.cleared.len(),
                outcome.score_delta,
                round.score()
            );
        }
    }

    if round.game_over() {
        println!("game over after {placements} placements");
    } else {
        println!("stopped after {placements} placements");
    }
    println!("final score: {}", round.score());
    print_board(&round);

    Ok(())
}

fn parse_or(arg: Option<String>, default: u32, name: &str) -> Result<u32> {
    match arg {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("invalid {name} {raw:?}")),
        None => Ok(default),
    }
}

/// First (instance, origin) pair the board accepts, scanning the hand in
/// deal order and origins bottom-left first. Returns the shape's mask
/// length so the caller can size its tag vector.
fn first_legal_move(round: &Round<u32>) -> Option<(InstanceId, GridPos, usize)> {
    let board = round.board();
    for inst in round.unplaced() {
        let shape = inst.shape();
        if shape.width() > board.width() || shape.height() > board.height() {
            continue;
        }
        for y in 0..=(board.height() - shape.height()) {
            for x in 0..=(board.width() - shape.width()) {
                let origin = GridPos::new(x, y);
                if board.can_place(shape, origin) {
                    return Some((inst.id(), origin, shape.cells().len()));
                }
            }
        }
    }
    None
}

fn print_board(round: &Round<u32>) {
    let snap = round.snapshot();
    // Top row first so the board prints the way it is played.
    for y in (0..snap.height).rev() {
        let mut line = String::with_capacity(snap.width as usize);
        for x in 0..snap.width {
            line.push(if snap.occupied(x, y) { '#' } else { '.' });
        }
        println!("{line}");
    }
}
