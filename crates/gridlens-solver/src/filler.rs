//! The backtracking board filler.

use gridlens_core::{Board, Digit, Position};
use rand::{Rng, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64;

/// A randomized constructive solver that completes boards in place.
///
/// [`fill`](BoardFiller::fill) scans row-major to the first empty cell,
/// tries the nine digits in a freshly shuffled order, and backtracks when
/// a cell admits no legal digit. The search is driven by an explicit frame
/// stack rather than recursion, so its depth cost is a fixed 81 frames.
///
/// The filler owns its random source; construct it [`from_seed`]
/// (deterministic) or [`with_rng`] (any [`Rng`]), or use [`new`] for an
/// entropy-seeded default.
///
/// [`from_seed`]: BoardFiller::from_seed
/// [`with_rng`]: BoardFiller::with_rng
/// [`new`]: BoardFiller::new
#[derive(Debug, Clone)]
pub struct BoardFiller<R = Pcg64> {
    rng: R,
}

impl BoardFiller<Pcg64> {
    /// Creates a filler seeded from the thread-local entropy source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Pcg64::from_rng(&mut rand::rng()),
        }
    }

    /// Creates a filler with a deterministic 32-byte seed.
    ///
    /// Two fillers built from the same seed produce identical boards for
    /// identical call sequences.
    #[must_use]
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            rng: Pcg64::from_seed(seed),
        }
    }
}

impl Default for BoardFiller<Pcg64> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> BoardFiller<R> {
    /// Creates a filler driven by the given random source.
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Completes the board in place, returning whether a full valid
    /// assignment was found.
    ///
    /// Pre-filled cells are treated as fixed constraints. On success every
    /// cell is filled and the grid satisfies the row/column/box rules; on
    /// failure the board is restored to its initial contents.
    ///
    /// An already-complete board returns `true` without mutation.
    pub fn fill(&mut self, board: &mut Board) -> bool {
        let mut stack: Vec<Frame> = Vec::with_capacity(81);

        loop {
            let Some(pos) = first_empty(board) else {
                return true;
            };
            let mut candidates = Digit::ALL;
            candidates.shuffle(&mut self.rng);
            stack.push(Frame {
                pos,
                candidates,
                next: 0,
            });

            // Place a digit at the top frame, unwinding exhausted frames.
            loop {
                let Some(frame) = stack.last_mut() else {
                    return false;
                };
                if let Some(digit) = frame.next_fit(board) {
                    board.set(frame.pos, Some(digit));
                    break;
                }
                board.set(frame.pos, None);
                stack.pop();
                // The parent retries its remaining candidates with its own
                // cell vacated, exactly as the recursive formulation does.
                if let Some(parent) = stack.last() {
                    board.set(parent.pos, None);
                }
            }
        }
    }

    /// Returns a completed copy of the board, or `None` when it cannot be
    /// completed. The original board is never mutated.
    pub fn solved_copy(&mut self, board: &Board) -> Option<Board> {
        let mut copy = board.clone();
        self.fill(&mut copy).then_some(copy)
    }
}

/// One cell of the search: the position being decided and the randomized
/// digit order still to try there.
#[derive(Debug)]
struct Frame {
    pos: Position,
    candidates: [Digit; 9],
    next: usize,
}

impl Frame {
    fn next_fit(&mut self, board: &Board) -> Option<Digit> {
        while self.next < 9 {
            let digit = self.candidates[self.next];
            self.next += 1;
            if board.placement_fits(self.pos, digit) {
                return Some(digit);
            }
        }
        None
    }
}

fn first_empty(board: &Board) -> Option<Position> {
    Position::ALL.into_iter().find(|&pos| board.get(pos).is_none())
}
