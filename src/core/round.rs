//! Round module - orchestrates one game round
//!
//! A [`Round`] owns the board, the unplaced hand of shape instances, the
//! score, and the playing/game-over state. Placement legality, commits,
//! line clears and the loss scan all live on [`Board`]; this module only
//! sequences them: validate, commit, remove from hand, clear, refill,
//! loss-check. Each `request_place` call runs to completion, so callers
//! never observe the board mid-commit.

use crate::core::board::{Board, ClearedCell, CommitError};
use crate::core::rng::SimpleRng;
use crate::core::shape::{Shape, ShapeCatalog};
use crate::core::snapshot::RoundSnapshot;
use crate::types::{GridPos, InstanceId, RoundState};

/// Errors from round operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundError {
    /// The shape handle is not in the current unplaced hand.
    UnknownInstance(InstanceId),
    /// A mutating operation was attempted after game over (only `reset` is
    /// accepted then).
    RoundEnded,
    /// The internal commit was rejected. `request_place` validates before
    /// committing, so this only surfaces a tag-arity mistake by the caller.
    Commit(CommitError),
}

impl RoundError {
    pub fn code(self) -> &'static str {
        match self {
            RoundError::UnknownInstance(_) => "unknown_instance",
            RoundError::RoundEnded => "round_ended",
            RoundError::Commit(err) => err.code(),
        }
    }
}

impl std::fmt::Display for RoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundError::UnknownInstance(id) => {
                write!(f, "shape instance {id} is not in the unplaced hand")
            }
            RoundError::RoundEnded => write!(f, "round has ended; reset to continue"),
            RoundError::Commit(err) => write!(f, "commit rejected: {err}"),
        }
    }
}

impl std::error::Error for RoundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoundError::Commit(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CommitError> for RoundError {
    fn from(err: CommitError) -> Self {
        RoundError::Commit(err)
    }
}

/// One in-play shape awaiting placement, paired with its caller-visible id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeInstance {
    id: InstanceId,
    shape: Shape,
}

impl ShapeInstance {
    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// Result of a `request_place` call that was accepted for processing.
///
/// `placed == false` means the placement was legal to ask about but illegal
/// to perform (out of bounds or overlapping); nothing was mutated and the
/// round stays as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOutcome<T> {
    pub placed: bool,
    pub score_delta: u32,
    pub cleared: Vec<ClearedCell<T>>,
    /// Whether this placement emptied the hand and dealt a fresh batch.
    pub hand_refilled: bool,
    pub game_over: bool,
}

impl<T> PlaceOutcome<T> {
    fn rejected() -> Self {
        Self {
            placed: false,
            score_delta: 0,
            cleared: Vec::new(),
            hand_refilled: false,
            game_over: false,
        }
    }
}

/// Supervisor for one round of play.
///
/// All collaborators are injected at construction (catalog, dimensions,
/// seed); there is no ambient global state. `T` is the caller's opaque
/// per-cell tag type, stored on commit and handed back on clear.
#[derive(Debug, Clone)]
pub struct Round<T> {
    board: Board<T>,
    catalog: ShapeCatalog,
    rng: SimpleRng,
    unplaced: Vec<ShapeInstance>,
    hand_size: usize,
    next_instance: u32,
    score: u32,
    state: RoundState,
}

impl<T> Round<T> {
    /// Start a new round: empty board, `hand_size` freshly sampled shapes,
    /// score 0.
    ///
    /// Panics if `hand_size` is 0 (a round with no pieces cannot be played)
    /// or the board dimensions are unsupported (see [`Board::new`]).
    pub fn new(width: u8, height: u8, hand_size: usize, catalog: ShapeCatalog, seed: u32) -> Self {
        assert!(hand_size > 0, "hand_size must be at least 1");
        let mut round = Self {
            board: Board::new(width, height),
            catalog,
            rng: SimpleRng::new(seed),
            unplaced: Vec::with_capacity(hand_size),
            hand_size,
            next_instance: 0,
            score: 0,
            state: RoundState::Playing,
        };
        round.deal_hand();
        round
    }

    /// Deal a full batch of freshly sampled instances into the hand.
    /// The batch size always equals the initial hand size.
    fn deal_hand(&mut self) {
        for _ in 0..self.hand_size {
            let shape = self.catalog.sample(&mut self.rng).clone();
            let id = InstanceId(self.next_instance);
            self.next_instance += 1;
            self.unplaced.push(ShapeInstance { id, shape });
        }
    }

    fn position_of(&self, id: InstanceId) -> Option<usize> {
        self.unplaced.iter().position(|inst| inst.id == id)
    }

    /// Read-only legality query for live drag-preview feedback.
    ///
    /// Permitted even after game over since it mutates nothing. Out of
    /// bounds and overlap both collapse to `false`; no caller behavior
    /// depends on the distinction.
    pub fn can_place(&self, id: InstanceId, origin: GridPos) -> Result<bool, RoundError> {
        let pos = self
            .position_of(id)
            .ok_or(RoundError::UnknownInstance(id))?;
        Ok(self.board.can_place(&self.unplaced[pos].shape, origin))
    }

    /// Attempt to place an in-play shape with its local (0, 0) cell at
    /// `origin`.
    ///
    /// `tags` is indexed like the shape's cell mask; tags for filled cells
    /// are attached to the board cells they occupy and returned when those
    /// cells clear. On success the instance leaves the hand, full lines are
    /// cleared and scored, the hand is re-dealt if it emptied, and the loss
    /// scan decides whether the round ends. An illegal placement returns
    /// `Ok` with `placed: false` and no state change.
    pub fn request_place(
        &mut self,
        id: InstanceId,
        origin: GridPos,
        tags: Vec<Option<T>>,
    ) -> Result<PlaceOutcome<T>, RoundError> {
        if self.state == RoundState::GameOver {
            return Err(RoundError::RoundEnded);
        }
        let pos = self
            .position_of(id)
            .ok_or(RoundError::UnknownInstance(id))?;

        if !self.board.can_place(&self.unplaced[pos].shape, origin) {
            return Ok(PlaceOutcome::rejected());
        }

        // Commit before touching the hand: a tag-arity rejection here must
        // leave the round unchanged.
        self.board.commit(&self.unplaced[pos].shape, origin, tags)?;
        self.unplaced.remove(pos);

        let outcome = self.board.clear_full_lines();
        self.score += outcome.score_delta;

        let hand_refilled = self.unplaced.is_empty();
        if hand_refilled {
            self.deal_hand();
        }

        let candidates = self.unplaced.iter().map(ShapeInstance::shape);
        if !self.board.any_placement_exists(candidates) {
            self.state = RoundState::GameOver;
        }

        Ok(PlaceOutcome {
            placed: true,
            score_delta: outcome.score_delta,
            cleared: outcome.cleared,
            hand_refilled,
            game_over: self.state == RoundState::GameOver,
        })
    }

    /// Reinitialize to the start state: cleared board, score 0, a fresh
    /// hand, `Playing`. Accepted in any state; the RNG stream continues so
    /// a restarted round deals different shapes.
    pub fn reset(&mut self) {
        self.board.clear();
        self.unplaced.clear();
        self.score = 0;
        self.state = RoundState::Playing;
        self.deal_hand();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn game_over(&self) -> bool {
        self.state == RoundState::GameOver
    }

    pub fn board(&self) -> &Board<T> {
        &self.board
    }

    /// The current unplaced hand, in deal order.
    pub fn unplaced(&self) -> &[ShapeInstance] {
        &self.unplaced
    }

    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    /// Read-only view of the whole round for redraw.
    pub fn snapshot(&self) -> RoundSnapshot<'_, T> {
        RoundSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            cells: self.board.cells(),
            score: self.score,
            state: self.state,
            unplaced: &self.unplaced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(defs: &str) -> ShapeCatalog {
        ShapeCatalog::load(defs).unwrap()
    }

    fn no_tags(shape: &Shape) -> Vec<Option<u32>> {
        vec![None; shape.cells().len()]
    }

    #[test]
    fn test_new_round_initial_state() {
        let round: Round<u32> = Round::new(8, 8, 3, catalog("1;"), 42);
        assert_eq!(round.score(), 0);
        assert_eq!(round.state(), RoundState::Playing);
        assert_eq!(round.unplaced().len(), 3);
        assert_eq!(round.board().occupied_count(), 0);

        // Ids are distinct and in deal order.
        let ids: Vec<_> = round.unplaced().iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec![InstanceId(0), InstanceId(1), InstanceId(2)]);
    }

    #[test]
    fn test_unknown_instance() {
        let mut round: Round<u32> = Round::new(8, 8, 1, catalog("1;"), 1);
        let bogus = InstanceId(99);
        assert_eq!(
            round.can_place(bogus, GridPos::new(0, 0)),
            Err(RoundError::UnknownInstance(bogus))
        );
        let err = round
            .request_place(bogus, GridPos::new(0, 0), vec![None])
            .unwrap_err();
        assert_eq!(err.code(), "unknown_instance");
        assert_eq!(round.unplaced().len(), 1);
    }

    #[test]
    fn test_rejected_placement_no_mutation() {
        // 3-bar on a 2x2 board can never be placed.
        let mut round: Round<u32> = Round::new(2, 2, 1, catalog("111;"), 1);
        let id = round.unplaced()[0].id();

        assert_eq!(round.can_place(id, GridPos::new(0, 0)), Ok(false));
        let outcome = round
            .request_place(id, GridPos::new(0, 0), vec![None; 3])
            .unwrap();
        assert!(!outcome.placed);
        assert_eq!(outcome.score_delta, 0);
        assert!(outcome.cleared.is_empty());
        assert_eq!(round.unplaced().len(), 1);
        assert_eq!(round.state(), RoundState::Playing);
    }

    #[test]
    fn test_place_removes_instance_and_refills_when_empty() {
        let mut round: Round<u32> = Round::new(8, 8, 2, catalog("1;"), 7);
        let first = round.unplaced()[0].id();
        let second = round.unplaced()[1].id();

        let outcome = round
            .request_place(first, GridPos::new(0, 0), vec![None])
            .unwrap();
        assert!(outcome.placed);
        assert!(!outcome.hand_refilled);
        assert_eq!(round.unplaced().len(), 1);

        let outcome = round
            .request_place(second, GridPos::new(1, 0), vec![None])
            .unwrap();
        assert!(outcome.placed);
        assert!(outcome.hand_refilled);
        assert_eq!(round.unplaced().len(), 2);

        // A placed id is gone for good.
        assert_eq!(
            round.can_place(first, GridPos::new(3, 3)),
            Err(RoundError::UnknownInstance(first))
        );
        // Refilled instances get fresh ids.
        assert!(round.unplaced().iter().all(|i| i.id().0 >= 2));
    }

    #[test]
    fn test_tag_arity_error_leaves_round_unchanged() {
        let mut round: Round<u32> = Round::new(8, 8, 1, catalog("11;"), 1);
        let id = round.unplaced()[0].id();

        let err = round
            .request_place(id, GridPos::new(0, 0), vec![Some(1)])
            .unwrap_err();
        assert_eq!(
            err,
            RoundError::Commit(CommitError::TagCountMismatch { expected: 2, got: 1 })
        );
        assert_eq!(round.unplaced().len(), 1);
        assert_eq!(round.board().occupied_count(), 0);
    }

    #[test]
    fn test_game_over_when_nothing_fits() {
        // A 2x2 square on a 3x3 board: after one placement at (0, 0) no
        // free 2x2 block remains, so the refilled square cannot fit.
        let mut round: Round<u32> = Round::new(3, 3, 1, catalog("11;11;"), 5);
        let id = round.unplaced()[0].id();

        let outcome = round
            .request_place(id, GridPos::new(0, 0), no_tags(round.unplaced()[0].shape()))
            .unwrap();
        assert!(outcome.placed);
        assert_eq!(outcome.score_delta, 0);
        assert!(outcome.hand_refilled);
        assert!(outcome.game_over);
        assert_eq!(round.state(), RoundState::GameOver);
    }

    #[test]
    fn test_round_ended_blocks_mutation_but_not_queries() {
        let mut round: Round<u32> = Round::new(3, 3, 1, catalog("11;11;"), 5);
        let id = round.unplaced()[0].id();
        let tags = no_tags(round.unplaced()[0].shape());
        round.request_place(id, GridPos::new(0, 0), tags).unwrap();
        assert!(round.game_over());

        let survivor = round.unplaced()[0].id();
        let tags = no_tags(round.unplaced()[0].shape());
        assert_eq!(
            round.request_place(survivor, GridPos::new(0, 0), tags),
            Err(RoundError::RoundEnded)
        );
        // Read-only query still answers.
        assert_eq!(round.can_place(survivor, GridPos::new(1, 1)), Ok(false));
    }

    #[test]
    fn test_reset_restores_playing_state() {
        let mut round: Round<u32> = Round::new(3, 3, 1, catalog("11;11;"), 5);
        let id = round.unplaced()[0].id();
        let tags = no_tags(round.unplaced()[0].shape());
        round.request_place(id, GridPos::new(0, 0), tags).unwrap();
        assert!(round.game_over());

        round.reset();
        assert_eq!(round.state(), RoundState::Playing);
        assert_eq!(round.score(), 0);
        assert_eq!(round.board().occupied_count(), 0);
        assert_eq!(round.unplaced().len(), 1);
    }

    #[test]
    fn test_reset_mid_round_allowed() {
        let mut round: Round<u32> = Round::new(8, 8, 3, catalog("1;"), 9);
        let id = round.unplaced()[0].id();
        round.request_place(id, GridPos::new(4, 4), vec![None]).unwrap();
        assert_eq!(round.board().occupied_count(), 1);

        round.reset();
        assert_eq!(round.board().occupied_count(), 0);
        assert_eq!(round.unplaced().len(), 3);
    }

    #[test]
    fn test_score_accumulates_within_round() {
        // 4-bars, hand of 1: two bars complete row 0.
        let mut round: Round<u32> = Round::new(8, 8, 1, catalog("1111;"), 3);

        let id = round.unplaced()[0].id();
        let outcome = round
            .request_place(id, GridPos::new(0, 0), vec![None; 4])
            .unwrap();
        assert_eq!(outcome.score_delta, 0);
        assert!(outcome.hand_refilled);

        let id = round.unplaced()[0].id();
        let outcome = round
            .request_place(id, GridPos::new(4, 0), vec![None; 4])
            .unwrap();
        assert_eq!(outcome.score_delta, 40);
        assert_eq!(outcome.cleared.len(), 8);
        assert_eq!(round.score(), 40);
    }

    #[test]
    fn test_snapshot_reflects_round() {
        let mut round: Round<u32> = Round::new(8, 8, 1, catalog("1;"), 11);
        let id = round.unplaced()[0].id();
        round
            .request_place(id, GridPos::new(2, 3), vec![Some(77)])
            .unwrap();

        let snap = round.snapshot();
        assert_eq!((snap.width, snap.height), (8, 8));
        assert!(snap.occupied(2, 3));
        assert_eq!(snap.tag(2, 3), Some(&77));
        assert!(!snap.occupied(0, 0));
        assert_eq!(snap.unplaced.len(), 1);
        assert!(snap.playable());
    }
}
