//! # Memory match
//!
//! Shuffled pairing deck and the flip/match/mismatch state machine. The
//! engine owns no timers: the shell calls [`MemoryGame::poll`] from its
//! ticker with timestamps off a [`crate::clock::Clock`], which both advances
//! the 1-second elapsed counter and resolves pending evaluations after their
//! fixed delays.

use rand::seq::SliceRandom;
use std::time::Duration;

/// The fixed symbol pool pairs are drawn from.
pub const ICONS: [&str; 24] = [
    "🌞", "🌙", "⭐", "🌈", "🌊", "🌴", "🌵", "🌸", "🍎", "🍌", "🍇", "🍓", "🍒", "🍑", "🍍",
    "🥥", "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼",
];

/// How long a found pair stays face-up before locking in.
pub const MATCH_DELAY: Duration = Duration::from_millis(500);
/// How long a mismatch stays face-up before flipping back.
pub const MISMATCH_DELAY: Duration = Duration::from_millis(1000);

#[derive(strum::AsRefStr, strum::EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}
impl Difficulty {
    #[must_use]
    pub fn pairs(self) -> usize {
        match self {
            Self::Easy => 6,
            Self::Medium => 10,
            Self::Hard => 15,
        }
    }
    /// Layout hint for the shell's card grid.
    #[must_use]
    pub fn grid_columns(self) -> usize {
        match self {
            Self::Easy => 3,
            Self::Medium => 4,
            Self::Hard => 5,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Face {
    Hidden,
    Up,
    Matched,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Card {
    /// Stable identity; equals the card's deck position.
    pub id: usize,
    pub icon: &'static str,
    pub face: Face,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Dealt, waiting for the first flip. The clock hasn't started.
    Idle,
    /// Clock running, fewer than two unmatched cards face-up.
    Running,
    /// Two cards face-up; input locked until the deadline passes.
    Evaluating {
        deadline: Duration,
        pair: [usize; 2],
        matched: bool,
    },
    /// Every pair found. The clock is frozen.
    Complete,
}

pub struct MemoryGame {
    cards: Vec<Card>,
    difficulty: Difficulty,
    phase: Phase,
    moves: u32,
    matched_pairs: usize,
    first_up: Option<usize>,
    started_at: Option<Duration>,
    elapsed_seconds: u64,
}

impl MemoryGame {
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, &mut rand::thread_rng())
    }
    /// Deterministic construction for tests and replays.
    pub fn with_rng<R: rand::Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        Self {
            cards: deal(difficulty, rng),
            difficulty,
            phase: Phase::Idle,
            moves: 0,
            matched_pairs: 0,
            first_up: None,
            started_at: None,
            elapsed_seconds: 0,
        }
    }
    /// Fresh deck at the same difficulty, all counters reset.
    pub fn restart(&mut self) {
        self.restart_with(&mut rand::thread_rng());
    }
    pub fn restart_with<R: rand::Rng>(&mut self, rng: &mut R) {
        *self = Self::with_rng(self.difficulty, rng);
    }
    /// Change difficulty and redeal. Refused (returns `false`) mid-game:
    /// the selector is locked from the first flip until completion.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        self.set_difficulty_with(difficulty, &mut rand::thread_rng())
    }
    pub fn set_difficulty_with<R: rand::Rng>(
        &mut self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> bool {
        if matches!(self.phase, Phase::Running | Phase::Evaluating { .. }) {
            return false;
        }
        self.difficulty = difficulty;
        self.restart_with(rng);
        true
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }
    /// Whole seconds since the first flip, frozen on completion.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Flip the card at deck position `index`. Ignored while evaluating,
    /// after completion, and on cards already face-up or matched.
    pub fn flip(&mut self, index: usize, now: Duration) {
        match self.phase {
            Phase::Evaluating { .. } | Phase::Complete => return,
            Phase::Idle => {
                // First flip of the game starts the clock.
                self.phase = Phase::Running;
                self.started_at = Some(now);
            }
            Phase::Running => {}
        }
        let Some(card) = self.cards.get_mut(index) else {
            return;
        };
        if card.face != Face::Hidden {
            return;
        }
        card.face = Face::Up;

        if let Some(first) = self.first_up.take() {
            // Second card up: lock input and schedule the verdict.
            self.moves += 1;
            let matched = self.cards[first].icon == self.cards[index].icon;
            let delay = if matched { MATCH_DELAY } else { MISMATCH_DELAY };
            self.phase = Phase::Evaluating {
                deadline: now + delay,
                pair: [first, index],
                matched,
            };
        } else {
            self.first_up = Some(index);
        }
    }

    /// Drive time forward: refresh the elapsed counter and resolve a pending
    /// evaluation once its deadline passes. Call from the shell's ticker.
    pub fn poll(&mut self, now: Duration) {
        if matches!(self.phase, Phase::Idle | Phase::Complete) {
            return;
        }
        if let Some(started_at) = self.started_at {
            self.elapsed_seconds = now.saturating_sub(started_at).as_secs();
        }
        let Phase::Evaluating {
            deadline,
            pair,
            matched,
        } = self.phase
        else {
            return;
        };
        if now < deadline {
            return;
        }
        for index in pair {
            self.cards[index].face = if matched { Face::Matched } else { Face::Hidden };
        }
        if matched {
            self.matched_pairs += 1;
            if self.matched_pairs == self.difficulty.pairs() {
                self.phase = Phase::Complete;
                return;
            }
        }
        self.phase = Phase::Running;
    }
}

fn deal<R: rand::Rng>(difficulty: Difficulty, rng: &mut R) -> Vec<Card> {
    let mut pool: Vec<&'static str> = ICONS.to_vec();
    pool.shuffle(rng);
    pool.truncate(difficulty.pairs());
    // Two of each icon, shuffled, then identified by final position.
    let mut icons: Vec<&'static str> = pool.iter().chain(pool.iter()).copied().collect();
    icons.shuffle(rng);
    icons
        .into_iter()
        .enumerate()
        .map(|(id, icon)| Card {
            id,
            icon,
            face: Face::Hidden,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::{Difficulty, Face, MemoryGame, Phase, MATCH_DELAY, MISMATCH_DELAY};
    use rand::SeedableRng;
    use std::time::Duration;

    fn game(difficulty: Difficulty) -> MemoryGame {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        MemoryGame::with_rng(difficulty, &mut rng)
    }
    /// Deck positions of some matching pair, and one card that matches
    /// neither of them.
    fn fixture(game: &MemoryGame) -> ([usize; 2], usize) {
        let cards = game.cards();
        for a in 0..cards.len() {
            for b in a + 1..cards.len() {
                if cards[a].icon == cards[b].icon {
                    let odd = (0..cards.len())
                        .find(|&c| cards[c].icon != cards[a].icon)
                        .unwrap();
                    return ([a, b], odd);
                }
            }
        }
        unreachable!("a dealt deck always holds pairs");
    }
    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn deck_shape_per_difficulty() {
        for (difficulty, pairs) in [
            (Difficulty::Easy, 6),
            (Difficulty::Medium, 10),
            (Difficulty::Hard, 15),
        ] {
            let game = game(difficulty);
            assert_eq!(game.cards().len(), pairs * 2);
            // Exactly two of every icon.
            for card in game.cards() {
                let twins = game
                    .cards()
                    .iter()
                    .filter(|other| other.icon == card.icon)
                    .count();
                assert_eq!(twins, 2);
                assert_eq!(card.face, Face::Hidden);
            }
        }
    }
    #[test]
    fn first_flip_starts_the_clock() {
        let mut game = game(Difficulty::Easy);
        assert_eq!(game.phase(), Phase::Idle);
        game.poll(secs(30));
        assert_eq!(game.elapsed_seconds(), 0);
        game.flip(0, secs(30));
        assert_eq!(game.phase(), Phase::Running);
        game.poll(secs(42));
        assert_eq!(game.elapsed_seconds(), 12);
    }
    #[test]
    fn matching_pair_locks_in_after_the_short_delay() {
        let mut game = game(Difficulty::Easy);
        let ([a, b], _) = fixture(&game);
        game.flip(a, secs(1));
        assert_eq!(game.moves(), 0);
        game.flip(b, secs(2));
        assert_eq!(game.moves(), 1);
        assert!(matches!(game.phase(), Phase::Evaluating { matched: true, .. }));
        // Before the deadline nothing resolves.
        game.poll(secs(2) + MATCH_DELAY / 2);
        assert_eq!(game.matched_pairs(), 0);
        game.poll(secs(2) + MATCH_DELAY);
        assert_eq!(game.matched_pairs(), 1);
        assert_eq!(game.cards()[a].face, Face::Matched);
        assert_eq!(game.cards()[b].face, Face::Matched);
        assert_eq!(game.phase(), Phase::Running);
    }
    #[test]
    fn mismatch_flips_back_after_the_long_delay() {
        let mut game = game(Difficulty::Easy);
        let ([a, _], odd) = fixture(&game);
        game.flip(a, secs(1));
        game.flip(odd, secs(2));
        assert_eq!(game.moves(), 1);
        assert!(matches!(game.phase(), Phase::Evaluating { matched: false, .. }));
        // The mismatch delay is the longer one.
        game.poll(secs(2) + MATCH_DELAY);
        assert!(matches!(game.phase(), Phase::Evaluating { .. }));
        game.poll(secs(2) + MISMATCH_DELAY);
        assert_eq!(game.cards()[a].face, Face::Hidden);
        assert_eq!(game.cards()[odd].face, Face::Hidden);
        assert_eq!(game.matched_pairs(), 0);
        assert_eq!(game.phase(), Phase::Running);
    }
    #[test]
    fn input_is_locked_while_evaluating() {
        let mut game = game(Difficulty::Easy);
        let ([a, _], odd) = fixture(&game);
        game.flip(a, secs(1));
        game.flip(odd, secs(1));
        // Third flip during evaluation is swallowed.
        let third = (0..game.cards().len())
            .find(|&c| c != a && c != odd)
            .unwrap();
        game.flip(third, secs(1));
        assert_eq!(game.cards()[third].face, Face::Hidden);
        // So are re-flips of face-up cards after resolution.
        game.poll(secs(1) + MISMATCH_DELAY);
        game.flip(a, secs(3));
        game.flip(a, secs(3));
        assert_eq!(game.moves(), 1);
    }
    #[test]
    fn completion_freezes_the_clock() {
        let mut game = game(Difficulty::Easy);
        // Sweep the whole deck pair by pair.
        let mut now = secs(1);
        while !game.is_complete() {
            let ([a, b], _) = {
                // Find a still-hidden pair.
                let cards = game.cards();
                let mut found = None;
                'outer: for a in 0..cards.len() {
                    if cards[a].face != Face::Hidden {
                        continue;
                    }
                    for b in a + 1..cards.len() {
                        if cards[b].face == Face::Hidden && cards[a].icon == cards[b].icon {
                            found = Some(([a, b], 0));
                            break 'outer;
                        }
                    }
                }
                found.unwrap()
            };
            game.flip(a, now);
            game.flip(b, now);
            now += MATCH_DELAY;
            game.poll(now);
        }
        assert_eq!(game.matched_pairs(), Difficulty::Easy.pairs());
        assert_eq!(game.moves(), Difficulty::Easy.pairs() as u32);
        let frozen = game.elapsed_seconds();
        // Ticks after completion change nothing.
        game.poll(now + secs(100));
        assert_eq!(game.elapsed_seconds(), frozen);
        game.flip(0, now + secs(100));
        assert_eq!(game.phase(), Phase::Complete);
    }
    #[test]
    fn difficulty_locks_while_running() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(9);
        let mut game = game(Difficulty::Medium);
        assert!(game.set_difficulty_with(Difficulty::Hard, &mut rng));
        assert_eq!(game.cards().len(), 30);
        game.flip(0, secs(1));
        assert!(!game.set_difficulty_with(Difficulty::Easy, &mut rng));
        assert_eq!(game.difficulty(), Difficulty::Hard);
        // Restart unlocks it again.
        game.restart_with(&mut rng);
        assert!(game.set_difficulty_with(Difficulty::Easy, &mut rng));
        assert_eq!(game.cards().len(), 12);
    }
}
