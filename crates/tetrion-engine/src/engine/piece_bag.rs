use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParsePieceSeedError, ShapeKind};

/// Supplies upcoming shapes using the 7-bag randomization algorithm.
///
/// # 7-Bag System
///
/// 1. All 7 shape kinds are put into a bag
/// 2. The bag is shuffled
/// 3. Shapes are drawn in order from the bag
/// 4. A fresh shuffled bag is added once the queue runs empty
///
/// Any 7 consecutive draws starting from a fresh bag contain every shape
/// exactly once.
///
/// # Example
///
/// ```
/// use tetrion_engine::PieceBag;
///
/// let mut bag = PieceBag::new();
/// let next = bag.peek_next();
/// assert_eq!(bag.pop_next(), next);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBag {
    rng: Pcg32,
    queue: VecDeque<ShapeKind>,
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic shape generation.
///
/// A 128-bit seed for the bag's random number generator. The same seed
/// always produces the same sequence of shapes, which makes games
/// reproducible and tests deterministic.
///
/// Seeds are written as 32 hexadecimal digits.
///
/// # Example
///
/// ```
/// use tetrion_engine::PieceSeed;
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// assert_eq!(seed.to_string(), "000102030405060708090a0b0c0d0e0f");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParsePieceSeedError::InvalidLength(s.len()));
        }
        let num = u128::from_str_radix(s, 16)
            .map_err(|_| ParsePieceSeedError::InvalidDigit(s.to_owned()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceBag {
    /// Creates a bag seeded from the thread-local random generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut this = Self {
            rng: Pcg32::from_seed(seed.0),
            queue: VecDeque::with_capacity(ShapeKind::LEN),
        };
        this.refill_if_empty();
        this
    }

    fn refill_if_empty(&mut self) {
        if self.queue.is_empty() {
            let mut new_bag = ShapeKind::ALL;
            new_bag.shuffle(&mut self.rng);
            self.queue.extend(new_bag);
        }
    }

    /// Draws the next shape.
    ///
    /// The queue is refilled right after it runs empty, so it is never empty
    /// between calls.
    pub fn pop_next(&mut self) -> ShapeKind {
        self.refill_if_empty();
        let next = self
            .queue
            .pop_front()
            .expect("piece bag should never be empty after refill");
        self.refill_if_empty();
        next
    }

    /// Returns the shape that the next [`Self::pop_next`] will return.
    #[must_use]
    pub fn peek_next(&self) -> ShapeKind {
        self.queue[0]
    }

    /// Returns the shapes remaining in the current bag, in draw order.
    pub fn upcoming(&self) -> impl Iterator<Item = ShapeKind> + '_ {
        self.queue.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const SEED: PieceSeed = PieceSeed([7; 16]);

    #[test]
    fn test_each_bag_contains_every_shape_once() {
        let mut bag = PieceBag::with_seed(SEED);
        for _ in 0..10 {
            let drawn: HashSet<_> = (0..ShapeKind::LEN).map(|_| bag.pop_next()).collect();
            assert_eq!(drawn.len(), ShapeKind::LEN);
        }
    }

    #[test]
    fn test_peek_matches_pop() {
        let mut bag = PieceBag::with_seed(SEED);
        for _ in 0..20 {
            let peeked = bag.peek_next();
            assert_eq!(bag.upcoming().next(), Some(peeked));
            assert_eq!(bag.pop_next(), peeked);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceBag::with_seed(SEED);
        let mut b = PieceBag::with_seed(SEED);
        for _ in 0..21 {
            assert_eq!(a.pop_next(), b.pop_next());
        }
    }

    #[test]
    fn test_upcoming_shrinks_until_refill() {
        let mut bag = PieceBag::with_seed(SEED);
        assert_eq!(bag.upcoming().count(), 7);
        bag.pop_next();
        assert_eq!(bag.upcoming().count(), 6);
        for _ in 0..6 {
            bag.pop_next();
        }
        assert_eq!(bag.upcoming().count(), 7);
    }

    #[test]
    fn test_seed_serialization() {
        let seed = PieceSeed::from_bytes([
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff,
        ]);
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, "\"00112233445566778899aabbccddeeff\"");
        let parsed: PieceSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, seed);
    }

    #[test]
    fn test_seed_parse_errors() {
        assert_eq!(
            "abc".parse::<PieceSeed>(),
            Err(ParsePieceSeedError::InvalidLength(3))
        );
        assert!(matches!(
            "zz112233445566778899aabbccddeeff".parse::<PieceSeed>(),
            Err(ParsePieceSeedError::InvalidDigit(_))
        ));
        assert!(serde_json::from_str::<PieceSeed>("\"0011\"").is_err());
    }
}
