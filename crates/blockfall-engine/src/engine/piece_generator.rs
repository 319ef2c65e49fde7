use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Policy for choosing the next piece kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceRule {
    /// Independent uniform draw over the seven kinds.
    ///
    /// There is no fairness guarantee: the same kind may repeat any number of times.
    #[default]
    Uniform,
    /// Shuffled bags of all seven kinds.
    ///
    /// Every consecutive block of seven draws, counted from the start of the
    /// game, contains each kind exactly once.
    Bag7,
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed for the generator's random number stream.
/// The same seed and [`PieceRule`] produce the same sequence of kinds, which
/// makes games reproducible for tests and recordings.
///
/// Seeds are written as 32 hexadecimal digits.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceGenerator, PieceRule, PieceSeed};
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
///
/// let mut first = PieceGenerator::with_seed(PieceRule::Uniform, seed);
/// let mut second = PieceGenerator::with_seed(PieceRule::Uniform, seed);
/// for _ in 0..10 {
///     assert_eq!(first.next_kind(), second.next_kind());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: expected 32 hexadecimal digits")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
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

/// Seeded source of piece kinds.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rule: PieceRule,
    seed: PieceSeed,
    rng: Pcg32,
    bag: ArrayVec<PieceKind, { PieceKind::LEN }>,
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new(rule: PieceRule) -> Self {
        Self::with_seed(rule, rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(rule: PieceRule, seed: PieceSeed) -> Self {
        Self {
            rule,
            seed,
            rng: Pcg32::from_seed(seed.0),
            bag: ArrayVec::new(),
        }
    }

    #[must_use]
    pub fn rule(&self) -> PieceRule {
        self.rule
    }

    /// Returns the seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    /// Draws the next kind.
    pub fn next_kind(&mut self) -> PieceKind {
        match self.rule {
            PieceRule::Uniform => self.rng.random(),
            PieceRule::Bag7 => {
                if self.bag.is_empty() {
                    self.refill_bag();
                }
                self.bag.pop().expect("bag is refilled when empty")
            }
        }
    }

    fn refill_bag(&mut self) {
        let mut new_bag = PieceKind::ALL;
        new_bag.shuffle(&mut self.rng);
        self.bag.extend(new_bag);
    }
}
