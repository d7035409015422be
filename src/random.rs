//! Random initial boards.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::board::Board;
use crate::error::{BlifsError, Result};

/// Dimensions and density of a random board, written `w:h[:d]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomSpec {
    pub width: usize,
    pub height: usize,
    /// Each cell is alive with probability `1/divisor` when the divisor is
    /// above 2, and `1/2` otherwise.
    pub divisor: Option<u32>,
}

impl RandomSpec {
    /// The `(numerator, denominator)` chance of a live cell.
    pub fn ratio(&self) -> (u32, u32) {
        match self.divisor {
            Some(d) if d > 2 => (1, d),
            _ => (1, 2),
        }
    }

    pub fn probability(&self) -> f64 {
        let (num, den) = self.ratio();
        f64::from(num) / f64::from(den)
    }
}

impl FromStr for RandomSpec {
    type Err = BlifsError;

    fn from_str(text: &str) -> Result<Self> {
        let invalid = || BlifsError::InvalidRandomSpec(text.to_string());

        let parts: Vec<&str> = text.split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid());
        }
        let width = parts[0].trim().parse().map_err(|_| invalid())?;
        let height = parts[1].trim().parse().map_err(|_| invalid())?;
        // A trailing colon with nothing after it means no divisor
        let divisor = match parts.get(2).map(|d| d.trim()) {
            Some("") | None => None,
            Some(d) => Some(d.parse().map_err(|_| invalid())?),
        };

        Ok(RandomSpec {
            width,
            height,
            divisor,
        })
    }
}

impl fmt::Display for RandomSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)?;
        if let Some(d) = self.divisor {
            write!(f, ":{d}")?;
        }
        Ok(())
    }
}

/// Where the generator's seed comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedSource {
    /// Sub-second nanoseconds of the system clock; differs run to run.
    #[default]
    Clock,
    /// A caller-supplied seed; the same seed yields the same board.
    Fixed(u64),
}

impl SeedSource {
    pub fn resolve(self) -> u64 {
        match self {
            SeedSource::Fixed(seed) => seed,
            SeedSource::Clock => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| u64::from(d.subsec_nanos()))
                .unwrap_or_default(),
        }
    }
}

/// Generates a board whose cells are independently alive with the chance
/// given by `spec`.
///
/// # Errors
///
/// Returns [`BlifsError::AllocationError`] for zero or oversized dimensions.
pub fn generate(spec: &RandomSpec, seed: SeedSource) -> Result<Board> {
    let seed = seed.resolve();
    info!("generating {}x{} board with seed {seed}", spec.width, spec.height);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_with(spec, &mut rng)
}

/// Same as [`generate`] with a caller-owned random number generator.
pub fn generate_with<R: Rng + ?Sized>(spec: &RandomSpec, rng: &mut R) -> Result<Board> {
    let mut board = Board::new(spec.width, spec.height)?;
    let (num, den) = spec.ratio();

    for x in 0..spec.width {
        for y in 0..spec.height {
            if rng.gen_ratio(num, den) {
                board.set(x, y, true)?;
            }
        }
    }
    Ok(board)
}
