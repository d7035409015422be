//! Neighbor-count rule tables.

use std::fmt;
use std::str::FromStr;

use crate::error::{BlifsError, Result};

/// Number of distinct neighbor counts, `0..=8`.
pub const NEIGHBOR_COUNTS: usize = 9;

/// What happens to a cell in the next generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    /// The cell keeps its current state.
    #[default]
    Unchanged,
    /// The cell is alive in the next generation.
    BecomesAlive,
    /// The cell is dead in the next generation, whether or not it was alive.
    BecomesDead,
}

/// Survive/create decisions indexed by the number of live neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTable {
    /// `survive[n]`: a live cell with `n` live neighbors stays alive
    survive: [bool; NEIGHBOR_COUNTS],
    /// `create[n]`: a dead cell with `n` live neighbors becomes alive
    create: [bool; NEIGHBOR_COUNTS],
}

impl RuleTable {
    pub fn new(survive: [bool; NEIGHBOR_COUNTS], create: [bool; NEIGHBOR_COUNTS]) -> Self {
        RuleTable { survive, create }
    }

    /// Conway's Game of Life, B3/S23.
    pub fn conway() -> Self {
        let mut survive = [false; NEIGHBOR_COUNTS];
        let mut create = [false; NEIGHBOR_COUNTS];
        survive[2] = true;
        survive[3] = true;
        create[3] = true;
        RuleTable::new(survive, create)
    }

    pub fn survive(&self) -> &[bool; NEIGHBOR_COUNTS] {
        &self.survive
    }

    pub fn create(&self) -> &[bool; NEIGHBOR_COUNTS] {
        &self.create
    }

    /// Decides the transition of one cell.
    ///
    /// A dead cell that is not created reports [`Transition::BecomesDead`]
    /// even though its state does not change. Only [`Transition::BecomesAlive`]
    /// counts as activity when detecting stasis.
    ///
    /// # Arguments
    ///
    /// * `alive` - The current state of the cell
    /// * `live_neighbors` - Live cells among its 8 neighbors, at most 8
    ///
    /// # Panics
    ///
    /// Panics if `live_neighbors > 8`.
    pub fn decide(&self, alive: bool, live_neighbors: u8) -> Transition {
        let n = usize::from(live_neighbors);
        if alive {
            if self.survive[n] {
                Transition::Unchanged
            } else {
                Transition::BecomesDead
            }
        } else if self.create[n] {
            Transition::BecomesAlive
        } else {
            Transition::BecomesDead
        }
    }

    /// Parses the 18-flag table format: nine `0`/`1` survive flags followed
    /// by nine `0`/`1` create flags, whitespace separated.
    fn parse_flags(text: &str) -> Result<Self> {
        let mut flags = Vec::with_capacity(2 * NEIGHBOR_COUNTS);
        let mut last_line = 1;

        for (line_no, line) in text.lines().enumerate() {
            let line_no = line_no + 1;
            last_line = line_no;
            for token in line.split_whitespace() {
                let flag = match token {
                    "0" => false,
                    "1" => true,
                    other => {
                        return Err(BlifsError::MalformedRulesFile {
                            line: line_no,
                            reason: format!("expected 0 or 1, found '{other}'"),
                        })
                    }
                };
                if flags.len() == 2 * NEIGHBOR_COUNTS {
                    return Err(BlifsError::MalformedRulesFile {
                        line: line_no,
                        reason: format!("more than {} flags", 2 * NEIGHBOR_COUNTS),
                    });
                }
                flags.push(flag);
            }
        }

        if flags.len() != 2 * NEIGHBOR_COUNTS {
            return Err(BlifsError::MalformedRulesFile {
                line: last_line,
                reason: format!(
                    "expected {} flags, found {}",
                    2 * NEIGHBOR_COUNTS,
                    flags.len()
                ),
            });
        }

        let mut survive = [false; NEIGHBOR_COUNTS];
        let mut create = [false; NEIGHBOR_COUNTS];
        survive.copy_from_slice(&flags[..NEIGHBOR_COUNTS]);
        create.copy_from_slice(&flags[NEIGHBOR_COUNTS..]);
        Ok(RuleTable::new(survive, create))
    }

    /// Parses a `B<digits>/S<digits>` rulestring, in either order.
    fn parse_rulestring(text: &str) -> Result<Self> {
        let malformed = |reason: String| BlifsError::MalformedRulesFile { line: 1, reason };

        let mut survive = None;
        let mut create = None;
        for part in text.trim().split('/') {
            let mut chars = part.chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut create,
                Some('S') => &mut survive,
                _ => return Err(malformed(format!("unexpected rulestring part '{part}'"))),
            };
            if slot.is_some() {
                return Err(malformed(format!("repeated rulestring part '{part}'")));
            }

            let mut counts = [false; NEIGHBOR_COUNTS];
            for c in chars {
                match c.to_digit(10) {
                    Some(d) if (d as usize) < NEIGHBOR_COUNTS => counts[d as usize] = true,
                    _ => return Err(malformed(format!("invalid neighbor count '{c}'"))),
                }
            }
            *slot = Some(counts);
        }

        match (survive, create) {
            (Some(survive), Some(create)) => Ok(RuleTable::new(survive, create)),
            _ => Err(malformed(format!(
                "rulestring '{}' needs both B and S parts",
                text.trim()
            ))),
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        RuleTable::conway()
    }
}

impl FromStr for RuleTable {
    type Err = BlifsError;

    /// Accepts either the two-line flag table or a `B3/S23` rulestring.
    fn from_str(text: &str) -> Result<Self> {
        let first = text.trim_start().chars().next();
        match first {
            Some(c) if c.eq_ignore_ascii_case(&'b') || c.eq_ignore_ascii_case(&'s') => {
                RuleTable::parse_rulestring(text)
            }
            _ => RuleTable::parse_flags(text),
        }
    }
}

/// Formats as a `B…/S…` rulestring.
impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for n in (0..NEIGHBOR_COUNTS).filter(|&n| self.create[n]) {
            write!(f, "{n}")?;
        }
        write!(f, "/S")?;
        for n in (0..NEIGHBOR_COUNTS).filter(|&n| self.survive[n]) {
            write!(f, "{n}")?;
        }
        Ok(())
    }
}
