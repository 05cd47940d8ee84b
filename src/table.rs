use std::io::{self, BufRead};

use thiserror::Error;

use crate::rule::Rule;

/// Exclusive upper bound of the codepoint range the table covers.
pub const MAX_MAPPING: u32 = 0x10000;

/// Codepoints per page of the emitted two-level table.
pub const PAGE_SIZE: usize = 64;

/// Where removed characters go: a rule with no target folds its whole
/// range to a plain space.
pub const NUKE_CHAR: u32 = 0x20;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read mapping source: {0}")]
    Io(#[from] io::Error),
    /// Case folding must have eliminated ASCII capitals before resolution;
    /// a survivor means the sources were merged in the wrong order or the
    /// data itself is broken.
    #[error("codepoint {code:04X} resolves to uppercase {resolved:04X}")]
    Uppercase { code: u32, resolved: u32 },
    #[error("mapping chain for {code:04X} never reaches a fixed point")]
    Cycle { code: u32 },
}

/// Dense per-codepoint fold mapping over `[0, MAX_MAPPING)`, fully resolved:
/// every entry is its own fixed point.
#[derive(Debug)]
pub struct FoldTable {
    map: Vec<u16>,
}

impl FoldTable {
    /// Compiles the two mapping sources into a resolved fold table.
    ///
    /// `folding` is walked in lockstep with an ascending codepoint cursor
    /// and must be sorted the way gennorm2 files are. `decomposition` is
    /// replayed rule by rule on top of the result, so its mappings win
    /// wherever the two overlap. Unparseable lines in either source are
    /// annotations, not errors, and are skipped.
    ///
    /// # Errors
    ///
    /// [`BuildError::Io`] when a source cannot be read,
    /// [`BuildError::Uppercase`] when any codepoint resolves into `A..=Z`,
    /// [`BuildError::Cycle`] when a mapping chain has no fixed point.
    pub fn build(folding: impl BufRead, decomposition: impl BufRead) -> Result<Self, BuildError> {
        let mut table = Self::load_folding(folding)?;
        table.overlay_decompositions(decomposition)?;
        table.resolve()?;
        Ok(table)
    }

    /// Resolved fold for `c`. Identity at and past the table bound, same as
    /// the emitted lookup function.
    #[must_use]
    pub fn lookup(&self, c: u32) -> u32 {
        match usize::try_from(c).ok().and_then(|i| self.map.get(i)) {
            Some(&folded) => u32::from(folded),
            None => c,
        }
    }

    pub(crate) fn page(&self, index: usize) -> &[u16] {
        &self.map[index * PAGE_SIZE..(index + 1) * PAGE_SIZE]
    }

    /// First pass. One rule is active at a time; the cursor fills identity
    /// until it enters the rule's range and the rule is dropped when the
    /// cursor leaves it. A rule whose range is already behind the cursor
    /// never deactivates, so everything after an out-of-order line keeps
    /// the identity mapping.
    #[expect(clippy::cast_possible_truncation)]
    fn load_folding(source: impl BufRead) -> Result<Self, BuildError> {
        let mut map = Vec::with_capacity(MAX_MAPPING as usize);
        let mut lines = source.lines();
        let mut exhausted = false;
        let mut active: Option<Rule> = None;

        for c in 0..MAX_MAPPING {
            while active.is_none() && !exhausted {
                match lines.next() {
                    Some(line) => active = Rule::parse(&line?),
                    None => exhausted = true,
                }
            }

            let entry = match active {
                Some(rule) if rule.covers(c) => {
                    let value = rule.target.unwrap_or(NUKE_CHAR);
                    // An out-of-range target folds nothing.
                    if value < MAX_MAPPING {
                        value
                    } else {
                        c
                    }
                }
                _ => c,
            };
            map.push(entry as u16);

            if active.is_some_and(|rule| c == rule.high) {
                active = None;
            }
        }

        Ok(Self { map })
    }

    /// Second pass, rule-driven: decomposition entries are sparse and need
    /// not cover every codepoint. Overwrites the folding pass wherever both
    /// sources map the same codepoint.
    #[expect(clippy::cast_possible_truncation)]
    fn overlay_decompositions(&mut self, source: impl BufRead) -> Result<(), BuildError> {
        for line in source.lines() {
            let Some(rule) = Rule::parse(&line?) else {
                continue;
            };

            let value = rule.target.unwrap_or(NUKE_CHAR);
            if value >= MAX_MAPPING {
                continue;
            }

            for c in rule.low..=rule.high.min(MAX_MAPPING - 1) {
                self.map[c as usize] = value as u16;
            }
        }

        Ok(())
    }

    /// Chases every entry to its fixed point and stores it back, so later
    /// walks are single steps. Overwriting `map[c]` with its fixed point
    /// cannot change any other chain's destination.
    #[expect(clippy::cast_possible_truncation)]
    fn resolve(&mut self) -> Result<(), BuildError> {
        for c in 0..self.map.len() {
            let mut folded = self.map[c];
            // A walk longer than the table has revisited some codepoint.
            let mut budget = self.map.len();
            while folded != self.map[usize::from(folded)] {
                folded = self.map[usize::from(folded)];
                budget -= 1;
                if budget == 0 {
                    return Err(BuildError::Cycle { code: c as u32 });
                }
            }

            if (0x41..=0x5A).contains(&folded) {
                return Err(BuildError::Uppercase {
                    code: c as u32,
                    resolved: u32::from(folded),
                });
            }

            self.map[c] = folded;
        }

        Ok(())
    }
}
