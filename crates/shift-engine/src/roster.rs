//! Name pool and segment label assignment.
//!
//! The pool is an ordered list of unique names, each marked present or
//! absent. It is owned and persisted by the caller; the partitioner never
//! sees it. Callers resolve a shift count from it with [`auto_shift_count`]
//! and draw a shuffled label list with [`NamePool::draw`], then pass the
//! labels into a partition request.
//!
//! Shuffling takes the random source as an argument. Seed it
//! (`StdRng::seed_from_u64`) for reproducible assignments.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShiftError};

/// Joins two names sharing one segment in pairing mode.
pub const PAIR_SEPARATOR: &str = " + ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub present: bool,
}

/// Ordered set of names, unique by exact (trimmed) spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<RosterEntry>", into = "Vec<RosterEntry>")]
pub struct NamePool {
    entries: Vec<RosterEntry>,
}

/// How present names are mapped onto segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentMode {
    /// One name per segment.
    #[default]
    Single,
    /// Two names per segment, joined with [`PAIR_SEPARATOR`].
    Paired,
}

impl NamePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a pool from its JSON form (an array of `{name, present}`).
    /// Blank names are dropped and later duplicates are discarded.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<RosterEntry> = serde_json::from_str(json)?;
        Ok(Self::from(entries))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Append `name` as present.
    ///
    /// # Errors
    /// `EmptyName` for a blank name, `DuplicateName` if it is already pooled.
    pub fn add(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ShiftError::EmptyName);
        }
        if self.contains(name) {
            return Err(ShiftError::DuplicateName(name.to_string()));
        }
        self.entries.push(RosterEntry {
            name: name.to_string(),
            present: true,
        });
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<RosterEntry> {
        let index = self.require(name)?;
        Ok(self.entries.remove(index))
    }

    pub fn set_present(&mut self, name: &str, present: bool) -> Result<()> {
        let index = self.require(name)?;
        self.entries[index].present = present;
        Ok(())
    }

    /// Flip presence of `name`, returning the new state.
    pub fn toggle(&mut self, name: &str) -> Result<bool> {
        let index = self.require(name)?;
        let entry = &mut self.entries[index];
        entry.present = !entry.present;
        Ok(entry.present)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Present names in pool order.
    pub fn present_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.present)
            .map(|e| e.name.clone())
            .collect()
    }

    pub fn present_count(&self) -> usize {
        self.entries.iter().filter(|e| e.present).count()
    }

    /// Shuffle the present names and group them per `mode`.
    pub fn draw<R: Rng + ?Sized>(&self, mode: AssignmentMode, rng: &mut R) -> Vec<String> {
        assign_names(&self.present_names(), mode, rng)
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.entries.iter().position(|e| e.name == name)
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| ShiftError::UnknownName(name.trim().to_string()))
    }
}

impl From<Vec<RosterEntry>> for NamePool {
    fn from(entries: Vec<RosterEntry>) -> Self {
        let mut pool = NamePool::new();
        for entry in entries {
            let name = entry.name.trim();
            if name.is_empty() || pool.contains(name) {
                continue;
            }
            pool.entries.push(RosterEntry {
                name: name.to_string(),
                present: entry.present,
            });
        }
        pool
    }
}

impl From<NamePool> for Vec<RosterEntry> {
    fn from(pool: NamePool) -> Self {
        pool.entries
    }
}

/// Number of segments needed to seat `present` names under `mode`.
///
/// Never less than one: an empty or single-name pool still yields one shift.
pub fn auto_shift_count(present: usize, mode: AssignmentMode) -> u32 {
    let needed = match mode {
        AssignmentMode::Single => present,
        AssignmentMode::Paired => present.div_ceil(2),
    };
    u32::try_from(needed.max(1)).unwrap_or(u32::MAX)
}

/// Uniform random permutation of `names` (Fisher-Yates).
pub fn shuffle_names<R: Rng + ?Sized>(names: &[String], rng: &mut R) -> Vec<String> {
    let mut shuffled = names.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Join consecutive names two at a time; an odd last name stays alone.
pub fn pair_names(names: &[String]) -> Vec<String> {
    names
        .chunks(2)
        .map(|pair| pair.join(PAIR_SEPARATOR))
        .collect()
}

/// Shuffle `names` and, in pairing mode, pair them up.
pub fn assign_names<R: Rng + ?Sized>(
    names: &[String],
    mode: AssignmentMode,
    rng: &mut R,
) -> Vec<String> {
    let shuffled = shuffle_names(names, rng);
    match mode {
        AssignmentMode::Single => shuffled,
        AssignmentMode::Paired => pair_names(&shuffled),
    }
}
