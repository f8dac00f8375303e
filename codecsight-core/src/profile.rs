//! Profile, tier and level resolution
//!
//! Some codec strings signal the profile twice: as an explicit
//! `profile_idc` and as a bit in a compatibility mask. [`ProfileTable::resolve`]
//! picks the first rule, in table order, that is signalled either way.

use crate::bits::bit_set_32;
use crate::error::CodecError;
use crate::Result;

/// One row of a profile table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileRule {
    /// Explicit profile id
    pub id: u32,

    /// Compatibility mask bit (0 = LSB) that also signals this profile
    pub bit: Option<u32>,

    /// Display name
    pub name: &'static str,
}

impl ProfileRule {
    /// Rule signalled by id or by mask bit
    pub const fn new(id: u32, bit: u32, name: &'static str) -> Self {
        Self {
            id,
            bit: Some(bit),
            name,
        }
    }

    /// Rule signalled by id only
    pub const fn id_only(id: u32, name: &'static str) -> Self {
        Self {
            id,
            bit: None,
            name,
        }
    }

    /// True if `idc` names this rule or `mask` has its compatibility bit set
    pub fn signalled_by(&self, idc: u32, mask: u32) -> bool {
        self.id == idc || self.bit.is_some_and(|bit| bit_set_32(mask, bit))
    }
}

/// Ordered profile table; earlier rows take precedence
#[derive(Debug, Clone, Copy)]
pub struct ProfileTable {
    name: &'static str,
    rules: &'static [ProfileRule],
}

impl ProfileTable {
    /// Wrap a static table
    pub const fn new(name: &'static str, rules: &'static [ProfileRule]) -> Self {
        Self { name, rules }
    }

    /// Table name used in configuration errors
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rows in declaration order
    pub fn rules(&self) -> &'static [ProfileRule] {
        self.rules
    }

    /// First rule signalled by `idc` or by a bit of `mask`
    pub fn resolve(&self, idc: u32, mask: u32) -> Option<&'static ProfileRule> {
        self.rules.iter().find(|rule| rule.signalled_by(idc, mask))
    }

    /// Reject tables where two rows share an id or a compatibility bit
    pub fn validate(&self) -> Result<()> {
        for (i, rule) in self.rules.iter().enumerate() {
            for later in &self.rules[i + 1..] {
                if later.id == rule.id {
                    return Err(CodecError::DuplicateProfile {
                        table: self.name,
                        what: "id",
                        value: rule.id,
                    });
                }
                if let (Some(a), Some(b)) = (rule.bit, later.bit) {
                    if a == b {
                        return Err(CodecError::DuplicateProfile {
                            table: self.name,
                            what: "bit",
                            value: a,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Ordered mapping from a numeric level to its dotted name
pub type LevelTable = &'static [(u32, &'static str)];

/// Look up a level value
pub fn level_name(table: LevelTable, value: u32) -> Option<&'static str> {
    table
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, name)| *name)
}

/// Tier letter to tier name (`L` Main, `H` High)
pub fn tier_name(letter: char) -> Option<&'static str> {
    match letter.to_ascii_uppercase() {
        'L' => Some("Main"),
        'H' => Some("High"),
        _ => None,
    }
}
