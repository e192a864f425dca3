//! Naming operation opcodes and opcode-based selection of accepted operations.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::validation::ValidationError;

/// An accepted operation record; `op` holds the raw opcode tag.
pub type OperationJson = Value;

/// Naming-system operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Opcode {
    /// `?`
    NamePreorder,
    /// `:`
    NameRegistration,
    /// `::`
    NameRenewal,
    /// `+`
    NameUpdate,
    /// `>`
    NameTransfer,
    /// `~`
    NameRevoke,
    /// `;`
    NameImport,
    /// `*`
    NamespacePreorder,
    /// `&`
    NamespaceReveal,
    /// `!`
    NamespaceReady,
    /// `#`
    Announce,
    /// `$`
    TokenTransfer,
}

impl Opcode {
    /// Every opcode, in protocol order.
    pub const ALL: [Opcode; 12] = [
        Opcode::NamePreorder,
        Opcode::NameRegistration,
        Opcode::NameRenewal,
        Opcode::NameUpdate,
        Opcode::NameTransfer,
        Opcode::NameRevoke,
        Opcode::NameImport,
        Opcode::NamespacePreorder,
        Opcode::NamespaceReveal,
        Opcode::NamespaceReady,
        Opcode::Announce,
        Opcode::TokenTransfer,
    ];

    /// Canonical upper-case name.
    pub fn name(self) -> &'static str {
        match self {
            Opcode::NamePreorder => "NAME_PREORDER",
            Opcode::NameRegistration => "NAME_REGISTRATION",
            Opcode::NameRenewal => "NAME_RENEWAL",
            Opcode::NameUpdate => "NAME_UPDATE",
            Opcode::NameTransfer => "NAME_TRANSFER",
            Opcode::NameRevoke => "NAME_REVOKE",
            Opcode::NameImport => "NAME_IMPORT",
            Opcode::NamespacePreorder => "NAMESPACE_PREORDER",
            Opcode::NamespaceReveal => "NAMESPACE_REVEAL",
            Opcode::NamespaceReady => "NAMESPACE_READY",
            Opcode::Announce => "ANNOUNCE",
            Opcode::TokenTransfer => "TOKEN_TRANSFER",
        }
    }

    /// Leading tag character; renewals share the registration character.
    pub fn tag(self) -> char {
        match self {
            Opcode::NamePreorder => '?',
            Opcode::NameRegistration | Opcode::NameRenewal => ':',
            Opcode::NameUpdate => '+',
            Opcode::NameTransfer => '>',
            Opcode::NameRevoke => '~',
            Opcode::NameImport => ';',
            Opcode::NamespacePreorder => '*',
            Opcode::NamespaceReveal => '&',
            Opcode::NamespaceReady => '!',
            Opcode::Announce => '#',
            Opcode::TokenTransfer => '$',
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Opcode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| ValidationError::PatternMismatch {
                field: "opcode",
                value: s.to_string(),
            })
    }
}

/// Resolves a raw operation tag to its opcode.
pub trait OpcodeResolver {
    /// The opcode for `op`, or `None` for an unknown tag.
    fn resolve(&self, op: &str) -> Option<Opcode>;
}

/// The protocol's opcode table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardOpcodes;

impl OpcodeResolver for StandardOpcodes {
    fn resolve(&self, op: &str) -> Option<Opcode> {
        if op == "::" {
            return Some(Opcode::NameRenewal);
        }
        let tag = op.chars().next()?;
        Opcode::ALL
            .iter()
            .copied()
            .filter(|opcode| *opcode != Opcode::NameRenewal)
            .find(|opcode| opcode.tag() == tag)
    }
}

/// Predicate over accepted operation records.
pub trait OperationFilter {
    /// Returns true if the operation matches the filter criteria.
    fn matches(&self, operation: &OperationJson) -> bool;
}

/// Matches operations whose resolved opcode is one of a set.
#[derive(Debug, Clone)]
pub struct OpcodeFilter<'a, R: OpcodeResolver + ?Sized> {
    /// Opcodes to match.
    pub opcodes: Vec<Opcode>,
    resolver: &'a R,
}

impl<'a, R: OpcodeResolver + ?Sized> OpcodeFilter<'a, R> {
    /// Creates a filter over `opcodes`, resolving tags with `resolver`.
    pub fn new(opcodes: impl Into<Vec<Opcode>>, resolver: &'a R) -> Self {
        Self {
            opcodes: opcodes.into(),
            resolver,
        }
    }
}

impl<R: OpcodeResolver + ?Sized> OperationFilter for OpcodeFilter<'_, R> {
    fn matches(&self, operation: &OperationJson) -> bool {
        operation
            .get("op")
            .and_then(|v| v.as_str())
            .and_then(|op| self.resolver.resolve(op))
            .map(|opcode| self.opcodes.contains(&opcode))
            .unwrap_or(false)
    }
}

/// Selects the operations in `checked_ops` whose opcode is in `opcodes`,
/// preserving input order. Pass `std::slice::from_ref(&op)` for one opcode.
pub fn find_by_opcode<'v, R>(
    checked_ops: &'v [OperationJson],
    opcodes: &[Opcode],
    resolver: &R,
) -> Vec<&'v OperationJson>
where
    R: OpcodeResolver + ?Sized,
{
    let filter = OpcodeFilter::new(opcodes, resolver);
    checked_ops.iter().filter(|op| filter.matches(op)).collect()
}
