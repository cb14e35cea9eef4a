// In-flight AI request registry
//
// At most one request per operation may be pending. Each `begin` hands out a
// ticket stamped with the operation's current generation; bumping the
// generation (session terminated) makes every outstanding ticket stale so its
// result is dropped instead of merged into the fresh session.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// AI operations the dashboard can have in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Vision and anti-vision from a freshly committed directive
    Visions,
    Vision,
    AntiVision,
    JournalAnalysis,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visions => "visions",
            Self::Vision => "vision",
            Self::AntiVision => "anti_vision",
            Self::JournalAnalysis => "journal_analysis",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proof that a request was admitted. Consumed when its result is applied.
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket {
    operation: Operation,
    generation: u64,
}

impl Ticket {
    pub fn operation(&self) -> Operation {
        self.operation
    }
}

#[derive(Debug, Default)]
pub struct InFlight {
    /// Pending operation -> generation it was admitted under
    pending: HashMap<Operation, u64>,
    generations: HashMap<Operation, u64>,
}

impl InFlight {
    /// Admit a request, or `None` when one is already pending
    pub fn begin(&mut self, operation: Operation) -> Option<Ticket> {
        if self.is_pending(operation) {
            return None;
        }

        let generation = self.generation(operation);
        self.pending.insert(operation, generation);
        Some(Ticket {
            operation,
            generation,
        })
    }

    /// Release a ticket. Returns whether it is still current.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        let current = self.generation(ticket.operation) == ticket.generation;
        if self.pending.get(&ticket.operation) == Some(&ticket.generation) {
            self.pending.remove(&ticket.operation);
        }
        current
    }

    /// Make every outstanding ticket stale
    pub fn invalidate_all(&mut self) {
        for operation in [
            Operation::Visions,
            Operation::Vision,
            Operation::AntiVision,
            Operation::JournalAnalysis,
        ] {
            *self.generations.entry(operation).or_insert(0) += 1;
        }
        self.pending.clear();
    }

    pub fn is_pending(&self, operation: Operation) -> bool {
        self.pending.contains_key(&operation)
    }

    /// Pending operations in a stable order
    pub fn pending(&self) -> Vec<Operation> {
        let mut ops: Vec<_> = self.pending.keys().copied().collect();
        ops.sort();
        ops
    }

    fn generation(&self, operation: Operation) -> u64 {
        self.generations.get(&operation).copied().unwrap_or(0)
    }
}
