// Snapshot management for stepping through a parse

use crate::parser::parse::{ParseError, Production};
use crate::parser::token::Token;
use crate::parser::tree::ParseTree;
use rustc_hash::FxHashMap;
use std::mem::size_of;
use thiserror::Error;

/// What happened at one step of the parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// A production started
    Enter(Production),
    /// The cursor moved past a token
    Consume(Token),
    /// A production finished with this subtree
    Exit(Production, ParseTree),
    /// The parse was abandoned
    Fail(ParseError),
}

/// Snapshot of parser state
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub position: usize,
    pub stack: Vec<Production>,
    pub event: TraceEvent,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // This is a rough estimate
        let stack_size = self.stack.len() * size_of::<Production>();

        // Tree nodes: assume 64 bytes per node on average
        let event_size = match &self.event {
            TraceEvent::Enter(_) => 0,
            TraceEvent::Consume(token) => token.value.len(),
            TraceEvent::Exit(_, tree) => tree.node_count() * 64,
            TraceEvent::Fail(_) => 64,
        };

        size_of::<Snapshot>() + stack_size + event_size
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("Snapshot memory limit exceeded: {used} + {size} > {limit}")]
    LimitExceeded {
        used: usize,
        size: usize,
        limit: usize,
    },
}

/// Manages the snapshot history under a memory budget
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), SnapshotError> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(SnapshotError::LimitExceeded {
                used: self.current_memory,
                size: snapshot_size,
                limit: self.max_memory,
            });
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

/// Everything recorded during one parse
#[derive(Debug)]
pub struct ParseTrace {
    snapshots: SnapshotManager,
    entries: FxHashMap<Production, usize>,
    truncated: bool,
}

impl ParseTrace {
    pub fn new(max_memory: usize) -> Self {
        ParseTrace {
            snapshots: SnapshotManager::new(max_memory),
            entries: FxHashMap::default(),
            truncated: false,
        }
    }

    /// Record one event; once the budget runs out the rest are dropped
    pub fn record(&mut self, position: usize, stack: &[Production], event: TraceEvent) {
        if let TraceEvent::Enter(production) = event {
            *self.entries.entry(production).or_insert(0) += 1;
        }

        if self.truncated {
            return;
        }

        let snapshot = Snapshot {
            position,
            stack: stack.to_vec(),
            event,
        };
        if self.snapshots.push(snapshot).is_err() {
            self.truncated = true;
        }
    }

    pub fn snapshots(&self) -> &SnapshotManager {
        &self.snapshots
    }

    /// How many times each production was entered
    pub fn entries(&self, production: Production) -> usize {
        self.entries.get(&production).copied().unwrap_or(0)
    }

    /// Whether snapshots were dropped for lack of memory
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn into_history(self) -> ParseHistory {
        ParseHistory::new(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("already at the first step")]
    AtStart,

    #[error("already at the last step")]
    AtEnd,
}

/// A finished trace with a position for stepping back and forth
#[derive(Debug)]
pub struct ParseHistory {
    trace: ParseTrace,
    position: usize,
}

impl ParseHistory {
    pub fn new(trace: ParseTrace) -> Self {
        ParseHistory { trace, position: 0 }
    }

    pub fn trace(&self) -> &ParseTrace {
        &self.trace
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.trace.snapshots.get(self.position)
    }

    pub fn history_position(&self) -> usize {
        self.position
    }

    pub fn total_snapshots(&self) -> usize {
        self.trace.snapshots.len()
    }

    pub fn step_forward(&mut self) -> Result<(), HistoryError> {
        if self.position + 1 >= self.total_snapshots() {
            return Err(HistoryError::AtEnd);
        }
        self.position += 1;
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), HistoryError> {
        if self.position == 0 {
            return Err(HistoryError::AtStart);
        }
        self.position -= 1;
        Ok(())
    }

    pub fn rewind_to_start(&mut self) {
        self.position = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.total_snapshots().saturating_sub(1);
    }

    /// The most recently finished subtree at or before the current step
    pub fn latest_subtree(&self) -> Option<(Production, &ParseTree)> {
        self.trace
            .snapshots
            .iter()
            .take(self.position + 1)
            .filter_map(|s| match &s.event {
                TraceEvent::Exit(production, tree) => Some((*production, tree)),
                _ => None,
            })
            .last()
    }

    /// The failure, if the parse ended in one and it was recorded
    pub fn failure(&self) -> Option<&ParseError> {
        self.trace.snapshots.iter().find_map(|s| match &s.event {
            TraceEvent::Fail(err) => Some(err),
            _ => None,
        })
    }
}
