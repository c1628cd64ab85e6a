//! Workload model: an immutable description of processes and bursts, plus
//! the per-run mutable arena the tick engine advances. See `spec.md` §3-4.1.

use std::collections::{HashSet, VecDeque};

use crate::error::ModelError;

/// A contiguous run of CPU use or I/O-blocking time.
///
/// The source encodes this as the sign of an integer (positive = CPU,
/// negative = I/O); REDESIGN FLAG `spec.md` §9 asks for a tagged variant
/// instead, so the leading-burst invariant typechecks rather than relying
/// on a sign convention scattered through the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Burst {
    Cpu(u32),
    Io(u32),
}

impl Burst {
    pub fn magnitude(self) -> u32 {
        match self {
            Burst::Cpu(n) | Burst::Io(n) => n,
        }
    }

    pub fn is_cpu(self) -> bool {
        matches!(self, Burst::Cpu(_))
    }
}

/// One process as handed to the engine by the parser, before any run
/// mutates it. `source_order` is the 1-based position in the input file
/// and is the secondary tie-break used everywhere ties arise.
#[derive(Debug, Clone)]
pub struct ProcessDescriptor {
    pub pid: u32,
    pub arrival: u32,
    pub source_order: u32,
    pub bursts: Vec<Burst>,
}

impl ProcessDescriptor {
    /// `(pid, arrival)` — the identity pair the source uses for queue
    /// removal. Kept only for duplicate-detection at model-build time;
    /// in-run identity is the arena index (`ProcessId`), not this pair.
    pub fn identity(&self) -> (u32, u32) {
        (self.pid, self.arrival)
    }
}

/// Stable identity for a process within one simulation run: its index in
/// the arena. `spec.md` §9 recommends this in place of the source's
/// raw-pointer/`(pid, arrival)` identity scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(pub usize);

/// Immutable workload description plus the two views the engine needs:
/// source order (for tie-breaking) and arrival-sorted order (for
/// admission).
#[derive(Debug, Clone)]
pub struct Workload {
    processes: Vec<ProcessDescriptor>,
    arrival_order: Vec<ProcessId>,
}

impl Workload {
    /// Validates and wraps a sequence of descriptors. Rejects what
    /// `spec.md` §7 calls programmer/parser errors: empty or
    /// zero-magnitude bursts, and duplicate `(pid, arrival)` identity
    /// (an Open Question `spec.md` leaves to the parser; this
    /// implementation resolves it by rejecting here, per the spec's own
    /// recommendation).
    pub fn new(processes: Vec<ProcessDescriptor>) -> Result<Self, ModelError> {
        let mut seen = HashSet::with_capacity(processes.len());
        for p in &processes {
            if p.bursts.is_empty() {
                return Err(ModelError::EmptyBursts {
                    source_order: p.source_order,
                });
            }
            if p.bursts.iter().any(|b| b.magnitude() == 0) {
                return Err(ModelError::ZeroMagnitudeBurst {
                    source_order: p.source_order,
                });
            }
            if !seen.insert(p.identity()) {
                return Err(ModelError::DuplicateIdentity {
                    pid: p.pid,
                    arrival: p.arrival,
                });
            }
        }

        let mut arrival_order: Vec<ProcessId> = (0..processes.len()).map(ProcessId).collect();
        arrival_order.sort_by_key(|id| (processes[id.0].arrival, processes[id.0].source_order));

        Ok(Workload {
            processes,
            arrival_order,
        })
    }

    pub fn descriptors(&self) -> &[ProcessDescriptor] {
        &self.processes
    }

    /// Processes in arrival order, ties broken by `source_order` ascending.
    pub fn arrival_order(&self) -> &[ProcessId] {
        &self.arrival_order
    }

    pub fn descriptor(&self, id: ProcessId) -> &ProcessDescriptor {
        &self.processes[id.0]
    }

    /// A fresh, independently-mutable copy of the per-process run state.
    /// `spec.md` §4.1 requires each simulation run to use a fresh copy so
    /// the three policies never cross-contaminate; §9 notes the source
    /// relies on process-level OS isolation for this, which a
    /// single-process reimplementation must replace with an explicit
    /// snapshot.
    pub fn snapshot(&self) -> Vec<ProcessRuntime> {
        self.processes
            .iter()
            .map(ProcessRuntime::from_descriptor)
            .collect()
    }
}

/// Per-run mutable state for one process. `spec.md` §3's mutable fields
/// (`remaining`, `run_slice_start`, `quantum_used`, and the consumed
/// `bursts` head) live here; everything else is copied from the
/// descriptor once and never changes during the run.
#[derive(Debug, Clone)]
pub struct ProcessRuntime {
    pub pid: u32,
    pub arrival: u32,
    pub source_order: u32,
    bursts: VecDeque<Burst>,
    /// Ticks remaining in the current head burst, counting down to 0
    /// regardless of whether that burst is CPU or I/O.
    pub remaining: u32,
    pub run_slice_start: u32,
    pub quantum_used: u32,
}

impl ProcessRuntime {
    fn from_descriptor(p: &ProcessDescriptor) -> Self {
        let bursts: VecDeque<Burst> = p.bursts.iter().copied().collect();
        let remaining = bursts.front().expect("validated non-empty").magnitude();
        ProcessRuntime {
            pid: p.pid,
            arrival: p.arrival,
            source_order: p.source_order,
            bursts,
            remaining,
            run_slice_start: 0,
            quantum_used: 0,
        }
    }

    /// The burst currently being worked off, or `None` once all bursts
    /// are consumed (the process has TERMINATED).
    pub fn head(&self) -> Option<Burst> {
        self.bursts.front().copied()
    }

    pub fn is_terminated(&self) -> bool {
        self.bursts.is_empty()
    }

    /// Consumes the head burst. If another burst follows, `remaining` is
    /// reset to its magnitude and `quantum_used` is reset to 0 (every
    /// RUNNING exit resets it, per `spec.md` §3, and a BLOCKED->READY
    /// transition never had a meaningful quantum to begin with).
    /// Returns `true` if the process has now TERMINATED.
    pub fn consume_head_burst(&mut self) -> bool {
        self.bursts.pop_front();
        self.quantum_used = 0;
        match self.bursts.front() {
            Some(next) => {
                self.remaining = next.magnitude();
                false
            }
            None => true,
        }
    }
}
