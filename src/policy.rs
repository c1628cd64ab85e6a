//! Scheduling policy strategies. `spec.md` §4.3: a shared interface over
//! three policies, implemented as a small sum type per the design note in
//! §9 rather than a `switch` threaded through every function.

use crate::error::ModelError;
use crate::model::{ProcessId, ProcessRuntime};
use crate::queue::ProcessQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Sjf,
    Sjfp,
    Rr { quantum: u32 },
}

impl Policy {
    /// Builds a validated Round-Robin policy. `quantum` must be `>= 1`
    /// (`spec.md` §4.3); this is the one place that invariant is checked,
    /// so the engine itself can assume `Policy::Rr { quantum }` is always
    /// usable.
    pub fn round_robin(quantum: u32) -> Result<Policy, ModelError> {
        if quantum == 0 {
            return Err(ModelError::InvalidQuantum(quantum));
        }
        Ok(Policy::Rr { quantum })
    }

    /// The policy name as it appears in the §6.2 stream header, e.g.
    /// `"SJF"`, `"SJFP"`, `"RR 2"`.
    pub fn header_name(&self) -> String {
        match self {
            Policy::Sjf => "SJF".to_string(),
            Policy::Sjfp => "SJFP".to_string(),
            Policy::Rr { quantum } => format!("RR {quantum}"),
        }
    }

    /// Chooses and removes the next RUNNING process from `ready`.
    ///
    /// SJF/SJFP: the process with the smallest head-burst value
    /// (`remaining`, its time until the next block or termination),
    /// ties broken by `source_order` ascending. Round-Robin: the head of
    /// `ready` (FIFO).
    pub fn select(&self, ready: &mut ProcessQueue, runtime: &[ProcessRuntime]) -> ProcessId {
        assert!(!ready.is_empty(), "select called on an empty ready queue");
        let chosen = match self {
            Policy::Rr { .. } => ready.front().expect("checked non-empty"),
            Policy::Sjf | Policy::Sjfp => ready
                .iter()
                .min_by_key(|&id| {
                    let p = &runtime[id.0];
                    (p.remaining, p.source_order)
                })
                .expect("checked non-empty"),
        };
        ready.remove_by_identity(chosen);
        chosen
    }

    /// Whether a newly-admitted READY entry (arrival, unblock, or quantum
    /// expiry) may force the current RUNNING process back to READY this
    /// tick.
    pub fn preempts_on_admission(&self) -> bool {
        matches!(self, Policy::Sjfp)
    }

    /// True only for Round-Robin.
    pub fn quantum_enforced(&self) -> bool {
        matches!(self, Policy::Rr { .. })
    }

    pub fn quantum(&self) -> Option<u32> {
        match self {
            Policy::Rr { quantum } => Some(*quantum),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Burst, ProcessDescriptor, Workload};

    fn workload(bursts: Vec<(u32, u32, u32, Vec<Burst>)>) -> Workload {
        let descriptors = bursts
            .into_iter()
            .map(|(pid, arrival, source_order, bursts)| ProcessDescriptor {
                pid,
                arrival,
                source_order,
                bursts,
            })
            .collect();
        Workload::new(descriptors).unwrap()
    }

    #[test]
    fn sjf_selects_smallest_remaining() {
        let w = workload(vec![
            (1, 0, 1, vec![Burst::Cpu(5)]),
            (2, 0, 2, vec![Burst::Cpu(2)]),
        ]);
        let runtime = w.snapshot();
        let mut ready = ProcessQueue::new();
        ready.append(w.arrival_order()[0]);
        ready.append(w.arrival_order()[1]);
        let chosen = Policy::Sjf.select(&mut ready, &runtime);
        assert_eq!(runtime[chosen.0].pid, 2);
    }

    #[test]
    fn sjf_ties_break_by_source_order() {
        let w = workload(vec![
            (2, 0, 1, vec![Burst::Cpu(3)]),
            (1, 0, 2, vec![Burst::Cpu(3)]),
        ]);
        let runtime = w.snapshot();
        let mut ready = ProcessQueue::new();
        ready.append(w.arrival_order()[0]);
        ready.append(w.arrival_order()[1]);
        let chosen = Policy::Sjfp.select(&mut ready, &runtime);
        assert_eq!(runtime[chosen.0].pid, 2, "lower source_order wins on a tie");
    }

    #[test]
    fn round_robin_selects_fifo_head() {
        let w = workload(vec![
            (1, 0, 1, vec![Burst::Cpu(5)]),
            (2, 0, 2, vec![Burst::Cpu(2)]),
        ]);
        let runtime = w.snapshot();
        let mut ready = ProcessQueue::new();
        ready.append(w.arrival_order()[1]);
        ready.append(w.arrival_order()[0]);
        let chosen = Policy::Rr { quantum: 2 }.select(&mut ready, &runtime);
        assert_eq!(runtime[chosen.0].pid, 2);
    }

    #[test]
    fn preemption_and_quantum_flags_match_policy() {
        assert!(!Policy::Sjf.preempts_on_admission());
        assert!(Policy::Sjfp.preempts_on_admission());
        assert!(!Policy::Rr { quantum: 1 }.preempts_on_admission());

        assert!(!Policy::Sjf.quantum_enforced());
        assert!(!Policy::Sjfp.quantum_enforced());
        assert!(Policy::Rr { quantum: 1 }.quantum_enforced());
    }

    #[test]
    fn header_names_match_grammar() {
        assert_eq!(Policy::Sjf.header_name(), "SJF");
        assert_eq!(Policy::Sjfp.header_name(), "SJFP");
        assert_eq!(Policy::Rr { quantum: 4 }.header_name(), "RR 4");
    }

    #[test]
    fn round_robin_rejects_zero_quantum() {
        assert_eq!(
            Policy::round_robin(0).unwrap_err(),
            ModelError::InvalidQuantum(0)
        );
        assert_eq!(Policy::round_robin(3).unwrap(), Policy::Rr { quantum: 3 });
    }
}
