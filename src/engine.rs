//! The tick engine: admits arrivals, advances blocked and running bursts,
//! dispatches, and emits the interval timeline. `spec.md` §4.4 — the
//! phase ordering here is the observable contract; reordering phases
//! changes output.

use std::io::{self, Write};

use crate::model::{ProcessId, Workload};
use crate::policy::Policy;
use crate::queue::ProcessQueue;

/// Runs one policy's simulation over `workload` to completion, writing the
/// §6.2 grammar to `sink`. Takes its own deep-copied run state
/// (`Workload::snapshot`) so callers can run several policies over the
/// same `Workload` without cross-contamination.
pub fn simulate<W: Write>(workload: &Workload, policy: Policy, sink: &mut W) -> io::Result<()> {
    writeln!(sink, "Resultat du processus pour: {}", policy.header_name())?;

    let mut runtime = workload.snapshot();
    let arrival_order = workload.arrival_order();
    let mut arrival_cursor: usize = 0;

    let mut ready = ProcessQueue::new();
    let mut blocked = ProcessQueue::new();
    let mut running: Option<ProcessId> = None;
    let mut idle_start: Option<u32> = None;
    let mut t: u32 = 0;

    loop {
        let work_remains = arrival_cursor < arrival_order.len()
            || !ready.is_empty()
            || !blocked.is_empty()
            || running.is_some();
        if !work_remains {
            break;
        }

        let mut new_ready: Vec<ProcessId> = Vec::new();
        let mut preemption_signal = false;

        // Phase 1: admit arrivals.
        while arrival_cursor < arrival_order.len() {
            let id = arrival_order[arrival_cursor];
            if runtime[id.0].arrival > t {
                break;
            }
            arrival_cursor += 1;
            let head = runtime[id.0]
                .head()
                .expect("freshly admitted process has a head burst");
            if head.is_cpu() {
                new_ready.push(id);
                if policy == Policy::Sjfp {
                    preemption_signal = true;
                }
            } else {
                blocked.append(id);
            }
        }

        // Phase 2: advance blocked.
        let blocked_snapshot: Vec<ProcessId> = blocked.iter().collect();
        for id in blocked_snapshot {
            let p = &mut runtime[id.0];
            debug_assert!(
                p.head().map(|b| !b.is_cpu()).unwrap_or(false),
                "blocked process must have an I/O head burst"
            );
            p.remaining -= 1;
            if p.remaining == 0 {
                blocked.remove_by_identity(id);
                let terminated = runtime[id.0].consume_head_burst();
                if !terminated {
                    new_ready.push(id);
                    if policy == Policy::Sjfp {
                        preemption_signal = true;
                    }
                }
            }
        }

        // Phase 3: advance running.
        let mut prior: Option<ProcessId> = None;
        if let Some(r) = running {
            let p = &mut runtime[r.0];
            debug_assert!(
                p.head().map(|b| b.is_cpu()).unwrap_or(false),
                "running process must have a CPU head burst"
            );
            debug_assert!(p.remaining >= 1, "running process entered tick with no time left");
            p.remaining -= 1;
            p.quantum_used += 1;
            let remaining_now = p.remaining;
            let quantum_now = p.quantum_used;

            if remaining_now == 0 {
                let terminated = runtime[r.0].consume_head_burst();
                prior = Some(r);
                running = None;
                if !terminated {
                    blocked.append(r);
                }
            } else if policy.quantum_enforced() && quantum_now >= policy.quantum().unwrap() {
                runtime[r.0].quantum_used = 0;
                new_ready.push(r);
                prior = Some(r);
                running = None;
            } else if policy.preempts_on_admission() && preemption_signal {
                runtime[r.0].quantum_used = 0;
                new_ready.push(r);
                prior = Some(r);
                running = None;
            }
            // else: remains RUNNING, `running` is left untouched.
        }

        // Phase 4: merge staging into ready.
        if matches!(policy, Policy::Rr { .. }) && new_ready.len() > 1 {
            new_ready.sort_by_key(|&id| runtime[id.0].source_order);
        }
        for id in new_ready.drain(..) {
            ready.append(id);
        }

        // Phase 5: dispatch.
        if running.is_none() {
            if ready.is_empty() {
                if idle_start.is_none() {
                    idle_start = Some(t);
                }
                if let Some(p) = prior {
                    emit_interval(sink, &runtime, p, t)?;
                }
            } else {
                if let Some(start) = idle_start.take() {
                    if start < t {
                        writeln!(sink, "IDLE : {start}-{t}")?;
                    }
                }
                let next = policy.select(&mut ready, &runtime);
                if prior == Some(next) {
                    // Same identity re-selected (SJFP preempt-and-immediately-
                    // reselect, or RR quantum expiry with nothing else ready):
                    // the slice continues seamlessly. Leave `run_slice_start`
                    // untouched so the eventual interval still starts where
                    // the process first began running, and emit nothing now.
                } else {
                    runtime[next.0].run_slice_start = t;
                    if let Some(p) = prior {
                        emit_interval(sink, &runtime, p, t)?;
                    }
                }
                running = Some(next);
            }
        }

        // Phase 6.
        t += 1;
    }

    // `running` is always `None` here: any exit from RUNNING is flushed
    // the same tick it happens (phase 3 into phase 5), so it can never
    // still be `Some` when the loop condition goes false. An open idle
    // span, by contrast, is expected and not flushed: the loop's last
    // iteration is the terminal tick itself, so `idle_start` is commonly
    // `Some(t - 1)` here with no further ticks to report. The source
    // never emits a trailing IDLE line either.
    debug_assert!(running.is_none());

    Ok(())
}

fn emit_interval<W: Write>(
    sink: &mut W,
    runtime: &[crate::model::ProcessRuntime],
    id: ProcessId,
    end: u32,
) -> io::Result<()> {
    let p = &runtime[id.0];
    writeln!(sink, "PID {} : {}-{}", p.pid, p.run_slice_start, end)
}
