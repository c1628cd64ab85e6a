//! Fans the three policies out across threads and collects their output in
//! a fixed presentation order. `spec.md` §6.4 requires SJF, SJFP, and RR to
//! run over independent state; §9 notes the source relies on
//! fork-per-policy isolation via pipes, which this in-process
//! reimplementation replaces with `Workload::snapshot` plus
//! `std::thread::scope` (the teacher's concurrency idiom, grounded on
//! `crates/27-process-scheduler`'s scoped worker pool).

use std::io;
use std::thread;

use crate::engine;
use crate::model::Workload;
use crate::policy::Policy;

/// Runs SJF, SJFP, and RR concurrently over `workload` and returns their
/// rendered output in that fixed order. Each thread only ever touches the
/// `ProcessRuntime` snapshot `engine::simulate` takes for itself, so the
/// three runs cannot contaminate one another even though they share the
/// same `Workload`.
pub fn run_all(workload: &Workload, quantum: u32) -> io::Result<[String; 3]> {
    let rr = Policy::round_robin(quantum).expect("quantum validated before reaching supervisor");
    let policies = [Policy::Sjf, Policy::Sjfp, rr];

    let results: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = policies
            .iter()
            .map(|&policy| {
                scope.spawn(move || -> io::Result<String> {
                    let mut buf = Vec::new();
                    engine::simulate(workload, policy, &mut buf)?;
                    Ok(String::from_utf8(buf).expect("engine output is always valid UTF-8"))
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("simulation thread panicked"))
            .collect::<io::Result<Vec<String>>>()
    })?;

    Ok(results.try_into().expect("exactly three policies were run"))
}
