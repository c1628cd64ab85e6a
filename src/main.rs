//! CLI front-end. `spec.md` §6: read a workload file and a Round-Robin
//! quantum, run all three policies, print their timelines in order. Exit
//! codes mirror `examples/original_source/ordon.c`'s `main` (usage error,
//! bad quantum, unreadable file, invalid workload).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use sched_sim::model::Workload;
use sched_sim::parser;
use sched_sim::policy::Policy;
use sched_sim::supervisor;

/// Discrete-time CPU scheduling simulator: SJF, SJFP, and Round-Robin over
/// the same workload.
#[derive(Parser)]
#[command(name = "sched-sim", version, about)]
struct Args {
    /// Workload file: one process per line, `pid arrival burst...`
    /// (positive = CPU tick, negative = I/O tick).
    file: PathBuf,

    /// Round-Robin time quantum, in ticks. Must be at least 1.
    quantum: u32,
}

const ERR_QUANTUM: u8 = 1;
const ERR_FILE: u8 = 2;
const ERR_MODEL: u8 = 3;
const ERR_RUN: u8 = 4;

fn main() -> ExitCode {
    let args = Args::parse();

    let rr = match Policy::round_robin(args.quantum) {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("Erreur: {e}");
            return ExitCode::from(ERR_QUANTUM);
        }
    };
    let quantum = rr.quantum().expect("round_robin always yields Policy::Rr");

    let descriptors = match parser::parse_file(&args.file) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Erreur lors de l'ouverture du fichier {:?}: {e}", args.file);
            return ExitCode::from(ERR_FILE);
        }
    };

    let workload = match Workload::new(descriptors) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Erreur: {e}");
            return ExitCode::from(ERR_MODEL);
        }
    };

    eprintln!(
        "chargement de {} processus depuis {:?}, quantum={quantum}",
        workload.descriptors().len(),
        args.file
    );

    match supervisor::run_all(&workload, quantum) {
        Ok(results) => {
            for result in results {
                print!("{result}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Erreur d'execution: {e}");
            ExitCode::from(ERR_RUN)
        }
    }
}
