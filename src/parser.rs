//! Workload text format: one process per line, `pid arrival burst...`.
//! Grounded directly on `examples/original_source/ordon.c`'s
//! `lireFichier` — this is new functionality relative to the teacher
//! workspace, supplementing the collaborator the distilled spec treats as
//! opaque. See `SPEC_FULL.md` §2.2.

use std::fs;
use std::path::Path;

use crate::error::ParseError;
use crate::model::{Burst, ProcessDescriptor};

pub fn parse_file(path: &Path) -> Result<Vec<ProcessDescriptor>, ParseError> {
    let contents = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&contents)
}

/// Parses the in-memory text. Blank lines are skipped; `source_order` is
/// the 1-based position among the non-blank lines, assigned here rather
/// than read from the file.
pub fn parse_str(contents: &str) -> Result<Vec<ProcessDescriptor>, ParseError> {
    let mut descriptors = Vec::new();
    let mut source_order = 0u32;

    for (raw_line_no, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = raw_line_no + 1;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(ParseError::TooFewFields {
                line: line_no,
                tokens: tokens.len(),
            });
        }

        let mut values = Vec::with_capacity(tokens.len());
        for tok in &tokens {
            let value: i64 = tok.parse().map_err(|_| ParseError::NotANumber {
                line: line_no,
                token: (*tok).to_string(),
            })?;
            values.push(value);
        }

        let pid = values[0];
        let arrival = values[1];
        if pid < 0 {
            return Err(ParseError::InvalidPid { line: line_no, value: pid });
        }
        if arrival < 0 {
            return Err(ParseError::InvalidArrival { line: line_no, value: arrival });
        }

        source_order += 1;
        let bursts = merge_bursts(&values[2..], line_no)?;

        descriptors.push(ProcessDescriptor {
            pid: pid as u32,
            arrival: arrival as u32,
            source_order,
            bursts,
        });
    }

    Ok(descriptors)
}

/// Merges consecutive same-sign integers into single bursts — the
/// `ordon.c` accumulation loop in `lireFichier` that `spec.md` §6.1
/// assumes has already run by the time descriptors reach the engine.
fn merge_bursts(values: &[i64], line_no: usize) -> Result<Vec<Burst>, ParseError> {
    let mut bursts: Vec<Burst> = Vec::new();
    for &v in values {
        if v == 0 {
            return Err(ParseError::ZeroBurst { line: line_no });
        }
        let is_cpu = v > 0;
        let magnitude = v.unsigned_abs() as u32;
        match bursts.last_mut() {
            Some(Burst::Cpu(n)) if is_cpu => *n += magnitude,
            Some(Burst::Io(n)) if !is_cpu => *n += magnitude,
            _ => bursts.push(if is_cpu {
                Burst::Cpu(magnitude)
            } else {
                Burst::Io(magnitude)
            }),
        }
    }
    Ok(bursts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pid_arrival_and_single_burst() {
        let descriptors = parse_str("1 0 5\n").unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].pid, 1);
        assert_eq!(descriptors[0].arrival, 0);
        assert_eq!(descriptors[0].source_order, 1);
        assert_eq!(descriptors[0].bursts, vec![Burst::Cpu(5)]);
    }

    #[test]
    fn merges_adjacent_same_sign_bursts() {
        let descriptors = parse_str("1 0 2 3 -1 -2 4\n").unwrap();
        assert_eq!(
            descriptors[0].bursts,
            vec![Burst::Cpu(5), Burst::Io(3), Burst::Cpu(4)]
        );
    }

    #[test]
    fn blank_lines_are_skipped_and_do_not_affect_source_order() {
        let descriptors = parse_str("1 0 5\n\n  \n2 1 3\n").unwrap();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].source_order, 1);
        assert_eq!(descriptors[1].source_order, 2);
    }

    #[test]
    fn rejects_line_with_too_few_fields() {
        let err = parse_str("1 0\n").unwrap_err();
        assert_eq!(err, ParseError::TooFewFields { line: 1, tokens: 2 });
    }

    #[test]
    fn rejects_non_numeric_token() {
        let err = parse_str("1 0 abc\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::NotANumber {
                line: 1,
                token: "abc".to_string()
            }
        );
    }

    #[test]
    fn rejects_negative_pid() {
        let err = parse_str("-1 0 5\n").unwrap_err();
        assert_eq!(err, ParseError::InvalidPid { line: 1, value: -1 });
    }

    #[test]
    fn rejects_negative_arrival() {
        let err = parse_str("1 -3 5\n").unwrap_err();
        assert_eq!(err, ParseError::InvalidArrival { line: 1, value: -3 });
    }

    #[test]
    fn rejects_zero_burst_value() {
        let err = parse_str("1 0 5 0 2\n").unwrap_err();
        assert_eq!(err, ParseError::ZeroBurst { line: 1 });
    }

    #[test]
    fn leading_negative_burst_is_accepted() {
        let descriptors = parse_str("1 0 -3 2\n").unwrap();
        assert_eq!(descriptors[0].bursts, vec![Burst::Io(3), Burst::Cpu(2)]);
    }
}
