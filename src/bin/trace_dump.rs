//! Dump the traversal log of a single operation as text.
//!
//! This is a debugging aid for renderer authors: it prints exactly the
//! visit sequence a renderer would replay, without any rendering.
//!
//! Usage:
//! `trace_dump <values> build`
//! `trace_dump <values> update <l> <r> <delta>`
//! `trace_dump <values> query <l> <r>`
//!
//! where `<values>` is a comma-separated list, e.g. `1,3,5,7,2,4,6,8`.

use std::env;
use std::process;

use segviz::{SegmentTree, TraversalLog, VisitKind};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("trace_dump: {err}");
            Options::print_help();
            process::exit(2);
        }
    };

    let mut tree = match SegmentTree::build(&options.values) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("trace_dump: {err}");
            process::exit(1);
        }
    };

    match options.op {
        Op::Build => {
            println!("build over {} elements:", tree.len());
            print_log(tree.build_log());
        }
        Op::Update { l, r, delta } => match tree.update_range(l, r, delta) {
            Ok(log) => {
                println!("update [{l}, {r}] += {delta}:");
                print_log(&log);
            }
            Err(err) => {
                eprintln!("trace_dump: {err}");
                process::exit(1);
            }
        },
        Op::Query { l, r } => match tree.query_range(l, r) {
            Ok(outcome) => {
                println!("query [{l}, {r}]:");
                print_log(&outcome.log);
                println!(
                    "result: sum={} min={} max={}",
                    outcome.result.sum, outcome.result.min, outcome.result.max
                );
            }
            Err(err) => {
                eprintln!("trace_dump: {err}");
                process::exit(1);
            }
        },
    }
}

fn print_log(log: &TraversalLog) {
    for (step, visit) in log.iter().enumerate() {
        let kind = match visit.kind {
            VisitKind::Disjoint => "disjoint",
            VisitKind::FullyCovered => "full",
            VisitKind::PartiallyCovered => "partial",
        };
        let s = visit.snapshot;
        println!(
            "#{step:<3} node {:>3} [{}, {}] {:<8} sum={} min={} max={} lazy={}",
            visit.node, s.range.0, s.range.1, kind, s.sum, s.min, s.max, s.lazy
        );
    }
}

enum Op {
    Build,
    Update { l: usize, r: usize, delta: f64 },
    Query { l: usize, r: usize },
}

struct Options {
    values: Vec<f64>,
    op: Op,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let values_arg = args.next().ok_or("missing value list")?;
        let values = values_arg
            .split(',')
            .map(|v| {
                v.trim()
                    .parse::<f64>()
                    .map_err(|_| format!("not a number: {v:?}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let op = match args.next().as_deref() {
            Some("build") => Op::Build,
            Some("update") => Op::Update {
                l: parse_index(args.next(), "l")?,
                r: parse_index(args.next(), "r")?,
                delta: args
                    .next()
                    .ok_or("missing delta")?
                    .parse()
                    .map_err(|_| "delta is not a number".to_string())?,
            },
            Some("query") => Op::Query {
                l: parse_index(args.next(), "l")?,
                r: parse_index(args.next(), "r")?,
            },
            Some(other) => return Err(format!("unknown operation {other:?}")),
            None => return Err("missing operation".to_string()),
        };

        if args.next().is_some() {
            return Err("trailing arguments".to_string());
        }
        Ok(Self { values, op })
    }

    fn print_help() {
        eprintln!("usage: trace_dump <values> build");
        eprintln!("       trace_dump <values> update <l> <r> <delta>");
        eprintln!("       trace_dump <values> query <l> <r>");
        eprintln!("example: trace_dump 1,3,5,7,2,4,6,8 query 2 5");
    }
}

fn parse_index(arg: Option<String>, name: &str) -> Result<usize, String> {
    arg.ok_or_else(|| format!("missing {name}"))?
        .parse()
        .map_err(|_| format!("{name} is not an index"))
}
