//! The ITL binary: runs a source file given as the one optional argument,
//! or a REPL otherwise. Exit codes: `0` normal/REPL exit, `1` if the
//! source cannot be opened, `1` on a fatal error in file mode, `130` if an
//! interrupt is observed mid-file-run.

mod repl;
mod terminal_host;
#[cfg(test)]
mod test_support;

use std::path::Path;

use itl::Engine;
use terminal_host::TerminalHost;

struct Args {
    path: Option<String>,
    seed: Option<u64>,
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> Args {
    let mut path = None;
    let mut seed = None;
    while let Some(arg) = argv.next() {
        if arg == "--seed" {
            seed = argv.next().and_then(|v| v.parse().ok());
        } else {
            path = Some(arg);
        }
    }
    Args { path, seed }
}

fn main() {
    env_logger::init();
    let args = parse_args(std::env::args().skip(1));

    let mut engine = Engine::new(TerminalHost::new());
    if let Some(seed) = args.seed {
        engine.seed_rng(seed);
    }
    std::process::exit(run_with(&mut engine, args.path.as_deref()));
}

fn run_with(engine: &mut Engine<TerminalHost>, path: Option<&str>) -> i32 {
    match path {
        Some(path) => run_file_mode(engine, path),
        None => repl::run_repl(engine),
    }
}

fn run_file_mode(engine: &mut Engine<TerminalHost>, path: &str) -> i32 {
    let source = match std::fs::read_to_string(Path::new(path)) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("cannot open source '{path}': {err}");
            return 1;
        }
    };
    engine.load(&source);
    repl::run_file(engine)
}
