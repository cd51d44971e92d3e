//! The REPL: line-at-a-time accumulation into the engine's program store,
//! meta-command dispatch, and the assignment echo that file mode never
//! emits.

use std::io::{self, Write};

use itl::{step, Engine, Host, StepOutcome, Value};

lazy_static::lazy_static! {
    /// The meta-commands `:help` lists.
    static ref META_COMMANDS: Vec<(&'static str, &'static str)> = vec![
        ("help", "show this message"),
        ("syntax", "show a short grammar summary"),
        ("screen", "show the current terminal grid size"),
        ("vars", "print all defined cells with their values"),
        ("array", "print the first 20 array cells, then a summary"),
        ("lines", "print the program store, up to 50 segments"),
        ("clear", "empty variables and the array; keep the program"),
        ("reset", "empty everything, including the program"),
        ("debug V", "show a cell's raw bytes in ASCII/hex/decimal"),
        ("exit", "leave the REPL (also: quit)"),
    ];
}

const SYNTAX_SUMMARY: &str = "\
Every line is a statement, evaluated strictly left to right with no
operator precedence. Grouping is only via ( ... ). Assign to a letter
(A-Z, _), to # to jump, to @index to write the array, or begin a line
with ? to print. A line starting with : is a REPL meta-command.";

/// Runs the REPL until `:exit`/`:quit`, end of input, or an interrupt.
/// Returns the process exit code.
pub fn run_repl<H: Host>(engine: &mut Engine<H>) -> i32 {
    println!("itl — the Incredibly Tiny Language. Type :help for meta-commands.");
    loop {
        if engine.host_mut().interrupted() {
            println!("\n[interrupted]");
            return 0;
        }
        if !engine.last_was_newline() {
            println!();
        }
        print!("> ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => return 0, // EOF
            Ok(_) => {}
            Err(_) => return 0,
        }
        let line = input.trim_end_matches(['\n', '\r']);

        if line.trim_start().starts_with(':') {
            match dispatch_meta(engine, line.trim_start()) {
                MetaOutcome::Continue => continue,
                MetaOutcome::Exit => return 0,
            }
        }

        let added = engine.append(line);
        for lineno in added {
            engine.set_cursor_line(lineno);
            match step(engine) {
                StepOutcome::Executed => {}
                StepOutcome::Terminated => {}
                StepOutcome::Interrupted => {
                    println!("\n[interrupted]");
                    return 0;
                }
            }
            print_notices(engine);
        }
    }
}

/// Runs a whole file straight through to completion, with no REPL echo.
/// Returns the process exit code (`130` on an observed interrupt, matching
/// the conventional SIGINT status). Drains the engine's assignment notices
/// every step and throws them away — file mode never prints them, and
/// without draining they would accumulate for the whole run.
pub fn run_file<H: Host>(engine: &mut Engine<H>) -> i32 {
    loop {
        engine.host_mut().pump();
        let outcome = step(engine);
        engine.take_notices();
        match outcome {
            StepOutcome::Executed => continue,
            StepOutcome::Terminated => return 0,
            StepOutcome::Interrupted => return 130,
        }
    }
}

enum MetaOutcome {
    Continue,
    Exit,
}

fn dispatch_meta<H: Host>(engine: &mut Engine<H>, line: &str) -> MetaOutcome {
    let mut parts = line[1..].split_whitespace();
    let command = parts.next().unwrap_or("");
    let rest: Vec<&str> = parts.collect();

    match command {
        "help" => {
            for (name, desc) in META_COMMANDS.iter() {
                println!(":{:<10} {}", name, desc);
            }
        }
        "syntax" => println!("{SYNTAX_SUMMARY}"),
        "screen" => println!("{}x{}", engine.host().width(), engine.host().height()),
        "vars" => print_vars(engine),
        "array" => print_array(engine),
        "lines" => print_lines(engine),
        "clear" => {
            engine.clear_state();
            println!("cleared variables and array");
        }
        "reset" => {
            engine.reset();
            println!("reset everything");
        }
        "debug" => match rest.first().and_then(|s| s.chars().next()) {
            Some(letter) => print_debug(engine, letter.to_ascii_uppercase()),
            None => println!("usage: :debug V"),
        },
        "exit" | "quit" => return MetaOutcome::Exit,
        "" => {}
        other => println!("unknown meta-command ':{other}' — try :help"),
    }
    MetaOutcome::Continue
}

fn print_vars<H: Host>(engine: &Engine<H>) {
    for (letter, value) in engine.vars().iter() {
        if !value.is_undefined() {
            println!("{letter} = {}", echo_form(value));
        }
    }
}

fn print_array<H: Host>(engine: &Engine<H>) {
    let array = engine.array();
    for (i, value) in array.iter().take(20).enumerate() {
        println!("@{i} = {value}");
    }
    if array.len() > 20 {
        println!("... {} more cells ({} total)", array.len() - 20, array.len());
    } else {
        println!("({} cells total)", array.len());
    }
}

fn print_lines<H: Host>(engine: &Engine<H>) {
    let segments = engine.program().segments();
    for (i, segment) in segments.iter().take(50).enumerate() {
        println!("{:>4}: {}", i + 1, segment);
    }
    if segments.len() > 50 {
        println!("... {} more lines ({} total)", segments.len() - 50, segments.len());
    } else {
        println!("({} lines total)", segments.len());
    }
}

fn print_debug<H: Host>(engine: &Engine<H>, letter: char) {
    if !letter.is_ascii_uppercase() && letter != '_' {
        println!("not a variable letter: {letter}");
        return;
    }
    let value = engine.vars().get(letter);
    let tag = match value {
        Value::Undefined => "undefined",
        Value::Number(_) => "number",
        Value::String(_) => "string",
    };
    let bytes = value.to_bytes();
    let ascii: String = bytes
        .iter()
        .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
        .collect();
    let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
    println!("{letter}: {tag}");
    println!("  ascii: {ascii}");
    println!("  hex:   {}", hex.join(" "));
    if let Value::Number(n) = value {
        println!("  bits:  {:#018x}", n.to_bits());
        println!("  value: {n}");
    }
}

/// Formats a [`Value`] the way an assignment echo renders it: a number in
/// its printable form, a string double-quoted.
fn echo_form(value: &Value) -> String {
    match value {
        Value::Number(_) | Value::Undefined => value.to_display_string(),
        Value::String(bytes) => format!("\"{}\"", String::from_utf8_lossy(bytes)),
    }
}

/// Drains and prints the assignment/array-write notices accumulated by the
/// step just executed — the REPL-only echo (`< X = <value>` / `< @<idx> =
/// <num>`), disabled in file mode since `run_file` never calls this.
fn print_notices<H: Host>(engine: &mut Engine<H>) {
    for notice in engine.take_notices() {
        match notice {
            itl::Notice::VarAssigned { letter, value } => {
                println!("< {letter} = {}", echo_form(&value));
            }
            itl::Notice::ArrayAssigned { index, value } => {
                println!("< @{index} = {value}");
            }
        }
    }
}
