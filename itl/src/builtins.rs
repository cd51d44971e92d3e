//! Builtin call dispatch: the disjoint mathematics and host
//! families, both lowercase-only.

use hashbrown::HashSet;
use once_cell::sync::Lazy;

use crate::engine::Engine;
use crate::error::Diagnostic;
use crate::host::Host;
use crate::value::Value;

/// The recognised zero-argument-or-parenthesized math constant and function
/// names, kept as a lookup table mainly so `:help`-style tooling can list
/// them without duplicating this file's match arms.
static MATH_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "sin", "cos", "tan", "asin", "acos", "atan", "atan2", "sinh", "cosh", "tanh", "exp",
        "log", "log2", "log10", "sqrt", "cbrt", "pow", "ceil", "floor", "round", "trunc", "abs",
        "fabs", "sign", "fmod", "hypot", "max", "min", "pi", "e",
    ]
    .into_iter()
    .collect()
});

static HOST_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "gotoxy", "putch", "getch", "setfore", "setback", "setattr", "getw", "geth", "clear",
        "gopen", "gclear", "gpen", "gbr", "gpixel", "gline", "grect", "gfillrect", "gcircle",
        "gfillcircle", "gtext", "grefresh", "gmx", "gmy", "gmb", "gmclick", "gmdrag", "tmx",
        "tmy", "tmclick", "tmdrag", "time", "ticks", "elapsed",
    ]
    .into_iter()
    .collect()
});

fn arg(args: &[Value], i: usize) -> f64 {
    args.get(i).map(|v| v.to_number()).unwrap_or(0.0)
}

/// Dispatches a builtin call by name. `args` have already been evaluated
/// left-to-right by the caller. Returns `Value::Undefined` and emits a
/// [`Diagnostic`] for an unrecognised name.
pub fn call<H: Host>(engine: &mut Engine<H>, name: &str, args: &[Value]) -> Value {
    if let Some(v) = call_math(name, args) {
        return v;
    }
    if let Some(v) = call_host(engine, name, args) {
        return v;
    }
    Diagnostic::UnknownBuiltin(name.to_string()).emit();
    Value::Undefined
}

fn call_math(name: &str, args: &[Value]) -> Option<Value> {
    let a0 = || arg(args, 0);
    let a1 = || arg(args, 1);
    let n = match name {
        "sin" => a0().sin(),
        "cos" => a0().cos(),
        "tan" => a0().tan(),
        "asin" => a0().asin(),
        "acos" => a0().acos(),
        "atan" => a0().atan(),
        "atan2" => a0().atan2(a1()),
        "sinh" => a0().sinh(),
        "cosh" => a0().cosh(),
        "tanh" => a0().tanh(),
        "exp" => a0().exp(),
        "log" => a0().ln(),
        "log2" => a0().log2(),
        "log10" => a0().log10(),
        "sqrt" => a0().sqrt(),
        "cbrt" => a0().cbrt(),
        "pow" => a0().powf(a1()),
        "ceil" => a0().ceil(),
        "floor" => a0().floor(),
        "round" => a0().round(),
        "trunc" => a0().trunc(),
        "abs" | "fabs" => a0().abs(),
        "sign" => a0().signum() * if a0() == 0.0 { 0.0 } else { 1.0 },
        "fmod" => {
            let divisor = a1();
            if divisor == 0.0 {
                Diagnostic::ModuloByZero.emit();
                0.0
            } else {
                a0() % divisor
            }
        }
        "hypot" => a0().hypot(a1()),
        "max" => a0().max(a1()),
        "min" => a0().min(a1()),
        "pi" => std::f64::consts::PI,
        "e" => std::f64::consts::E,
        _ => return None,
    };
    Some(Value::Number(n))
}

fn call_host<H: Host>(engine: &mut Engine<H>, name: &str, args: &[Value]) -> Option<Value> {
    let a = |i: usize| arg(args, i) as i64;
    let host = &mut engine.host;
    let n = match name {
        "gotoxy" => host.goto(a(0), a(1)),
        "putch" => {
            let bytes = args.get(0).map(|v| v.to_bytes()).unwrap_or_default();
            host.putch(&bytes)
        }
        "getch" => host.getch(),
        "setfore" => host.setfore(a(0)),
        "setback" => host.setback(a(0)),
        "setattr" => host.setattr(a(0)),
        "getw" => host.width(),
        "geth" => host.height(),
        "clear" => {
            host.clear_grid();
            0
        }
        "gopen" => host.gopen(a(0), a(1)),
        "gclear" => {
            host.gclear();
            0
        }
        "gpen" => host.gpen(a(0), a(1), a(2)),
        "gbr" => host.gbrush(a(0), a(1), a(2)),
        "gpixel" => host.gpixel(a(0), a(1)),
        "gline" => host.gline(a(0), a(1), a(2), a(3)),
        "grect" => host.grect(a(0), a(1), a(2), a(3)),
        "gfillrect" => host.gfillrect(a(0), a(1), a(2), a(3)),
        "gcircle" => host.gcircle(a(0), a(1), a(2)),
        "gfillcircle" => host.gfillcircle(a(0), a(1), a(2)),
        "gtext" => {
            let text = args.get(2).map(|v| v.to_bytes()).unwrap_or_default();
            host.gtext(a(0), a(1), &text)
        }
        "grefresh" => {
            host.grefresh();
            0
        }
        "gmx" => host.mouse_x(),
        "gmy" => host.mouse_y(),
        "gmb" => host.mouse_buttons(),
        "gmclick" => host.mouse_click(),
        "gmdrag" => host.mouse_drag(),
        "tmx" => host.cell_mouse_x(),
        "tmy" => host.cell_mouse_y(),
        "tmclick" => host.cell_mouse_click(),
        "tmdrag" => host.cell_mouse_drag(),
        "time" => host.time_secs(),
        "ticks" => host.ticks_ms(),
        "elapsed" => host.elapsed_ms(),
        _ => return None,
    };
    Some(Value::Number(n as f64))
}
