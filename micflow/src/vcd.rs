//! Value Change Dump (IEEE 1364) waveform output.
//!
//! A [`Trace`] groups variables into scopes, one scope per declared signal. Each scope's
//! variables are the wires of the signal's [`PortDecls`]. Only changed values are written after
//! the first sample.

use std::io::{self, Write};

use itertools::Itertools;
use linked_hash_map::LinkedHashMap;
use thiserror::Error;

use crate::*;

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum VcdError {
    #[error("file system error: {error:?}")]
    Fs { error: io::Error },

    #[error("scope `{name}` is declared twice")]
    DuplicateScope { name: String },

    #[error("scope `{name}` is not declared")]
    UnknownScope { name: String },

    #[error("scopes cannot be declared after the header is written")]
    HeaderWritten,

    #[error("scope `{name}` expects {expected} bits, found {found}")]
    WidthMismatch { name: String, expected: usize, found: usize },
}

impl From<io::Error> for VcdError {
    fn from(error: io::Error) -> Self { VcdError::Fs { error } }
}

#[derive(Debug)]
struct Var {
    name: String,
    code: String,
    offset: usize,
    width: usize,
    last: Option<Vec<bool>>,
}

#[derive(Debug)]
struct Scope {
    width: usize,
    vars: Vec<Var>,
}

/// Returns the identifier code of the `index`-th variable, using the printable ASCII range.
fn code(mut index: usize) -> String {
    const FIRST: u8 = b'!';
    const RADIX: usize = (b'~' - b'!' + 1) as usize;

    let mut code = vec![];
    loop {
        code.push((FIRST + (index % RADIX) as u8) as char);
        index /= RADIX;
        if index == 0 {
            break;
        }
        index -= 1;
    }
    code.into_iter().collect()
}

fn value_change(bits: &[bool], code: &str) -> String {
    let mut digits = bits.iter().rev().map(|b| if *b { '1' } else { '0' });
    if bits.len() == 1 {
        format!("{}{}", digits.collect::<String>(), code)
    } else {
        format!("b{} {}", digits.join(""), code)
    }
}

/// Waveform writer.
#[derive(Debug)]
pub struct Trace<W: Write> {
    out: W,
    timescale: String,
    scopes: LinkedHashMap<String, Scope>,
    vars: usize,
    header_written: bool,
    time: Option<u64>,
}

impl<W: Write> Trace<W> {
    /// Creates a new trace. `timescale` is the duration of one time unit, e.g. `"20ns"`.
    pub fn new(out: W, timescale: &str) -> Self {
        Self {
            out,
            timescale: timescale.to_string(),
            scopes: LinkedHashMap::new(),
            vars: 0,
            header_written: false,
            time: None,
        }
    }

    /// Creates a trace of a module's ports, with the scopes `in_fwd`, `in_bwd`, `out_fwd` and
    /// `out_bwd`, and writes the header.
    pub fn for_module<M: Module>(out: W, timescale: &str) -> Result<Self, VcdError> {
        let mut trace = Self::new(out, timescale);
        trace.declare("in_fwd", <Fwd<M::I> as Signal>::port_decls())?;
        trace.declare("in_bwd", <Bwd<M::I> as Signal>::port_decls())?;
        trace.declare("out_fwd", <Fwd<M::O> as Signal>::port_decls())?;
        trace.declare("out_bwd", <Bwd<M::O> as Signal>::port_decls())?;
        trace.write_header()?;
        Ok(trace)
    }

    /// Declares a scope holding the wires of `decls`.
    pub fn declare(&mut self, name: &str, decls: PortDecls) -> Result<(), VcdError> {
        if self.header_written {
            return Err(VcdError::HeaderWritten);
        }
        if self.scopes.contains_key(name) {
            return Err(VcdError::DuplicateScope { name: name.to_string() });
        }

        let mut offset = 0;
        let vars = decls
            .iter()
            .map(|(port, width)| {
                let var = Var {
                    name: port.unwrap_or_else(|| "value".to_string()),
                    code: code(self.vars),
                    offset,
                    width,
                    last: None,
                };
                self.vars += 1;
                offset += width;
                var
            })
            .collect::<Vec<_>>();

        self.scopes.insert(name.to_string(), Scope { width: decls.width(), vars });
        Ok(())
    }

    /// Writes the declarations. Called implicitly by the first sample.
    pub fn write_header(&mut self) -> Result<(), VcdError> {
        if self.header_written {
            return Ok(());
        }

        writeln!(self.out, "$version micflow $end")?;
        writeln!(self.out, "$timescale {} $end", self.timescale)?;
        writeln!(self.out, "$scope module top $end")?;
        for (name, scope) in self.scopes.iter() {
            writeln!(self.out, "$scope module {} $end", name)?;
            for var in &scope.vars {
                writeln!(self.out, "$var wire {} {} {} $end", var.width, var.code, var.name)?;
            }
            writeln!(self.out, "$upscope $end")?;
        }
        writeln!(self.out, "$upscope $end")?;
        writeln!(self.out, "$enddefinitions $end")?;
        self.header_written = true;
        Ok(())
    }

    /// Records the value of a scope at `time`. Times must be non-decreasing.
    pub fn sample<V: Signal>(&mut self, time: u64, name: &str, value: V) -> Result<(), VcdError> {
        self.write_header()?;

        let scope =
            some_or!(self.scopes.get_mut(name), return Err(VcdError::UnknownScope { name: name.to_string() }));
        let bits = value.transl();
        if bits.len() != scope.width {
            return Err(VcdError::WidthMismatch { name: name.to_string(), expected: scope.width, found: bits.len() });
        }

        for var in scope.vars.iter_mut() {
            let current = &bits[var.offset..var.offset + var.width];
            if var.last.as_deref() == Some(current) {
                continue;
            }
            if self.time != Some(time) {
                writeln!(self.out, "#{}", time)?;
                self.time = Some(time);
            }
            writeln!(self.out, "{}", value_change(current, &var.code))?;
            var.last = Some(current.to_vec());
        }
        Ok(())
    }

    /// Records every port of a simulated cycle, using the cycle number as time.
    pub fn record<I: Interface, O: Interface>(&mut self, cycle: &Cycle<I, O>) -> Result<(), VcdError> {
        self.sample(cycle.cycle, "in_fwd", cycle.ingress_fwd.clone())?;
        self.sample(cycle.cycle, "in_bwd", cycle.ingress_bwd.clone())?;
        self.sample(cycle.cycle, "out_fwd", cycle.egress_fwd.clone())?;
        self.sample(cycle.cycle, "out_bwd", cycle.egress_bwd.clone())?;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W, VcdError> {
        self.write_header()?;
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique_printable_identifiers() {
        assert_eq!(code(0), "!");
        assert_eq!(code(93), "~");
        assert_eq!(code(94), "!!");
        assert_eq!(code(95), "\"!");
        let codes = (0..500).map(code).collect::<Vec<_>>();
        assert_eq!(codes.iter().unique().count(), 500);
    }

    #[test]
    fn value_changes_are_scalar_or_vector() {
        assert_eq!(value_change(&[true], "!"), "1!");
        assert_eq!(value_change(&[false, true, true], "#"), "b110 #");
    }

    #[test]
    fn writes_only_changed_values() {
        let mut trace = Trace::new(vec![], "20ns");
        trace.declare("sig", <(bool, u8)>::port_decls()).unwrap();
        trace.sample(0, "sig", (true, 3u8)).unwrap();
        trace.sample(1, "sig", (true, 3u8)).unwrap();
        trace.sample(2, "sig", (false, 3u8)).unwrap();
        let out = String::from_utf8(trace.into_inner().unwrap()).unwrap();

        assert!(out.contains("$timescale 20ns $end"));
        assert!(out.contains("$var wire 1 ! 0 $end"));
        assert!(out.contains("$var wire 8 \" 1 $end"));
        let body = out.split("$enddefinitions $end\n").nth(1).unwrap();
        assert_eq!(body, "#0\n1!\nb00000011 \"\n#2\n0!\n");
    }

    #[test]
    fn rejects_misuse() {
        let mut trace = Trace::new(io::sink(), "1ns");
        trace.declare("a", bool::port_decls()).unwrap();
        assert!(matches!(trace.declare("a", bool::port_decls()), Err(VcdError::DuplicateScope { .. })));
        assert!(matches!(trace.sample(0, "b", true), Err(VcdError::UnknownScope { .. })));
        assert!(matches!(trace.declare("c", bool::port_decls()), Err(VcdError::HeaderWritten)));
    }
}
