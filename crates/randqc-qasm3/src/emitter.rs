//! QASM emitter for serializing circuits.

use randqc_ir::{
    Circuit, ClbitId, Gate, GateKind, Instruction, InstructionKind, ParameterExpression, QubitId,
    StandardGate,
};
use rustc_hash::FxHashSet;

use crate::definitions::{DEFINITIONS, GateDefinition, QELIB1, STDGATES};
use crate::error::{ParseError, ParseResult};

/// Emit a circuit as QASM3 source code.
///
/// Gates outside `stdgates.inc` get a `gate` block ahead of the register
/// declarations, once per gate that the circuit actually uses.
pub fn emit(circuit: &Circuit) -> ParseResult<String> {
    Emitter::new(Dialect::Qasm3).emit_circuit(circuit)
}

/// Emit a circuit as QASM 2.0 source code.
///
/// Register declarations use the QASM2 style (`qreg q[n];` / `creg c[n];`)
/// and measurements use `measure q[i] -> c[i];`. Gates missing from
/// `qelib1.inc` are given inline `gate` definitions so the output is
/// self-contained. Conditional gates are rejected.
pub fn emit_qasm2(circuit: &Circuit) -> ParseResult<String> {
    Emitter::new(Dialect::Qasm2).emit_circuit(circuit)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Qasm3,
    Qasm2,
}

impl Dialect {
    fn version(self) -> &'static str {
        match self {
            Dialect::Qasm3 => "OPENQASM 3.0;",
            Dialect::Qasm2 => "OPENQASM 2.0;",
        }
    }

    fn include(self) -> &'static str {
        match self {
            Dialect::Qasm3 => "include \"stdgates.inc\";",
            Dialect::Qasm2 => "include \"qelib1.inc\";",
        }
    }

    /// Gates callable without a definition.
    fn provides(self, name: &str) -> bool {
        match self {
            Dialect::Qasm3 => name == "u" || STDGATES.contains(&name),
            Dialect::Qasm2 => name == "u" || QELIB1.contains(&name),
        }
    }
}

struct Emitter {
    dialect: Dialect,
    output: String,
    indent: usize,
}

impl Emitter {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            output: String::new(),
            indent: 0,
        }
    }

    fn emit_circuit(mut self, circuit: &Circuit) -> ParseResult<String> {
        let dialect = self.dialect;
        self.writeln(dialect.version());
        self.writeln(dialect.include());

        for def in self.required_definitions(circuit) {
            self.emit_definition(def);
        }
        self.writeln("");

        let num_qubits = circuit.num_qubits();
        let num_clbits = circuit.num_clbits();
        match dialect {
            Dialect::Qasm3 => {
                if num_qubits > 0 {
                    self.writeln(&format!("qubit[{num_qubits}] q;"));
                }
                if num_clbits > 0 {
                    self.writeln(&format!("bit[{num_clbits}] c;"));
                }
            }
            Dialect::Qasm2 => {
                if num_qubits > 0 {
                    self.writeln(&format!("qreg q[{num_qubits}];"));
                }
                if num_clbits > 0 {
                    self.writeln(&format!("creg c[{num_clbits}];"));
                }
            }
        }
        if num_qubits > 0 || num_clbits > 0 {
            self.writeln("");
        }

        for (_, instruction) in circuit.dag().topological_ops() {
            self.emit_instruction(instruction)?;
        }

        Ok(self.output)
    }

    /// Definitions for used gates the include file lacks, in table order.
    fn required_definitions(&self, circuit: &Circuit) -> Vec<&'static GateDefinition> {
        let used: FxHashSet<&str> = circuit
            .instructions()
            .filter_map(Instruction::as_gate)
            .filter_map(|gate| match &gate.kind {
                GateKind::Standard(std) => Some(std.name()),
                GateKind::Custom(_) => None,
            })
            .filter(|name| !self.dialect.provides(name))
            .collect();

        DEFINITIONS
            .iter()
            .filter(|def| used.contains(def.name))
            .collect()
    }

    fn emit_definition(&mut self, def: &GateDefinition) {
        match self.dialect {
            Dialect::Qasm2 => self.writeln(&def.inline()),
            Dialect::Qasm3 => {
                self.writeln(&format!("{} {{", def.signature()));
                self.indent += 1;
                for stmt in def.body {
                    self.writeln(stmt);
                }
                self.indent -= 1;
                self.writeln("}");
            }
        }
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> ParseResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let call = self.gate_call(gate, &instruction.qubits);
                match &gate.condition {
                    None => self.writeln(&call),
                    Some(condition) => {
                        if self.dialect == Dialect::Qasm2 {
                            return Err(ParseError::Unsupported(format!(
                                "conditional '{}' in OpenQASM 2 output",
                                gate.name()
                            )));
                        }
                        self.writeln(&format!(
                            "if ({} == {}) {{",
                            condition.register, condition.value
                        ));
                        self.indent += 1;
                        self.writeln(&call);
                        self.indent -= 1;
                        self.writeln("}");
                    }
                }
            }

            InstructionKind::Measure => {
                for (q, c) in instruction.qubits.iter().zip(&instruction.clbits) {
                    let line = match self.dialect {
                        Dialect::Qasm3 => format!("{} = measure {};", clbit(*c), qubit(*q)),
                        Dialect::Qasm2 => format!("measure {} -> {};", qubit(*q), clbit(*c)),
                    };
                    self.writeln(&line);
                }
            }

            InstructionKind::Reset => {
                for q in &instruction.qubits {
                    self.writeln(&format!("reset {};", qubit(*q)));
                }
            }

            InstructionKind::Barrier => {
                let qubits = qubit_list(&instruction.qubits);
                if qubits.is_empty() {
                    self.writeln("barrier;");
                } else {
                    self.writeln(&format!("barrier {qubits};"));
                }
            }
        }

        Ok(())
    }

    fn gate_call(&self, gate: &Gate, qubits: &[QubitId]) -> String {
        let name = match (&gate.kind, self.dialect) {
            (GateKind::Standard(StandardGate::U(..)), Dialect::Qasm3) => "U",
            (GateKind::Standard(StandardGate::U(..)), Dialect::Qasm2) => "u3",
            (kind, _) => kind.name(),
        };
        let params = gate
            .kind
            .parameters()
            .into_iter()
            .map(format_param)
            .collect::<Vec<_>>()
            .join(", ");
        let qubits = qubit_list(qubits);

        if params.is_empty() {
            format!("{name} {qubits};")
        } else {
            format!("{name}({params}) {qubits};")
        }
    }

    fn writeln(&mut self, line: &str) {
        if !line.is_empty() {
            for _ in 0..self.indent {
                self.output.push_str("    ");
            }
        }
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Format a parameter, snapping common multiples of π.
///
/// Other constants use the shortest decimal that parses back to the same
/// `f64`.
fn format_param(param: &ParameterExpression) -> String {
    const SNAP: f64 = 1e-10;
    const PI: f64 = std::f64::consts::PI;

    match param {
        ParameterExpression::Constant(v) => {
            let v = *v;
            if (v - PI).abs() < SNAP {
                "pi".into()
            } else if (v - PI / 2.0).abs() < SNAP {
                "pi/2".into()
            } else if (v - PI / 4.0).abs() < SNAP {
                "pi/4".into()
            } else if (v + PI / 2.0).abs() < SNAP {
                "-pi/2".into()
            } else if (v + PI / 4.0).abs() < SNAP {
                "-pi/4".into()
            } else {
                format!("{v}")
            }
        }
        ParameterExpression::Symbol(name) => name.clone(),
        ParameterExpression::Pi => "pi".into(),
        ParameterExpression::Neg(e) => format!("-({})", format_param(e)),
        ParameterExpression::Add(a, b) => format!("({} + {})", format_param(a), format_param(b)),
        ParameterExpression::Sub(a, b) => format!("({} - {})", format_param(a), format_param(b)),
        ParameterExpression::Mul(a, b) => format!("({} * {})", format_param(a), format_param(b)),
        ParameterExpression::Div(a, b) => format!("({} / {})", format_param(a), format_param(b)),
    }
}

fn qubit(q: QubitId) -> String {
    format!("q[{}]", q.0)
}

fn clbit(c: ClbitId) -> String {
    format!("c[{}]", c.0)
}

fn qubit_list(qubits: &[QubitId]) -> String {
    qubits
        .iter()
        .map(|q| qubit(*q))
        .collect::<Vec<_>>()
        .join(", ")
}
