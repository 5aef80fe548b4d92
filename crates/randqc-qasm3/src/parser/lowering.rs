//! AST-to-Circuit lowering for QASM3.

use randqc_ir::{
    Circuit, ClassicalCondition, ClbitId, CustomGate, Gate, ParameterExpression, QubitId,
    StandardGate,
};
use rustc_hash::FxHashMap;
use std::ops::Range;

use crate::ast::{BinOp, Expression, GateCall, Operand, Program, Statement, WireKind};
use crate::error::{ParseError, ParseResult};

/// Lower an AST Program to a Circuit.
pub(crate) fn lower_to_circuit(program: &Program) -> ParseResult<Circuit> {
    Lowerer::default().lower(program)
}

/// A contiguous block of wires.
#[derive(Debug, Clone, Copy)]
struct Register {
    start: u32,
    size: u32,
}

/// Shape of a `gate` block declared in the program.
#[derive(Debug, Clone, Copy)]
struct DeclaredGate {
    num_params: usize,
    num_qubits: u32,
}

/// Lowers AST to Circuit.
#[derive(Default)]
struct Lowerer<'a> {
    qregs: FxHashMap<&'a str, Register>,
    cregs: FxHashMap<&'a str, Register>,
    gates: FxHashMap<&'a str, DeclaredGate>,
    next_qubit: u32,
    next_clbit: u32,
}

impl<'a> Lowerer<'a> {
    fn lower(mut self, program: &'a Program) -> ParseResult<Circuit> {
        for stmt in &program.statements {
            self.declare(stmt)?;
        }

        let mut circuit = Circuit::with_size("qasm_circuit", self.next_qubit, self.next_clbit);

        for stmt in &program.statements {
            self.lower_statement(&mut circuit, stmt)?;
        }

        Ok(circuit)
    }

    /// First pass: registers and gate definitions.
    fn declare(&mut self, stmt: &'a Statement) -> ParseResult<()> {
        match stmt {
            Statement::Declare { kind, name, size } => {
                self.check_unused(name)?;
                let (next, registers) = match kind {
                    WireKind::Qubit => (&mut self.next_qubit, &mut self.qregs),
                    WireKind::Bit => (&mut self.next_clbit, &mut self.cregs),
                };
                let size = size.unwrap_or(1);
                let start = *next;
                *next = allocate(start, size, name)?;
                registers.insert(name, Register { start, size });
            }
            Statement::GateDef {
                name,
                params,
                qubits,
                ..
            } => {
                if self.gates.contains_key(name.as_str()) {
                    return Err(ParseError::DuplicateDeclaration(name.clone()));
                }
                let num_qubits = u32::try_from(qubits.len())
                    .map_err(|_| ParseError::Unsupported(format!("gate '{name}' arity")))?;
                self.gates.insert(
                    name,
                    DeclaredGate {
                        num_params: params.len(),
                        num_qubits,
                    },
                );
            }
            _ => {}
        }
        Ok(())
    }

    fn check_unused(&self, name: &str) -> ParseResult<()> {
        if self.qregs.contains_key(name) || self.cregs.contains_key(name) {
            Err(ParseError::DuplicateDeclaration(name.to_string()))
        } else {
            Ok(())
        }
    }

    fn lower_statement(&self, circuit: &mut Circuit, stmt: &Statement) -> ParseResult<()> {
        match stmt {
            Statement::Declare { .. }
            | Statement::Include(_)
            | Statement::GateDef { .. } => Ok(()),

            Statement::Gate(call) => self.lower_gate_call(circuit, call, None),

            Statement::Measure { qubits, bits } => {
                let q_ids = self.resolve_qubits(qubits)?;
                let c_ids = if bits.is_empty() {
                    // `measure q;` pairs qubit i with clbit i.
                    q_ids.iter().map(|q| ClbitId(q.0)).collect()
                } else {
                    self.resolve_clbits(bits)?
                };

                circuit.measure_many(&q_ids, &c_ids)?;
                Ok(())
            }

            Statement::Reset { qubits } => {
                for q in self.resolve_qubits(qubits)? {
                    circuit.reset(q)?;
                }
                Ok(())
            }

            Statement::Barrier { qubits } => {
                let q_ids = self.resolve_qubits(qubits)?;
                if q_ids.is_empty() {
                    circuit.barrier_all()?;
                } else {
                    circuit.barrier(q_ids)?;
                }
                Ok(())
            }

            Statement::If {
                condition,
                then_body,
                else_body,
            } => {
                if else_body.is_some() {
                    return Err(ParseError::Unsupported("else branches".into()));
                }
                let condition = self.resolve_condition(condition)?;
                for stmt in then_body {
                    let Statement::Gate(call) = stmt else {
                        return Err(ParseError::Unsupported(
                            "non-gate statement inside if".into(),
                        ));
                    };
                    self.lower_gate_call(circuit, call, Some(&condition))?;
                }
                Ok(())
            }

            Statement::For { .. } => Err(ParseError::Unsupported("for loops".into())),

            Statement::Assignment { target, .. } => Err(ParseError::Unsupported(format!(
                "classical assignment to '{target}'"
            ))),
        }
    }

    fn lower_gate_call(
        &self,
        circuit: &mut Circuit,
        call: &GateCall,
        condition: Option<&ClassicalCondition>,
    ) -> ParseResult<()> {
        let gate = self.resolve_gate(call)?;
        for qubits in self.broadcast(call)? {
            match condition {
                Some(condition) => circuit.gate_if(gate.clone(), qubits, condition.clone())?,
                None => circuit.gate(gate.clone(), qubits)?,
            };
        }
        Ok(())
    }

    /// Resolve a call to a standard gate, or to a declared gate whose shape
    /// differs from the standard one of the same name.
    fn resolve_gate(&self, call: &GateCall) -> ParseResult<Gate> {
        let name = call.name.as_str();
        let params: Vec<_> = call
            .params
            .iter()
            .map(expr_to_param)
            .collect::<ParseResult<_>>()?;
        let declared = self.gates.get(name);

        if let Some(sig) = StandardGate::signature_for(name) {
            let same_shape = declared.is_none_or(|decl| {
                decl.num_params == sig.num_params && decl.num_qubits == sig.num_qubits
            });
            if same_shape {
                check_counts(name, &params, call.qubits.len(), sig.num_params, sig.num_qubits)?;
                let gate = StandardGate::from_name(name, &params)
                    .ok_or_else(|| ParseError::UnknownGate(name.to_string()))?;
                return Ok(gate.into());
            }
        }

        let decl = declared.ok_or_else(|| ParseError::UnknownGate(name.to_string()))?;
        check_counts(name, &params, call.qubits.len(), decl.num_params, decl.num_qubits)?;
        Ok(CustomGate::new(name, decl.num_qubits)
            .with_params(params)
            .into())
    }

    /// Expand whole-register operands index by index. Single-qubit operands
    /// repeat on every application.
    fn broadcast(&self, call: &GateCall) -> ParseResult<Vec<Vec<QubitId>>> {
        let operands = call
            .qubits
            .iter()
            .map(|r| -> ParseResult<(bool, Vec<QubitId>)> {
                Ok((r.index.is_none(), self.resolve_qubit(r)?))
            })
            .collect::<ParseResult<Vec<_>>>()?;

        let widths: Vec<usize> = operands
            .iter()
            .filter(|(whole, _)| *whole)
            .map(|(_, ids)| ids.len())
            .collect();
        let width = match widths.first() {
            None => 1,
            Some(&w) if widths.iter().all(|&x| x == w) => w,
            Some(_) => {
                return Err(ParseError::BroadcastMismatch {
                    gate: call.name.clone(),
                    sizes: widths,
                });
            }
        };

        Ok((0..width)
            .map(|i| {
                operands
                    .iter()
                    .map(|(whole, ids)| if *whole { ids[i] } else { ids[0] })
                    .collect()
            })
            .collect())
    }

    fn resolve_condition(&self, expr: &Expression) -> ParseResult<ClassicalCondition> {
        let invalid = || ParseError::InvalidCondition(format!("{expr:?}"));

        let Expression::BinOp {
            left,
            op: BinOp::Eq,
            right,
        } = expr.unparen()
        else {
            return Err(invalid());
        };

        let (register, value) = match (left.unparen(), right.unparen()) {
            (Expression::Identifier(register), Expression::Int(value))
            | (Expression::Int(value), Expression::Identifier(register)) => (register, *value),
            _ => return Err(invalid()),
        };

        if !self.cregs.contains_key(register.as_str()) {
            return Err(ParseError::UndefinedIdentifier(register.clone()));
        }
        let value = u64::try_from(value).map_err(|_| invalid())?;

        Ok(ClassicalCondition::new(register.clone(), value))
    }

    fn resolve_qubits(&self, refs: &[Operand]) -> ParseResult<Vec<QubitId>> {
        let mut ids = Vec::new();
        for r in refs {
            ids.extend(self.resolve_qubit(r)?);
        }
        Ok(ids)
    }

    fn resolve_qubit(&self, r: &Operand) -> ParseResult<Vec<QubitId>> {
        let reg = lookup(&self.qregs, &r.register)?;
        Ok(expand(reg, &r.register, r.index)?
            .map(QubitId)
            .collect())
    }

    fn resolve_clbits(&self, refs: &[Operand]) -> ParseResult<Vec<ClbitId>> {
        let mut ids = Vec::new();
        for r in refs {
            let reg = lookup(&self.cregs, &r.register)?;
            ids.extend(expand(reg, &r.register, r.index)?.map(ClbitId));
        }
        Ok(ids)
    }
}

fn allocate(start: u32, size: u32, name: &str) -> ParseResult<u32> {
    start
        .checked_add(size)
        .ok_or_else(|| ParseError::Unsupported(format!("register '{name}' exceeds 2^32 wires")))
}

fn lookup(regs: &FxHashMap<&str, Register>, name: &str) -> ParseResult<Register> {
    regs.get(name)
        .copied()
        .ok_or_else(|| ParseError::UndefinedIdentifier(name.to_string()))
}

/// Wire ids named by `register` or `register[index]`.
fn expand(reg: Register, name: &str, index: Option<u32>) -> ParseResult<Range<u32>> {
    match index {
        Some(idx) if idx >= reg.size => Err(ParseError::IndexOutOfBounds {
            register: name.to_string(),
            index: idx as usize,
            size: reg.size as usize,
        }),
        Some(idx) => Ok(reg.start + idx..reg.start + idx + 1),
        None => Ok(reg.start..reg.start + reg.size),
    }
}

fn check_counts(
    gate: &str,
    params: &[ParameterExpression],
    num_operands: usize,
    expected_params: usize,
    expected_qubits: u32,
) -> ParseResult<()> {
    if params.len() != expected_params {
        return Err(ParseError::WrongParameterCount {
            gate: gate.into(),
            expected: expected_params,
            got: params.len(),
        });
    }
    if num_operands != expected_qubits as usize {
        return Err(ParseError::WrongQubitCount {
            gate: gate.into(),
            expected: expected_qubits as usize,
            got: num_operands,
        });
    }
    Ok(())
}

/// Convert AST expression to `ParameterExpression`.
#[allow(clippy::cast_precision_loss)]
fn expr_to_param(expr: &Expression) -> ParseResult<ParameterExpression> {
    Ok(match expr {
        Expression::Int(v) => ParameterExpression::Constant(*v as f64),
        Expression::Float(v) => ParameterExpression::Constant(*v),
        Expression::Pi => ParameterExpression::Pi,
        Expression::Tau => ParameterExpression::Constant(std::f64::consts::TAU),
        Expression::Euler => ParameterExpression::Constant(std::f64::consts::E),
        Expression::Identifier(name) => ParameterExpression::Symbol(name.clone()),
        Expression::Neg(e) => -expr_to_param(e)?,
        Expression::Paren(e) => expr_to_param(e)?,
        Expression::BinOp { left, op, right } => {
            let (l, r) = (expr_to_param(left)?, expr_to_param(right)?);
            match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => l / r,
                _ => match expr.as_f64() {
                    Some(v) => ParameterExpression::Constant(v),
                    None => {
                        return Err(ParseError::Unsupported(format!(
                            "operator {op:?} in symbolic parameter"
                        )));
                    }
                },
            }
        }
        Expression::FnCall { name, .. } => match expr.as_f64() {
            Some(v) => ParameterExpression::Constant(v),
            None => {
                return Err(ParseError::Unsupported(format!(
                    "function '{name}' in gate parameter"
                )));
            }
        },
    })
}
