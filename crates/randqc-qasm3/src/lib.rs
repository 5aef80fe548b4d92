//! `OpenQASM` text for randqc circuits.
//!
//! [`emit`] writes a circuit as `OpenQASM` 3.0, the format of every file
//! the CLI produces. [`parse`] reads such text back into a circuit so the
//! output can be checked structurally.
//!
//! # What is read
//!
//! The reader accepts `OPENQASM 3.x` and the `OPENQASM 2.0` spellings
//! (`qreg`, `creg`, `measure q -> c;`). Everything the emitter produces is
//! understood: register declarations, standard and built-in gates with
//! constant or symbolic angles, `gate` definitions, register broadcast,
//! measurement, `reset`, `barrier` and `if (c == n) { ... }`.
//!
//! `for` loops and classical assignments are parsed into the [`syntax`]
//! tree but rejected with [`ParseError::Unsupported`] when building a
//! circuit.
//!
//! # Parsing
//!
//! ```rust
//! use randqc_qasm3::parse;
//!
//! let qasm = r#"
//!     OPENQASM 3.0;
//!     include "stdgates.inc";
//!     qubit[2] q;
//!     bit[2] c;
//!     h q[0];
//!     cx q[0], q[1];
//!     c = measure q;
//! "#;
//!
//! let circuit = parse(qasm).unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Emitting
//!
//! ```rust
//! use randqc_ir::Circuit;
//! use randqc_qasm3::emit;
//!
//! let circuit = Circuit::bell().unwrap();
//!
//! let qasm = emit(&circuit).unwrap();
//! assert!(qasm.starts_with("OPENQASM 3.0;\ninclude \"stdgates.inc\";\n"));
//! assert!(qasm.contains("h q[0];"));
//! assert!(qasm.contains("cx q[0], q[1];"));
//! assert!(qasm.contains("c[1] = measure q[1];"));
//! ```
//!
//! # Round trip
//!
//! ```rust
//! use randqc_qasm3::{emit, parse};
//!
//! let original = r#"
//! OPENQASM 3.0;
//! qubit[3] q;
//! h q[0];
//! cx q[0], q[1];
//! rzz(0.5) q[1], q[2];
//! "#;
//!
//! let circuit = parse(original).unwrap();
//! let emitted = emit(&circuit).unwrap();
//! assert!(emitted.contains("gate rzz(theta) a, b {"));
//!
//! let reparsed = parse(&emitted).unwrap();
//! assert_eq!(circuit.num_qubits(), reparsed.num_qubits());
//! assert_eq!(circuit.depth(), reparsed.depth());
//! ```

mod ast;
mod definitions;
mod emitter;
mod error;
mod lexer;
mod parser;

pub use emitter::{emit, emit_qasm2};
pub use error::{ParseError, ParseResult};
pub use parser::{parse, parse_ast};

/// AST types produced by [`parse_ast`].
pub mod syntax {
    pub use crate::ast::*;
}
