//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::parameter::ParameterExpression;

/// Name, arity and parameter count of a standard gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateSignature {
    /// Canonical lowercase name, as written in QASM.
    pub name: &'static str,
    /// Number of qubits the gate acts on.
    pub num_qubits: u32,
    /// Number of angle parameters.
    pub num_params: usize,
}

impl GateSignature {
    const fn new(name: &'static str, num_qubits: u32, num_params: usize) -> Self {
        Self {
            name,
            num_qubits,
            num_params,
        }
    }
}

/// Every [`StandardGate`], grouped by arity.
pub const SIGNATURES: &[GateSignature] = &[
    // One-qubit
    GateSignature::new("id", 1, 0),
    GateSignature::new("x", 1, 0),
    GateSignature::new("y", 1, 0),
    GateSignature::new("z", 1, 0),
    GateSignature::new("h", 1, 0),
    GateSignature::new("s", 1, 0),
    GateSignature::new("sdg", 1, 0),
    GateSignature::new("t", 1, 0),
    GateSignature::new("tdg", 1, 0),
    GateSignature::new("sx", 1, 0),
    GateSignature::new("sxdg", 1, 0),
    GateSignature::new("rx", 1, 1),
    GateSignature::new("ry", 1, 1),
    GateSignature::new("rz", 1, 1),
    GateSignature::new("p", 1, 1),
    GateSignature::new("r", 1, 2),
    GateSignature::new("u", 1, 3),
    GateSignature::new("u1", 1, 1),
    GateSignature::new("u2", 1, 2),
    GateSignature::new("u3", 1, 3),
    // Two-qubit
    GateSignature::new("cx", 2, 0),
    GateSignature::new("cy", 2, 0),
    GateSignature::new("cz", 2, 0),
    GateSignature::new("ch", 2, 0),
    GateSignature::new("swap", 2, 0),
    GateSignature::new("iswap", 2, 0),
    GateSignature::new("dcx", 2, 0),
    GateSignature::new("ecr", 2, 0),
    GateSignature::new("cs", 2, 0),
    GateSignature::new("csdg", 2, 0),
    GateSignature::new("csx", 2, 0),
    GateSignature::new("crx", 2, 1),
    GateSignature::new("cry", 2, 1),
    GateSignature::new("crz", 2, 1),
    GateSignature::new("cp", 2, 1),
    GateSignature::new("cu", 2, 4),
    GateSignature::new("cu1", 2, 1),
    GateSignature::new("cu3", 2, 3),
    GateSignature::new("rxx", 2, 1),
    GateSignature::new("ryy", 2, 1),
    GateSignature::new("rzz", 2, 1),
    GateSignature::new("rzx", 2, 1),
    GateSignature::new("xx_minus_yy", 2, 2),
    GateSignature::new("xx_plus_yy", 2, 2),
    // Three-qubit
    GateSignature::new("ccx", 3, 0),
    GateSignature::new("cswap", 3, 0),
    GateSignature::new("ccz", 3, 0),
    GateSignature::new("rccx", 3, 0),
    // Four-qubit
    GateSignature::new("c3sx", 4, 0),
    GateSignature::new("rcccx", 4, 0),
];

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,
    /// Rotation around X axis.
    Rx(ParameterExpression),
    /// Rotation around Y axis.
    Ry(ParameterExpression),
    /// Rotation around Z axis.
    Rz(ParameterExpression),
    /// Phase gate.
    P(ParameterExpression),
    /// Rotation by θ around the axis cos(φ)X + sin(φ)Y.
    R(ParameterExpression, ParameterExpression),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(
        ParameterExpression,
        ParameterExpression,
        ParameterExpression,
    ),
    /// Legacy U1(λ), equal to P(λ).
    U1(ParameterExpression),
    /// Legacy U2(φ, λ) = U(π/2, φ, λ).
    U2(ParameterExpression, ParameterExpression),
    /// Legacy U3(θ, φ, λ), equal to U.
    U3(
        ParameterExpression,
        ParameterExpression,
        ParameterExpression,
    ),

    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// Double CNOT: CX(a, b) followed by CX(b, a).
    DCX,
    /// Echoed cross-resonance gate.
    ECR,
    /// Controlled-S gate.
    CS,
    /// Controlled-S-dagger gate.
    CSdg,
    /// Controlled-sqrt(X) gate.
    CSX,
    /// Controlled rotation around X.
    CRx(ParameterExpression),
    /// Controlled rotation around Y.
    CRy(ParameterExpression),
    /// Controlled rotation around Z.
    CRz(ParameterExpression),
    /// Controlled phase gate.
    CP(ParameterExpression),
    /// Controlled U(θ, φ, λ) with extra phase γ on the control.
    CU(
        ParameterExpression,
        ParameterExpression,
        ParameterExpression,
        ParameterExpression,
    ),
    /// Controlled U1.
    CU1(ParameterExpression),
    /// Controlled U3.
    CU3(
        ParameterExpression,
        ParameterExpression,
        ParameterExpression,
    ),
    /// XX rotation gate.
    RXX(ParameterExpression),
    /// YY rotation gate.
    RYY(ParameterExpression),
    /// ZZ rotation gate.
    RZZ(ParameterExpression),
    /// ZX rotation gate.
    RZX(ParameterExpression),
    /// XX-YY interaction with phase β.
    XXMinusYY(ParameterExpression, ParameterExpression),
    /// XX+YY interaction with phase β.
    XXPlusYY(ParameterExpression, ParameterExpression),

    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,
    /// Doubly-controlled Z.
    CCZ,
    /// Relative-phase Toffoli.
    RCCX,

    /// Triply-controlled sqrt(X).
    C3SX,
    /// Relative-phase triply-controlled X.
    RC3X,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::R(_, _) => "r",
            StandardGate::U(_, _, _) => "u",
            StandardGate::U1(_) => "u1",
            StandardGate::U2(_, _) => "u2",
            StandardGate::U3(_, _, _) => "u3",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::DCX => "dcx",
            StandardGate::ECR => "ecr",
            StandardGate::CS => "cs",
            StandardGate::CSdg => "csdg",
            StandardGate::CSX => "csx",
            StandardGate::CRx(_) => "crx",
            StandardGate::CRy(_) => "cry",
            StandardGate::CRz(_) => "crz",
            StandardGate::CP(_) => "cp",
            StandardGate::CU(_, _, _, _) => "cu",
            StandardGate::CU1(_) => "cu1",
            StandardGate::CU3(_, _, _) => "cu3",
            StandardGate::RXX(_) => "rxx",
            StandardGate::RYY(_) => "ryy",
            StandardGate::RZZ(_) => "rzz",
            StandardGate::RZX(_) => "rzx",
            StandardGate::XXMinusYY(_, _) => "xx_minus_yy",
            StandardGate::XXPlusYY(_, _) => "xx_plus_yy",
            StandardGate::CCX => "ccx",
            StandardGate::CSwap => "cswap",
            StandardGate::CCZ => "ccz",
            StandardGate::RCCX => "rccx",
            StandardGate::C3SX => "c3sx",
            StandardGate::RC3X => "rcccx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::SXdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_)
            | StandardGate::R(_, _)
            | StandardGate::U(_, _, _)
            | StandardGate::U1(_)
            | StandardGate::U2(_, _)
            | StandardGate::U3(_, _, _) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::Swap
            | StandardGate::ISwap
            | StandardGate::DCX
            | StandardGate::ECR
            | StandardGate::CS
            | StandardGate::CSdg
            | StandardGate::CSX
            | StandardGate::CRx(_)
            | StandardGate::CRy(_)
            | StandardGate::CRz(_)
            | StandardGate::CP(_)
            | StandardGate::CU(_, _, _, _)
            | StandardGate::CU1(_)
            | StandardGate::CU3(_, _, _)
            | StandardGate::RXX(_)
            | StandardGate::RYY(_)
            | StandardGate::RZZ(_)
            | StandardGate::RZX(_)
            | StandardGate::XXMinusYY(_, _)
            | StandardGate::XXPlusYY(_, _) => 2,

            StandardGate::CCX | StandardGate::CSwap | StandardGate::CCZ | StandardGate::RCCX => 3,

            StandardGate::C3SX | StandardGate::RC3X => 4,
        }
    }

    /// Get parameters of this gate, in QASM argument order.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p)
            | StandardGate::U1(p)
            | StandardGate::CRx(p)
            | StandardGate::CRy(p)
            | StandardGate::CRz(p)
            | StandardGate::CP(p)
            | StandardGate::CU1(p)
            | StandardGate::RXX(p)
            | StandardGate::RYY(p)
            | StandardGate::RZZ(p)
            | StandardGate::RZX(p) => vec![p],

            StandardGate::R(a, b)
            | StandardGate::U2(a, b)
            | StandardGate::XXMinusYY(a, b)
            | StandardGate::XXPlusYY(a, b) => vec![a, b],

            StandardGate::U(a, b, c) | StandardGate::U3(a, b, c) | StandardGate::CU3(a, b, c) => {
                vec![a, b, c]
            }

            StandardGate::CU(a, b, c, d) => vec![a, b, c, d],

            _ => vec![],
        }
    }

    /// Check if any parameter is symbolic.
    pub fn is_parameterized(&self) -> bool {
        self.parameters().iter().any(|p| p.is_symbolic())
    }

    /// Signature of this gate.
    pub fn signature(&self) -> GateSignature {
        GateSignature {
            name: self.name(),
            num_qubits: self.num_qubits(),
            num_params: self.parameters().len(),
        }
    }

    /// Look up the signature for a gate name, accepting common aliases.
    pub fn signature_for(name: &str) -> Option<&'static GateSignature> {
        let name = canonical_name(name);
        SIGNATURES.iter().find(|sig| sig.name == name)
    }

    /// Build a standard gate from its name and parameters.
    ///
    /// Returns `None` if the name is unknown or the parameter count is wrong.
    pub fn from_name(name: &str, params: &[ParameterExpression]) -> Option<Self> {
        use StandardGate as G;

        let gate = match (canonical_name(name), params) {
            ("id", []) => G::I,
            ("x", []) => G::X,
            ("y", []) => G::Y,
            ("z", []) => G::Z,
            ("h", []) => G::H,
            ("s", []) => G::S,
            ("sdg", []) => G::Sdg,
            ("t", []) => G::T,
            ("tdg", []) => G::Tdg,
            ("sx", []) => G::SX,
            ("sxdg", []) => G::SXdg,
            ("rx", [a]) => G::Rx(a.clone()),
            ("ry", [a]) => G::Ry(a.clone()),
            ("rz", [a]) => G::Rz(a.clone()),
            ("p", [a]) => G::P(a.clone()),
            ("r", [a, b]) => G::R(a.clone(), b.clone()),
            ("u", [a, b, c]) => G::U(a.clone(), b.clone(), c.clone()),
            ("u1", [a]) => G::U1(a.clone()),
            ("u2", [a, b]) => G::U2(a.clone(), b.clone()),
            ("u3", [a, b, c]) => G::U3(a.clone(), b.clone(), c.clone()),
            ("cx", []) => G::CX,
            ("cy", []) => G::CY,
            ("cz", []) => G::CZ,
            ("ch", []) => G::CH,
            ("swap", []) => G::Swap,
            ("iswap", []) => G::ISwap,
            ("dcx", []) => G::DCX,
            ("ecr", []) => G::ECR,
            ("cs", []) => G::CS,
            ("csdg", []) => G::CSdg,
            ("csx", []) => G::CSX,
            ("crx", [a]) => G::CRx(a.clone()),
            ("cry", [a]) => G::CRy(a.clone()),
            ("crz", [a]) => G::CRz(a.clone()),
            ("cp", [a]) => G::CP(a.clone()),
            ("cu", [a, b, c, d]) => G::CU(a.clone(), b.clone(), c.clone(), d.clone()),
            ("cu1", [a]) => G::CU1(a.clone()),
            ("cu3", [a, b, c]) => G::CU3(a.clone(), b.clone(), c.clone()),
            ("rxx", [a]) => G::RXX(a.clone()),
            ("ryy", [a]) => G::RYY(a.clone()),
            ("rzz", [a]) => G::RZZ(a.clone()),
            ("rzx", [a]) => G::RZX(a.clone()),
            ("xx_minus_yy", [a, b]) => G::XXMinusYY(a.clone(), b.clone()),
            ("xx_plus_yy", [a, b]) => G::XXPlusYY(a.clone(), b.clone()),
            ("ccx", []) => G::CCX,
            ("cswap", []) => G::CSwap,
            ("ccz", []) => G::CCZ,
            ("rccx", []) => G::RCCX,
            ("c3sx", []) => G::C3SX,
            ("rcccx", []) => G::RC3X,
            _ => return None,
        };
        Some(gate)
    }
}

/// Map QASM aliases and built-ins onto canonical gate names.
fn canonical_name(name: &str) -> &str {
    match name {
        "i" => "id",
        "U" => "u",
        "CX" | "cnot" => "cx",
        "phase" => "p",
        "cphase" => "cp",
        "toffoli" => "ccx",
        "fredkin" => "cswap",
        other => other,
    }
}

/// A quantum gate, either standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A gate declared by name only, e.g. from a QASM `gate` block.
    Custom(CustomGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits,
        }
    }

    /// Get the gate parameters.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        match self {
            GateKind::Standard(g) => g.parameters(),
            GateKind::Custom(g) => g.params.iter().collect(),
        }
    }
}

/// A user-declared gate without known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Parameters of the gate.
    pub params: Vec<ParameterExpression>,
}

impl CustomGate {
    /// Create a new custom gate.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            params: vec![],
        }
    }

    /// Add parameters to the gate.
    #[must_use]
    pub fn with_params(mut self, params: Vec<ParameterExpression>) -> Self {
        self.params = params;
        self
    }
}

/// Classical condition for conditional gates: apply only if the register
/// reads `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalCondition {
    /// The name of the classical register.
    pub register: String,
    /// The value to compare against.
    pub value: u64,
}

impl ClassicalCondition {
    /// Create a new classical condition.
    pub fn new(register: impl Into<String>, value: u64) -> Self {
        Self {
            register: register.into(),
            value,
        }
    }
}

/// A gate with an optional classical condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// Optional classical condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ClassicalCondition>,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
            condition: None,
        }
    }

    /// Create a new gate from a custom gate.
    pub fn custom(gate: CustomGate) -> Self {
        Self {
            kind: GateKind::Custom(gate),
            condition: None,
        }
    }

    /// Add a classical condition to the gate.
    #[must_use]
    pub fn with_condition(mut self, condition: ClassicalCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::custom(gate)
    }
}
