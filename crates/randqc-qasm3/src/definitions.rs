//! Gate definitions for gates that standard include files lack.
//!
//! Bodies only call gates from `stdgates.inc`, `qelib1.inc` (the subset
//! both share) or the built-in `U`, so a definition never depends on
//! another definition.

/// Gates provided by `stdgates.inc`.
pub(crate) const STDGATES: &[&str] = &[
    "p", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "sx", "rx", "ry", "rz", "cx", "cy", "cz",
    "cp", "crx", "cry", "crz", "ch", "swap", "ccx", "cswap", "cu", "id", "u1", "u2", "u3",
];

/// Gates provided by `qelib1.inc`.
pub(crate) const QELIB1: &[&str] = &[
    "u3", "u2", "u1", "cx", "id", "p", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "rx", "ry",
    "rz", "sx", "sxdg", "cz", "cy", "swap", "ch", "ccx", "cswap", "crx", "cry", "crz", "cu1",
    "cp", "cu3", "csx", "cu", "rxx", "rzz", "rccx",
];

/// A `gate` block.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GateDefinition {
    pub name: &'static str,
    pub params: &'static [&'static str],
    pub qubits: &'static [&'static str],
    pub body: &'static [&'static str],
}

impl GateDefinition {
    /// Header line up to and excluding the opening brace.
    pub fn signature(&self) -> String {
        let qubits = self.qubits.join(", ");
        if self.params.is_empty() {
            format!("gate {} {qubits}", self.name)
        } else {
            format!("gate {}({}) {qubits}", self.name, self.params.join(", "))
        }
    }

    /// Single-line form.
    pub fn inline(&self) -> String {
        format!("{} {{ {} }}", self.signature(), self.body.join(" "))
    }
}

/// Look up the definition for a gate name.
pub(crate) fn definition(name: &str) -> Option<&'static GateDefinition> {
    DEFINITIONS.iter().find(|d| d.name == name)
}

pub(crate) const DEFINITIONS: &[GateDefinition] = &[
    GateDefinition {
        name: "r",
        params: &["theta", "phi"],
        qubits: &["a"],
        body: &["U(theta, phi - pi/2, -phi + pi/2) a;"],
    },
    GateDefinition {
        name: "sxdg",
        params: &[],
        qubits: &["a"],
        body: &["s a;", "h a;", "s a;"],
    },
    GateDefinition {
        name: "iswap",
        params: &[],
        qubits: &["a", "b"],
        body: &["s a;", "s b;", "h a;", "cx a, b;", "cx b, a;", "h b;"],
    },
    GateDefinition {
        name: "dcx",
        params: &[],
        qubits: &["a", "b"],
        body: &["cx a, b;", "cx b, a;"],
    },
    GateDefinition {
        name: "ecr",
        params: &[],
        qubits: &["a", "b"],
        body: &[
            "h b;",
            "cx a, b;",
            "rz(pi/4) b;",
            "cx a, b;",
            "h b;",
            "x a;",
            "h b;",
            "cx a, b;",
            "rz(-pi/4) b;",
            "cx a, b;",
            "h b;",
        ],
    },
    GateDefinition {
        name: "cs",
        params: &[],
        qubits: &["a", "b"],
        body: &["cp(pi/2) a, b;"],
    },
    GateDefinition {
        name: "csdg",
        params: &[],
        qubits: &["a", "b"],
        body: &["cp(-pi/2) a, b;"],
    },
    GateDefinition {
        name: "csx",
        params: &[],
        qubits: &["a", "b"],
        body: &["h b;", "cp(pi/2) a, b;", "h b;"],
    },
    GateDefinition {
        name: "cu1",
        params: &["lambda"],
        qubits: &["a", "b"],
        body: &["cp(lambda) a, b;"],
    },
    GateDefinition {
        name: "cu3",
        params: &["theta", "phi", "lambda"],
        qubits: &["a", "b"],
        body: &["cu(theta, phi, lambda, 0) a, b;"],
    },
    GateDefinition {
        name: "rxx",
        params: &["theta"],
        qubits: &["a", "b"],
        body: &[
            "h a;",
            "h b;",
            "cx a, b;",
            "rz(theta) b;",
            "cx a, b;",
            "h a;",
            "h b;",
        ],
    },
    GateDefinition {
        name: "ryy",
        params: &["theta"],
        qubits: &["a", "b"],
        body: &[
            "rx(pi/2) a;",
            "rx(pi/2) b;",
            "cx a, b;",
            "rz(theta) b;",
            "cx a, b;",
            "rx(-pi/2) a;",
            "rx(-pi/2) b;",
        ],
    },
    GateDefinition {
        name: "rzz",
        params: &["theta"],
        qubits: &["a", "b"],
        body: &["cx a, b;", "rz(theta) b;", "cx a, b;"],
    },
    GateDefinition {
        name: "rzx",
        params: &["theta"],
        qubits: &["a", "b"],
        body: &["h b;", "cx a, b;", "rz(theta) b;", "cx a, b;", "h b;"],
    },
    GateDefinition {
        name: "xx_minus_yy",
        params: &["theta", "beta"],
        qubits: &["a", "b"],
        body: &[
            "rz(-beta) b;",
            "rz(-pi/2) a;",
            "sx a;",
            "rz(pi/2) a;",
            "s b;",
            "cx a, b;",
            "ry(theta/2) a;",
            "ry(-theta/2) b;",
            "cx a, b;",
            "sdg b;",
            "rz(-pi/2) a;",
            "s a;",
            "h a;",
            "s a;",
            "rz(pi/2) a;",
            "rz(beta) b;",
        ],
    },
    GateDefinition {
        name: "xx_plus_yy",
        params: &["theta", "beta"],
        qubits: &["a", "b"],
        body: &[
            "rz(beta) a;",
            "rz(-pi/2) b;",
            "sx b;",
            "rz(pi/2) b;",
            "s a;",
            "cx b, a;",
            "ry(-theta/2) b;",
            "ry(-theta/2) a;",
            "cx b, a;",
            "sdg a;",
            "rz(-pi/2) b;",
            "s b;",
            "h b;",
            "s b;",
            "rz(pi/2) b;",
            "rz(-beta) a;",
        ],
    },
    GateDefinition {
        name: "ccz",
        params: &[],
        qubits: &["a", "b", "c"],
        body: &["h c;", "ccx a, b, c;", "h c;"],
    },
    GateDefinition {
        name: "rccx",
        params: &[],
        qubits: &["a", "b", "c"],
        body: &[
            "u2(0, pi) c;",
            "u1(pi/4) c;",
            "cx b, c;",
            "u1(-pi/4) c;",
            "cx a, c;",
            "u1(pi/4) c;",
            "cx b, c;",
            "u1(-pi/4) c;",
            "u2(0, pi) c;",
        ],
    },
    GateDefinition {
        name: "c3sx",
        params: &[],
        qubits: &["a", "b", "c", "d"],
        body: &[
            "h d;",
            "cp(pi/8) a, d;",
            "h d;",
            "cx a, b;",
            "h d;",
            "cp(-pi/8) b, d;",
            "h d;",
            "cx a, b;",
            "h d;",
            "cp(pi/8) b, d;",
            "h d;",
            "cx b, c;",
            "h d;",
            "cp(-pi/8) c, d;",
            "h d;",
            "cx a, c;",
            "h d;",
            "cp(pi/8) c, d;",
            "h d;",
            "cx b, c;",
            "h d;",
            "cp(-pi/8) c, d;",
            "h d;",
            "cx a, c;",
            "h d;",
            "cp(pi/8) c, d;",
            "h d;",
        ],
    },
    GateDefinition {
        name: "rcccx",
        params: &[],
        qubits: &["a", "b", "c", "d"],
        body: &[
            "u2(0, pi) d;",
            "u1(pi/4) d;",
            "cx c, d;",
            "u1(-pi/4) d;",
            "u2(0, pi) d;",
            "cx a, d;",
            "u1(pi/4) d;",
            "cx b, d;",
            "u1(-pi/4) d;",
            "cx a, d;",
            "u1(pi/4) d;",
            "cx b, d;",
            "u1(-pi/4) d;",
            "u2(0, pi) d;",
            "u1(pi/4) d;",
            "cx c, d;",
            "u1(-pi/4) d;",
            "u2(0, pi) d;",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use randqc_ir::StandardGate;

    #[test]
    fn test_every_nonstandard_gate_is_defined() {
        for sig in randqc_ir::gate::SIGNATURES {
            if sig.name == "u" || STDGATES.contains(&sig.name) {
                assert!(definition(sig.name).is_none(), "{} is in stdgates", sig.name);
            } else {
                let def = definition(sig.name)
                    .unwrap_or_else(|| panic!("missing definition for {}", sig.name));
                assert_eq!(def.params.len(), sig.num_params, "{}", sig.name);
                assert_eq!(def.qubits.len() as u32, sig.num_qubits, "{}", sig.name);
            }
        }
    }

    #[test]
    fn test_bodies_only_call_shared_gates() {
        for def in DEFINITIONS {
            for stmt in def.body {
                let head = stmt
                    .split(|c: char| c == '(' || c == ' ')
                    .next()
                    .unwrap_or_default();
                assert!(
                    head == "U" || (STDGATES.contains(&head) && QELIB1.contains(&head)),
                    "{} body calls {head}",
                    def.name
                );
            }
        }
    }

    #[test]
    fn test_signature_format() {
        let def = definition("cu3").unwrap();
        assert_eq!(def.signature(), "gate cu3(theta, phi, lambda) a, b");
        assert_eq!(
            definition("dcx").unwrap().inline(),
            "gate dcx a, b { cx a, b; cx b, a; }"
        );
        assert!(StandardGate::signature_for(def.name).is_some());
    }
}
