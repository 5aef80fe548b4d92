//! Generator configuration.

use crate::error::{GenError, GenResult};

/// Largest gate arity in the sampling pool.
pub const MAX_GATE_QUBITS: u32 = 4;

/// Configuration for a random circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomCircuitConfig {
    /// Number of qubits.
    pub num_qubits: u32,
    /// Number of layers. Every layer touches each qubit exactly once.
    pub depth: u32,
    /// Upper bound on gate arity, clamped to `num_qubits`.
    pub max_operands: u32,
    /// Measure every qubit into the classical register after the last layer.
    pub measure: bool,
    /// Allow gates conditioned on the classical register.
    pub conditional: bool,
    /// Include `reset` in the single-qubit pool.
    pub reset: bool,
    /// Seed for reproducible output. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for RandomCircuitConfig {
    fn default() -> Self {
        Self {
            num_qubits: 4,
            depth: 4,
            max_operands: MAX_GATE_QUBITS,
            measure: false,
            conditional: false,
            reset: false,
            seed: None,
        }
    }
}

impl RandomCircuitConfig {
    /// Create a configuration for `num_qubits` qubits and `depth` layers.
    pub fn new(num_qubits: u32, depth: u32) -> Self {
        Self {
            num_qubits,
            depth,
            ..Self::default()
        }
    }

    /// Set the gate arity bound.
    #[must_use]
    pub fn with_max_operands(mut self, max_operands: u32) -> Self {
        self.max_operands = max_operands;
        self
    }

    /// Enable or disable final measurement.
    #[must_use]
    pub fn with_measure(mut self, measure: bool) -> Self {
        self.measure = measure;
        self
    }

    /// Enable or disable conditional gates.
    #[must_use]
    pub fn with_conditional(mut self, conditional: bool) -> Self {
        self.conditional = conditional;
        self
    }

    /// Enable or disable resets.
    #[must_use]
    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    /// Fix the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Effective arity bound after clamping to the qubit count.
    pub fn operand_bound(&self) -> u32 {
        self.max_operands.min(self.num_qubits)
    }

    /// Whether the circuit needs a classical register.
    pub fn needs_clbits(&self) -> bool {
        self.measure || self.conditional
    }

    /// Check the configuration before sampling.
    pub fn validate(&self) -> GenResult<()> {
        if self.num_qubits == 0 {
            return Err(GenError::NoQubits);
        }
        if !(1..=MAX_GATE_QUBITS).contains(&self.max_operands) {
            return Err(GenError::InvalidMaxOperands(self.max_operands));
        }
        Ok(())
    }
}
