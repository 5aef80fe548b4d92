//! Layered random circuit sampling.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use randqc_ir::{Circuit, ClassicalCondition, ParameterExpression, QubitId, StandardGate};

use crate::config::RandomCircuitConfig;
use crate::error::{GenError, GenResult};
use crate::pool::{GatePool, PoolEntry};

/// Name of the classical register conditions refer to.
pub const CLASSICAL_REGISTER: &str = "c";

/// Chance that an operation in a conditional layer is conditioned.
const CONDITION_PROBABILITY: f64 = 0.1;

/// Generate a random circuit with `num_qubits` qubits and `depth` layers.
///
/// Shorthand for [`generate`] with default settings and a fresh seed.
pub fn random_circuit(num_qubits: u32, depth: u32, measure: bool) -> GenResult<Circuit> {
    generate(&RandomCircuitConfig::new(num_qubits, depth).with_measure(measure))
}

/// Generate a random circuit from a configuration.
pub fn generate(config: &RandomCircuitConfig) -> GenResult<Circuit> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(|| {
        let seed = rand::random::<u64>();
        debug!(seed, "drew generator seed from entropy");
        seed
    });
    let mut rng = StdRng::seed_from_u64(seed);

    let num_qubits = config.num_qubits;
    let pool = GatePool::new(config.operand_bound(), config.reset);
    debug!(
        num_qubits,
        depth = config.depth,
        pool_size = pool.len(),
        seed,
        "generating random circuit"
    );

    let num_clbits = if config.needs_clbits() { num_qubits } else { 0 };
    let mut circuit = Circuit::with_size(
        format!("random_{num_qubits}_{}", config.depth),
        num_qubits,
        num_clbits,
    );
    let mut qubits: Vec<QubitId> = circuit.qubits().collect();
    let condition_bound = 1u64 << num_qubits.min(63);

    for layer in 0..config.depth {
        let ops = pool.sample_layer(num_qubits as usize, &mut rng);
        qubits.shuffle(&mut rng);
        trace!(layer, num_ops = ops.len(), "sampled layer");

        let conditional_layer = config.conditional && layer > 0;
        let mut operands = qubits.iter().copied();
        for entry in ops {
            let targets: Vec<QubitId> = operands.by_ref().take(entry.num_qubits()).collect();
            let condition = (conditional_layer && rng.gen_bool(CONDITION_PROBABILITY))
                .then(|| ClassicalCondition::new(CLASSICAL_REGISTER, rng.gen_range(0..condition_bound)));

            match entry {
                PoolEntry::Reset => {
                    circuit.reset(targets[0])?;
                }
                PoolEntry::Gate(sig) => {
                    let params: Vec<ParameterExpression> = (0..sig.num_params)
                        .map(|_| ParameterExpression::constant(rng.gen_range(0.0..TAU)))
                        .collect();
                    let gate = StandardGate::from_name(sig.name, &params)
                        .ok_or(GenError::UnsupportedGate(sig.name))?;
                    match condition {
                        Some(condition) => {
                            // The condition reads the register, so refresh it first.
                            circuit.measure_all()?;
                            circuit.gate_if(gate, targets, condition)?;
                        }
                        None => {
                            circuit.gate(gate, targets)?;
                        }
                    }
                }
            }
        }
    }

    if config.measure {
        circuit.measure_all()?;
    }

    debug!(
        num_ops = circuit.dag().num_ops(),
        depth = circuit.depth(),
        "generated random circuit"
    );
    Ok(circuit)
}
