//! The set of operations a layer is sampled from.

use rand::Rng;
use randqc_ir::GateSignature;
use randqc_ir::gate::SIGNATURES;

/// One candidate operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolEntry {
    /// A standard gate, built once its parameters are drawn.
    Gate(&'static GateSignature),
    /// Reset to |0⟩.
    Reset,
}

impl PoolEntry {
    /// Number of qubits the operation consumes.
    pub fn num_qubits(self) -> usize {
        match self {
            PoolEntry::Gate(sig) => sig.num_qubits as usize,
            PoolEntry::Reset => 1,
        }
    }

    /// Name as written in QASM.
    pub fn name(self) -> &'static str {
        match self {
            PoolEntry::Gate(sig) => sig.name,
            PoolEntry::Reset => "reset",
        }
    }
}

/// Operations available for a given arity bound.
#[derive(Debug, Clone)]
pub struct GatePool {
    entries: Vec<PoolEntry>,
    single_qubit: Vec<PoolEntry>,
}

impl GatePool {
    /// Every standard gate acting on at most `max_operands` qubits, plus
    /// `reset` when requested.
    pub fn new(max_operands: u32, reset: bool) -> Self {
        let mut entries: Vec<_> = SIGNATURES
            .iter()
            .filter(|sig| sig.num_qubits <= max_operands)
            .map(PoolEntry::Gate)
            .collect();
        if reset {
            entries.push(PoolEntry::Reset);
        }
        let single_qubit = entries
            .iter()
            .copied()
            .filter(|e| e.num_qubits() == 1)
            .collect();
        Self {
            entries,
            single_qubit,
        }
    }

    /// All entries.
    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Draw an entry uniformly from the whole pool.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> PoolEntry {
        self.entries[rng.gen_range(0..self.entries.len())]
    }

    /// Draw a single-qubit entry uniformly.
    pub fn pick_single<R: Rng + ?Sized>(&self, rng: &mut R) -> PoolEntry {
        self.single_qubit[rng.gen_range(0..self.single_qubit.len())]
    }

    /// Sample one layer over `num_qubits` qubits.
    ///
    /// Draws `num_qubits` candidates and keeps the longest prefix whose
    /// total arity fits, then fills the remaining qubits with single-qubit
    /// operations. The returned arities always sum to `num_qubits`.
    pub fn sample_layer<R: Rng + ?Sized>(&self, num_qubits: usize, rng: &mut R) -> Vec<PoolEntry> {
        let candidates: Vec<_> = (0..num_qubits).map(|_| self.pick(rng)).collect();

        let mut layer = Vec::with_capacity(num_qubits);
        let mut used = 0;
        for entry in candidates {
            if used + entry.num_qubits() > num_qubits {
                break;
            }
            used += entry.num_qubits();
            layer.push(entry);
        }

        while used < num_qubits {
            layer.push(self.pick_single(rng));
            used += 1;
        }
        layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_pool_respects_bound() {
        for bound in 1..=4 {
            let pool = GatePool::new(bound, false);
            assert!(!pool.is_empty());
            assert!(
                pool.entries()
                    .iter()
                    .all(|e| e.num_qubits() <= bound as usize)
            );
        }
        assert_eq!(GatePool::new(4, false).len(), SIGNATURES.len());
    }

    #[test]
    fn test_reset_is_single_qubit() {
        let pool = GatePool::new(1, true);
        assert!(pool.entries().contains(&PoolEntry::Reset));
        assert!(!GatePool::new(1, false).entries().contains(&PoolEntry::Reset));
    }

    #[test]
    fn test_layer_fills_all_qubits() {
        let pool = GatePool::new(4, true);
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..12 {
            let layer = pool.sample_layer(n, &mut rng);
            let total: usize = layer.iter().map(|e| e.num_qubits()).sum();
            assert_eq!(total, n);
        }
    }
}
