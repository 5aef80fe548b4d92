//! Generate command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use randqc_gen::random_circuit;
use randqc_qasm3::emit;

/// File stem used when no name is given: `q{dim:02}-{depth:02}`.
pub fn default_name(dim: u32, depth: u32) -> String {
    format!("q{dim:02}-{depth:02}")
}

/// `<name>.qasm`, relative to the working directory.
pub fn output_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{name}.qasm"))
}

/// Execute the generate command.
pub fn execute(dim: u32, depth: u32, name: Option<&str>) -> Result<()> {
    let name = name.map_or_else(|| default_name(dim, depth), str::to_owned);
    let path = output_path(&name);

    write_circuit(dim, depth, &path)?;

    println!(
        "{} Wrote {} ({} qubits, {} layers)",
        style("✓").green().bold(),
        style(path.display()).green(),
        dim,
        depth
    );

    Ok(())
}

/// Sample a measured circuit and write it to `path` as `OpenQASM` 3.
///
/// The circuit is generated and serialized before the file is opened, so a
/// failure leaves no file behind.
pub fn write_circuit(dim: u32, depth: u32, path: &Path) -> Result<()> {
    let circuit = random_circuit(dim, depth, true)
        .with_context(|| format!("Failed to generate a {dim}-qubit circuit of depth {depth}"))?;
    info!(
        qubits = circuit.num_qubits(),
        clbits = circuit.num_clbits(),
        ops = circuit.dag().num_ops(),
        depth = circuit.depth(),
        "Generated circuit"
    );

    let qasm = emit(&circuit).context("Failed to serialize circuit as OpenQASM 3")?;

    fs::write(path, qasm).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Saved circuit");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_name_padding() {
        assert_eq!(default_name(3, 5), "q03-05");
        assert_eq!(default_name(12, 40), "q12-40");
        assert_eq!(default_name(100, 7), "q100-07");
        assert_eq!(default_name(0, 0), "q00-00");
    }

    #[test]
    fn test_output_path() {
        assert_eq!(output_path("test"), PathBuf::from("test.qasm"));
        assert_eq!(output_path("q03-05"), PathBuf::from("q03-05.qasm"));
    }

    #[test]
    fn test_write_circuit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.qasm");

        write_circuit(4, 6, &path).unwrap();

        let source = fs::read_to_string(&path).unwrap();
        let circuit = randqc_qasm3::parse(&source).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.num_clbits(), 4);
        assert_eq!(circuit.instructions().filter(|i| i.is_measure()).count(), 4);
    }

    #[test]
    fn test_zero_qubits_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.qasm");

        let err = write_circuit(0, 5, &path).unwrap_err();
        assert!(err.to_string().contains("0-qubit"));
        assert!(!path.exists());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("again.qasm");
        fs::write(&path, "stale").unwrap();

        write_circuit(2, 2, &path).unwrap();

        let source = fs::read_to_string(&path).unwrap();
        assert!(source.starts_with("OPENQASM 3.0;"));
    }

    #[test]
    fn test_missing_directory_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.qasm");

        let err = write_circuit(2, 2, &path).unwrap_err();
        assert!(format!("{err:#}").contains("out.qasm"));
    }
}
