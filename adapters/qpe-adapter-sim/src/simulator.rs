//! Simulator backend implementation.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, instrument};

use rand::Rng;

use qpe_hal::{
    Backend, BackendConfig, BackendFactory, Capabilities, Counts, ExecutionResult, HalError,
    HalResult,
};
use qpe_ir::{Circuit, InstructionKind};

use crate::session::SimSession;
use crate::statevector::Statevector;

const DEFAULT_MAX_QUBITS: u32 = 20;

/// Widest classical register a bitstring value can be packed into.
const MAX_CLBITS: usize = 64;

/// Local simulator backend.
///
/// Simulates the unitary part of a circuit once, then draws every shot from
/// the final distribution. Measurements must be terminal. A fixed seed makes
/// the counts of each run reproducible.
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Seed applied to every run, if any.
    seed: Option<u64>,
    /// Sessions currently open.
    active_sessions: Arc<AtomicUsize>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::build(BackendConfig::new("simulator"), DEFAULT_MAX_QUBITS, None)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(BackendConfig::new("simulator"), max_qubits, None)
    }

    /// Fix the sampling seed for every subsequent run.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        if !self.capabilities.features.iter().any(|f| f == "seeded") {
            self.capabilities.features.push("seeded".into());
        }
        self
    }

    /// Number of sessions open right now.
    pub fn active_sessions(&self) -> usize {
        self.active_sessions.load(Ordering::SeqCst)
    }

    fn build(config: BackendConfig, max_qubits: u32, seed: Option<u64>) -> Self {
        let mut capabilities = Capabilities::simulator(max_qubits);
        capabilities.name.clone_from(&config.name);
        let backend = Self {
            config,
            capabilities,
            seed: None,
            active_sessions: Arc::new(AtomicUsize::new(0)),
        };
        match seed {
            Some(seed) => backend.with_seed(seed),
            None => backend,
        }
    }

    fn check(&self, circuit: &Circuit, shots: u32) -> HalResult<()> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be at least 1".into()));
        }
        if shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} shots requested but simulator allows {}",
                self.capabilities.max_shots
            )));
        }
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }
        if circuit.num_clbits() > MAX_CLBITS {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} classical bits but at most {MAX_CLBITS} can be read out",
                circuit.num_clbits()
            )));
        }
        if let Some(reason) = self.capabilities.violations(circuit, shots).into_iter().next() {
            return Err(HalError::InvalidCircuit(reason));
        }
        Ok(())
    }

    /// Run simulation synchronously inside `session`.
    #[instrument(skip(self, circuit, session))]
    fn run_simulation(
        &self,
        circuit: &Circuit,
        shots: u32,
        session: &mut SimSession,
    ) -> HalResult<ExecutionResult> {
        let start = Instant::now();

        let readout = measurement_plan(circuit)?;
        let num_qubits = circuit.num_qubits();
        debug!("Starting simulation: {} qubits, {} shots", num_qubits, shots);

        let mut sv = Statevector::new(num_qubits);
        for inst in circuit.instructions() {
            sv.apply(inst);
        }

        let mut cumulative = Vec::with_capacity(1 << num_qubits);
        let mut acc = 0.0;
        for p in sv.probabilities() {
            acc += p;
            cumulative.push(acc);
        }

        let mut hits: FxHashMap<usize, u64> = FxHashMap::default();
        let last = cumulative.len() - 1;
        for _ in 0..shots {
            let r: f64 = session.rng().r#gen::<f64>() * acc;
            let outcome = cumulative.partition_point(|&c| c <= r).min(last);
            *hits.entry(outcome).or_insert(0) += 1;
        }

        let width = circuit.num_clbits();
        let mut counts = Counts::new();
        for (outcome, n) in hits {
            let value = readout
                .iter()
                .filter(|(qubit, _)| (outcome >> *qubit) & 1 == 1)
                .fold(0u64, |v, (_, clbit)| v | (1u64 << *clbit));
            counts.insert(format!("{value:0width$b}"), n);
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        Ok(ExecutionResult::new(counts, shots)
            .with_execution_time(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)))
    }
}

/// Collect `(qubit, clbit)` readout pairs, rejecting gates that act on a
/// qubit after it was measured.
fn measurement_plan(circuit: &Circuit) -> HalResult<Vec<(usize, usize)>> {
    let mut plan = vec![];
    let mut measured = vec![false; circuit.num_qubits()];
    for inst in circuit.instructions() {
        match inst.kind {
            InstructionKind::Measure => {
                for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                    measured[q.0 as usize] = true;
                    plan.push((q.0 as usize, c.0 as usize));
                }
            }
            InstructionKind::Gate(_) => {
                if let Some(q) = inst.qubits.iter().find(|q| measured[q.0 as usize]) {
                    return Err(HalError::InvalidCircuit(format!(
                        "gate '{}' acts on {q} after it was measured",
                        inst.name()
                    )));
                }
            }
            InstructionKind::Barrier => {}
        }
    }
    if plan.is_empty() {
        return Err(HalError::InvalidCircuit("circuit has no measurements".into()));
    }
    Ok(plan)
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit))]
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        self.check(circuit, shots)?;
        let mut session = SimSession::open(&self.active_sessions, self.seed);
        self.run_simulation(circuit, shots, &mut session)
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.extra_u64("max_qubits")? {
            Some(v) => u32::try_from(v).map_err(|_| {
                HalError::Configuration(format!("'max_qubits' out of range: {v}"))
            })?,
            None => DEFAULT_MAX_QUBITS,
        };
        let seed = config.extra_u64("seed")?;
        Ok(Self::build(config, max_qubits, seed))
    }
}
