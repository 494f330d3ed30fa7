//! Unitary catalog.
//!
//! Each entry is a single-parameter family U(θ) together with an eigenstate
//! whose eigenvalue is exactly e^{2πiθ}. The builder asks an entry for
//! controlled U^(2^k) instead of repeating U, so a power costs one gate.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::sync::Arc;

use qpe_ir::{Instruction, QubitId, StandardGate};

/// A unitary family the engine can estimate the phase of.
pub trait ControlledPowerGate: Send + Sync {
    /// Canonical tag.
    fn name(&self) -> &'static str;

    /// Human-readable summary.
    fn description(&self) -> &'static str;

    /// Width of the eigenstate register.
    fn num_target_qubits(&self) -> u32 {
        1
    }

    /// Gates preparing the eigenstate from |0…0⟩ on `target`.
    fn prepare_eigenstate(&self, target: &[QubitId]) -> Vec<Instruction>;

    /// Gates applying U^(2^power) to `target`, conditioned on `control`.
    fn controlled_power(
        &self,
        angle: f64,
        power: u32,
        control: QubitId,
        target: &[QubitId],
    ) -> Vec<Instruction>;
}

/// The fractional part of `angle · 2^power`.
///
/// Scaling by a power of two is exact in binary floating point, so this
/// wraps the phase without accumulating rounding error.
pub fn power_fraction(angle: f64, power: u32) -> f64 {
    (angle * f64::from(power).exp2()).fract()
}

/// P(2πθ) acting on |1⟩.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseRotation;

impl ControlledPowerGate for PhaseRotation {
    fn name(&self) -> &'static str {
        "rotation"
    }

    fn description(&self) -> &'static str {
        "phase rotation P(2πθ), eigenstate |1⟩"
    }

    fn prepare_eigenstate(&self, target: &[QubitId]) -> Vec<Instruction> {
        vec![Instruction::single_qubit_gate(StandardGate::X, target[0])]
    }

    fn controlled_power(
        &self,
        angle: f64,
        power: u32,
        control: QubitId,
        target: &[QubitId],
    ) -> Vec<Instruction> {
        let lambda = 2.0 * PI * power_fraction(angle, power);
        vec![Instruction::two_qubit_gate(
            StandardGate::CP(lambda),
            control,
            target[0],
        )]
    }
}

/// Rz(4πθ) acting on |1⟩.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZRotation;

impl ControlledPowerGate for ZRotation {
    fn name(&self) -> &'static str {
        "z"
    }

    fn description(&self) -> &'static str {
        "Z rotation Rz(4πθ), eigenstate |1⟩"
    }

    fn prepare_eigenstate(&self, target: &[QubitId]) -> Vec<Instruction> {
        vec![Instruction::single_qubit_gate(StandardGate::X, target[0])]
    }

    fn controlled_power(
        &self,
        angle: f64,
        power: u32,
        control: QubitId,
        target: &[QubitId],
    ) -> Vec<Instruction> {
        let theta = 4.0 * PI * power_fraction(angle, power);
        vec![Instruction::two_qubit_gate(
            StandardGate::CRz(theta),
            control,
            target[0],
        )]
    }
}

/// Ry(4πθ) acting on |−i⟩.
#[derive(Debug, Clone, Copy, Default)]
pub struct YRotation;

impl ControlledPowerGate for YRotation {
    fn name(&self) -> &'static str {
        "y"
    }

    fn description(&self) -> &'static str {
        "Y rotation Ry(4πθ), eigenstate |−i⟩"
    }

    fn prepare_eigenstate(&self, target: &[QubitId]) -> Vec<Instruction> {
        vec![
            Instruction::single_qubit_gate(StandardGate::H, target[0]),
            Instruction::single_qubit_gate(StandardGate::P(-PI / 2.0), target[0]),
        ]
    }

    fn controlled_power(
        &self,
        angle: f64,
        power: u32,
        control: QubitId,
        target: &[QubitId],
    ) -> Vec<Instruction> {
        let theta = 4.0 * PI * power_fraction(angle, power);
        vec![Instruction::two_qubit_gate(
            StandardGate::CRy(theta),
            control,
            target[0],
        )]
    }
}

/// Registry of unitary families keyed by tag.
#[derive(Clone)]
pub struct UnitaryCatalog {
    entries: BTreeMap<String, Arc<dyn ControlledPowerGate>>,
    aliases: BTreeMap<String, String>,
}

impl UnitaryCatalog {
    /// An empty catalog.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
            aliases: BTreeMap::new(),
        }
    }

    /// The built-in families: `rotation` (alias `phase`), `z` and `y`.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        catalog.register(PhaseRotation);
        catalog.register(ZRotation);
        catalog.register(YRotation);
        catalog.register_alias("phase", "rotation");
        catalog
    }

    /// Register a family under its own name.
    pub fn register<G: ControlledPowerGate + 'static>(&mut self, entry: G) {
        self.entries
            .insert(entry.name().to_lowercase(), Arc::new(entry));
    }

    /// Register `alias` as another tag for `target`.
    pub fn register_alias(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.aliases
            .insert(alias.into().to_lowercase(), target.into().to_lowercase());
    }

    /// Canonical name for `tag`, ignoring case and surrounding whitespace.
    pub fn resolve(&self, tag: &str) -> Option<&str> {
        let key = tag.trim().to_lowercase();
        let key = self.aliases.get(&key).unwrap_or(&key);
        self.entries.get_key_value(key).map(|(name, _)| name.as_str())
    }

    /// The entry registered under `tag`.
    ///
    /// # Panics
    ///
    /// Panics if `tag` is not registered. Tags reaching this point have
    /// already been resolved by parameter validation.
    pub fn get(&self, tag: &str) -> &dyn ControlledPowerGate {
        match self.resolve(tag).and_then(|name| self.entries.get(name)) {
            Some(entry) => entry.as_ref(),
            None => panic!("unitary '{tag}' is not registered in the catalog"),
        }
    }

    /// Every accepted tag, canonical names and aliases, sorted.
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .entries
            .keys()
            .chain(self.aliases.keys())
            .cloned()
            .collect();
        tags.sort();
        tags
    }

    /// Canonical entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = &dyn ControlledPowerGate> {
        self.entries.values().map(|entry| entry.as_ref())
    }

    /// Aliases pointing at `name`.
    pub fn aliases_of(&self, name: &str) -> Vec<&str> {
        self.aliases
            .iter()
            .filter(|(_, target)| target.as_str() == name)
            .map(|(alias, _)| alias.as_str())
            .collect()
    }
}

impl Default for UnitaryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for UnitaryCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitaryCatalog")
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .field("aliases", &self.aliases)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tags() {
        let catalog = UnitaryCatalog::builtin();
        assert_eq!(catalog.tags(), vec!["phase", "rotation", "y", "z"]);
        assert_eq!(catalog.aliases_of("rotation"), vec!["phase"]);
    }

    #[test]
    fn test_resolve_normalizes() {
        let catalog = UnitaryCatalog::builtin();
        assert_eq!(catalog.resolve("  Rotation "), Some("rotation"));
        assert_eq!(catalog.resolve("PHASE"), Some("rotation"));
        assert_eq!(catalog.resolve("nonexistent"), None);
    }

    #[test]
    #[should_panic(expected = "not registered")]
    fn test_get_unregistered_panics() {
        let _ = UnitaryCatalog::builtin().get("nonexistent");
    }

    #[test]
    fn test_power_fraction_wraps_exactly() {
        assert_eq!(power_fraction(0.25, 0), 0.25);
        assert_eq!(power_fraction(0.25, 1), 0.5);
        assert_eq!(power_fraction(0.25, 2), 0.0);
        assert_eq!(power_fraction(0.375, 3), 0.0);
        assert!((power_fraction(0.3, 1) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_controlled_power_angles() {
        let catalog = UnitaryCatalog::builtin();
        let (c, t) = (QubitId(0), QubitId(1));

        let gates = catalog.get("rotation").controlled_power(0.125, 1, c, &[t]);
        assert_eq!(gates[0].as_gate(), Some(&StandardGate::CP(PI / 2.0)));
        assert_eq!(gates[0].qubits, vec![c, t]);

        let gates = catalog.get("z").controlled_power(0.125, 1, c, &[t]);
        assert_eq!(gates[0].as_gate(), Some(&StandardGate::CRz(PI)));

        let gates = catalog.get("y").controlled_power(0.125, 0, c, &[t]);
        assert_eq!(gates[0].as_gate(), Some(&StandardGate::CRy(PI / 2.0)));
    }

    #[test]
    fn test_custom_registration() {
        struct Mirror;
        impl ControlledPowerGate for Mirror {
            fn name(&self) -> &'static str {
                "Mirror"
            }
            fn description(&self) -> &'static str {
                "test family"
            }
            fn prepare_eigenstate(&self, _target: &[QubitId]) -> Vec<Instruction> {
                vec![]
            }
            fn controlled_power(
                &self,
                _angle: f64,
                _power: u32,
                _control: QubitId,
                _target: &[QubitId],
            ) -> Vec<Instruction> {
                vec![]
            }
        }

        let mut catalog = UnitaryCatalog::builtin();
        catalog.register(Mirror);
        assert_eq!(catalog.resolve("mirror"), Some("mirror"));
        assert_eq!(catalog.get("MIRROR").name(), "Mirror");
    }
}
