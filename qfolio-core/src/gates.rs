//! Standard gate implementations used by the ansatz builders
//!
//! Only the gates the solvers actually emit are defined here: Hadamard for
//! uniform-superposition preparation, the three rotation gates for
//! parameterized layers, and CNOT/CZ for entanglement and two-spin
//! evolution.

use crate::gate::Gate;
use num_complex::Complex64;

const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

#[inline]
fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

// ============================================================================
// Single-Qubit Gates
// ============================================================================

/// Hadamard gate
///
/// Creates superposition: H|0⟩ = (|0⟩ + |1⟩)/√2
#[derive(Debug, Clone, Copy)]
pub struct Hadamard;

impl Gate for Hadamard {
    fn name(&self) -> &str {
        "H"
    }

    fn num_qubits(&self) -> usize {
        1
    }

    fn is_hermitian(&self) -> bool {
        true
    }

    fn matrix(&self) -> Vec<Complex64> {
        let h = FRAC_1_SQRT_2;
        vec![c(h, 0.0), c(h, 0.0), c(h, 0.0), c(-h, 0.0)]
    }
}

/// Rotation about the X axis by angle theta
///
/// RX(θ) = exp(-i θ X / 2)
#[derive(Debug, Clone, Copy)]
pub struct RotationX {
    theta: f64,
}

impl RotationX {
    /// Create an X rotation by `theta` radians
    pub fn new(theta: f64) -> Self {
        Self { theta }
    }

    /// Rotation angle in radians
    pub fn theta(&self) -> f64 {
        self.theta
    }
}

impl Gate for RotationX {
    fn name(&self) -> &str {
        "RX"
    }

    fn num_qubits(&self) -> usize {
        1
    }

    fn matrix(&self) -> Vec<Complex64> {
        let half = self.theta / 2.0;
        let (sin, cos) = half.sin_cos();
        vec![c(cos, 0.0), c(0.0, -sin), c(0.0, -sin), c(cos, 0.0)]
    }
}

/// Rotation about the Y axis by angle theta
///
/// RY(θ) = exp(-i θ Y / 2)
#[derive(Debug, Clone, Copy)]
pub struct RotationY {
    theta: f64,
}

impl RotationY {
    /// Create a Y rotation by `theta` radians
    pub fn new(theta: f64) -> Self {
        Self { theta }
    }

    /// Rotation angle in radians
    pub fn theta(&self) -> f64 {
        self.theta
    }
}

impl Gate for RotationY {
    fn name(&self) -> &str {
        "RY"
    }

    fn num_qubits(&self) -> usize {
        1
    }

    fn matrix(&self) -> Vec<Complex64> {
        let half = self.theta / 2.0;
        let (sin, cos) = half.sin_cos();
        vec![c(cos, 0.0), c(-sin, 0.0), c(sin, 0.0), c(cos, 0.0)]
    }
}

/// Rotation about the Z axis by angle theta
///
/// RZ(θ) = exp(-i θ Z / 2) = diag(e^{-iθ/2}, e^{iθ/2})
#[derive(Debug, Clone, Copy)]
pub struct RotationZ {
    theta: f64,
}

impl RotationZ {
    /// Create a Z rotation by `theta` radians
    pub fn new(theta: f64) -> Self {
        Self { theta }
    }

    /// Rotation angle in radians
    pub fn theta(&self) -> f64 {
        self.theta
    }
}

impl Gate for RotationZ {
    fn name(&self) -> &str {
        "RZ"
    }

    fn num_qubits(&self) -> usize {
        1
    }

    fn matrix(&self) -> Vec<Complex64> {
        let half = self.theta / 2.0;
        let (sin, cos) = half.sin_cos();
        vec![c(cos, -sin), c(0.0, 0.0), c(0.0, 0.0), c(cos, sin)]
    }
}

// ============================================================================
// Two-Qubit Gates
// ============================================================================

/// Controlled-NOT gate
///
/// Flips the target qubit when the control qubit is |1⟩.
#[derive(Debug, Clone, Copy)]
pub struct CNot;

impl Gate for CNot {
    fn name(&self) -> &str {
        "CNOT"
    }

    fn num_qubits(&self) -> usize {
        2
    }

    fn is_hermitian(&self) -> bool {
        true
    }

    fn matrix(&self) -> Vec<Complex64> {
        let mut m = vec![c(0.0, 0.0); 16];
        m[0] = c(1.0, 0.0);
        m[5] = c(1.0, 0.0);
        m[11] = c(1.0, 0.0);
        m[14] = c(1.0, 0.0);
        m
    }
}

/// Controlled-Z gate
///
/// Applies a phase of -1 to the |11⟩ component; symmetric in its qubits.
#[derive(Debug, Clone, Copy)]
pub struct CZ;

impl Gate for CZ {
    fn name(&self) -> &str {
        "CZ"
    }

    fn num_qubits(&self) -> usize {
        2
    }

    fn is_hermitian(&self) -> bool {
        true
    }

    fn matrix(&self) -> Vec<Complex64> {
        let mut m = vec![c(0.0, 0.0); 16];
        m[0] = c(1.0, 0.0);
        m[5] = c(1.0, 0.0);
        m[10] = c(1.0, 0.0);
        m[15] = c(-1.0, 0.0);
        m
    }
}
