//! Circuit transform
//!
//! Exact state-vector simulation of a fixed encoding circuit over N two-level
//! wires: a Y rotation then a Z rotation on every wire (angle = the wire's
//! input component), a chain of controlled-NOTs on adjacent wires, and a
//! Pauli-Z expectation readout per wire. Pure and deterministic; cost is
//! O(N * 2^N).
//!
//! Wire 0 is the most significant bit of a basis-state index.

use super::{FeatureError, FeatureResult};

/// A complex amplitude
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Amplitude {
    pub re: f64,
    pub im: f64,
}

impl Amplitude {
    pub const ZERO: Amplitude = Amplitude { re: 0.0, im: 0.0 };
    pub const ONE: Amplitude = Amplitude { re: 1.0, im: 0.0 };

    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// e^{i * phase}
    pub fn from_phase(phase: f64) -> Self {
        Self { re: phase.cos(), im: phase.sin() }
    }

    pub fn times(self, other: Amplitude) -> Amplitude {
        Amplitude {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }

    pub fn plus(self, other: Amplitude) -> Amplitude {
        Amplitude { re: self.re + other.re, im: self.im + other.im }
    }

    pub fn scale(self, k: f64) -> Amplitude {
        Amplitude { re: self.re * k, im: self.im * k }
    }

    /// |a|^2
    pub fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }
}

/// One circuit step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// exp(-i * angle/2 * Y) on `wire`
    RotationY { wire: usize, angle: f64 },
    /// exp(-i * angle/2 * Z) on `wire`
    RotationZ { wire: usize, angle: f64 },
    /// Flip `target` when `control` is set
    ControlledNot { control: usize, target: usize },
}

/// Ordered operation list over a fixed number of wires
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    wires: usize,
    operations: Vec<Operation>,
}

impl Circuit {
    pub fn new(wires: usize) -> Self {
        Self { wires, operations: Vec::new() }
    }

    /// The encoding circuit for `inputs`: RY, RZ per wire, then the CNOT chain.
    pub fn encoding(inputs: &[f64]) -> Self {
        let wires = inputs.len();
        let mut circuit = Circuit::new(wires);
        for (wire, &angle) in inputs.iter().enumerate() {
            circuit.push(Operation::RotationY { wire, angle });
            circuit.push(Operation::RotationZ { wire, angle });
        }
        for wire in 0..wires.saturating_sub(1) {
            circuit.push(Operation::ControlledNot { control: wire, target: wire + 1 });
        }
        circuit
    }

    pub fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    pub fn wires(&self) -> usize {
        self.wires
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Run the circuit from |0...0>. Operations apply strictly in order.
    pub fn simulate(&self) -> StateVector {
        let mut state = StateVector::zero_state(self.wires);
        for op in &self.operations {
            state.apply(op);
        }
        state
    }
}

/// Amplitudes over the 2^N computational basis states
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    wires: usize,
    amplitudes: Vec<Amplitude>,
}

impl StateVector {
    /// |0...0>
    pub fn zero_state(wires: usize) -> Self {
        let mut amplitudes = vec![Amplitude::ZERO; 1 << wires];
        amplitudes[0] = Amplitude::ONE;
        Self { wires, amplitudes }
    }

    pub fn amplitudes(&self) -> &[Amplitude] {
        &self.amplitudes
    }

    fn mask(&self, wire: usize) -> usize {
        1 << (self.wires - 1 - wire)
    }

    /// Apply a 2x2 matrix `[[m00, m01], [m10, m11]]` to one wire.
    fn apply_single(&mut self, wire: usize, m: [[Amplitude; 2]; 2]) {
        let mask = self.mask(wire);
        for idx in 0..self.amplitudes.len() {
            if idx & mask != 0 {
                continue;
            }
            let a0 = self.amplitudes[idx];
            let a1 = self.amplitudes[idx | mask];
            self.amplitudes[idx] = m[0][0].times(a0).plus(m[0][1].times(a1));
            self.amplitudes[idx | mask] = m[1][0].times(a0).plus(m[1][1].times(a1));
        }
    }

    pub fn apply(&mut self, op: &Operation) {
        match *op {
            Operation::RotationY { wire, angle } => {
                let c = Amplitude::new((angle / 2.0).cos(), 0.0);
                let s = Amplitude::new((angle / 2.0).sin(), 0.0);
                self.apply_single(wire, [[c, s.scale(-1.0)], [s, c]]);
            }
            Operation::RotationZ { wire, angle } => {
                let lo = Amplitude::from_phase(-angle / 2.0);
                let hi = Amplitude::from_phase(angle / 2.0);
                self.apply_single(wire, [[lo, Amplitude::ZERO], [Amplitude::ZERO, hi]]);
            }
            Operation::ControlledNot { control, target } => {
                let control_mask = self.mask(control);
                let target_mask = self.mask(target);
                for idx in 0..self.amplitudes.len() {
                    if idx & control_mask != 0 && idx & target_mask == 0 {
                        self.amplitudes.swap(idx, idx | target_mask);
                    }
                }
            }
        }
    }

    /// <Z> on `wire`: P(wire = 0) - P(wire = 1)
    pub fn expectation_z(&self, wire: usize) -> f64 {
        let mask = self.mask(wire);
        self.amplitudes
            .iter()
            .enumerate()
            .map(|(idx, a)| if idx & mask == 0 { a.norm_sqr() } else { -a.norm_sqr() })
            .sum()
    }

    /// Sum of probabilities; 1 up to rounding
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }
}

/// Primary vector -> secondary vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    wires: usize,
}

impl Transform {
    pub fn new(wires: usize) -> Self {
        Self { wires }
    }

    pub fn wires(&self) -> usize {
        self.wires
    }

    /// Simulate the encoding circuit for `inputs` and read out <Z> per wire.
    pub fn apply(&self, inputs: &[f64]) -> FeatureResult<Vec<f64>> {
        if inputs.len() != self.wires {
            return Err(FeatureError::DimensionMismatch {
                expected: self.wires,
                got: inputs.len(),
            });
        }

        let state = Circuit::encoding(inputs).simulate();
        Ok((0..self.wires).map(|wire| state.expectation_z(wire)).collect())
    }
}
