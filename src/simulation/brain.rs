//! Feed-forward neural network used as the snake's brain.
//!
//! Fixed three-layer topology (input → hidden → output) with logistic sigmoid
//! activations on both layers, plus the genetic operators used by evolution:
//! per-weight mutation and uniform crossover.

use rand::Rng;

use super::error::SimulationError;
use super::matrix::Matrix;

/// Half-width of the uniform perturbation applied to a mutated weight.
pub const MUTATION_SPREAD: f64 = 0.25;

/// Logistic sigmoid.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Index of the largest value, ties resolved toward the lowest index.
///
/// Returns `None` for an empty slice.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// A three-layer perceptron.
///
/// Weight matrices are stored `output × input` so that a forward pass is a
/// plain `W · x` against a column vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Brain {
    input_nodes: usize,
    hidden_nodes: usize,
    output_nodes: usize,
    /// Input → hidden weights (`hidden × input`).
    weights_ih: Matrix,
    /// Hidden → output weights (`output × hidden`).
    weights_ho: Matrix,
    /// Hidden bias (`hidden × 1`).
    bias_h: Matrix,
    /// Output bias (`output × 1`).
    bias_o: Matrix,
}

impl Brain {
    /// Creates a new brain with every parameter uniform in `[-1, 1)`.
    pub fn new<R: Rng + ?Sized>(
        input_nodes: usize,
        hidden_nodes: usize,
        output_nodes: usize,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        Ok(Self {
            input_nodes,
            hidden_nodes,
            output_nodes,
            weights_ih: Matrix::random(hidden_nodes, input_nodes, rng)?,
            weights_ho: Matrix::random(output_nodes, hidden_nodes, rng)?,
            bias_h: Matrix::random(hidden_nodes, 1, rng)?,
            bias_o: Matrix::random(output_nodes, 1, rng)?,
        })
    }

    /// Assembles a brain from explicit matrices, checking that they agree on
    /// a single topology.
    pub fn from_parts(
        weights_ih: Matrix,
        weights_ho: Matrix,
        bias_h: Matrix,
        bias_o: Matrix,
    ) -> Result<Self, SimulationError> {
        let (hidden_nodes, input_nodes) = weights_ih.shape();
        let output_nodes = weights_ho.rows();

        let expected = [
            ("weights_ho", weights_ho.shape(), (output_nodes, hidden_nodes)),
            ("bias_h", bias_h.shape(), (hidden_nodes, 1)),
            ("bias_o", bias_o.shape(), (output_nodes, 1)),
        ];
        for (op, actual, wanted) in expected {
            if actual != wanted {
                return Err(SimulationError::ShapeMismatch {
                    op,
                    left: actual,
                    right: wanted,
                });
            }
        }

        Ok(Self {
            input_nodes,
            hidden_nodes,
            output_nodes,
            weights_ih,
            weights_ho,
            bias_h,
            bias_o,
        })
    }

    /// Number of input nodes.
    pub fn input_nodes(&self) -> usize {
        self.input_nodes
    }

    /// Number of hidden nodes.
    pub fn hidden_nodes(&self) -> usize {
        self.hidden_nodes
    }

    /// Number of output nodes.
    pub fn output_nodes(&self) -> usize {
        self.output_nodes
    }

    /// Runs one forward pass. Every output lies in `(0, 1)`.
    pub fn feed_forward(&self, inputs: &[f64]) -> Result<Vec<f64>, SimulationError> {
        if inputs.len() != self.input_nodes {
            return Err(SimulationError::DimensionError {
                expected: self.input_nodes,
                actual: inputs.len(),
            });
        }

        let inputs = Matrix::from_vec(inputs)?;

        let mut hidden = Matrix::multiply(&self.weights_ih, &inputs)?;
        hidden.add(&self.bias_h)?;
        hidden.map(sigmoid);

        let mut output = Matrix::multiply(&self.weights_ho, &hidden)?;
        output.add(&self.bias_o)?;
        output.map(sigmoid);

        Ok(output.to_vec())
    }

    /// Perturbs each parameter independently with probability `rate` by a
    /// value drawn from `[-0.25, 0.25)`.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f64, rng: &mut R) {
        let mut perturb = |value: f64| {
            if rng.random::<f64>() < rate {
                value + rng.random_range(-MUTATION_SPREAD..MUTATION_SPREAD)
            } else {
                value
            }
        };
        self.weights_ih.map(&mut perturb);
        self.weights_ho.map(&mut perturb);
        self.bias_h.map(&mut perturb);
        self.bias_o.map(&mut perturb);
    }

    /// Creates a child whose parameters are picked cell by cell from either parent.
    pub fn crossover<R: Rng + ?Sized>(
        parent1: &Brain,
        parent2: &Brain,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        Ok(Self {
            input_nodes: parent1.input_nodes,
            hidden_nodes: parent1.hidden_nodes,
            output_nodes: parent1.output_nodes,
            weights_ih: Matrix::crossover(&parent1.weights_ih, &parent2.weights_ih, rng)?,
            weights_ho: Matrix::crossover(&parent1.weights_ho, &parent2.weights_ho, rng)?,
            bias_h: Matrix::crossover(&parent1.bias_h, &parent2.bias_h, rng)?,
            bias_o: Matrix::crossover(&parent1.bias_o, &parent2.bias_o, rng)?,
        })
    }

    /// Flattens all weights and biases into a single vector.
    ///
    /// Order: input→hidden weights, hidden→output weights, hidden bias, output bias.
    pub fn to_flat_vector(&self) -> Vec<f64> {
        [&self.weights_ih, &self.weights_ho, &self.bias_h, &self.bias_o]
            .into_iter()
            .flat_map(Matrix::to_vec)
            .collect()
    }
}
