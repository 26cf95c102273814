//! Two-layer perceptron used as the bacteria's brain.
//!
//! Input → hidden → output with sigmoid activations on both layers and no
//! biases. Supports forward inference, a single backpropagation step, cloning
//! and per-weight mutation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{Error, Result};
use super::matrix::Matrix;

/// Learning rate applied by [`NeuralNetwork::train`].
pub const LEARNING_RATE: f32 = 0.1;

/// Largest perturbation a single mutation can add to a weight.
pub const MUTATION_MAGNITUDE: f32 = 0.05;

/// Logistic activation, `1 / (1 + e^-x)`.
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid derivative expressed in terms of the activated value `y = σ(x)`.
#[inline]
pub fn dsigmoid(y: f32) -> f32 {
    y * (1.0 - y)
}

/// A fixed-topology feed-forward network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuralNetwork {
    input_nodes: usize,
    hidden_nodes: usize,
    output_nodes: usize,
    /// Hidden × input weights.
    weights_input_hidden: Matrix,
    /// Output × hidden weights.
    weights_hidden_output: Matrix,
    learning_rate: f32,
}

impl NeuralNetwork {
    /// Creates a network with weights drawn uniformly from `[-1, 1)`.
    pub fn new<R: Rng + ?Sized>(
        input_nodes: usize,
        hidden_nodes: usize,
        output_nodes: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if input_nodes == 0 || hidden_nodes == 0 || output_nodes == 0 {
            return Err(Error::InvalidTopology {
                input: input_nodes,
                hidden: hidden_nodes,
                output: output_nodes,
            });
        }

        let mut weights_input_hidden = Matrix::new(hidden_nodes, input_nodes);
        let mut weights_hidden_output = Matrix::new(output_nodes, hidden_nodes);
        weights_input_hidden.randomize(rng);
        weights_hidden_output.randomize(rng);

        Ok(Self {
            input_nodes,
            hidden_nodes,
            output_nodes,
            weights_input_hidden,
            weights_hidden_output,
            learning_rate: LEARNING_RATE,
        })
    }

    /// Builds a network from explicit weight matrices.
    ///
    /// The layer sizes are read off the matrix shapes; `weights_hidden_output`
    /// must have as many columns as `weights_input_hidden` has rows.
    pub fn from_weights(weights_input_hidden: Matrix, weights_hidden_output: Matrix) -> Result<Self> {
        let (hidden_nodes, input_nodes) = weights_input_hidden.shape();
        let (output_nodes, hidden_in) = weights_hidden_output.shape();

        if input_nodes == 0 || hidden_nodes == 0 || output_nodes == 0 {
            return Err(Error::InvalidTopology {
                input: input_nodes,
                hidden: hidden_nodes,
                output: output_nodes,
            });
        }
        if hidden_in != hidden_nodes {
            return Err(Error::ShapeMismatch {
                op: "from_weights",
                left: weights_input_hidden.shape(),
                right: weights_hidden_output.shape(),
            });
        }

        Ok(Self {
            input_nodes,
            hidden_nodes,
            output_nodes,
            weights_input_hidden,
            weights_hidden_output,
            learning_rate: LEARNING_RATE,
        })
    }

    /// Size of the input layer.
    pub fn input_nodes(&self) -> usize {
        self.input_nodes
    }

    /// Size of the hidden layer.
    pub fn hidden_nodes(&self) -> usize {
        self.hidden_nodes
    }

    /// Size of the output layer.
    pub fn output_nodes(&self) -> usize {
        self.output_nodes
    }

    /// Learning rate used by [`train`](Self::train).
    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    /// Hidden × input weight matrix.
    pub fn weights_input_hidden(&self) -> &Matrix {
        &self.weights_input_hidden
    }

    /// Output × hidden weight matrix.
    pub fn weights_hidden_output(&self) -> &Matrix {
        &self.weights_hidden_output
    }

    /// Runs a forward pass and returns the output activations.
    ///
    /// Every output lies in `(0, 1)` for finite inputs.
    pub fn feed_forward(&self, inputs: &[f32]) -> Result<Vec<f32>> {
        let inputs = self.input_matrix(inputs)?;
        let (_, outputs) = self.activations(&inputs)?;
        Ok(outputs.to_array())
    }

    /// Performs one backpropagation step towards `targets`.
    ///
    /// Only the two weight matrices change. Hidden errors are taken from the
    /// hidden-to-output weights as they were before this step.
    pub fn train(&mut self, inputs: &[f32], targets: &[f32]) -> Result<()> {
        if targets.len() != self.output_nodes {
            return Err(Error::InvalidTargetLength {
                expected: self.output_nodes,
                actual: targets.len(),
            });
        }

        let inputs = self.input_matrix(inputs)?;
        let (hidden, outputs) = self.activations(&inputs)?;
        let targets = Matrix::from_array(targets);

        let output_errors = Matrix::subtract(&targets, &outputs)?;
        let hidden_errors =
            Matrix::multiply(&self.weights_hidden_output.transpose(), &output_errors)?;

        let mut gradients = outputs.map(dsigmoid);
        gradients.hadamard_in_place(&output_errors)?;
        gradients.scale_in_place(self.learning_rate);
        let hidden_output_deltas = Matrix::multiply(&gradients, &hidden.transpose())?;

        let mut hidden_gradients = hidden.map(dsigmoid);
        hidden_gradients.hadamard_in_place(&hidden_errors)?;
        hidden_gradients.scale_in_place(self.learning_rate);
        let input_hidden_deltas = Matrix::multiply(&hidden_gradients, &inputs.transpose())?;

        self.weights_hidden_output.add_in_place(&hidden_output_deltas)?;
        self.weights_input_hidden.add_in_place(&input_hidden_deltas)?;
        Ok(())
    }

    /// Perturbs each weight with probability `rate` by a uniform amount in
    /// `[-MUTATION_MAGNITUDE, MUTATION_MAGNITUDE)`.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f32, rng: &mut R) {
        let mut mutation = |weight: f32| {
            if rng.random::<f32>() < rate {
                weight + rng.random_range(-MUTATION_MAGNITUDE..MUTATION_MAGNITUDE)
            } else {
                weight
            }
        };
        self.weights_input_hidden.map_in_place(&mut mutation);
        self.weights_hidden_output.map_in_place(&mut mutation);
    }

    /// Euclidean distance between the weights of two networks.
    ///
    /// Networks with different topologies are infinitely far apart.
    pub fn distance(a: &NeuralNetwork, b: &NeuralNetwork) -> f32 {
        if a.weights_input_hidden.shape() != b.weights_input_hidden.shape()
            || a.weights_hidden_output.shape() != b.weights_hidden_output.shape()
        {
            return f32::INFINITY;
        }

        a.to_flat_vector()
            .iter()
            .zip(b.to_flat_vector())
            .map(|(w1, w2)| (w1 - w2).powi(2))
            .sum::<f32>()
            .sqrt()
    }

    /// Flattens both weight matrices into one vector, input layer first.
    pub fn to_flat_vector(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(
            self.hidden_nodes * self.input_nodes + self.output_nodes * self.hidden_nodes,
        );
        flat.extend(self.weights_input_hidden.iter().copied());
        flat.extend(self.weights_hidden_output.iter().copied());
        flat
    }

    fn input_matrix(&self, inputs: &[f32]) -> Result<Matrix> {
        if inputs.len() != self.input_nodes {
            return Err(Error::InvalidInputLength {
                expected: self.input_nodes,
                actual: inputs.len(),
            });
        }
        Ok(Matrix::from_array(inputs))
    }

    fn activations(&self, inputs: &Matrix) -> Result<(Matrix, Matrix)> {
        let mut hidden = Matrix::multiply(&self.weights_input_hidden, inputs)?;
        hidden.map_in_place(sigmoid);

        let mut outputs = Matrix::multiply(&self.weights_hidden_output, &hidden)?;
        outputs.map_in_place(sigmoid);

        Ok((hidden, outputs))
    }
}
