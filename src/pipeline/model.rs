//! Binary logistic regression fit by regularized maximum likelihood
//!
//! The solver minimizes the mean penalized negative log-likelihood
//!
//! ```text
//! J(w, b) = ( ||w||² / (2C) + Σ log(1 + exp(z_i)) - y_i z_i ) / n,   z_i = x_i·w + b
//! ```
//!
//! with Newton-Raphson steps and backtracking. The intercept is not penalized.

use faer::prelude::*;
use faer::Mat;
use serde::Serialize;

use super::error::{PipelineError, Result};

/// Armijo sufficient-decrease constant for the line search
const ARMIJO: f64 = 1e-4;

/// Maximum number of step halvings per Newton iteration
const MAX_HALVINGS: usize = 50;

/// Optimizer settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolverConfig {
    /// Inverse L2 regularization strength; smaller is stronger
    pub c: f64,
    /// Newton iteration budget
    pub max_iter: usize,
    /// Converged once the largest gradient component is at most this
    pub tol: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 100,
            tol: 1e-4,
        }
    }
}

/// Unfitted logistic regression estimator
#[derive(Debug, Clone, Default)]
pub struct LogisticRegression {
    config: SolverConfig,
}

impl LogisticRegression {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Fit on `x` (rows x features) and 0/1 labels `y`.
    ///
    /// # Errors
    /// * [`PipelineError::Shape`] - empty input, row count mismatch or a non-finite feature value
    /// * [`PipelineError::SingleClass`] - labels hold only one class
    /// * [`PipelineError::Convergence`] - gradient still above `tol` when the solver stops
    pub fn fit(&self, x: &Mat<f64>, y: &[f64]) -> Result<FittedModel> {
        let n = x.nrows();
        let p = x.ncols();

        if n == 0 || p == 0 {
            return Err(PipelineError::Shape(format!(
                "cannot fit on a {n}x{p} feature matrix"
            )));
        }
        if y.len() != n {
            return Err(PipelineError::Shape(format!(
                "{n} feature rows but {} labels",
                y.len()
            )));
        }
        if let Some(bad) = (0..n)
            .flat_map(|i| (0..p).map(move |j| (i, j)))
            .map(|(i, j)| x[(i, j)])
            .find(|v| !v.is_finite())
        {
            return Err(PipelineError::Shape(format!(
                "feature values must be finite, found {bad}"
            )));
        }
        if let Some(bad) = y.iter().find(|&&v| v != 0.0 && v != 1.0) {
            return Err(PipelineError::Shape(format!(
                "labels must be 0 or 1, found {bad}"
            )));
        }
        let positives = y.iter().filter(|&&v| v == 1.0).count();
        if positives == 0 {
            return Err(PipelineError::SingleClass(0.0));
        }
        if positives == n {
            return Err(PipelineError::SingleClass(1.0));
        }

        let problem = Problem {
            x,
            y,
            inv_c: 1.0 / self.config.c,
        };

        // Coefficients followed by the intercept
        let mut beta = vec![0.0; p + 1];
        let mut iterations = 0;

        while iterations < self.config.max_iter {
            let (objective, gradient, probs) = problem.evaluate(&beta);

            if max_abs(&gradient) <= self.config.tol {
                return Ok(FittedModel::from_beta(beta, iterations));
            }

            let direction = problem.newton_direction(&probs, &gradient);
            if direction.iter().any(|d| !d.is_finite()) {
                break;
            }

            let slope: f64 = gradient.iter().zip(&direction).map(|(g, d)| g * d).sum();
            let mut step = 1.0;
            let mut accepted = false;

            for _ in 0..MAX_HALVINGS {
                let candidate: Vec<f64> = beta
                    .iter()
                    .zip(&direction)
                    .map(|(b, d)| b - step * d)
                    .collect();

                if problem.objective(&candidate) <= objective - ARMIJO * step * slope {
                    beta = candidate;
                    accepted = true;
                    break;
                }
                step *= 0.5;
            }

            if !accepted {
                break;
            }
            iterations += 1;
        }

        // NaN compares false here, so a poisoned gradient is never converged
        let (_, gradient, _) = problem.evaluate(&beta);
        let gradient_norm = max_abs(&gradient);
        if gradient_norm <= self.config.tol {
            return Ok(FittedModel::from_beta(beta, iterations));
        }

        Err(PipelineError::Convergence {
            iterations,
            gradient_norm,
            tol: self.config.tol,
        })
    }
}

/// Training data borrowed for one fit
struct Problem<'a> {
    x: &'a Mat<f64>,
    y: &'a [f64],
    inv_c: f64,
}

impl Problem<'_> {
    fn n(&self) -> f64 {
        self.x.nrows() as f64
    }

    fn linear(&self, beta: &[f64], row: usize) -> f64 {
        let p = self.x.ncols();
        (0..p).map(|j| self.x[(row, j)] * beta[j]).sum::<f64>() + beta[p]
    }

    fn penalty(&self, beta: &[f64]) -> f64 {
        let p = self.x.ncols();
        0.5 * self.inv_c * beta[..p].iter().map(|w| w * w).sum::<f64>()
    }

    fn objective(&self, beta: &[f64]) -> f64 {
        let loss: f64 = (0..self.x.nrows())
            .map(|i| {
                let z = self.linear(beta, i);
                softplus(z) - self.y[i] * z
            })
            .sum();
        (self.penalty(beta) + loss) / self.n()
    }

    /// Objective, gradient and fitted probabilities at `beta`
    fn evaluate(&self, beta: &[f64]) -> (f64, Vec<f64>, Vec<f64>) {
        let p = self.x.ncols();
        let mut loss = 0.0;
        let mut gradient = vec![0.0; p + 1];
        let mut probs = Vec::with_capacity(self.x.nrows());

        for i in 0..self.x.nrows() {
            let z = self.linear(beta, i);
            let prob = sigmoid(z);
            let residual = prob - self.y[i];

            loss += softplus(z) - self.y[i] * z;
            for (j, g) in gradient[..p].iter_mut().enumerate() {
                *g += residual * self.x[(i, j)];
            }
            gradient[p] += residual;
            probs.push(prob);
        }

        for (g, w) in gradient[..p].iter_mut().zip(&beta[..p]) {
            *g += self.inv_c * w;
        }
        let n = self.n();
        for g in gradient.iter_mut() {
            *g /= n;
        }

        ((self.penalty(beta) + loss) / n, gradient, probs)
    }

    /// Solve `H d = g` for the Newton direction
    fn newton_direction(&self, probs: &[f64], gradient: &[f64]) -> Vec<f64> {
        let n = self.x.nrows();
        let p = self.x.ncols();
        let d = p + 1;

        let design = Mat::from_fn(n, d, |i, j| if j < p { self.x[(i, j)] } else { 1.0 });
        let weighted = Mat::from_fn(n, d, |i, j| design[(i, j)] * probs[i] * (1.0 - probs[i]));

        let mut hessian = design.transpose() * &weighted;
        for j in 0..p {
            hessian[(j, j)] += self.inv_c;
        }
        let scale = 1.0 / self.n();
        let hessian = Mat::from_fn(d, d, |i, j| hessian[(i, j)] * scale);

        let rhs = Mat::from_fn(d, 1, |i, _| gradient[i]);
        let solution = hessian.partial_piv_lu().solve(&rhs);

        (0..d).map(|i| solution[(i, 0)]).collect()
    }
}

/// Fitted logistic regression parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FittedModel {
    coefficients: Vec<f64>,
    intercept: f64,
    classes: [f64; 2],
    n_iter: usize,
}

impl FittedModel {
    /// Build a model from known parameters
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
            classes: [0.0, 1.0],
            n_iter: 0,
        }
    }

    fn from_beta(mut beta: Vec<f64>, n_iter: usize) -> Self {
        let intercept = beta.pop().unwrap_or(0.0);
        Self {
            coefficients: beta,
            intercept,
            classes: [0.0, 1.0],
            n_iter,
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Class labels in the order used by `predict_proba` and confusion matrices
    pub fn classes(&self) -> [f64; 2] {
        self.classes
    }

    /// Newton iterations the fit took
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Log-odds of class 1 for each row
    pub fn decision_function(&self, x: &Mat<f64>) -> Result<Vec<f64>> {
        if x.ncols() != self.coefficients.len() {
            return Err(PipelineError::Shape(format!(
                "model has {} coefficient(s) but input has {} column(s)",
                self.coefficients.len(),
                x.ncols()
            )));
        }

        Ok((0..x.nrows())
            .map(|i| {
                self.coefficients
                    .iter()
                    .enumerate()
                    .map(|(j, w)| w * x[(i, j)])
                    .sum::<f64>()
                    + self.intercept
            })
            .collect())
    }

    /// P(label = 1) for each row
    pub fn predict_probability(&self, x: &Mat<f64>) -> Result<Vec<f64>> {
        Ok(self.decision_function(x)?.into_iter().map(sigmoid).collect())
    }

    /// Per-class probabilities for each row, ordered like [`Self::classes`]
    pub fn predict_proba(&self, x: &Mat<f64>) -> Result<Vec<[f64; 2]>> {
        Ok(self
            .predict_probability(x)?
            .into_iter()
            .map(|p| [1.0 - p, p])
            .collect())
    }

    /// Predicted 0/1 label for each row (probability above 0.5)
    pub fn predict(&self, x: &Mat<f64>) -> Result<Vec<f64>> {
        Ok(self
            .predict_probability(x)?
            .into_iter()
            .map(threshold)
            .collect())
    }

    /// P(label = 1) for a single feature row
    pub fn probability_at(&self, row: &[f64]) -> f64 {
        let z: f64 = self
            .coefficients
            .iter()
            .zip(row)
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercept;
        sigmoid(z)
    }
}

/// Map a probability onto the predicted class
pub fn threshold(probability: f64) -> f64 {
    if probability > 0.5 {
        1.0
    } else {
        0.0
    }
}

/// Logistic function, stable for large |z|
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// log(1 + exp(z)) without overflow
fn softplus(z: f64) -> f64 {
    z.max(0.0) + (-z.abs()).exp().ln_1p()
}

/// Largest absolute value, or NaN if any value is NaN
fn max_abs(values: &[f64]) -> f64 {
    values
        .iter()
        .try_fold(0.0f64, |acc, v| {
            if v.is_nan() {
                None
            } else {
                Some(acc.max(v.abs()))
            }
        })
        .unwrap_or(f64::NAN)
}
