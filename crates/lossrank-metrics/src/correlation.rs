//! Spearman rank correlation with a two-sided significance value.
//!
//! # Coefficient
//!
//! Each input sequence is replaced by its ranks (1-based, ties share the mean
//! of the positions they occupy) and the Pearson correlation of the two rank
//! vectors is returned. The result is clamped to `[-1, 1]`.
//!
//! # Significance
//!
//! Under the null hypothesis of no association,
//!
//! ```text
//! t = ρ · sqrt((n - 2) / (1 - ρ²))
//! ```
//!
//! follows Student's t with `n - 2` degrees of freedom. The two-sided p-value
//! is `I_x(df / 2, 1 / 2)` with `x = df / (df + t²)`, where `I` is the
//! regularized incomplete beta function. `n < 3` leaves no degrees of freedom
//! and yields `None`; `|ρ| = 1` yields `0.0`.

use serde::{Deserialize, Serialize};

use crate::error::CompareError;

/// Outcome of a rank correlation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    /// Spearman's ρ in `[-1, 1]`.
    pub coefficient: f64,
    /// Two-sided p-value, when defined.
    pub p_value: Option<f64>,
    /// Number of paired observations.
    pub n: usize,
}

/// Spearman's rank correlation of two aligned sequences.
///
/// # Errors
///
/// - [`CompareError::LengthMismatch`] if the sequences differ in length.
/// - [`CompareError::InsufficientNodes`] for fewer than two observations.
/// - [`CompareError::ConstantScores`] if either sequence has no variation.
pub fn spearman(x: &[f64], y: &[f64]) -> Result<Correlation, CompareError> {
    if x.len() != y.len() {
        return Err(CompareError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(CompareError::InsufficientNodes(n));
    }

    let rx = average_ranks(x);
    let ry = average_ranks(y);

    let coefficient = pearson(&rx, &ry)?.clamp(-1.0, 1.0);
    Ok(Correlation {
        coefficient,
        p_value: two_sided_p_value(coefficient, n),
        n,
    })
}

/// 1-based ranks with ties averaged.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && values[order[j]] == values[order[i]] {
            j += 1;
        }
        // Positions i..j (0-based) hold equal values; ranks i+1..=j.
        let avg = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg;
        }
        i = j;
    }
    ranks
}

#[allow(clippy::cast_precision_loss)]
fn pearson(x: &[f64], y: &[f64]) -> Result<f64, CompareError> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut num = 0.0;
    let mut den_x = 0.0;
    let mut den_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        num += dx * dy;
        den_x += dx * dx;
        den_y += dy * dy;
    }

    if den_x == 0.0 {
        return Err(CompareError::ConstantScores("first"));
    }
    if den_y == 0.0 {
        return Err(CompareError::ConstantScores("second"));
    }
    Ok(num / (den_x * den_y).sqrt())
}

#[allow(clippy::cast_precision_loss)]
fn two_sided_p_value(rho: f64, n: usize) -> Option<f64> {
    if n < 3 {
        return None;
    }
    if rho.abs() >= 1.0 {
        return Some(0.0);
    }
    let df = (n - 2) as f64;
    let t = rho * (df / ((1.0 - rho) * (1.0 + rho))).sqrt();
    Some(student_t_two_sided(t, df))
}

/// `P(|T| >= |t|)` for Student's t with `df` degrees of freedom.
fn student_t_two_sided(t: f64, df: f64) -> f64 {
    let x = df / (df + t * t);
    regularized_incomplete_beta(df / 2.0, 0.5, x).clamp(0.0, 1.0)
}

/// `I_x(a, b)` via the continued fraction, using the symmetry
/// `I_x(a, b) = 1 - I_{1-x}(b, a)` where it converges faster.
fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let ln_front =
        ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

/// Modified Lentz evaluation of the incomplete beta continued fraction.
#[allow(clippy::cast_precision_loss)]
fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITER: usize = 300;
    const EPS: f64 = 1e-15;
    const TINY: f64 = 1e-300;

    let guard = |v: f64| if v.abs() < TINY { TINY } else { v };

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;
    let mut c = 1.0;
    let mut d = 1.0 / guard(1.0 - qab * x / qap);
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / guard(1.0 + aa * d);
        c = guard(1.0 + aa / c);
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / guard(1.0 + aa * d);
        c = guard(1.0 + aa / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPS {
            break;
        }
    }
    h
}

/// Natural log of the gamma function for `x > 0` (Lanczos, g = 7).
fn ln_gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    let x = x - 1.0;
    let mut acc = COEFFS[0];
    let mut denom = x;
    for coeff in &COEFFS[1..] {
        denom += 1.0;
        acc += coeff / denom;
    }
    let t = x + G + 0.5;
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() < tol, "expected {b}, got {a}");
    }

    #[test]
    fn identical_sequences_correlate_perfectly() {
        let x = [3.0, 1.0, 4.0, 1.5, 5.0];
        let c = spearman(&x, &x).expect("correlation");
        approx(c.coefficient, 1.0, 1e-12);
        assert!(c.p_value.expect("p defined for n = 5") < 1e-12);
        assert_eq!(c.n, 5);
    }

    #[test]
    fn reversed_sequences_correlate_negatively() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [40.0, 30.0, 20.0, 10.0];
        let c = spearman(&x, &y).expect("correlation");
        approx(c.coefficient, -1.0, 1e-12);
    }

    #[test]
    fn uses_ranks_not_raw_values() {
        // Monotone but non-linear: Pearson on raw values would be < 1.
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 4.0, 9.0, 1000.0, 1e9];
        let c = spearman(&x, &y).expect("correlation");
        approx(c.coefficient, 1.0, 1e-12);
    }

    #[test]
    fn ties_get_average_ranks() {
        assert_eq!(average_ranks(&[10.0, 20.0, 20.0, 5.0]), vec![2.0, 3.5, 3.5, 1.0]);
        assert_eq!(average_ranks(&[7.0, 7.0, 7.0]), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn one_swap_in_three() {
        // ρ = 1 - 6·2 / (3·8) = 0.5; with df = 1, t = 1/√3 and
        // p = 1 - (2/π)·atan(t) = 2/3.
        let c = spearman(&[1.0, 2.0, 3.0], &[2.0, 1.0, 3.0]).expect("correlation");
        approx(c.coefficient, 0.5, 1e-12);
        approx(c.p_value.expect("p defined for n = 3"), 2.0 / 3.0, 1e-9);
    }

    #[test]
    fn one_swap_in_four() {
        // ρ = 1 - 6·2 / (4·15) = 0.8; with df = 2 the two-sided p is 1 - |ρ|.
        let c = spearman(&[1.0, 2.0, 3.0, 4.0], &[2.0, 1.0, 3.0, 4.0]).expect("correlation");
        approx(c.coefficient, 0.8, 1e-12);
        approx(c.p_value.expect("p defined for n = 4"), 0.2, 1e-9);
    }

    #[test]
    fn p_value_shrinks_with_more_evidence() {
        let small = two_sided_p_value(0.6, 10).expect("p");
        let large = two_sided_p_value(0.6, 100).expect("p");
        assert!(large < small, "n=100 p={large} should be below n=10 p={small}");
        assert!(large < 1e-9);
    }

    #[test]
    fn zero_correlation_has_p_one() {
        approx(two_sided_p_value(0.0, 12).expect("p"), 1.0, 1e-12);
    }

    #[test]
    fn two_points_have_no_p_value() {
        let c = spearman(&[1.0, 2.0], &[3.0, 4.0]).expect("correlation");
        approx(c.coefficient, 1.0, 1e-12);
        assert_eq!(c.p_value, None);
    }

    #[test]
    fn constant_input_rejected() {
        let err = spearman(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).expect_err("constant");
        assert_eq!(err, CompareError::ConstantScores("first"));
        let err = spearman(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0]).expect_err("constant");
        assert_eq!(err, CompareError::ConstantScores("second"));
    }

    #[test]
    fn length_mismatch_rejected() {
        let err = spearman(&[1.0, 2.0], &[1.0]).expect_err("length");
        assert_eq!(err, CompareError::LengthMismatch { left: 2, right: 1 });
    }

    #[test]
    fn single_point_rejected() {
        let err = spearman(&[1.0], &[1.0]).expect_err("too few");
        assert_eq!(err, CompareError::InsufficientNodes(1));
    }

    #[test]
    fn ln_gamma_matches_factorials() {
        approx(ln_gamma(1.0), 0.0, 1e-12);
        approx(ln_gamma(5.0), 24.0_f64.ln(), 1e-12);
        approx(ln_gamma(0.5), std::f64::consts::PI.sqrt().ln(), 1e-12);
    }

    #[test]
    fn incomplete_beta_uniform_case() {
        // I_x(1, 1) = x.
        approx(regularized_incomplete_beta(1.0, 1.0, 0.3), 0.3, 1e-12);
        approx(regularized_incomplete_beta(1.0, 1.0, 0.9), 0.9, 1e-12);
    }
}
