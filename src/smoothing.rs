//! Savitzky–Golay smoothing.
//!
//! Local least-squares polynomial smoothing over a fixed odd-sized sliding
//! window. Interior samples use the symmetric central stencil; the first and
//! last half-windows are filled by evaluating the polynomial fitted to the
//! leading/trailing full window, so the output keeps the input length.
//!
//! The filter is deterministic: the convolution weights are precomputed from
//! the window size and polynomial order alone, so repeated applications to
//! the same data are bit-identical.

/// Errors from constructing or applying a [`SavitzkyGolay`] filter.
#[derive(Debug, thiserror::Error)]
pub enum SmoothingError {
    /// The window size must be odd so a centre sample exists.
    #[error("window size must be odd, got {0}")]
    EvenWindow(usize),

    /// The polynomial must be underdetermined by the window.
    #[error("polynomial order {order} must be smaller than window size {window}")]
    OrderTooLarge {
        /// Requested polynomial order.
        order: usize,
        /// Requested window size.
        window: usize,
    },

    /// The least-squares normal equations could not be inverted.
    #[error("normal equations are singular for window {window}, order {order}")]
    SingularFit {
        /// Requested window size.
        window: usize,
        /// Requested polynomial order.
        order: usize,
    },

    /// The input is shorter than one filter window.
    #[error("input has {len} samples but the filter window needs {window}")]
    TooFewSamples {
        /// Number of samples supplied.
        len: usize,
        /// Window size of the filter.
        window: usize,
    },
}

/// A Savitzky–Golay smoothing filter with precomputed weights.
#[derive(Debug, Clone)]
pub struct SavitzkyGolay {
    window: usize,
    order: usize,
    /// One weight row per evaluation offset, indexed by `offset + half`.
    weights: Vec<Vec<f64>>,
}

impl SavitzkyGolay {
    /// Build a filter for the given window size and polynomial order.
    pub fn new(window: usize, order: usize) -> Result<Self, SmoothingError> {
        if window % 2 == 0 {
            return Err(SmoothingError::EvenWindow(window));
        }
        if order >= window {
            return Err(SmoothingError::OrderTooLarge { order, window });
        }

        let half = (window / 2) as i64;
        let terms = order + 1;

        // Normal-equations moment matrix over the stencil positions -half..=half.
        let mut moments = vec![vec![0.0f64; terms]; terms];
        for (j, row) in moments.iter_mut().enumerate() {
            for (k, cell) in row.iter_mut().enumerate() {
                *cell = (-half..=half)
                    .map(|x| (x as f64).powi((j + k) as i32))
                    .sum();
            }
        }
        let inverse =
            invert(moments).ok_or(SmoothingError::SingularFit { window, order })?;

        // Weight of sample x when evaluating the fit at offset t:
        // w(t, x) = v(t)^T (V^T V)^{-1} v(x), with v the monomial basis.
        let mut weights = Vec::with_capacity(window);
        for t in -half..=half {
            let vt: Vec<f64> = (0..terms).map(|j| (t as f64).powi(j as i32)).collect();
            let row = (-half..=half)
                .map(|x| {
                    let vx: Vec<f64> =
                        (0..terms).map(|k| (x as f64).powi(k as i32)).collect();
                    vt.iter()
                        .enumerate()
                        .map(|(j, &tj)| {
                            vx.iter()
                                .enumerate()
                                .map(|(k, &xk)| tj * inverse[j][k] * xk)
                                .sum::<f64>()
                        })
                        .sum()
                })
                .collect();
            weights.push(row);
        }

        Ok(Self {
            window,
            order,
            weights,
        })
    }

    /// Window size of this filter.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Polynomial order of this filter.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Smooth a series, returning an output of the same length.
    pub fn smooth(&self, data: &[f64]) -> Result<Vec<f64>, SmoothingError> {
        let n = data.len();
        if n < self.window {
            return Err(SmoothingError::TooFewSamples {
                len: n,
                window: self.window,
            });
        }

        let half = self.window / 2;
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let (start, row) = if i < half {
                (0, &self.weights[i])
            } else if i >= n - half {
                (n - self.window, &self.weights[self.window - (n - i)])
            } else {
                (i - half, &self.weights[half])
            };
            let value = row
                .iter()
                .zip(&data[start..start + self.window])
                .map(|(w, y)| w * y)
                .sum();
            out.push(value);
        }
        Ok(out)
    }

    #[cfg(test)]
    fn weight_row(&self, index: usize) -> &[f64] {
        &self.weights[index]
    }
}

/// Gauss-Jordan inversion with partial pivoting for the small moment matrix.
fn invert(mut a: Vec<Vec<f64>>) -> Option<Vec<Vec<f64>>> {
    let n = a.len();
    let mut inv = vec![vec![0.0f64; n]; n];
    for (i, row) in inv.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    for col in 0..n {
        let mut pivot = col;
        for r in (col + 1)..n {
            if a[r][col].abs() > a[pivot][col].abs() {
                pivot = r;
            }
        }
        if a[pivot][col].abs() < f64::EPSILON {
            return None;
        }
        a.swap(col, pivot);
        inv.swap(col, pivot);

        let scale = a[col][col];
        for k in 0..n {
            a[col][k] /= scale;
            inv[col][k] /= scale;
        }

        let a_pivot = a[col].clone();
        let inv_pivot = inv[col].clone();
        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = a[r][col];
            if factor == 0.0 {
                continue;
            }
            for k in 0..n {
                a[r][k] -= factor * a_pivot[k];
                inv[r][k] -= factor * inv_pivot[k];
            }
        }
    }

    Some(inv)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!(
                (a - e).abs() < TOLERANCE,
                "expected {:?}, got {:?}",
                expected,
                actual
            );
        }
    }

    #[test]
    fn test_central_weights_window_5_order_2() {
        let filter = SavitzkyGolay::new(5, 2).unwrap();
        let expected: Vec<f64> = [-3.0, 12.0, 17.0, 12.0, -3.0]
            .iter()
            .map(|c| c / 35.0)
            .collect();
        assert_close(filter.weight_row(2), &expected);
    }

    #[test]
    fn test_edge_weights_window_5_order_2() {
        let filter = SavitzkyGolay::new(5, 2).unwrap();
        let first: Vec<f64> = [31.0, 9.0, -3.0, -5.0, 3.0]
            .iter()
            .map(|c| c / 35.0)
            .collect();
        let second: Vec<f64> = [9.0, 13.0, 12.0, 6.0, -5.0]
            .iter()
            .map(|c| c / 35.0)
            .collect();
        assert_close(filter.weight_row(0), &first);
        assert_close(filter.weight_row(1), &second);

        // The trailing rows are the leading rows reversed.
        let last: Vec<f64> = first.iter().rev().copied().collect();
        assert_close(filter.weight_row(4), &last);
    }

    #[test]
    fn test_constant_series_is_preserved() {
        let filter = SavitzkyGolay::new(5, 2).unwrap();
        let data = vec![10.0; 12];
        let smoothed = filter.smooth(&data).unwrap();
        assert_close(&smoothed, &data);
    }

    #[test]
    fn test_linear_series_is_preserved() {
        let filter = SavitzkyGolay::new(5, 2).unwrap();
        let data: Vec<f64> = (0..10).map(|i| 2.5 * i as f64 - 4.0).collect();
        let smoothed = filter.smooth(&data).unwrap();
        assert_close(&smoothed, &data);
    }

    #[test]
    fn test_quadratic_series_is_preserved() {
        let filter = SavitzkyGolay::new(5, 2).unwrap();
        let data: Vec<f64> = (0..10)
            .map(|i| {
                let x = i as f64;
                0.3 * x * x - 1.2 * x + 7.0
            })
            .collect();
        let smoothed = filter.smooth(&data).unwrap();
        assert_close(&smoothed, &data);
    }

    #[test]
    fn test_spike_is_attenuated() {
        let filter = SavitzkyGolay::new(5, 2).unwrap();
        let data = vec![0.0, 0.0, 1.0, 0.0, 0.0];
        let smoothed = filter.smooth(&data).unwrap();
        assert!((smoothed[2] - 17.0 / 35.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_even_window_rejected() {
        assert!(matches!(
            SavitzkyGolay::new(4, 2),
            Err(SmoothingError::EvenWindow(4))
        ));
    }

    #[test]
    fn test_order_too_large_rejected() {
        assert!(matches!(
            SavitzkyGolay::new(5, 5),
            Err(SmoothingError::OrderTooLarge { order: 5, window: 5 })
        ));
    }

    #[test]
    fn test_short_input_rejected() {
        let filter = SavitzkyGolay::new(5, 2).unwrap();
        let result = filter.smooth(&[1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(
            result,
            Err(SmoothingError::TooFewSamples { len: 4, window: 5 })
        ));
    }

    #[test]
    fn test_smoothing_is_deterministic() {
        let filter = SavitzkyGolay::new(5, 2).unwrap();
        let data: Vec<f64> = (0..40).map(|i| (i as f64 * 0.3).sin() + 5.0).collect();
        let first = filter.smooth(&data).unwrap();
        let second = filter.smooth(&data).unwrap();
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
