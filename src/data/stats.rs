use crate::constants::numeric::{BETA_MAX_ITERATIONS, BETA_TOLERANCE};
use crate::error::{PlotError, Result};
use polars::prelude::*;

/// Mean and sample standard deviation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
}

/// Calculate summary statistics from a Series using polars
pub fn calculate_stats(series: &Series) -> Stats {
    // Nulls are not counted
    if series.len() == series.null_count() {
        return Stats::default();
    }

    // Cast to f64 for numeric operations
    let series_f64 = match series.cast(&DataType::Float64) {
        Ok(s) => s,
        Err(_) => return Stats::default(),
    };

    let chunked = match series_f64.f64() {
        Ok(c) => c,
        Err(_) => return Stats::default(),
    };

    Stats {
        mean: chunked.mean().unwrap_or(0.0),
        std_dev: chunked.std(1).unwrap_or(0.0), // ddof=1 for sample std dev
    }
}

/// Calculate statistics from a slice
pub fn calculate_stats_vec(values: &[f64]) -> Stats {
    if values.is_empty() {
        return Stats::default();
    }

    let series = Series::new("temp".into(), values);
    calculate_stats(&series)
}

/// Calculate mean and sample std dev from a slice
pub fn calculate_statistics_vec(values: &[f64]) -> (f64, f64) {
    let stats = calculate_stats_vec(values);
    (stats.mean, stats.std_dev)
}

/// Ordinary least-squares line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Legend label, e.g. `y = 2.0x + 3.0`
    pub fn label(&self, digits: usize) -> String {
        format!(
            "y = {}x + {}",
            format_significant(self.slope, digits),
            format_significant(self.intercept, digits)
        )
    }
}

/// Least-squares fit over all points, ignoring section boundaries
pub fn best_fit(xs: &[f64], ys: &[f64]) -> Result<LinearFit> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return Err(PlotError::DegenerateFit);
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let sxx: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
    let sxy: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();

    // Fewer than two distinct x leaves the slope undefined
    if xs.iter().all(|&x| x == xs[0]) || sxx == 0.0 {
        return Err(PlotError::DegenerateFit);
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    Ok(LinearFit { slope, intercept })
}

/// Pearson's r with its two-sided p-value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    pub r: f64,
    pub p: f64,
}

impl Correlation {
    /// Text appended to a legend label
    pub fn annotation(&self, digits: usize) -> String {
        format!(
            "\nr = {}, p = {}",
            format_significant(self.r, digits),
            format_significant(self.p, digits)
        )
    }
}

pub fn correlation(xs: &[f64], ys: &[f64]) -> Result<Correlation> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return Err(PlotError::DegenerateCorrelation(format!(
            "needs at least 2 points, got {}",
            n
        )));
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return Err(PlotError::DegenerateCorrelation(
            "one of the inputs is constant".to_string(),
        ));
    }

    let r = (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0);
    let p = pearson_p_value(r, n);
    Ok(Correlation { r, p })
}

/// Two-sided p-value for r under the null hypothesis of no correlation
fn pearson_p_value(r: f64, n: usize) -> f64 {
    if n <= 2 {
        return 1.0;
    }
    let df = (n - 2) as f64;
    let one_minus_r2 = 1.0 - r * r;
    if one_minus_r2 <= 0.0 {
        return 0.0;
    }
    // P(|T| >= t) for Student's t with df degrees of freedom
    let t2 = r * r * df / one_minus_r2;
    regularized_incomplete_beta(df / (df + t2), df / 2.0, 0.5).clamp(0.0, 1.0)
}

/// Lanczos approximation of ln Γ(x) for x > 0
fn ln_gamma(x: f64) -> f64 {
    const COEFFS: [f64; 6] = [
        76.180_091_729_471_46,
        -86.505_320_329_416_77,
        24.014_098_240_830_91,
        -1.231_739_572_450_155,
        0.001_208_650_973_866_179,
        -0.000_005_395_239_384_953,
    ];
    let tmp = x + 5.5;
    let tmp = tmp - (x + 0.5) * tmp.ln();
    let mut ser = 1.000_000_000_190_015;
    let mut y = x;
    for c in COEFFS {
        y += 1.0;
        ser += c / y;
    }
    -tmp + (2.506_628_274_631_000_5 * ser / x).ln()
}

/// I_x(a, b)
fn regularized_incomplete_beta(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let front = (ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln())
        .exp();
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(x, a, b) / a
    } else {
        1.0 - front * beta_continued_fraction(1.0 - x, b, a) / b
    }
}

/// Modified Lentz evaluation of the incomplete beta continued fraction
fn beta_continued_fraction(x: f64, a: f64, b: f64) -> f64 {
    const TINY: f64 = 1e-300;
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < TINY {
        d = TINY;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=BETA_MAX_ITERATIONS {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + aa / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + aa / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < BETA_TOLERANCE {
            break;
        }
    }
    h
}

/// Format with `digits` significant digits in general notation.
///
/// Fixed notation keeps at least one digit after the point (`2.0`), and
/// scientific notation is used once the exponent reaches `digits - 1` or
/// drops below -4 (`1.2346e+06`, `1.2345e-05`).
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".to_string()
        } else if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    let digits = digits.max(1);

    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => (sci.clone(), 0),
    };

    if exponent >= -4 && exponent < digits as i32 - 1 {
        let decimals = (digits as i32 - 1 - exponent).max(1) as usize;
        let fixed = format!("{:.*}", decimals, value);
        let trimmed = fixed.trim_end_matches('0');
        if trimmed.ends_with('.') {
            format!("{}0", trimmed)
        } else {
            trimmed.to_string()
        }
    } else {
        let mantissa = if mantissa.contains('.') {
            mantissa.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            mantissa
        };
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}
