//! Aggregate kernels over the numeric values gathered from matching documents.
use crate::value::Value;

fn finite(x: f64) -> Value {
    if x.is_finite() {
        Value::Float(x)
    } else {
        Value::Null
    }
}

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sum of squared deviations divided by `n - ddof`.
fn variance(xs: &[f64], ddof: usize) -> Option<f64> {
    if xs.len() <= ddof {
        return None;
    }
    let m = mean(xs);
    let ss: f64 = xs.iter().map(|x| (x - m) * (x - m)).sum();
    Some(ss / (xs.len() - ddof) as f64)
}

fn covariance(pairs: &[(f64, f64)], ddof: usize) -> Option<f64> {
    if pairs.len() <= ddof {
        return None;
    }
    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let s: f64 = pairs.iter().map(|(x, y)| (x - mx) * (y - my)).sum();
    Some(s / (pairs.len() - ddof) as f64)
}

/// Executes a single-reference built-in. Returns `None` for names this kernel does not own.
pub fn execute_single(function: &str, xs: &[f64]) -> Option<Value> {
    let result = match function {
        "sum" => Value::Float(xs.iter().sum()),
        _ if xs.is_empty() => Value::Null,
        "avg" => finite(mean(xs)),
        "min" => finite(xs.iter().copied().fold(f64::INFINITY, f64::min)),
        "max" => finite(xs.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
        "median" => {
            let mut sorted = xs.to_vec();
            sorted.sort_by(|a, b| a.total_cmp(b));
            let mid = sorted.len() / 2;
            if sorted.len() % 2 == 0 {
                finite((sorted[mid - 1] + sorted[mid]) / 2.0)
            } else {
                finite(sorted[mid])
            }
        }
        "variance" => variance(xs, 1).map_or(Value::Null, finite),
        "variance-population" => variance(xs, 0).map_or(Value::Null, finite),
        "stddev" => variance(xs, 1).map_or(Value::Null, |v| finite(v.sqrt())),
        "stddev-population" => variance(xs, 0).map_or(Value::Null, |v| finite(v.sqrt())),
        _ => return None,
    };
    Some(result)
}

/// Executes a pair built-in over co-occurring `(x, y)` values.
pub fn execute_pair(function: &str, pairs: &[(f64, f64)]) -> Option<Value> {
    let result = match function {
        "covariance" => covariance(pairs, 1).map_or(Value::Null, finite),
        "covariance-population" => covariance(pairs, 0).map_or(Value::Null, finite),
        "correlation" => {
            let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
            let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
            match (covariance(pairs, 1), variance(&xs, 1), variance(&ys, 1)) {
                (Some(c), Some(vx), Some(vy)) if vx > 0.0 && vy > 0.0 => finite(c / (vx * vy).sqrt()),
                _ => Value::Null,
            }
        }
        _ => return None,
    };
    Some(result)
}
