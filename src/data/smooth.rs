//! Bucket-averaging smoother for noisy scatter data
//!
//! All points are sorted by x and dropped into equal-width buckets spanning the
//! x extent. Each occupied bucket becomes one point at the bucket midpoint
//! with the mean y of its members. The bucket count grows sub-linearly with
//! the number of points (see [`SmoothingConfig::edge_count`]).

use super::series::Series;
use crate::config::SmoothingConfig;
use crate::error::Result;

pub fn smooth(series: &Series, config: &SmoothingConfig) -> Result<Series> {
    profiling::scope!("smooth");

    let mut pairs: Vec<(f64, f64)> = series
        .sections()
        .flat_map(|(xs, ys)| xs.iter().copied().zip(ys.iter().copied()))
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    // Series is never empty
    let min = pairs[0].0;
    let max = pairs[pairs.len() - 1].0;
    let buckets = config.edge_count(pairs.len()) - 1;
    let width = (max - min) / buckets as f64;

    if !(width > 0.0) {
        let mean = pairs.iter().map(|p| p.1).sum::<f64>() / pairs.len() as f64;
        return Series::from_sections(vec![vec![min]], vec![vec![mean]]);
    }

    let bucket_of = |x: f64| (((x - min) / width).floor() as usize).min(buckets - 1);
    let midpoint = |bucket: usize| min + (bucket as f64 + 0.5) * width;

    let mut out_x: Vec<Vec<f64>> = vec![Vec::new()];
    let mut out_y: Vec<Vec<f64>> = vec![Vec::new()];

    let mut current = bucket_of(min);
    let mut sum = 0.0;
    let mut count = 0usize;
    let mut prev_x = min;

    for &(x, y) in &pairs {
        let bucket = bucket_of(x);
        if bucket != current {
            let last = out_x.len() - 1;
            out_x[last].push(midpoint(current));
            out_y[last].push(sum / count as f64);

            // An empty bucket or a gap wider than a bucket ends the section
            if bucket > current + 1 || x - prev_x > width {
                out_x.push(Vec::new());
                out_y.push(Vec::new());
            }

            current = bucket;
            sum = 0.0;
            count = 0;
        }
        sum += y;
        count += 1;
        prev_x = x;
    }

    let last = out_x.len() - 1;
    out_x[last].push(midpoint(current));
    out_y[last].push(sum / count as f64);

    log::trace!(
        "smoothed {} points into {} buckets, {} section(s)",
        pairs.len(),
        buckets,
        out_x.len()
    );

    Series::from_sections(out_x, out_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy_line(n: usize) -> Series {
        let xs: Vec<f64> = (0..n).map(|i| i as f64 * 0.1).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + (x * 37.0).sin()).collect();
        Series::from_sections(vec![xs], vec![ys]).unwrap()
    }

    #[test]
    fn test_bucket_means() {
        let xs: Vec<f64> = (0..8).map(|i| i as f64).collect();
        let series = Series::from_sections(vec![xs.clone()], vec![xs]).unwrap();
        // 8^(2/3) / 1.6 = 2.5 -> 3 edges -> 2 buckets of width 3.5
        let smoothed = smooth(&series, &SmoothingConfig::default()).unwrap();
        assert_eq!(smoothed.sections_x(), &[vec![1.75, 5.25]]);
        assert_eq!(smoothed.sections_y(), &[vec![1.5, 5.5]]);
    }

    #[test]
    fn test_output_sorted_and_bounded() {
        let config = SmoothingConfig::default();
        let series = noisy_line(1000);
        let smoothed = smooth(&series, &config).unwrap();

        let xs = smoothed.flat_x();
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));
        assert!(smoothed.point_count() <= config.edge_count(1000) - 1);
        assert!(smoothed.point_count() > 1);
    }

    #[test]
    fn test_unsorted_sections_are_merged_in_order() {
        let series = Series::from_sections(
            vec![vec![5.0, 6.0, 7.0], vec![0.0, 1.0, 2.0]],
            vec![vec![5.0, 6.0, 7.0], vec![0.0, 1.0, 2.0]],
        )
        .unwrap();
        let smoothed = smooth(&series, &SmoothingConfig::default()).unwrap();
        let xs = smoothed.flat_x();
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_wide_gap_splits_output() {
        let config = SmoothingConfig::default();
        let left: Vec<f64> = (0..200).map(|i| i as f64 * 0.05).collect();
        let right: Vec<f64> = (0..200).map(|i| 50.0 + i as f64 * 0.05).collect();
        let series =
            Series::from_sections(vec![left.clone(), right.clone()], vec![left, right]).unwrap();

        let smoothed = smooth(&series, &config).unwrap();
        assert!(smoothed.section_count() >= 2);
        for (xs, _) in smoothed.sections() {
            let spans_gap = xs.iter().any(|&x| x < 10.0) && xs.iter().any(|&x| x > 50.0);
            assert!(!spans_gap, "section bridges the gap: {:?}", xs);
        }
    }

    #[test]
    fn test_gap_wider_than_bucket_breaks_adjacent_buckets() {
        let config = SmoothingConfig {
            exponent: 1.0,
            divisor: 1.5,
        };
        // 6 points -> 4 edges -> 3 buckets of width 1.0 over [0, 3]
        let xs = vec![0.0, 0.05, 1.9, 2.3, 2.6, 3.0];
        let series = Series::from_sections(vec![xs], vec![vec![1.0; 6]]).unwrap();
        let smoothed = smooth(&series, &config).unwrap();
        assert_eq!(smoothed.sections_x(), &[vec![0.5], vec![1.5, 2.5]]);
    }

    #[test]
    fn test_constant_x_collapses() {
        let series =
            Series::from_sections(vec![vec![2.0, 2.0, 2.0]], vec![vec![1.0, 2.0, 3.0]]).unwrap();
        let smoothed = smooth(&series, &SmoothingConfig::default()).unwrap();
        assert_eq!(smoothed.sections_x(), &[vec![2.0]]);
        assert_eq!(smoothed.sections_y(), &[vec![2.0]]);
    }
}
