use cms_rust::{CountMinSketch, ExactCounter, FrequencyCounter};
use plotters::prelude::*;
use rayon::prelude::*;
use std::hash::BuildHasher;
use std::path::Path;
use tracing::info;

const WIDTHS: [usize; 6] = [100, 250, 500, 1000, 2000, 4000];
const DEPTH: usize = 10;

/// One trial: a seed and its `(width, excess)` points.
pub type SeedData = (u64, Vec<(f64, f64)>);

/// Overestimation of every key in one sketch against the exact counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Excess {
    pub mean: f64,
    pub max: u64,
}

pub fn measure_excess<S, T>(sketch: &CountMinSketch<S>, exact: &ExactCounter<T>) -> Excess
where
    S: BuildHasher,
    T: BuildHasher + Default,
{
    let mut total = 0u64;
    let mut max = 0u64;
    for (key, count) in exact.iter() {
        // never negative: estimates do not undercount
        let excess = sketch.estimate(key) - count;
        total += excess;
        max = max.max(excess);
    }

    Excess {
        mean: total as f64 / exact.len().max(1) as f64,
        max,
    }
}

fn process_seed<S: BuildHasher + Default>(seed: u64, keys: u64) -> (SeedData, SeedData) {
    let mut mean_points = Vec::new();
    let mut max_points = Vec::new();

    let mut exact: ExactCounter = ExactCounter::new();
    for i in 0..keys {
        let value = i ^ seed;
        exact.increment(&value.to_le_bytes());
    }

    for &width in WIDTHS.iter() {
        let mut sketch: CountMinSketch<S> = match CountMinSketch::new(width, DEPTH) {
            Ok(sketch) => sketch,
            Err(_) => continue,
        };
        for i in 0..keys {
            let value = i ^ seed;
            sketch.increment(&value.to_le_bytes());
        }

        let excess = measure_excess(&sketch, &exact);
        mean_points.push((width as f64, excess.mean));
        max_points.push((width as f64, excess.max as f64));
    }

    ((seed, mean_points), (seed, max_points))
}

pub fn collect_test_data_sequential<S: BuildHasher + Default>(
    keys: u64,
) -> (Vec<SeedData>, Vec<SeedData>) {
    let seeds: Vec<u64> = (1..=9).collect();

    let mut mean_data = Vec::new();
    let mut max_data = Vec::new();

    for &seed in &seeds {
        let (mean, max) = process_seed::<S>(seed, keys);
        mean_data.push(mean);
        max_data.push(max);
    }

    (mean_data, max_data)
}

pub fn collect_test_data_parallel<S: BuildHasher + Default + Send + Sync>(
    keys: u64,
) -> (Vec<SeedData>, Vec<SeedData>) {
    let seeds: Vec<u64> = (1..=9).collect();

    let results: Vec<_> = seeds
        .par_iter()
        .map(|&seed| process_seed::<S>(seed, keys))
        .collect();

    results.into_iter().unzip()
}

fn print_summary(keys: u64, mean_data: &[SeedData], max_data: &[SeedData]) {
    println!(
        "\n{:<10} {:<15} {:<15} {:<15}",
        "Width", "N / width", "Mean excess", "Max excess"
    );
    println!("{:-<55}", "");

    for (idx, &width) in WIDTHS.iter().enumerate() {
        let column = |data: &[SeedData]| -> Vec<f64> {
            data.iter()
                .filter_map(|(_, points)| points.get(idx).map(|&(_, y)| y))
                .collect()
        };
        let means = column(mean_data);
        let maxes = column(max_data);
        if means.is_empty() {
            continue;
        }

        let avg_mean = means.iter().sum::<f64>() / means.len() as f64;
        let worst = maxes.iter().cloned().fold(0.0f64, f64::max);
        println!(
            "{:<10} {:<15.2} {:<15.4} {:<15.0}",
            width,
            keys as f64 / width as f64,
            avg_mean,
            worst
        );
    }
    println!();
}

pub fn plot_overestimation<S: BuildHasher + Default + Send + Sync>(
    keys: u64,
    parallel: bool,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(keys, parallel, "collecting overestimation data");
    let start = std::time::Instant::now();
    let (mean_data, max_data) = if parallel {
        collect_test_data_parallel::<S>(keys)
    } else {
        collect_test_data_sequential::<S>(keys)
    };
    info!(elapsed = ?start.elapsed(), "trials finished");

    print_summary(keys, &mean_data, &max_data);

    let min_width = WIDTHS[0] as f64;
    let max_width = WIDTHS[WIDTHS.len() - 1] as f64;

    // N / width is the mean load of a single row, the worst case for the minimum
    let max_val = [&mean_data, &max_data]
        .iter()
        .flat_map(|data| {
            data.iter()
                .flat_map(|(_, points)| points.iter().map(|(_, y)| *y))
        })
        .fold(keys as f64 / min_width, f64::max);

    // Define colors for each seed (matching matplotlib default colors)
    let colors = [
        RGBColor(31, 119, 180),  // blue
        RGBColor(255, 127, 14),  // orange
        RGBColor(44, 160, 44),   // green
        RGBColor(214, 39, 40),   // red
        RGBColor(148, 103, 189), // purple
        RGBColor(140, 86, 75),   // brown
        RGBColor(227, 119, 194), // pink
        RGBColor(127, 127, 127), // gray
        RGBColor(188, 189, 34),  // olive
    ];

    let root = BitMapBackend::new(output, (1600, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((1, 2));

    let datasets = [("Mean excess", &mean_data), ("Max excess", &max_data)];

    for (idx, (area, (title, data))) in areas.iter().zip(datasets.iter()).enumerate() {
        let mut chart = ChartBuilder::on(area)
            .caption(*title, ("sans-serif", 32).into_font())
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(
                (min_width..max_width).log_scale(),
                0.0f64..max_val * 1.1,
            )?;

        chart
            .configure_mesh()
            .x_desc("width")
            .y_desc("estimate - true count")
            .label_style(("sans-serif", 18))
            .draw()?;

        // Per-row load N / width
        chart
            .draw_series(LineSeries::new(
                WIDTHS.iter().map(|&w| (w as f64, keys as f64 / w as f64)),
                ShapeStyle::from(&BLACK).stroke_width(2),
            ))?
            .label("N / width")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], BLACK.stroke_width(2)));

        for (i, (seed, points)) in data.iter().enumerate() {
            let color = colors[i % colors.len()];

            let series = LineSeries::new(points.clone(), color.stroke_width(3));

            // Only add seed legends to the last (rightmost) chart
            if idx == 1 {
                chart
                    .draw_series(series)?
                    .label(format!("seed {}", seed))
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 30, y)], color.stroke_width(3))
                    });
            } else {
                chart.draw_series(series)?;
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font(("sans-serif", 18))
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()?;
    }

    root.present()?;
    println!("Plot saved to {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xxhash_rust::xxh64::Xxh64Builder;

    #[test]
    fn test_process_seed_shapes() {
        let ((seed, means), (_, maxes)) = process_seed::<Xxh64Builder>(3, 2_000);
        assert_eq!(seed, 3);
        assert_eq!(means.len(), WIDTHS.len());
        assert_eq!(maxes.len(), WIDTHS.len());

        for ((width, mean), (_, max)) in means.iter().zip(maxes.iter()) {
            assert!(*mean <= *max);
            assert!(*mean <= 2_000.0 / width);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (seq_mean, _) = collect_test_data_sequential::<Xxh64Builder>(500);
        let (par_mean, _) = collect_test_data_parallel::<Xxh64Builder>(500);
        assert_eq!(seq_mean, par_mean);
    }
}
