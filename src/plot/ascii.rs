//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - projected value: `-` line
//! - uncertainty band edges: `.` lines
//! - sweep samples: `o`

use crate::domain::PathPoint;
use crate::scenario::SweepResult;

/// Render the per-period projection with its band.
pub fn render_projection_plot(path: &[PathPoint], width: usize, height: usize) -> String {
    let value: Vec<(f64, f64)> = path.iter().map(|p| (f64::from(p.period), p.value)).collect();
    let low: Vec<(f64, f64)> = path.iter().map(|p| (f64::from(p.period), p.low)).collect();
    let high: Vec<(f64, f64)> = path.iter().map(|p| (f64::from(p.period), p.high)).collect();

    let layers = [Layer::line(&value, '-'), Layer::line(&low, '.'), Layer::line(&high, '.')];
    let (x_min, x_max) = x_range(&value).unwrap_or((0.0, 1.0));
    let header = |y_min: f64, y_max: f64| {
        format!("Plot: period=[{x_min:.0}, {x_max:.0}] | value=[{y_min:.2}, {y_max:.2}]\n")
    };
    render_plot(&layers, x_min, x_max, width, height, header)
}

/// Render final value against the swept input.
pub fn render_sweep_plot(sweep: &SweepResult, width: usize, height: usize) -> String {
    let points: Vec<(f64, f64)> = sweep.points.iter().map(|p| (p.input, p.result.final_value)).collect();

    // Markers go in after the line so they stay visible.
    let layers = [Layer::line(&points, '-'), Layer::markers(&points, 'o')];
    let (x_min, x_max) = x_range(&points).unwrap_or((0.0, 1.0));
    let axis = sweep.spec.axis.display_name();
    let header = |y_min: f64, y_max: f64| {
        format!("Plot: {axis}=[{x_min:.2}, {x_max:.2}] | final value=[{y_min:.2}, {y_max:.2}]\n")
    };
    render_plot(&layers, x_min, x_max, width, height, header)
}

struct Layer<'a> {
    points: &'a [(f64, f64)],
    ch: char,
    connect: bool,
}

impl<'a> Layer<'a> {
    fn line(points: &'a [(f64, f64)], ch: char) -> Self {
        Self { points, ch, connect: true }
    }

    fn markers(points: &'a [(f64, f64)], ch: char) -> Self {
        Self { points, ch, connect: false }
    }
}

fn render_plot(
    layers: &[Layer<'_>],
    x_min: f64,
    x_max: f64,
    width: usize,
    height: usize,
    header: impl Fn(f64, f64) -> String,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(layers).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    for layer in layers {
        let finite = layer.points.iter().filter(|(x, y)| x.is_finite() && y.is_finite());
        if layer.connect {
            let mapped: Vec<(usize, usize)> = finite
                .map(|&(x, y)| (map_x(x, x_min, x_max, width), map_y(y, y_min, y_max, height)))
                .collect();
            draw_polyline(&mut grid, &mapped, layer.ch);
        } else {
            for &(x, y) in finite {
                grid[map_y(y, y_min, y_max, height)][map_x(x, x_min, x_max, width)] = layer.ch;
            }
        }
    }

    let mut out = header(y_min, y_max);
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn x_range(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(layers: &[Layer<'_>]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for layer in layers {
        for &(_, y) in layer.points {
            if y.is_finite() {
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        return None;
    }
    if max_y > min_y {
        Some((min_y, max_y))
    } else {
        // Flat series: centre it.
        let pad = (min_y.abs() * 0.01).max(1.0);
        Some((min_y - pad, max_y + pad))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(grid: &mut [Vec<char>], points: &[(usize, usize)], ch: char) {
    let mut prev = None;
    for &(x, y) in points {
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, ch);
        } else if grid[y][x] == ' ' {
            grid[y][x] = ch;
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish). Never overwrites a filled cell.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(period: u32, value: f64, low: f64, high: f64) -> PathPoint {
        PathPoint { period, value, low, high }
    }

    #[test]
    fn projection_plot_golden_snapshot_small() {
        let path = vec![
            point(0, 100.0, 90.0, 110.0),
            point(1, 110.0, 100.0, 120.0),
            point(2, 120.0, 110.0, 130.0),
        ];

        let txt = render_projection_plot(&path, 10, 5);
        let expected = concat!(
            "Plot: period=[0, 2] | value=[88.00, 132.00]\n",
            "       ...\n",
            "   ....---\n",
            "...----...\n",
            "---....   \n",
            "...       \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn flat_series_does_not_divide_by_zero() {
        let path = vec![point(0, 500.0, 500.0, 500.0), point(1, 500.0, 500.0, 500.0)];
        let txt = render_projection_plot(&path, 12, 5);
        assert!(txt.starts_with("Plot: period=[0, 1] | value=[494.50, 505.50]\n"));
        assert_eq!(txt.lines().count(), 6);
        assert!(txt.lines().nth(3).unwrap().starts_with("------------"));
    }

    #[test]
    fn non_finite_points_are_skipped() {
        let path = vec![point(0, 100.0, 95.0, 105.0), point(1, f64::NAN, f64::NAN, f64::NAN)];
        let txt = render_projection_plot(&path, 10, 5);
        assert_eq!(txt.lines().count(), 6);
    }
}
