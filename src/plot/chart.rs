use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;

use crate::plot::PlotError;

pub struct Series {
    pub points: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
}

/// Line chart with a caption, axis descriptions and an optional legend, written as a PNG.
///
/// The y axis is scaled to the points that fall inside the x range.
pub struct LineChart<'a> {
    title: &'a str,
    x_desc: &'a str,
    y_desc: &'a str,
    size: (u32, u32),
    x_range: Option<(f64, f64)>,
    legend: bool,
    series: Vec<Series>,
}

impl<'a> LineChart<'a> {
    pub fn new(title: &'a str, x_desc: &'a str, y_desc: &'a str) -> Self {
        LineChart {
            title,
            x_desc,
            y_desc,
            size: (1200, 400),
            x_range: None,
            legend: false,
            series: Vec::new(),
        }
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = Some((min, max));
        self
    }

    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    pub fn series(mut self, label: &str, points: Vec<(f64, f64)>, color: RGBColor) -> Self {
        self.series.push(Series {
            points,
            label: label.to_string(),
            color,
        });
        self
    }

    fn bounds(&self) -> (Range<f64>, Range<f64>) {
        let (x_min, x_max) = self.x_range.unwrap_or_else(|| {
            let xs = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
            min_max(xs).unwrap_or((0.0, 1.0))
        });
        let ys = self
            .series
            .iter()
            .flat_map(|s| s.points.iter())
            .filter(|(x, _)| *x >= x_min && *x <= x_max)
            .map(|p| p.1);
        let (y_min, y_max) = min_max(ys).unwrap_or((0.0, 1.0));
        (pad(x_min, x_max), pad(y_min, y_max))
    }

    pub fn save(&self, output_path: &Path) -> Result<(), PlotError> {
        let (x_range, y_range) = self.bounds();
        let (x_min, x_max) = (x_range.start, x_range.end);

        let root = BitMapBackend::new(output_path, self.size).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 80)
            .set_label_area_size(LabelAreaPosition::Bottom, 50)
            .caption(self.title, ("sans-serif", 28).into_font())
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .bold_line_style(BLACK.mix(0.15))
            .light_line_style(BLACK.mix(0.05))
            .label_style(("sans-serif", 16))
            .x_desc(self.x_desc)
            .y_desc(self.y_desc)
            .draw()?;

        for s in &self.series {
            let color = s.color;
            let visible = s
                .points
                .iter()
                .copied()
                .filter(|(x, y)| *x >= x_min && *x <= x_max && y.is_finite());
            chart
                .draw_series(LineSeries::new(visible, &color))?
                .label(s.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new([(x, y), (x + 20, y)], color.stroke_width(3))
                });
        }

        if self.legend {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .margin(10)
                .border_style(BLACK)
                .background_style(WHITE.mix(0.9))
                .label_font(("sans-serif", 18))
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn pad(min: f64, max: f64) -> Range<f64> {
    if max > min { min..max } else { (min - 1.0)..(max + 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_range_follows_visible_points() {
        let chart = LineChart::new("t", "x", "y")
            .x_range(0.0, 1.0)
            .series("s", vec![(0.0, 0.0), (1.0, 1.0), (5.0, 100.0)], RED);
        let (x_range, y_range) = chart.bounds();
        assert_eq!(x_range, 0.0..1.0);
        assert_eq!(y_range, 0.0..1.0);
    }

    #[test]
    fn test_flat_and_empty_series_get_padded_ranges() {
        let flat = LineChart::new("t", "x", "y").series("s", vec![(2.0, 0.5); 10], RED);
        assert_eq!(flat.bounds(), (1.0..3.0, -0.5..1.5));
        let empty = LineChart::new("t", "x", "y");
        assert_eq!(empty.bounds(), (0.0..1.0, 0.0..1.0));
    }

    #[test]
    fn test_save_writes_png_with_caption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        LineChart::new("Amplitude over time", "Time (s)", "Amplitude")
            .size(400, 300)
            .legend()
            .series("a", vec![(0.0, 1.0), (2.0, -1.0)], BLUE)
            .save(&path)
            .unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (400, 300));
        // The caption is drawn in the top margin, above the plotting area.
        let caption_band = (0..45).flat_map(|y| (0..400).map(move |x| (x, y)));
        assert!(
            caption_band
                .map(|(x, y)| img.get_pixel(x, y).0)
                .any(|px| px != [255, 255, 255])
        );
    }
}
