//! @ai:module:intent Chart generation for dataset summaries
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator, ChartSet
//! @ai:module:stateless true

use crate::config::ChartConfig;
use crate::error::{Error, Result};
use crate::stats::{
    category_distribution, column_lengths, grouped_lengths, histogram_bins, histogram_bins_in,
    value_range, CategoryCount, HistogramBin, LengthStats, Quartiles,
};
use crate::report::{display_label, ensure_dir};
use crate::table::{RecordTable, INTENT, QUERY, RESPONSE, SENTIMENT};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

pub const INTENT_ANALYSIS_FILE: &str = "intent_analysis.png";
pub const SENTIMENT_ANALYSIS_FILE: &str = "sentiment_analysis.png";
pub const DATASET_OVERVIEW_FILE: &str = "dataset_overview.png";

const INTENT_PALETTE: [RGBColor; 10] = [
    RGBColor(246, 112, 136),
    RGBColor(219, 136, 49),
    RGBColor(173, 156, 49),
    RGBColor(119, 170, 49),
    RGBColor(51, 176, 122),
    RGBColor(53, 172, 164),
    RGBColor(56, 168, 197),
    RGBColor(110, 154, 244),
    RGBColor(204, 121, 244),
    RGBColor(245, 101, 204),
];

const SENTIMENT_PALETTE: [RGBColor; 3] = [
    RGBColor(0xff, 0x99, 0x99),
    RGBColor(0x66, 0xb3, 0xff),
    RGBColor(0x99, 0xff, 0x99),
];

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const LIGHT_GREEN: RGBColor = RGBColor(144, 238, 144);
const LIGHT_CORAL: RGBColor = RGBColor(240, 128, 128);
const LIGHT_BLUE: RGBColor = RGBColor(173, 216, 230);
const ORANGE: RGBColor = RGBColor(255, 165, 0);
const PURPLE: RGBColor = RGBColor(128, 0, 128);

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// @ai:intent Files written by one chart run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSet {
    pub files: Vec<PathBuf>,
}

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Render every chart image into the output directory
    fn generate_all(
        &self,
        intent: &RecordTable,
        sentiment: &RecordTable,
        output_dir: &Path,
    ) -> Result<ChartSet>;
}

/// @ai:intent Renders the intent, sentiment and overview images
pub struct ChartGenerator {
    config: ChartConfig,
}

impl ChartGenerator {
    /// @ai:intent Create a new chart generator
    /// @ai:effects pure
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// @ai:intent Render the 2x2 intent analysis image
    /// @ai:effects fs:write
    fn generate_intent_chart(&self, table: &RecordTable, output_path: &Path) -> anyhow::Result<()> {
        let distribution = category_distribution(table, INTENT)?;
        let query_lengths = column_lengths(table, QUERY)?;
        let response_lengths = column_lengths(table, RESPONSE)?;
        let bins = self.config.histogram_bins;

        let root = BitMapBackend::new(output_path, self.config.intent_size).into_drawing_area();
        root.fill(&WHITE)?;
        let body = root.titled("Query Intent Analysis", ("sans-serif", 36))?;
        let panels = body.split_evenly((2, 2));

        let bars = category_bars(distribution.entries());
        draw_bar_panel(
            &panels[0],
            &BarPanel {
                caption: "Intent Distribution",
                x_desc: "Intent Categories",
                y_desc: "Number of Queries",
                bars: &bars,
                colors: &[SKY_BLUE],
            },
            |v| format!("{}", v as usize),
        )?;

        draw_length_histogram(
            &panels[1],
            "Query Length Distribution",
            "Query Length (characters)",
            &histogram_bins(&query_lengths, bins),
            LIGHT_GREEN,
            LengthStats::compute(&query_lengths).map(|s| s.mean),
            RED,
        )?;

        draw_length_histogram(
            &panels[2],
            "Response Length Distribution",
            "Response Length (characters)",
            &histogram_bins(&response_lengths, bins),
            LIGHT_CORAL,
            LengthStats::compute(&response_lengths).map(|s| s.mean),
            BLUE,
        )?;

        draw_pie_panel(
            &panels[3],
            "Intent Distribution (Percentage)",
            &distribution.collapse_tail(self.config.pie_top_n),
            &INTENT_PALETTE,
        )?;

        root.present()?;
        Ok(())
    }

    /// @ai:intent Render the 2x2 sentiment analysis image
    /// @ai:effects fs:write
    fn generate_sentiment_chart(&self, table: &RecordTable, output_path: &Path) -> anyhow::Result<()> {
        let distribution = category_distribution(table, SENTIMENT)?;
        let groups = grouped_lengths(table, QUERY, SENTIMENT)?;
        let all_lengths = column_lengths(table, QUERY)?;

        let root = BitMapBackend::new(output_path, self.config.sentiment_size).into_drawing_area();
        root.fill(&WHITE)?;
        let body = root.titled("Query Sentiment Analysis", ("sans-serif", 36))?;
        let panels = body.split_evenly((2, 2));

        let bars = category_bars(distribution.entries());
        draw_bar_panel(
            &panels[0],
            &BarPanel {
                caption: "Sentiment Distribution",
                x_desc: "Sentiment",
                y_desc: "Number of Queries",
                bars: &bars,
                colors: &SENTIMENT_PALETTE,
            },
            |v| format!("{}", v as usize),
        )?;

        let boxes: Vec<(String, Quartiles)> = groups
            .iter()
            .filter_map(|(label, lengths)| {
                Quartiles::compute(lengths).map(|q| (display_label(label).to_string(), q))
            })
            .collect();
        draw_box_panel(&panels[1], "Query Length Distribution by Sentiment", &boxes)?;

        let overlays: Vec<(String, Vec<HistogramBin>)> = match value_range(&all_lengths) {
            Some(range) => groups
                .iter()
                .map(|(label, lengths)| {
                    (
                        display_label(label).to_string(),
                        histogram_bins_in(lengths, self.config.histogram_bins, range),
                    )
                })
                .collect(),
            None => Vec::new(),
        };
        draw_overlaid_histograms(&panels[2], "Query Length Distribution by Sentiment", &overlays)?;

        draw_pie_panel(
            &panels[3],
            "Sentiment Distribution (Percentage)",
            distribution.entries(),
            &SENTIMENT_PALETTE,
        )?;

        root.present()?;
        Ok(())
    }

    /// @ai:intent Render the 1x2 dataset overview image
    /// @ai:effects fs:write
    fn generate_overview_chart(
        &self,
        intent: &RecordTable,
        sentiment: &RecordTable,
        output_path: &Path,
    ) -> anyhow::Result<()> {
        let intent_categories = category_distribution(intent, INTENT)?.len();
        let sentiment_categories = category_distribution(sentiment, SENTIMENT)?.len();

        let root = BitMapBackend::new(output_path, self.config.overview_size).into_drawing_area();
        root.fill(&WHITE)?;
        let body = root.titled("Dataset Overview", ("sans-serif", 36))?;
        let panels = body.split_evenly((1, 2));

        let sizes = vec![
            ("Intent Dataset".to_string(), intent.len() as f64),
            ("Sentiment Dataset".to_string(), sentiment.len() as f64),
        ];
        draw_bar_panel(
            &panels[0],
            &BarPanel {
                caption: "Dataset Sizes",
                x_desc: "",
                y_desc: "Number of Records",
                bars: &sizes,
                colors: &[LIGHT_BLUE, LIGHT_GREEN],
            },
            |v| crate::report::MarkdownReporter::format_count(v as usize),
        )?;

        let categories = vec![
            ("Intent Categories".to_string(), intent_categories as f64),
            ("Sentiment Categories".to_string(), sentiment_categories as f64),
        ];
        draw_bar_panel(
            &panels[1],
            &BarPanel {
                caption: "Number of Categories",
                x_desc: "",
                y_desc: "Number of Unique Categories",
                bars: &categories,
                colors: &[ORANGE, PURPLE],
            },
            |v| format!("{}", v as usize),
        )?;

        root.present()?;
        Ok(())
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:intent Generate all charts, attempting each image even if another fails
    /// @ai:effects fs:write
    fn generate_all(
        &self,
        intent: &RecordTable,
        sentiment: &RecordTable,
        output_dir: &Path,
    ) -> Result<ChartSet> {
        ensure_dir(output_dir, self.config.create_missing_dirs)?;

        let intent_path = output_dir.join(INTENT_ANALYSIS_FILE);
        let sentiment_path = output_dir.join(SENTIMENT_ANALYSIS_FILE);
        let overview_path = output_dir.join(DATASET_OVERVIEW_FILE);

        tracing::info!("Creating intent visualizations...");
        let intent_outcome = self.generate_intent_chart(intent, &intent_path);
        tracing::info!("Creating sentiment visualizations...");
        let sentiment_outcome = self.generate_sentiment_chart(sentiment, &sentiment_path);
        tracing::info!("Creating summary statistics...");
        let overview_outcome = self.generate_overview_chart(intent, sentiment, &overview_path);

        let mut generated = ChartSet::default();
        let mut failures = Vec::new();

        for (path, outcome) in [
            (intent_path, intent_outcome),
            (sentiment_path, sentiment_outcome),
            (overview_path, overview_outcome),
        ] {
            match outcome {
                Ok(()) => {
                    tracing::debug!("Wrote {}", path.display());
                    generated.files.push(path);
                }
                Err(e) => {
                    tracing::warn!("Failed to render {}: {:#}", path.display(), e);
                    failures.push(format!("{}: {:#}", path.display(), e));
                }
            }
        }

        if !failures.is_empty() {
            return Err(Error::Render { failures });
        }
        Ok(generated)
    }
}

/// @ai:intent Inputs for a labelled bar chart panel
struct BarPanel<'a> {
    caption: &'a str,
    x_desc: &'a str,
    y_desc: &'a str,
    bars: &'a [(String, f64)],
    colors: &'a [RGBColor],
}

/// @ai:intent Bar values per category, with blank labels made visible
/// @ai:effects pure
fn category_bars(entries: &[CategoryCount]) -> Vec<(String, f64)> {
    entries
        .iter()
        .map(|e| (display_label(&e.label).to_string(), e.count as f64))
        .collect()
}

/// @ai:intent Draw a bar per category with its value printed above the bar
/// @ai:effects fs:write
fn draw_bar_panel(
    area: &Panel,
    panel: &BarPanel,
    value_label: impl Fn(f64) -> String,
) -> anyhow::Result<()> {
    let bars = panel.bars;
    let peak = bars.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    let y_max = if peak > 0.0 { peak * 1.15 } else { 1.0 };
    let slots = bars.len().max(1) as i32;

    let mut chart = ChartBuilder::on(area)
        .caption(panel.caption, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(70)
        .build_cartesian_2d((0..slots).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len().max(1))
        .x_desc(panel.x_desc)
        .y_desc(panel.y_desc)
        .x_label_style(("sans-serif", 13))
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => bars
                .get(*i as usize)
                .map(|(name, _)| name.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, (_, value))| {
        let color = panel.colors[i % panel.colors.len()];
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i as i32), 0.0),
                (SegmentValue::Exact(i as i32 + 1), *value),
            ],
            color.filled(),
        );
        bar.set_margin(0, 0, 8, 8);
        bar
    }))?;

    let label_style =
        TextStyle::from(("sans-serif", 15).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(bars.iter().enumerate().map(|(i, (_, value))| {
        Text::new(
            value_label(*value),
            (SegmentValue::CenterOf(i as i32), *value + y_max * 0.01),
            label_style.clone(),
        )
    }))?;

    Ok(())
}

/// @ai:intent Draw a length histogram with a dashed marker at the mean
/// @ai:effects fs:write
fn draw_length_histogram(
    area: &Panel,
    caption: &str,
    x_desc: &str,
    bins: &[HistogramBin],
    color: RGBColor,
    mean: Option<f64>,
    mean_color: RGBColor,
) -> anyhow::Result<()> {
    let (x_min, x_max) = bin_extent(std::iter::once(bins));
    let y_max = frequency_ceiling(std::iter::once(bins));

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], color.mix(0.7).filled())
    }))?;
    chart.draw_series(bins.iter().filter(|b| b.count > 0).map(|b| {
        Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], BLACK.stroke_width(1))
    }))?;

    if let Some(mean) = mean {
        chart
            .draw_series(DashedLineSeries::new(
                vec![(mean, 0.0), (mean, y_max)],
                10,
                6,
                mean_color.stroke_width(2),
            ))?
            .label(format!("Mean: {:.1}", mean))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], mean_color.stroke_width(2)));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

/// @ai:intent Draw one semi-transparent histogram per group on shared bins
/// @ai:effects fs:write
fn draw_overlaid_histograms(
    area: &Panel,
    caption: &str,
    groups: &[(String, Vec<HistogramBin>)],
) -> anyhow::Result<()> {
    let (x_min, x_max) = bin_extent(groups.iter().map(|(_, b)| b.as_slice()));
    let y_max = frequency_ceiling(groups.iter().map(|(_, b)| b.as_slice()));

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Query Length (characters)")
        .y_desc("Frequency")
        .draw()?;

    for (i, (label, bins)) in groups.iter().enumerate() {
        let color = SENTIMENT_PALETTE[i % SENTIMENT_PALETTE.len()];
        chart
            .draw_series(bins.iter().map(|b| {
                Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], color.mix(0.6).filled())
            }))?
            .label(label.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.mix(0.6).filled()));
    }

    if !groups.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

/// @ai:intent Draw box plots of lengths per group: IQR box, median bar, whiskers, outliers
/// @ai:effects fs:write
fn draw_box_panel(area: &Panel, caption: &str, groups: &[(String, Quartiles)]) -> anyhow::Result<()> {
    let peak = groups.iter().map(|(_, q)| q.max).fold(0.0, f64::max);
    let y_max = if peak > 0.0 { peak * 1.1 } else { 1.0 };
    let slots = groups.len().max(1) as i32;

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0..slots).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(groups.len().max(1))
        .x_desc("Sentiment")
        .y_desc("Query Length (characters)")
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => groups
                .get(*i as usize)
                .map(|(name, _)| name.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    let span = |i: usize, low: f64, high: f64, margin: u32, style: ShapeStyle| {
        let mut rect = Rectangle::new(
            [
                (SegmentValue::Exact(i as i32), low),
                (SegmentValue::Exact(i as i32 + 1), high),
            ],
            style,
        );
        rect.set_margin(0, 0, margin, margin);
        rect
    };

    for (i, (_, q)) in groups.iter().enumerate() {
        let color = SENTIMENT_PALETTE[i % SENTIMENT_PALETTE.len()];
        let center = SegmentValue::CenterOf(i as i32);

        chart.draw_series(std::iter::once(PathElement::new(
            vec![(center.clone(), q.lower_whisker), (center.clone(), q.upper_whisker)],
            BLACK.stroke_width(1),
        )))?;
        chart.draw_series([
            span(i, q.q1, q.q3, 30, color.filled()),
            span(i, q.q1, q.q3, 30, BLACK.stroke_width(1)),
            span(i, q.median, q.median, 30, BLACK.stroke_width(2)),
            span(i, q.lower_whisker, q.lower_whisker, 45, BLACK.stroke_width(1)),
            span(i, q.upper_whisker, q.upper_whisker, 45, BLACK.stroke_width(1)),
        ])?;
        chart.draw_series(
            q.outliers
                .iter()
                .map(|v| Circle::new((center.clone(), *v), 3, BLACK.stroke_width(1))),
        )?;
    }

    Ok(())
}

/// @ai:intent Draw a pie of category shares with percentage labels
/// @ai:effects fs:write
fn draw_pie_panel(
    area: &Panel,
    caption: &str,
    slices: &[CategoryCount],
    palette: &[RGBColor],
) -> anyhow::Result<()> {
    let area = area.titled(caption, ("sans-serif", 24))?;
    if slices.is_empty() {
        return Ok(());
    }

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = width.min(height) as f64 * 0.35;
    let sizes: Vec<f64> = slices.iter().map(|s| s.count as f64).collect();
    let labels: Vec<String> = slices.iter().map(|s| display_label(&s.label).to_string()).collect();
    let colors: Vec<RGBColor> = (0..slices.len()).map(|i| palette[i % palette.len()]).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 15).into_font().color(&BLACK));
    pie.percentages(("sans-serif", 13).into_font().color(&BLACK));
    area.draw(&pie)?;

    Ok(())
}

/// @ai:intent Horizontal extent covered by one or more bin sets
/// @ai:effects pure
fn bin_extent<'a>(sets: impl Iterator<Item = &'a [HistogramBin]>) -> (f64, f64) {
    let (low, high) = sets
        .flat_map(|bins| bins.iter())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| {
            (lo.min(b.lower), hi.max(b.upper))
        });

    if low.is_finite() && high > low {
        (low, high)
    } else {
        (0.0, 1.0)
    }
}

/// @ai:intent Y axis ceiling leaving headroom above the tallest bin
/// @ai:effects pure
fn frequency_ceiling<'a>(sets: impl Iterator<Item = &'a [HistogramBin]>) -> f64 {
    let peak = sets
        .flat_map(|bins| bins.iter())
        .map(|b| b.count)
        .max()
        .unwrap_or(0);

    if peak == 0 {
        1.0
    } else {
        peak as f64 * 1.1
    }
}
