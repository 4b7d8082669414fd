use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_backend::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::{FRAC_PI_2, TAU};

use super::styles::{parse_hex_color, ChartStyle, ChartTheme};
use super::{ChartRequest, PlotError};
use crate::types::ChartType;
use crate::utils::SeriesView;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const RADAR_ACCENT: RGBColor = RGBColor(99, 102, 241);
const RING_COUNT: usize = 4;

/// Draw the requested chart onto the root area
pub fn draw_chart(request: &ChartRequest, root: &Area) -> Result<(), PlotError> {
    let theme = ChartTheme::default();
    let style = ChartStyle::default();

    root.fill(&theme.background_color)?;
    let caption = ("sans-serif", f64::from(style.caption_size))
        .into_font()
        .color(&theme.text_color);
    let area = root.titled(&request.title, caption)?;

    if request.view.is_empty() {
        return draw_empty(&area, &theme, &style);
    }

    match request.chart_type {
        ChartType::Bar => draw_bar(&area, &request.view, &theme, &style),
        ChartType::Pie => draw_round(&area, &request.view, &theme, &style, draw_pie),
        ChartType::PolarArea => draw_round(&area, &request.view, &theme, &style, draw_polar_area),
        ChartType::Radar => draw_radar(&area, &request.view, &theme, &style),
    }
}

fn label_font(theme: &ChartTheme, style: &ChartStyle) -> TextStyle<'static> {
    ("sans-serif", f64::from(style.font_size))
        .into_font()
        .color(&theme.text_color)
}

fn draw_empty(area: &Area, theme: &ChartTheme, style: &ChartStyle) -> Result<(), PlotError> {
    let (w, h) = area.dim_in_pixel();
    let font = label_font(theme, style).pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new(
        "No language data",
        (w as i32 / 2, h as i32 / 2),
        font,
    ))?;
    Ok(())
}

fn draw_bar(
    area: &Area,
    view: &SeriesView,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let n = view.len() as u32;
    let y_max = view.values.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(area)
        .margin(style.margin)
        .x_label_area_size(style.label_area_size + 40)
        .y_label_area_size(style.label_area_size)
        .build_cartesian_2d((0u32..n).into_segmented(), 0f64..y_max)?;

    let labels = &view.labels;
    let x_label_formatter = |x: &SegmentValue<u32>| match x {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    };
    let y_label_formatter = |y: &f64| format!("{:.0}", y);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .y_desc("Repositories")
        .label_style(label_font(theme, style))
        .x_labels(view.len())
        .x_label_formatter(&x_label_formatter)
        .x_label_style(
            label_font(theme, style)
                .transform(FontTransform::Rotate90)
                .pos(Pos::new(HPos::Right, VPos::Center)),
        )
        .y_label_formatter(&y_label_formatter)
        .draw()?;

    chart.draw_series(view.values.iter().zip(&view.colors).enumerate().map(
        |(i, (value, color))| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i as u32), 0.0),
                    (SegmentValue::Exact(i as u32 + 1), *value as f64),
                ],
                parse_hex_color(color).filled(),
            );
            bar.set_margin(0, 0, 4, 4);
            bar
        },
    ))?;

    Ok(())
}

/// Geometry shared by the pie and polar area charts.
struct Dial {
    center: (i32, i32),
    radius: f64,
}

impl Dial {
    fn point(&self, angle: f64, radius: f64) -> (i32, i32) {
        (
            self.center.0 + (radius * angle.cos()).round() as i32,
            self.center.1 + (radius * angle.sin()).round() as i32,
        )
    }

    /// Closed outline of a wedge between two angles.
    fn wedge(&self, start: f64, end: f64, radius: f64) -> Vec<(i32, i32)> {
        let steps = (((end - start) / TAU) * 120.0).ceil().max(2.0) as usize;
        let mut points = Vec::with_capacity(steps + 2);
        points.push(self.center);
        for step in 0..=steps {
            let angle = start + (end - start) * step as f64 / steps as f64;
            points.push(self.point(angle, radius));
        }
        points
    }
}

type RoundDrawer = fn(&Area, &Dial, &SeriesView, &ChartTheme, &ChartStyle) -> Result<(), PlotError>;

/// Split off a legend column and hand the remaining square to `drawer`.
fn draw_round(
    area: &Area,
    view: &SeriesView,
    theme: &ChartTheme,
    style: &ChartStyle,
    drawer: RoundDrawer,
) -> Result<(), PlotError> {
    let (w, _) = area.dim_in_pixel();
    let split = w.saturating_sub(style.legend_width).max(w / 2);
    let (plot_area, legend_area) = area.split_horizontally(split as i32);

    let (pw, ph) = plot_area.dim_in_pixel();
    let dial = Dial {
        center: (pw as i32 / 2, ph as i32 / 2),
        radius: (pw.min(ph) as f64 / 2.0 - style.margin as f64 * 2.0).max(1.0),
    };

    drawer(&plot_area, &dial, view, theme, style)?;
    draw_legend(&legend_area, view, theme, style)
}

fn draw_pie(
    area: &Area,
    dial: &Dial,
    view: &SeriesView,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let total = view.total();
    if total == 0 {
        return draw_empty(area, theme, style);
    }

    let font = label_font(theme, style).pos(Pos::new(HPos::Center, VPos::Center));
    let mut start = -FRAC_PI_2;
    for (value, color) in view.values.iter().zip(&view.colors) {
        let share = *value as f64 / total as f64;
        let end = start + share * TAU;
        area.draw(&Polygon::new(
            dial.wedge(start, end, dial.radius),
            parse_hex_color(color).filled(),
        ))?;

        if share >= 0.05 {
            let mid = (start + end) / 2.0;
            area.draw(&Text::new(
                format!("{:.0}%", share * 100.0),
                dial.point(mid, dial.radius * 0.65),
                font.clone(),
            ))?;
        }
        start = end;
    }
    Ok(())
}

fn draw_polar_area(
    area: &Area,
    dial: &Dial,
    view: &SeriesView,
    theme: &ChartTheme,
    _style: &ChartStyle,
) -> Result<(), PlotError> {
    let max = view.values.iter().copied().max().unwrap_or(0).max(1) as f64;
    let slice = TAU / view.len() as f64;

    for (i, (value, color)) in view.values.iter().zip(&view.colors).enumerate() {
        let start = -FRAC_PI_2 + slice * i as f64;
        let radius = dial.radius * (*value as f64 / max);
        if radius < 1.0 {
            continue;
        }
        area.draw(&Polygon::new(
            dial.wedge(start, start + slice, radius),
            parse_hex_color(color).mix(theme.area_opacity).filled(),
        ))?;
    }

    for ring in 1..=RING_COUNT {
        let r = dial.radius * ring as f64 / RING_COUNT as f64;
        area.draw(&Circle::new(
            dial.center,
            r.round() as i32,
            theme.grid_color.stroke_width(1),
        ))?;
    }
    Ok(())
}

fn draw_radar(
    area: &Area,
    view: &SeriesView,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let (w, h) = area.dim_in_pixel();
    let dial = Dial {
        center: (w as i32 / 2, h as i32 / 2),
        // Room for the axis labels around the web
        radius: (w.min(h) as f64 / 2.0 - style.label_area_size as f64 - style.margin as f64).max(1.0),
    };
    let n = view.len();
    let max = view.values.iter().copied().max().unwrap_or(0).max(1) as f64;
    let angle = |i: usize| -FRAC_PI_2 + TAU * i as f64 / n as f64;

    // Web
    for ring in 1..=RING_COUNT {
        let r = dial.radius * ring as f64 / RING_COUNT as f64;
        let mut outline: Vec<(i32, i32)> = (0..n).map(|i| dial.point(angle(i), r)).collect();
        outline.push(dial.point(angle(0), r));
        area.draw(&PathElement::new(outline, theme.grid_color.stroke_width(1)))?;
    }
    let font = label_font(theme, style).pos(Pos::new(HPos::Center, VPos::Center));
    for (i, label) in view.labels.iter().enumerate() {
        area.draw(&PathElement::new(
            vec![dial.center, dial.point(angle(i), dial.radius)],
            theme.grid_color.stroke_width(1),
        ))?;
        area.draw(&Text::new(
            label.clone(),
            dial.point(angle(i), dial.radius + style.label_area_size as f64 / 2.0),
            font.clone(),
        ))?;
    }

    // Data
    let points: Vec<(i32, i32)> = view
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| dial.point(angle(i), dial.radius * (*v as f64 / max)))
        .collect();
    area.draw(&Polygon::new(points.clone(), RADAR_ACCENT.mix(0.3).filled()))?;

    let mut outline = points.clone();
    if let Some(first) = points.first() {
        outline.push(*first);
    }
    area.draw(&PathElement::new(
        outline,
        RADAR_ACCENT.stroke_width(style.line_width),
    ))?;
    for point in points {
        area.draw(&Circle::new(point, 3, RADAR_ACCENT.filled()))?;
    }
    Ok(())
}

fn draw_legend(
    area: &Area,
    view: &SeriesView,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let (_, h) = area.dim_in_pixel();
    let row_height = style.font_size as i32 + 8;
    let swatch = style.legend_swatch as i32;
    let font = label_font(theme, style).pos(Pos::new(HPos::Left, VPos::Center));

    let capacity = ((h as i32 - style.margin as i32 * 2) / row_height).max(1) as usize;
    let shown = if view.len() > capacity { capacity - 1 } else { view.len() };

    for i in 0..shown {
        let y = style.margin as i32 + row_height * i as i32 + row_height / 2;
        area.draw(&Rectangle::new(
            [(0, y - swatch / 2), (swatch, y + swatch / 2)],
            parse_hex_color(&view.colors[i]).filled(),
        ))?;
        area.draw(&Text::new(
            format!("{} ({})", view.labels[i], view.values[i]),
            (swatch + 8, y),
            font.clone(),
        ))?;
    }

    if shown < view.len() {
        let y = style.margin as i32 + row_height * shown as i32 + row_height / 2;
        area.draw(&Text::new(
            format!("+{} more", view.len() - shown),
            (0, y),
            font,
        ))?;
    }
    Ok(())
}
