//! Dendrogram layout and rendering with Plotters

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::prelude::*;

use crate::model::MergeStep;

/// Dark theme shared with the original web UI.
const BG_COLOR: RGBColor = RGBColor(22, 27, 34);
const TEXT_COLOR: RGBColor = RGBColor(230, 237, 243);
const BORDER_COLOR: RGBColor = RGBColor(48, 54, 61);
const ACCENT_COLOR: RGBColor = RGBColor(88, 166, 255);

const PLOT_WIDTH: u32 = 960;
const PLOT_HEIGHT: u32 = 600;

/// 2D line-segment layout for a dendrogram drawn top-down.
///
/// Follows the usual dendrogram coordinate convention: leaf k (left to
/// right) sits at x = 5 + 10k, and each merge contributes one U-shaped
/// link. `icoord[m]`/`dcoord[m]` hold the four x/y breakpoints of link m.
#[derive(Debug, Clone, PartialEq)]
pub struct DendrogramLayout {
    pub icoord: Vec<[f64; 4]>,
    pub dcoord: Vec<[f64; 4]>,
    /// Original point indices in left-to-right leaf order.
    pub leaf_order: Vec<usize>,
    /// Point labels in the same left-to-right order.
    pub leaf_labels: Vec<String>,
}

/// Derive the drawing layout from a merge sequence.
///
/// Leaf order comes from a depth-first walk of the merge tree (first-merged
/// child on the left). Returns `None` for fewer than 2 leaves, mirroring
/// the clustering engine's own minimum.
pub fn dendrogram_layout(merges: &[MergeStep], labels: &[String]) -> Option<DendrogramLayout> {
    let n = labels.len();
    if n < 2 || merges.len() != n - 1 {
        return None;
    }

    let root = n + merges.len() - 1;
    let mut leaf_order = Vec::with_capacity(n);
    collect_leaves(root, n, merges, &mut leaf_order);

    // Node positions: leaves at fixed x with height 0, merge nodes at the
    // midpoint of their children at their merge distance.
    let mut x = vec![0.0; n + merges.len()];
    let mut height = vec![0.0; n + merges.len()];
    for (rank, &leaf) in leaf_order.iter().enumerate() {
        x[leaf] = 5.0 + 10.0 * rank as f64;
    }

    let mut icoord = Vec::with_capacity(merges.len());
    let mut dcoord = Vec::with_capacity(merges.len());
    for (k, merge) in merges.iter().enumerate() {
        let (xa, ha) = (x[merge.a], height[merge.a]);
        let (xb, hb) = (x[merge.b], height[merge.b]);
        icoord.push([xa, xa, xb, xb]);
        dcoord.push([ha, merge.distance, merge.distance, hb]);
        x[n + k] = (xa + xb) / 2.0;
        height[n + k] = merge.distance;
    }

    let leaf_labels = leaf_order.iter().map(|&i| labels[i].clone()).collect();
    Some(DendrogramLayout {
        icoord,
        dcoord,
        leaf_order,
        leaf_labels,
    })
}

fn collect_leaves(node: usize, n: usize, merges: &[MergeStep], out: &mut Vec<usize>) {
    if node < n {
        out.push(node);
    } else {
        let merge = &merges[node - n];
        collect_leaves(merge.a, n, merges, out);
        collect_leaves(merge.b, n, merges, out);
    }
}

/// Render a dendrogram layout into PNG bytes.
///
/// Draws into an owned RGB buffer scoped to this call, so the drawing
/// context is released on every path before the buffer is encoded.
pub fn render_dendrogram(layout: &DendrogramLayout) -> crate::Result<Vec<u8>> {
    let x_max = 10.0 * layout.leaf_order.len() as f64;
    let peak = layout
        .dcoord
        .iter()
        .flat_map(|d| d.iter().copied())
        .fold(0.0_f64, f64::max);
    // Identical points merge at distance 0; keep a visible axis anyway.
    let y_max = if peak > 0.0 { peak * 1.05 } else { 1.0 };

    let mut buffer = vec![0u8; (PLOT_WIDTH * PLOT_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (PLOT_WIDTH, PLOT_HEIGHT))
            .into_drawing_area();
        root.fill(&BG_COLOR)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Hierarchical Clustering Dendrogram",
                ("sans-serif", 28).into_font().color(&TEXT_COLOR),
            )
            .margin(12)
            .x_label_area_size(42)
            .y_label_area_size(64)
            .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_desc("Euclidean Distance (Single Linkage)")
            .axis_desc_style(("sans-serif", 15).into_font().color(&TEXT_COLOR))
            .label_style(("sans-serif", 12).into_font().color(&TEXT_COLOR))
            .axis_style(BORDER_COLOR)
            .bold_line_style(BORDER_COLOR.mix(0.25))
            .light_line_style(BORDER_COLOR.mix(0.1))
            .draw()?;

        for (ic, dc) in layout.icoord.iter().zip(layout.dcoord.iter()) {
            let link = vec![
                (ic[0], dc[0]),
                (ic[1], dc[1]),
                (ic[2], dc[2]),
                (ic[3], dc[3]),
            ];
            chart.draw_series(std::iter::once(PathElement::new(
                link,
                ACCENT_COLOR.stroke_width(2),
            )))?;
        }

        // Leaf labels under the baseline, one per tick position.
        for (rank, label) in layout.leaf_labels.iter().enumerate() {
            let leaf_x = 5.0 + 10.0 * rank as f64;
            let (px, py) = chart.backend_coord(&(leaf_x, 0.0));
            root.draw(&Text::new(
                label.clone(),
                (px - 18, py + 8),
                ("sans-serif", 13).into_font().color(&TEXT_COLOR),
            ))?;
        }

        root.present()?;
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(
        &buffer,
        PLOT_WIDTH,
        PLOT_HEIGHT,
        ExtendedColorType::Rgb8,
    )?;
    Ok(png)
}
