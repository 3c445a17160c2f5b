//! Raster output: radial density plots, point-cloud projections and
//! slice animations.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use colorous::{Gradient, INFERNO, MAGMA};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, Rgb, RgbImage};
use log::{info, warn};
use plotters::prelude::*;

use crate::config::{RadialPlotConfig, SliceConfig};
use crate::density::{estimate_max_density, radial_axis, radial_probability_density, slice_at, DensitySlice};
use crate::physics::QuantumNumbers;
use crate::sampler::ElectronCloud;

const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    Magma,
    Inferno,
}

impl Colormap {
    fn gradient(self) -> Gradient {
        match self {
            Colormap::Magma => MAGMA,
            Colormap::Inferno => INFERNO,
        }
    }

    /// Color at `t`, clamped to [0, 1]. NaN maps to the low end.
    pub fn color(self, t: f64) -> Rgb<u8> {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let (r, g, b) = self.gradient().eval_continuous(t).as_tuple();
        Rgb([r, g, b])
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "inferno" => Colormap::Inferno,
            _ => Colormap::Magma,
        }
    }
}

/// Density slice as an image with vmin = 0 and values above `vmax` clipped.
/// The bottom image row is the smallest y.
pub fn render_slice(slice: &DensitySlice, vmax: f64, cmap: Colormap) -> RgbImage {
    let (rows, cols) = slice.density.dim();
    let mut img = RgbImage::new(cols as u32, rows as u32);
    for ((i, j), &value) in slice.density.indexed_iter() {
        let t = if vmax > 0.0 { value / vmax } else { 0.0 };
        img.put_pixel(j as u32, (rows - 1 - i) as u32, cmap.color(t));
    }
    img
}

/// Slicing animation through the orbital from z = -grid_limit to +grid_limit,
/// written as a looping GIF. Every frame shares one color scale.
pub fn write_slice_animation(
    qn: QuantumNumbers,
    config: &SliceConfig,
    cmap: Colormap,
    path: &Path,
) -> Result<(), String> {
    info!("computing global color scale for {}", qn.label());
    let vmax = estimate_max_density(qn, config) * config.vmax_fraction;

    let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| format!("gif repeat: {e}"))?;

    let delay = Delay::from_numer_denom_ms(config.frame_delay_ms(), 1);
    let planes = config.z_planes();
    info!("rendering {} frames", planes.len());
    for (idx, &z) in planes.iter().enumerate() {
        let slice = slice_at(qn, z, config);
        let rgba = DynamicImage::ImageRgb8(render_slice(&slice, vmax, cmap)).into_rgba8();
        encoder
            .encode_frame(Frame::from_parts(rgba, 0, 0, delay))
            .map_err(|e| format!("encode frame {idx}: {e}"))?;
    }
    Ok(())
}

/// Point cloud projected onto the x-z plane, colored by height, drawn with
/// partial opacity so dense regions build up brightness.
pub fn render_cloud(cloud: &ElectronCloud, size: u32, cmap: Colormap) -> RgbImage {
    let mut img = RgbImage::from_pixel(size, size, BACKGROUND);
    let hw = cloud.half_width;
    if size == 0 || hw <= 0.0 {
        return img;
    }
    let alpha = 0.3;
    let to_px = |v: f64| ((v + hw) / (2.0 * hw) * (size - 1) as f64).round();

    for p in &cloud.points {
        let px = to_px(p[0]);
        let py = (size - 1) as f64 - to_px(p[2]);
        if !(0.0..size as f64).contains(&px) || !(0.0..size as f64).contains(&py) {
            continue;
        }
        let color = cmap.color((p[2] + hw) / (2.0 * hw));
        let pixel = img.get_pixel_mut(px as u32, py as u32);
        for c in 0..3 {
            let blended = pixel[c] as f64 * (1.0 - alpha) + color[c] as f64 * alpha;
            pixel[c] = blended.round() as u8;
        }
    }
    img
}

/// Radial probability density curves for every configured state, one line
/// series each, with axis labels and a legend.
///
/// Text needs a system font. Without one the curves are still drawn and the
/// labels are skipped with a warning.
pub fn render_radial_plot(config: &RadialPlotConfig, width: u32, height: u32) -> Result<RgbImage, String> {
    let r = radial_axis(config.r_max, config.num_points);
    let mut curves = Vec::with_capacity(config.states.len());
    for state in &config.states {
        let p = radial_probability_density(state.n, state.l, &r)
            .map_err(|e| format!("{}: {e}", state.label))?;
        curves.push(p);
    }
    let peak = curves
        .iter()
        .flat_map(|c| c.iter().cloned())
        .fold(0.0, f64::max);
    let y_max = if peak > 0.0 { peak * 1.1 } else { 1.0 };
    let x_max = if config.r_max > 0.0 { config.r_max } else { 1.0 };

    let mut buf = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| format!("radial plot: {e}"))?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..x_max, 0.0..y_max)
            .map_err(|e| format!("radial plot: {e}"))?;

        if let Err(e) = chart
            .configure_mesh()
            .x_desc("Distance from nucleus r (a0)")
            .y_desc("P(r) = r^2 |R(r)|^2")
            .draw()
        {
            warn!("radial plot axes skipped: {e}");
        }

        for (idx, (state, curve)) in config.states.iter().zip(&curves).enumerate() {
            let color = Palette99::pick(idx).to_rgba();
            chart
                .draw_series(LineSeries::new(
                    r.iter().zip(curve.iter()).map(|(&x, &y)| (x, y)),
                    color.stroke_width(2),
                ))
                .map_err(|e| format!("{}: {e}", state.label))?
                .label(state.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        if let Err(e) = chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
        {
            warn!("radial plot legend skipped: {e}");
        }

        root.present().map_err(|e| format!("radial plot: {e}"))?;
    }

    RgbImage::from_raw(width, height, buf).ok_or_else(|| "radial plot: buffer size mismatch".to_string())
}

pub fn save_png(img: &RgbImage, path: &Path) -> Result<(), String> {
    img.save(path)
        .map_err(|e| format!("write {}: {e}", path.display()))
}
