use std::path::Path;

use kurbo::Shape as _;

use crate::foundation::core::RenderedBox;
use crate::foundation::error::{ProofmarkError, ProofmarkResult};
use crate::geometry::shape::Shape;
use crate::surface::vector::{LoadMode, ReplayStyle, SurfaceFactory, VectorSurface};

/// A rasterized annotation overlay as RGBA8 pixels.
///
/// Pixels are **premultiplied alpha**; the flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug)]
pub struct OverlayFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// CPU raster [`VectorSurface`] powered by `vello_cpu`.
///
/// Holds the same shape list a host overlay would and can rasterize it into
/// an [`OverlayFrame`] on demand, which is how review hosts burn the active
/// annotation into exported frame snapshots. Text shapes are rendered by
/// the host overlay (glyph layout is not an engine concern); this backend
/// draws their anchor box only.
pub struct RasterSurface {
    size: RenderedBox,
    shapes: Vec<Shape>,
    interactive: bool,
    replay_style: ReplayStyle,
    ctx: Option<vello_cpu::RenderContext>,
    disposed: bool,
}

impl RasterSurface {
    /// Create a surface for a measurable box.
    pub fn new(size: RenderedBox) -> ProofmarkResult<Self> {
        if !size.is_measurable() {
            return Err(ProofmarkError::surface(
                "raster surface requires a measurable box",
            ));
        }
        Ok(Self {
            size,
            shapes: Vec::new(),
            interactive: true,
            replay_style: ReplayStyle::default(),
            ctx: None,
            disposed: false,
        })
    }

    /// Use a non-default replay stroke style.
    pub fn with_replay_style(mut self, style: ReplayStyle) -> Self {
        self.replay_style = style;
        self
    }

    fn ensure_live(&self) -> ProofmarkResult<()> {
        if self.disposed {
            return Err(ProofmarkError::surface("surface used after dispose"));
        }
        Ok(())
    }

    fn pixel_dims(&self) -> ProofmarkResult<(u16, u16)> {
        let w = self.size.width.round().max(1.0) as u32;
        let h = self.size.height.round().max(1.0) as u32;
        let w: u16 = w
            .try_into()
            .map_err(|_| ProofmarkError::surface("surface width exceeds u16"))?;
        let h: u16 = h
            .try_into()
            .map_err(|_| ProofmarkError::surface("surface height exceeds u16"))?;
        Ok((w, h))
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> ProofmarkResult<R>,
    ) -> ProofmarkResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    /// Rasterize the current shape list into a premultiplied RGBA8 frame.
    pub fn snapshot(&mut self) -> ProofmarkResult<OverlayFrame> {
        self.ensure_live()?;
        let (w, h) = self.pixel_dims()?;
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        let shapes = self.shapes.clone();
        self.with_ctx_mut(w, h, |_this, ctx| {
            for shape in &shapes {
                draw_shape(ctx, shape);
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;
        Ok(OverlayFrame {
            width: u32::from(w),
            height: u32::from(h),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    /// Rasterize and encode the overlay as a PNG file.
    pub fn write_snapshot_png(&mut self, path: impl AsRef<Path>) -> ProofmarkResult<()> {
        let frame = self.snapshot()?;
        image::save_buffer_with_format(
            path.as_ref(),
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| ProofmarkError::surface(format!("png encode failed: {e}")))
    }

    /// Whether the current contents are editable (false after a replay load).
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

impl VectorSurface for RasterSurface {
    fn add_shape(&mut self, shape: Shape) -> ProofmarkResult<()> {
        self.ensure_live()?;
        self.shapes.push(shape);
        self.interactive = true;
        Ok(())
    }

    fn clear(&mut self) -> ProofmarkResult<()> {
        self.ensure_live()?;
        self.shapes.clear();
        self.interactive = true;
        Ok(())
    }

    fn shapes(&self) -> ProofmarkResult<Vec<Shape>> {
        self.ensure_live()?;
        Ok(self.shapes.clone())
    }

    fn load(&mut self, shapes: &[Shape], mode: LoadMode) -> ProofmarkResult<()> {
        self.ensure_live()?;
        match mode {
            LoadMode::Editable => {
                self.shapes = shapes.to_vec();
                self.interactive = true;
            }
            LoadMode::Replay => {
                self.shapes = self.replay_style.apply(shapes);
                self.interactive = false;
            }
        }
        Ok(())
    }

    fn resize(&mut self, size: RenderedBox) -> ProofmarkResult<()> {
        self.ensure_live()?;
        if !size.is_measurable() {
            return Err(ProofmarkError::surface(
                "raster surface requires a measurable box",
            ));
        }
        self.size = size;
        self.ctx = None;
        Ok(())
    }

    fn size(&self) -> RenderedBox {
        self.size
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn dispose(&mut self) {
        self.shapes.clear();
        self.ctx = None;
        self.disposed = true;
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Factory producing [`RasterSurface`] instances.
pub struct RasterSurfaceFactory;

impl SurfaceFactory for RasterSurfaceFactory {
    type Surface = RasterSurface;

    fn create(&mut self, size: RenderedBox) -> ProofmarkResult<Self::Surface> {
        RasterSurface::new(size)
    }
}

fn draw_shape(ctx: &mut vello_cpu::RenderContext, shape: &Shape) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match shape {
        Shape::Path(s) => {
            let Some(outline) = polyline_path(&s.points) else {
                return;
            };
            stroke_path(ctx, &outline, &s.stroke, s.stroke_width);
        }
        Shape::Circle(s) => {
            let circle = kurbo::Circle::new((s.left + s.radius, s.top + s.radius), s.radius);
            let path = circle.to_path(0.1);
            if let Some(fill) = &s.fill {
                fill_path(ctx, &path, fill);
            }
            stroke_path(ctx, &path, &s.stroke, s.stroke_width);
        }
        Shape::Rectangle(s) => {
            let rect = kurbo::Rect::new(s.left, s.top, s.left + s.width, s.top + s.height);
            let path = rect.to_path(0.1);
            if let Some(fill) = &s.fill {
                fill_path(ctx, &path, fill);
            }
            stroke_path(ctx, &path, &s.stroke, s.stroke_width);
        }
        Shape::Line(s) => {
            let mut path = kurbo::BezPath::new();
            path.move_to((s.left, s.top));
            path.line_to((s.left + s.width, s.top + s.height));
            stroke_path(ctx, &path, &s.stroke, s.stroke_width);
        }
        Shape::Text(s) => {
            // Anchor box only; glyphs are the host overlay's job.
            let cols = s.text.chars().count().max(1) as f64;
            let rect = kurbo::Rect::new(
                s.left,
                s.top,
                s.left + s.font_size * 0.6 * cols,
                s.top + s.font_size,
            );
            stroke_path(ctx, &rect.to_path(0.1), &s.fill, 1.0);
        }
    }
}

fn polyline_path(points: &[[f64; 2]]) -> Option<kurbo::BezPath> {
    let (first, rest) = points.split_first()?;
    let mut path = kurbo::BezPath::new();
    path.move_to((first[0], first[1]));
    for p in rest {
        path.line_to((p[0], p[1]));
    }
    Some(path)
}

fn fill_path(ctx: &mut vello_cpu::RenderContext, path: &kurbo::BezPath, color: &str) {
    let [r, g, b, a] = css_hex_rgba(color);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    ctx.fill_path(&bezpath_to_cpu(path));
}

fn stroke_path(ctx: &mut vello_cpu::RenderContext, path: &kurbo::BezPath, color: &str, width: f64) {
    let style = kurbo::Stroke::new(width.max(0.1));
    let expanded = kurbo::stroke(
        path.elements().iter().copied(),
        &style,
        &kurbo::StrokeOpts::default(),
        0.1,
    );
    fill_path(ctx, &expanded, color);
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`. Anything else degrades to opaque
/// white with a warning; a bad color must never take the overlay down.
fn css_hex_rgba(color: &str) -> [u8; 4] {
    fn nibble(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        }
    }

    let parse = |hex: &[u8]| -> Option<[u8; 4]> {
        match hex.len() {
            3 => {
                let r = nibble(hex[0])?;
                let g = nibble(hex[1])?;
                let b = nibble(hex[2])?;
                Some([r * 17, g * 17, b * 17, 255])
            }
            6 | 8 => {
                let mut out = [0u8; 4];
                out[3] = 255;
                for (i, pair) in hex.chunks_exact(2).enumerate() {
                    out[i] = nibble(pair[0])? * 16 + nibble(pair[1])?;
                }
                Some(out)
            }
            _ => None,
        }
    };

    match color.strip_prefix('#').and_then(|hex| parse(hex.as_bytes())) {
        Some(rgba) => rgba,
        None => {
            tracing::warn!(color, "unparseable stroke color, rendering as white");
            [255, 255, 255, 255]
        }
    }
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/surface/raster.rs"]
mod tests;
