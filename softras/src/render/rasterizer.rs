use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::foundation::core::{Color, Viewport};
use crate::foundation::math::{DEGENERATE_AREA_EPSILON, INSIDE_EPSILON};
use crate::pipeline::blend::{blend_colors, depth_test};
use crate::pipeline::clip::{clip_triangle, fan_triangles};
use crate::render::framebuffer::{ClearFlags, FrameBuffer, FrameRGBA};
use crate::render::line::BresenhamLine;
use crate::render::msaa::MsaaMode;
use crate::scene::drawable::{Drawable, sort_drawables};
use crate::shading::program::{FrameContext, ShaderProgram, Uniforms};
use crate::shading::state::CullMode;
use crate::shading::varyings::VertexOutput;
use crate::transform::space::{ScreenPoint, barycentric, clip_to_screen, perspective_correct, signed_area};

/// How index triples are turned into pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveMode {
    /// Filled, shaded triangles.
    #[default]
    Triangle,
    /// Wireframe: clipped polygon outlines in the program's base color, without depth testing.
    Line,
}

/// Options for [`Rasterizer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterizerOpts {
    /// Sub-samples per pixel.
    pub msaa: MsaaMode,
    /// Filled triangles or outlines.
    pub primitive: PrimitiveMode,
    /// When set, [`Rasterizer::render`] stops after the drawable at this sorted index.
    pub debug_index: Option<usize>,
}

/// Counters for the most recent [`Rasterizer::render`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Drawables processed.
    pub drawables: u64,
    /// Index triples read from drawables.
    pub triangles_submitted: u64,
    /// Triangles with no part inside the frustum.
    pub triangles_clipped: u64,
    /// Post-clip fan triangles rejected by the cull test or for zero area.
    pub triangles_culled: u64,
    /// Post-clip fan triangles that reached pixel iteration.
    pub triangles_rasterized: u64,
    /// Fragment stage invocations. Under MSAA this counts pixels, not samples.
    pub fragments_shaded: u64,
    /// Fragments the shader discarded.
    pub fragments_discarded: u64,
    /// Samples that failed the depth test.
    pub depth_rejected: u64,
    /// Pixels written by wireframe outlines.
    pub line_pixels: u64,
}

/// Everything fixed for the duration of one drawable's raster work.
struct DrawSetup<'a> {
    program: &'a ShaderProgram,
    uniforms: Uniforms<'a>,
    viewport: Viewport,
    offsets: &'static [Vec2],
    pad: f32,
}

/// One triangle edge as a coverage test.
///
/// Endpoints are stored in a canonical order, so every triangle that shares the edge evaluates the
/// same distance for a sample and only the side sign differs. Samples within [`INSIDE_EPSILON`]
/// pixels of the edge are covered only when the edge is owned: its inward normal points towards
/// `+x`, or towards `+y` for horizontal edges. Of two triangles sharing an edge exactly one owns
/// it, so no sample is written twice and none is dropped.
#[derive(Clone, Copy, Debug)]
struct Edge {
    origin: Vec2,
    dir: Vec2,
    inv_len: f32,
    inside: f32,
    owned: bool,
}

impl Edge {
    fn new(a: Vec2, b: Vec2, opposite: Vec2) -> Self {
        let (origin, end) = if (a.x, a.y) <= (b.x, b.y) { (a, b) } else { (b, a) };
        let dir = end - origin;
        let inside = if dir.perp_dot(opposite - origin) >= 0.0 {
            1.0
        } else {
            -1.0
        };
        let inward = dir.perp() * inside;
        Self {
            origin,
            dir,
            inv_len: dir.length_recip(),
            inside,
            owned: inward.x > 0.0 || (inward.x == 0.0 && inward.y > 0.0),
        }
    }

    /// Signed distance of `p` from the edge in pixels, positive on the triangle's side.
    fn distance(&self, p: Vec2) -> f32 {
        self.dir.perp_dot(p - self.origin) * self.inv_len * self.inside
    }

    fn covers(&self, p: Vec2) -> bool {
        let d = self.distance(p);
        d > INSIDE_EPSILON || (self.owned && d >= -INSIDE_EPSILON)
    }
}

/// CPU rasterization pipeline bound to one frame buffer.
///
/// Drawables are processed one at a time on the calling thread: vertex stage, clipping, culling,
/// coverage, depth test, fragment stage, blend and write.
#[derive(Debug)]
pub struct Rasterizer {
    viewport: Viewport,
    opts: RasterizerOpts,
    framebuffer: FrameBuffer,
    view_projection: Mat4,
    stats: RasterStats,
    vertex_cache: Vec<VertexOutput>,
}

impl Rasterizer {
    /// Allocate the frame buffer for `viewport` and `opts.msaa`.
    pub fn new(viewport: Viewport, opts: RasterizerOpts) -> Self {
        Self {
            viewport,
            opts,
            framebuffer: FrameBuffer::new(viewport, opts.msaa),
            view_projection: Mat4::IDENTITY,
            stats: RasterStats::default(),
            vertex_cache: Vec::new(),
        }
    }

    /// Current target extents.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current options.
    pub fn opts(&self) -> RasterizerOpts {
        self.opts
    }

    /// The frame buffer written by draws.
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Counters of the last [`Rasterizer::render`], or since the last one for direct draws.
    pub fn stats(&self) -> RasterStats {
        self.stats
    }

    /// Camera matrix used for subsequent draws.
    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    /// Set the view-projection matrix used by the next draws.
    pub fn set_view_projection(&mut self, view_projection: Mat4) {
        self.view_projection = view_projection;
    }

    /// Reallocate the frame buffer if the viewport changed.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.framebuffer = FrameBuffer::new(viewport, self.opts.msaa);
        }
    }

    /// Switch sample layout. Reallocates and so clears the frame buffer.
    pub fn set_msaa(&mut self, msaa: MsaaMode) {
        if msaa != self.opts.msaa {
            self.opts.msaa = msaa;
            self.framebuffer = FrameBuffer::new(self.viewport, msaa);
        }
    }

    /// Switch between filled and wireframe drawing.
    pub fn set_primitive_mode(&mut self, primitive: PrimitiveMode) {
        self.opts.primitive = primitive;
    }

    /// Limit [`Rasterizer::render`] to the first `debug_index + 1` sorted drawables.
    pub fn set_debug_index(&mut self, debug_index: Option<usize>) {
        self.opts.debug_index = debug_index;
    }

    /// Clear with depth reset to `+inf`.
    pub fn clear(&mut self, flags: ClearFlags, color: Color) {
        self.clear_with_depth(flags, color, f32::INFINITY);
    }

    /// Clear with an explicit depth value.
    pub fn clear_with_depth(&mut self, flags: ClearFlags, color: Color, depth: f32) {
        self.framebuffer.clear(flags, color, depth);
    }

    /// Sort `drawables` into draw order, draw them, and resolve the frame buffer.
    #[tracing::instrument(skip(self, drawables, frame), fields(drawables = drawables.len()))]
    pub fn render(&mut self, drawables: &mut [Drawable], frame: &FrameContext) {
        self.stats = RasterStats::default();
        sort_drawables(drawables, frame.camera_position);

        let limit = self
            .opts
            .debug_index
            .map_or(drawables.len(), |i| (i + 1).min(drawables.len()));
        for drawable in &mut drawables[..limit] {
            self.draw(drawable, frame);
        }

        self.resolve();
        tracing::debug!(stats = ?self.stats, "frame rasterized");
    }

    /// Run one drawable through the pipeline. Does not resolve.
    pub fn draw(&mut self, drawable: &mut Drawable, frame: &FrameContext) {
        self.stats.drawables += 1;
        drawable
            .program
            .bind_matrices(drawable.model_matrix(), self.view_projection);

        let program = &drawable.program;
        let setup = DrawSetup {
            program,
            uniforms: program.uniforms(frame),
            viewport: self.viewport,
            offsets: self.opts.msaa.offsets(),
            pad: if self.opts.msaa.is_enabled() { 0.5 } else { 0.0 },
        };
        let mesh = drawable.mesh();
        tracing::trace!(
            name = %drawable.name,
            shader = program.shader().name(),
            triangles = mesh.indices().triangle_count(),
            queue = %program.state.queue,
            "draw"
        );

        let mut cache = std::mem::take(&mut self.vertex_cache);
        cache.clear();
        let shader = program.shader();
        cache.extend(
            mesh.vertices()
                .as_slice()
                .iter()
                .map(|v| shader.vertex(v, &setup.uniforms)),
        );

        for [i0, i1, i2] in mesh.indices().triangles() {
            self.stats.triangles_submitted += 1;
            let tri = [cache[i0 as usize], cache[i1 as usize], cache[i2 as usize]];
            let poly = clip_triangle(&tri);
            if poly.is_empty() {
                self.stats.triangles_clipped += 1;
                continue;
            }
            match self.opts.primitive {
                PrimitiveMode::Triangle => {
                    for fan in fan_triangles(&poly) {
                        self.rasterize_triangle(&setup, fan);
                    }
                }
                PrimitiveMode::Line => self.outline_polygon(&setup, &poly),
            }
        }

        self.vertex_cache = cache;
    }

    /// Average MSAA sub-samples into the resolved buffer.
    pub fn resolve(&mut self) {
        self.framebuffer.resolve();
    }

    /// Export the resolved buffer.
    pub fn frame_rgba(&self) -> FrameRGBA {
        self.framebuffer.to_frame_rgba()
    }

    fn rasterize_triangle(&mut self, setup: &DrawSetup<'_>, v: [&VertexOutput; 3]) {
        let sp: [ScreenPoint; 3] = v.map(|o| clip_to_screen(o.position_cs, setup.viewport));
        let (p0, p1, p2) = (sp[0].xy(), sp[1].xy(), sp[2].xy());

        // Clockwise on screen is front facing.
        let area = signed_area(p0, p1, p2);
        let culled = match setup.program.state.cull {
            CullMode::None => false,
            CullMode::Back => area > 0.0,
            CullMode::Front => area < 0.0,
        };
        if culled || area.abs() < DEGENERATE_AREA_EPSILON || !area.is_finite() {
            self.stats.triangles_culled += 1;
            return;
        }

        let pad = Vec2::splat(setup.pad);
        let lo = p0.min(p1).min(p2) - pad;
        let hi = p0.max(p1).max(p2) + pad;
        let x0 = lo.x.floor().max(0.0);
        let y0 = lo.y.floor().max(0.0);
        let x1 = hi.x.ceil().min(setup.viewport.width as f32 - 1.0);
        let y1 = hi.y.ceil().min(setup.viewport.height as f32 - 1.0);
        if !(x0 <= x1 && y0 <= y1) {
            self.stats.triangles_culled += 1;
            return;
        }
        self.stats.triangles_rasterized += 1;

        let edges = [
            Edge::new(p1, p2, p0),
            Edge::new(p2, p0, p1),
            Edge::new(p0, p1, p2),
        ];
        let depths = Vec3::new(sp[0].depth(), sp[1].depth(), sp[2].depth());
        let clip_w = Vec3::new(sp[0].clip_w(), sp[1].clip_w(), sp[2].clip_w());
        let state = setup.program.state;
        let shader = setup.program.shader();

        let mut sample_depth = [0.0f32; 8];
        for y in y0 as u32..=y1 as u32 {
            for x in x0 as u32..=x1 as u32 {
                let pixel = Vec2::new(x as f32, y as f32);
                let mut covered = 0u8;
                let mut shade_bary = None;

                for (s, offset) in setup.offsets.iter().enumerate() {
                    let sample = pixel + *offset;
                    if !edges.iter().all(|e| e.covers(sample)) {
                        continue;
                    }
                    let bary = barycentric(sample, p0, p1, p2);
                    let depth = bary.dot(depths);
                    let stored = self
                        .framebuffer
                        .depth_sample(x, y, s)
                        .unwrap_or(f32::INFINITY);
                    if !depth_test(depth, stored, state.z_test) {
                        self.stats.depth_rejected += 1;
                        continue;
                    }
                    covered |= 1 << s;
                    sample_depth[s] = depth;
                    shade_bary.get_or_insert(bary);
                }

                let Some(bary) = shade_bary else {
                    continue;
                };
                let weights = perspective_correct(bary, clip_w);
                let input = VertexOutput::interpolate(v, weights);
                self.stats.fragments_shaded += 1;
                let Some(src) = shader.fragment(&input, &setup.uniforms) else {
                    self.stats.fragments_discarded += 1;
                    continue;
                };

                for s in (0..setup.offsets.len()).filter(|s| covered & (1 << s) != 0) {
                    let Some(dst) = self.framebuffer.color_sample(x, y, s) else {
                        continue;
                    };
                    let out = blend_colors(src, dst, state.blend);
                    let depth = state.z_write.then_some(sample_depth[s]);
                    self.framebuffer.write_sample(x, y, s, out, depth);
                }
            }
        }
    }

    fn outline_polygon(&mut self, setup: &DrawSetup<'_>, poly: &[VertexOutput]) {
        let color = setup.program.base_color;
        let n = poly.len();
        let points: Vec<(i32, i32)> = poly
            .iter()
            .map(|o| {
                let p = clip_to_screen(o.position_cs, setup.viewport).xy().round();
                (p.x as i32, p.y as i32)
            })
            .collect();
        for i in 0..n {
            for (x, y) in BresenhamLine::new(points[i], points[(i + 1) % n]) {
                if x < 0 || y < 0 {
                    continue;
                }
                let (x, y) = (x as u32, y as u32);
                if x < setup.viewport.width && y < setup.viewport.height {
                    self.framebuffer.set_pixel(x, y, color);
                    self.stats.line_pixels += 1;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/rasterizer.rs"]
mod tests;
