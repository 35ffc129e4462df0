use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glam::{Vec3, Vec4};

use crate::foundation::core::{Color, Viewport, WHITE};
use crate::foundation::error::{SoftrasError, SoftrasResult};
use crate::mesh::buffer::Mesh;
use crate::mesh::primitives;
use crate::mesh::vertex::Vertex;
use crate::render::framebuffer::{ClearFlags, FrameRGBA};
use crate::render::msaa::MsaaMode;
use crate::render::rasterizer::{PrimitiveMode, RasterStats, Rasterizer, RasterizerOpts};
use crate::scene::camera::Camera;
use crate::scene::drawable::Drawable;
use crate::scene::model::{CHECKER_TEXTURE, InlineMeshDef, MeshDef, ObjectDef, ShaderDef};
use crate::scene::scene::Scene;
use crate::shading::builtin::{
    AlphaBlendShader, AlphaTestShader, BlinnPhongShader, NormalShader, SkyboxShader, UnlitShader,
    VertexColorShader,
};
use crate::shading::program::{FrameContext, Shader, ShaderProgram};
use crate::shading::texture::{Cubemap, Texture};

/// Overrides applied on top of a scene's own settings.
#[derive(Clone, Debug, Default)]
pub struct RenderSessionOpts {
    /// Replaces the scene's MSAA setting.
    pub msaa: Option<MsaaMode>,
    /// Replaces the scene's primitive mode.
    pub primitive: Option<PrimitiveMode>,
    /// Stop each frame after the drawable at this sorted index.
    pub debug_index: Option<usize>,
    /// Worker threads for frame-buffer passes. `None` uses the global rayon pool.
    pub threads: Option<usize>,
}

/// Renders frames of one scene.
///
/// Construction front-loads validation, mesh generation and texture decoding; each
/// [`RenderSession::render_frame`] then only clears, rasterizes and exports.
pub struct RenderSession {
    rasterizer: Rasterizer,
    drawables: Vec<Drawable>,
    camera: Camera,
    frame: FrameContext,
    clear_flags: ClearFlags,
    clear_color: Color,
    pool: Option<rayon::ThreadPool>,
    last_stats: RasterStats,
}

impl RenderSession {
    /// Build a session; relative texture paths resolve against `assets_root`.
    #[tracing::instrument(skip_all, fields(objects = scene.object_count()))]
    pub fn new(
        scene: &Scene,
        assets_root: impl Into<PathBuf>,
        opts: RenderSessionOpts,
    ) -> SoftrasResult<Self> {
        scene.validate()?;
        let assets_root = assets_root.into();
        let vp = scene.viewport();
        let viewport = Viewport::new(vp.width, vp.height)?;

        let pool = match opts.threads {
            Some(n) => Some(build_thread_pool(Some(n))?),
            None => None,
        };

        let mut textures = TextureCache::new(&assets_root);
        let drawables = scene
            .def()
            .objects
            .iter()
            .enumerate()
            .map(|(i, obj)| build_drawable(i, obj, &mut textures))
            .collect::<SoftrasResult<Vec<_>>>()?;

        let rasterizer = Rasterizer::new(
            viewport,
            RasterizerOpts {
                msaa: opts.msaa.unwrap_or(scene.msaa()),
                primitive: opts.primitive.unwrap_or(scene.primitive()),
                debug_index: opts.debug_index,
            },
        );
        tracing::debug!(
            drawables = drawables.len(),
            textures = textures.len(),
            msaa = %rasterizer.opts().msaa,
            "render session ready"
        );

        Ok(Self {
            rasterizer,
            drawables,
            camera: scene.camera(),
            frame: scene.frame_context(),
            clear_flags: scene.clear_flags(),
            clear_color: scene.clear_color(),
            pool,
            last_stats: RasterStats::default(),
        })
    }

    /// Clear, draw every drawable in queue order, resolve and export one frame.
    #[tracing::instrument(skip(self))]
    pub fn render_frame(&mut self) -> FrameRGBA {
        let view_projection = self.camera.view_projection(self.rasterizer.viewport().aspect());
        let mut frame = self.frame;
        frame.camera_position = self.camera.position;
        let (flags, clear_color) = (self.clear_flags, self.clear_color);

        let rasterizer = &mut self.rasterizer;
        let drawables = &mut self.drawables;
        let mut job = move || {
            rasterizer.set_view_projection(view_projection);
            rasterizer.clear(flags, clear_color);
            rasterizer.render(drawables, &frame);
            rasterizer.frame_rgba()
        };
        let out = match &self.pool {
            Some(pool) => pool.install(job),
            None => job(),
        };
        self.last_stats = self.rasterizer.stats();
        out
    }

    /// Depth of the last frame as a gray image.
    pub fn depth_image(&self) -> FrameRGBA {
        self.rasterizer.framebuffer().depth_image()
    }

    /// Counters of the most recent frame.
    pub fn last_stats(&self) -> RasterStats {
        self.last_stats
    }

    /// Camera used by the next frame.
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Move the camera. Takes effect on the next frame.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Light and ambient values passed to shaders.
    pub fn frame_context(&self) -> FrameContext {
        self.frame
    }

    /// Replace the frame context. The camera position is still taken from the camera.
    pub fn set_frame_context(&mut self, frame: FrameContext) {
        self.frame = frame;
    }

    /// Drawables in the order of the last frame.
    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    /// Drawables, for edits between frames. Order is recomputed each frame.
    pub fn drawables_mut(&mut self) -> &mut Vec<Drawable> {
        &mut self.drawables
    }

    /// Underlying rasterizer.
    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    /// Underlying rasterizer, mutably.
    pub fn rasterizer_mut(&mut self) -> &mut Rasterizer {
        &mut self.rasterizer
    }
}

fn build_thread_pool(threads: Option<usize>) -> SoftrasResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SoftrasError::validation(
            "render session 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

/// Decodes each distinct texture once per session.
struct TextureCache<'a> {
    root: &'a Path,
    loaded: HashMap<String, Arc<Texture>>,
}

impl<'a> TextureCache<'a> {
    fn new(root: &'a Path) -> Self {
        Self {
            root,
            loaded: HashMap::new(),
        }
    }

    fn len(&self) -> usize {
        self.loaded.len()
    }

    fn get(&mut self, key: &str) -> SoftrasResult<Arc<Texture>> {
        if let Some(t) = self.loaded.get(key) {
            return Ok(Arc::clone(t));
        }
        let tex = if key == CHECKER_TEXTURE {
            Texture::checkerboard(64, 8, WHITE, Vec4::new(0.25, 0.25, 0.25, 1.0))?
        } else {
            Texture::from_path(self.root.join(key))?
        };
        let tex = Arc::new(tex);
        self.loaded.insert(key.to_string(), Arc::clone(&tex));
        Ok(tex)
    }
}

fn build_drawable(
    index: usize,
    obj: &ObjectDef,
    textures: &mut TextureCache<'_>,
) -> SoftrasResult<Drawable> {
    let name = if obj.name.is_empty() {
        format!("object{index}")
    } else {
        obj.name.clone()
    };
    let mesh = build_mesh(&obj.mesh)?;
    let shader = build_shader(&name, obj, textures)?;

    let mut program = ShaderProgram::from_boxed(shader).with_base_color(obj.base_color);
    obj.state.apply(&mut program.state);

    Ok(Drawable::new(name, mesh.into_shared(), program).with_transform(obj.transform))
}

fn build_mesh(def: &MeshDef) -> SoftrasResult<Mesh> {
    match def {
        MeshDef::Cube => Ok(primitives::cube()),
        MeshDef::Quad => Ok(primitives::quad()),
        MeshDef::Triangle => Ok(primitives::triangle()),
        MeshDef::UvSphere { segments, rings } => primitives::uv_sphere(*segments, *rings),
        MeshDef::Inline(m) => inline_mesh(m),
    }
}

fn inline_mesh(m: &InlineMeshDef) -> SoftrasResult<Mesh> {
    let mut vertices: Vec<Vertex> = m
        .positions
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut v = Vertex::from_position(*p);
            if let Some(uv) = m.uvs.get(i) {
                v.uv = *uv;
            }
            if let Some(n) = m.normals.get(i) {
                v.normal = *n;
            }
            if let Some(c) = m.colors.get(i) {
                v.color = *c;
            }
            v
        })
        .collect();
    if m.normals.is_empty() {
        generate_normals(&mut vertices, &m.indices);
    }
    Mesh::from_parts(vertices, m.indices.clone())
}

/// Area-weighted vertex normals from front-face winding.
fn generate_normals(vertices: &mut [Vertex], indices: &[u32]) {
    let mut acc = vec![Vec3::ZERO; vertices.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= vertices.len() || b >= vertices.len() || c >= vertices.len() {
            continue;
        }
        let (pa, pb, pc) = (vertices[a].position, vertices[b].position, vertices[c].position);
        let n = (pb - pa).cross(pc - pa);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    for (v, n) in vertices.iter_mut().zip(acc) {
        v.normal = n.normalize_or_zero();
    }
}

fn build_shader(
    name: &str,
    obj: &ObjectDef,
    textures: &mut TextureCache<'_>,
) -> SoftrasResult<Box<dyn Shader>> {
    let uses_texture = matches!(
        obj.shader,
        ShaderDef::Unlit
            | ShaderDef::BlinnPhong { .. }
            | ShaderDef::AlphaTest { .. }
            | ShaderDef::AlphaBlend
    );
    let texture = match &obj.texture {
        Some(key) if uses_texture => Some(textures.get(key)?),
        Some(key) => {
            tracing::warn!(object = name, texture = %key, "shader does not sample a texture; ignoring it");
            None
        }
        None => None,
    };

    Ok(match &obj.shader {
        ShaderDef::Unlit => Box::new(UnlitShader { texture }),
        ShaderDef::VertexColor => Box::new(VertexColorShader),
        ShaderDef::BlinnPhong { gloss, specular } => Box::new(BlinnPhongShader {
            gloss: *gloss,
            specular: *specular,
            texture,
        }),
        ShaderDef::AlphaTest { cutoff } => Box::new(AlphaTestShader {
            cutoff: *cutoff,
            texture,
        }),
        ShaderDef::AlphaBlend => Box::new(AlphaBlendShader { texture }),
        ShaderDef::Normal => Box::new(NormalShader),
        ShaderDef::Skybox { faces } => {
            let mut loaded: [Option<Arc<Texture>>; 6] = Default::default();
            for (slot, face) in loaded.iter_mut().zip(faces) {
                *slot = Some(textures.get(face)?);
            }
            Box::new(SkyboxShader {
                cubemap: Arc::new(Cubemap::new(loaded)),
            })
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
