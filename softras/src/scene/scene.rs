use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Color, Viewport};
use crate::foundation::error::{SoftrasError, SoftrasResult};
use crate::render::framebuffer::ClearFlags;
use crate::render::msaa::MsaaMode;
use crate::render::rasterizer::PrimitiveMode;
use crate::scene::camera::Camera;
use crate::scene::model::SceneDef;
use crate::scene::validate::validate_scene;
use crate::shading::program::FrameContext;

/// JSON-facing scene description: viewport, camera, lighting, clear settings and objects.
///
/// Validated and turned into drawables when constructing a
/// [`crate::session::render_session::RenderSession`].
#[derive(Debug, Clone)]
pub struct Scene {
    def: SceneDef,
}

impl Scene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SoftrasResult<Self> {
        let def: SceneDef = serde_json::from_reader(r)
            .map_err(|e| SoftrasError::serde(format!("parse scene JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a scene from a JSON string.
    pub fn from_json_str(s: &str) -> SoftrasResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a scene from a JSON file on disk.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> SoftrasResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SoftrasError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check camera, viewport, meshes and shader parameters; reports every problem at once.
    pub fn validate(&self) -> SoftrasResult<()> {
        validate_scene(&self.def)
            .map_err(|e| SoftrasError::validation(format!("scene validation failed: {e}")))
    }

    /// Target size.
    pub fn viewport(&self) -> Viewport {
        self.def.viewport
    }

    /// Initial camera.
    pub fn camera(&self) -> Camera {
        self.def.camera
    }

    /// Requested sample layout.
    pub fn msaa(&self) -> MsaaMode {
        self.def.msaa
    }

    /// Filled or wireframe.
    pub fn primitive(&self) -> PrimitiveMode {
        self.def.primitive
    }

    /// Buffers cleared before each frame.
    pub fn clear_flags(&self) -> ClearFlags {
        self.def.clear.flags.to_flags()
    }

    /// Clear color.
    pub fn clear_color(&self) -> Color {
        self.def.clear.color
    }

    /// Number of objects in the scene.
    pub fn object_count(&self) -> usize {
        self.def.objects.len()
    }

    /// Per-frame shading inputs derived from the scene's camera and lights.
    pub fn frame_context(&self) -> FrameContext {
        FrameContext {
            ambient: self.def.ambient,
            light: self.def.light,
            camera_position: self.def.camera.position,
        }
    }

    pub(crate) fn def(&self) -> &SceneDef {
        &self.def
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scene.rs"]
mod tests;
