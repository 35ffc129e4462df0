use std::fmt;

use crate::scene::model::{MeshDef, ObjectDef, SceneDef, ShaderDef};

/// Location of a value inside the scene JSON, rendered as `$.objects[2].mesh`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct JsonPath(Vec<Segment>);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(&'static str),
    Item(usize),
}

impl JsonPath {
    fn key(&self, name: &'static str) -> Self {
        self.with(Segment::Key(name))
    }

    fn item(&self, index: usize) -> Self {
        self.with(Segment::Item(index))
    }

    fn with(&self, seg: Segment) -> Self {
        let mut segs = self.0.clone();
        segs.push(seg);
        Self(segs)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        self.0.iter().try_for_each(|seg| match seg {
            Segment::Key(name) => write!(f, ".{name}"),
            Segment::Item(i) => write!(f, "[{i}]"),
        })
    }
}

/// One rejected value.
#[derive(Debug, Clone)]
pub(crate) struct Issue {
    pub(crate) at: JsonPath,
    pub(crate) message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.at, self.message)
    }
}

/// All issues of a scene, one per line when displayed.
#[derive(Debug, Clone, Default)]
pub(crate) struct SceneIssues {
    pub(crate) issues: Vec<Issue>,
}

impl SceneIssues {
    fn report(&mut self, at: JsonPath, message: impl Into<String>) {
        self.issues.push(Issue {
            at,
            message: message.into(),
        });
    }
}

impl fmt::Display for SceneIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for issue in &self.issues {
            write!(f, "{sep}{issue}")?;
            sep = "\n";
        }
        Ok(())
    }
}

impl std::error::Error for SceneIssues {}

pub(crate) fn validate_scene(def: &SceneDef) -> Result<(), SceneIssues> {
    let root = JsonPath::default();
    let mut out = SceneIssues::default();

    if def.viewport.width == 0 || def.viewport.height == 0 {
        out.report(root.key("viewport"), "width and height must be >= 1");
    }

    if let Err(e) = def.camera.validate() {
        out.report(root.key("camera"), e.to_string());
    }

    if !def.ambient.is_finite() {
        out.report(root.key("ambient"), "ambient color must be finite");
    }
    if !def.light.direction.is_finite() || def.light.direction.length_squared() <= f32::EPSILON {
        out.report(
            root.key("light").key("direction"),
            "light direction must be finite and non-zero",
        );
    }

    let objects = root.key("objects");
    for (i, obj) in def.objects.iter().enumerate() {
        validate_object(obj, &objects.item(i), &mut out);
    }

    if out.issues.is_empty() {
        Ok(())
    } else {
        Err(out)
    }
}

fn validate_object(obj: &ObjectDef, path: &JsonPath, out: &mut SceneIssues) {
    let field = |name: &'static str| path.key(name);

    match &obj.mesh {
        MeshDef::UvSphere { segments, rings } => {
            if *segments < 3 || *rings < 2 {
                out.report(field("mesh"), "uv_sphere needs segments >= 3 and rings >= 2");
            }
        }
        MeshDef::Inline(m) => {
            let n = m.positions.len();
            if m.indices.len() % 3 != 0 {
                let count = m.indices.len();
                out.report(field("mesh"), format!("index count {count} is not a multiple of 3"));
            }
            if let Some(bad) = m.indices.iter().find(|&&i| i as usize >= n) {
                out.report(
                    field("mesh"),
                    format!("index {bad} out of range for {n} positions"),
                );
            }
            for (name, len) in [
                ("uvs", m.uvs.len()),
                ("normals", m.normals.len()),
                ("colors", m.colors.len()),
            ] {
                if len != 0 && len != n {
                    out.report(field("mesh"), format!("{name} has {len} entries, expected {n}"));
                }
            }
        }
        MeshDef::Cube | MeshDef::Quad | MeshDef::Triangle => {}
    }

    match &obj.shader {
        ShaderDef::BlinnPhong { gloss, specular } => {
            if !(gloss.is_finite() && *gloss >= 0.0) || !specular.is_finite() {
                out.report(
                    field("shader"),
                    "blinn_phong gloss must be >= 0 and specular finite",
                );
            }
        }
        ShaderDef::AlphaTest { cutoff } => {
            if !cutoff.is_finite() {
                out.report(field("shader"), "alpha_test cutoff must be finite");
            }
        }
        ShaderDef::Skybox { faces } => {
            if faces.len() != 6 {
                let got = faces.len();
                out.report(field("shader"), format!("skybox needs 6 faces, got {got}"));
            }
        }
        ShaderDef::Unlit | ShaderDef::VertexColor | ShaderDef::AlphaBlend | ShaderDef::Normal => {}
    }

    if let Some(tex) = &obj.texture
        && tex.trim().is_empty()
    {
        out.report(field("texture"), "texture path must be non-empty");
    }

    let t = &obj.transform;
    if !(t.position.is_finite() && t.rotation_deg.is_finite() && t.scale.is_finite()) {
        out.report(field("transform"), "transform components must be finite");
    }
    if !obj.base_color.is_finite() {
        out.report(field("base_color"), "base_color must be finite");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/validate.rs"]
mod tests;
