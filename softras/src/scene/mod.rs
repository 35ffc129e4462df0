pub(crate) mod camera;
pub(crate) mod drawable;
pub(crate) mod model;
pub(crate) mod scene;
pub(crate) mod validate;
