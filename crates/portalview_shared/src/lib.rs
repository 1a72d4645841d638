pub mod entity;
pub mod orientation;
pub mod plane;
pub mod scene;
pub mod surface;
