pub mod portal;
pub mod settings;
pub mod subview;
pub mod view;
