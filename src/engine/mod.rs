pub mod models;
pub mod render;
pub mod render_profiles;
pub mod view;
