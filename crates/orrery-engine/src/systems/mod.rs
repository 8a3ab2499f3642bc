pub mod director;
pub mod info_panel;
pub mod lighting;
pub mod orbit;
pub mod picking;
pub mod render;
pub mod render_loop;
pub mod scene_builder;
