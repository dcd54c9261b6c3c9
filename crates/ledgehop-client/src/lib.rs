pub mod app;
pub mod assets;
pub mod audio;
pub mod input;
pub mod renderer;
pub mod settings;
