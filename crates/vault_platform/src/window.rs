use std::sync::Arc;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Vault Run".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// The simulation clamps against a fixed display, so the window is not resizable.
pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, String> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_resizable(false)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

    let window = event_loop
        .create_window(attrs)
        .map_err(|e| format!("Failed to create window: {e}"))?;
    log::debug!("Window '{}' opened", config.title);
    Ok(Arc::new(window))
}
