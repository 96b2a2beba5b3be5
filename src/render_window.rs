use crate::graphics::Framebuffer;
use crate::scene::Scene;

/// The output surface: owns the scene it shows and the last rendered frame
#[derive(Debug, Clone)]
pub struct RenderWindow {
    title: String,
    scene: Scene,
    frame: Framebuffer,
}

impl RenderWindow {
    pub fn new(title: impl Into<String>, width: usize, height: usize, scene: Scene) -> Self {
        RenderWindow {
            title: title.into(),
            scene,
            frame: Framebuffer::new(width, height),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Width and height in pixels
    pub fn size(&self) -> (usize, usize) {
        (self.frame.width(), self.frame.height())
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.frame.resize(width, height);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    /// Renders the scene into the window's frame
    pub fn render(&mut self) {
        self.scene.render(&mut self.frame);
        tracing::trace!(width = self.frame.width(), height = self.frame.height(), "rendered frame");
    }
}
