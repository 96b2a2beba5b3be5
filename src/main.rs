mod actor;
mod camera;
mod config;
mod error;
mod graphics;
mod interactor;
mod logging;
mod math;
mod mesh;
mod render_window;
mod scene;
mod state;
mod vertex;
mod widget;

use actor::Actor;
use config::ViewerConfig;
use druid::{AppLauncher, WindowDesc};
use error::Result;
use interactor::TrackballCamera;
use mesh::CylinderSource;
use render_window::RenderWindow;
use scene::Scene;
use state::AppState;
use widget::SceneWidget;

/// Builds the scene and the render window it is shown in, rendered once
fn build_window(config: &ViewerConfig) -> RenderWindow {
    let mesh = CylinderSource::new(config.resolution).build();
    tracing::info!(
        facets = mesh.side_facet_count(),
        polygons = mesh.polygon_count(),
        "built cylinder mesh"
    );

    let mut actor = Actor::new(mesh);
    actor.property_mut().color = config.surface_color;
    actor.rotate_x(config.rotate_x);
    actor.rotate_y(config.rotate_y);

    let mut scene = Scene::new();
    scene.add_actor(actor);
    scene.set_background(config.background);
    tracing::debug!(
        actors = scene.actors().len(),
        background = ?scene.background(),
        "scene assembled"
    );
    scene.reset_camera();
    scene.camera_mut().zoom(config.zoom);

    let mut window = RenderWindow::new(
        config.title.clone(),
        config.width as usize,
        config.height as usize,
        scene,
    );
    window.render();

    let camera = window.scene().camera();
    tracing::debug!(
        position = ?camera.position(),
        focal_point = ?camera.focal_point(),
        view_up = ?camera.view_up(),
        view_angle = camera.view_angle(),
        "camera framed"
    );
    window
}

/// Main function
pub fn main() -> Result<()> {
    logging::init();

    let config = ViewerConfig::from_command_line(std::env::args_os());
    tracing::info!(?config, "starting viewer");

    let window = build_window(&config);
    let title = window.title().to_string();
    let main_window = WindowDesc::new(SceneWidget::new(window, TrackballCamera::default()))
        .title(title)
        .window_size((config.width as f64, config.height as f64));

    AppLauncher::with_window(main_window).launch(AppState::default())?;

    tracing::info!("window closed");
    Ok(())
}
