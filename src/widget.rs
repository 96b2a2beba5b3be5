use crate::actor::Representation;
use crate::interactor::{Modifiers, MouseButton, TrackballCamera};
use crate::render_window::RenderWindow;
use crate::state::AppState;
use druid::widget::prelude::*;
use druid::{commands, piet::InterpolationMode, RenderContext, Widget};

/// Shows a render window's frame and drives its camera from pointer input
pub struct SceneWidget {
    window: RenderWindow,
    style: TrackballCamera,
}

impl SceneWidget {
    pub fn new(window: RenderWindow, style: TrackballCamera) -> Self {
        SceneWidget { window, style }
    }

    fn rerender(&mut self, ctx: &mut EventCtx) {
        self.window.render();
        ctx.request_paint();
    }
}

fn to_button(button: druid::MouseButton) -> Option<MouseButton> {
    match button {
        druid::MouseButton::Left => Some(MouseButton::Left),
        druid::MouseButton::Middle => Some(MouseButton::Middle),
        druid::MouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

impl Widget<AppState> for SceneWidget {
    /// Handle events for the scene widget
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut AppState, _env: &Env) {
        match event {
            Event::WindowConnected => {
                // Request focus to receive keyboard events
                ctx.request_focus();
            }
            Event::KeyDown(key_event) => {
                if let druid::keyboard_types::Key::Character(s) = &key_event.key {
                    match s.as_str() {
                        "r" | "R" => {
                            tracing::debug!("reset camera");
                            self.window.scene_mut().reset_camera();
                            self.rerender(ctx);
                        }
                        "w" | "W" => data.representation = Representation::Wireframe,
                        "s" | "S" => data.representation = Representation::Surface,
                        "q" | "Q" | "e" | "E" => {
                            ctx.submit_command(commands::QUIT_APP);
                        }
                        _ => {}
                    }
                }
            }
            Event::MouseDown(mouse_event) => {
                if let Some(button) = to_button(mouse_event.button) {
                    let modifiers = Modifiers {
                        shift: mouse_event.mods.shift(),
                        ctrl: mouse_event.mods.ctrl(),
                    };
                    let pos = [mouse_event.pos.x, mouse_event.pos.y];
                    if self.style.button_down(button, modifiers, pos) {
                        ctx.set_active(true); // Capture mouse events
                    }
                }
            }
            Event::MouseMove(mouse_event) => {
                let (width, height) = self.window.size();
                let pos = [mouse_event.pos.x, mouse_event.pos.y];
                let camera = self.window.scene_mut().camera_mut();
                if self.style.mouse_move(pos, (width as f64, height as f64), camera) {
                    self.rerender(ctx);
                }
            }
            Event::MouseUp(mouse_event) => {
                if let Some(button) = to_button(mouse_event.button) {
                    if self.style.button_up(button) {
                        ctx.set_active(false);
                    }
                }
            }
            Event::Wheel(wheel_event) => {
                let camera = self.window.scene_mut().camera_mut();
                if self.style.wheel(wheel_event.wheel_delta.y, camera) {
                    self.rerender(ctx);
                }
            }
            _ => {}
        }
    }

    fn lifecycle(
        &mut self,
        _ctx: &mut LifeCycleCtx,
        _event: &LifeCycle,
        _data: &AppState,
        _env: &Env,
    ) {
    }

    fn update(&mut self, ctx: &mut UpdateCtx, old_data: &AppState, data: &AppState, _env: &Env) {
        if old_data.representation != data.representation {
            tracing::debug!(representation = ?data.representation, "switch representation");
            for actor in self.window.scene_mut().actors_mut() {
                actor.property_mut().representation = data.representation;
            }
            self.window.render();
            ctx.request_paint();
        }
    }

    /// Takes all the space offered and keeps the frame the same size
    fn layout(
        &mut self,
        _layout_ctx: &mut LayoutCtx,
        bc: &BoxConstraints,
        _data: &AppState,
        _env: &Env,
    ) -> Size {
        let size = bc.max();
        let (width, height) = (size.width as usize, size.height as usize);
        if self.window.size() != (width, height) {
            tracing::debug!(width, height, "resize render window");
            self.window.set_size(width, height);
            self.window.render();
        }
        size
    }

    /// Paint the last rendered frame
    fn paint(&mut self, ctx: &mut PaintCtx, _data: &AppState, _env: &Env) {
        let frame = self.window.frame();
        if frame.width() == 0 || frame.height() == 0 {
            return;
        }
        let image = match ctx.make_image(
            frame.width(),
            frame.height(),
            frame.pixels(),
            druid::piet::ImageFormat::RgbaSeparate,
        ) {
            Ok(image) => image,
            Err(err) => {
                tracing::error!(%err, "failed to upload frame");
                return;
            }
        };
        let rect = ctx.size().to_rect();
        ctx.draw_image(&image, rect, InterpolationMode::NearestNeighbor);
    }
}
