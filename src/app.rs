use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, MouseButton, Touch, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorIcon, Window, WindowId},
};

use crate::config::RoomConfig;
use crate::error::{DioramaError, Result};
use crate::experience::{Experience, HostUi, RenderSurface};
use crate::gfx::scene::SceneGraph;
use crate::interaction::{normalize_pointer, CursorStyle, OpenLinkRequest};

// Link callback type
pub type LinkCallback = Box<dyn FnMut(&OpenLinkRequest)>;

/// Window host driving an [`Experience`] from winit events
pub struct DioramaApp<S: RenderSurface> {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState<S>,
}

struct AppState<S: RenderSurface> {
    window: Option<Arc<Window>>,
    experience: Experience<S>,
    on_link: Option<LinkCallback>,
    title: String,
    started: Instant,
    error: Option<DioramaError>,
}

/// Forwards cursor and link requests to the window and the link callback
struct WindowHost<'a> {
    window: &'a Window,
    on_link: &'a mut Option<LinkCallback>,
}

impl HostUi for WindowHost<'_> {
    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.window.set_cursor(match cursor {
            CursorStyle::Default => CursorIcon::Default,
            CursorStyle::Pointer => CursorIcon::Pointer,
        });
    }

    fn open_link(&mut self, request: &OpenLinkRequest) {
        match self.on_link.as_mut() {
            Some(callback) => callback(request),
            None => info!("Open link requested: {}", request.url),
        }
    }
}

impl<S: RenderSurface> DioramaApp<S> {
    /// Classifies `graph` and prepares the window host
    pub fn new(graph: SceneGraph, config: &RoomConfig, surface: S) -> Result<Self> {
        let event_loop = EventLoop::new()?;
        let experience = Experience::new(graph, config, surface)?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                experience,
                on_link: None,
                title: "Diorama".to_string(),
                started: Instant::now(),
                error: None,
            },
        })
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.app_state.title = title.to_string();
        self
    }

    /// Set the handler for external link requests; they are logged otherwise
    pub fn on_link<F>(&mut self, callback: F)
    where
        F: FnMut(&OpenLinkRequest) + 'static,
    {
        self.app_state.on_link = Some(Box::new(callback));
    }

    pub fn experience(&self) -> &Experience<S> {
        &self.app_state.experience
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> Result<()> {
        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<S: RenderSurface> AppState<S> {
    fn pointer_to_ndc(&self, window: &Window, position: PhysicalPosition<f64>) -> (f32, f32) {
        let PhysicalSize { width, height } = window.inner_size();
        normalize_pointer(position.x, position.y, width, height)
    }

    fn handle_touch(&mut self, window: &Window, touch: Touch) {
        let (x, y) = self.pointer_to_ndc(window, touch.location);
        match touch.phase {
            TouchPhase::Started => self.experience.on_touch_start(x, y),
            TouchPhase::Moved => self.experience.on_touch_move(x, y),
            TouchPhase::Ended => {
                let mut host = WindowHost {
                    window,
                    on_link: &mut self.on_link,
                };
                self.experience.on_touch_end(&mut host);
            }
            TouchPhase::Cancelled => {}
        }
    }
}

impl<S: RenderSurface> ApplicationHandler for AppState<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(
            Window::default_attributes()
                .with_title(self.title.clone())
                .with_inner_size(LogicalSize::new(1200, 800)),
        ) {
            Ok(window) => {
                let window = Arc::new(window);
                let PhysicalSize { width, height } = window.inner_size();
                self.experience
                    .resize(width, height, window.scale_factor() as f32);
                self.started = Instant::now();
                self.window = Some(window);
            }
            Err(err) => {
                self.error = Some(err.into());
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.experience
                    .resize(width, height, window.scale_factor() as f32);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let PhysicalSize { width, height } = window.inner_size();
                self.experience.resize(width, height, scale_factor as f32);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = self.pointer_to_ndc(&window, position);
                self.experience.on_pointer_move(x, y);
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => {
                let mut host = WindowHost {
                    window: &window,
                    on_link: &mut self.on_link,
                };
                self.experience.on_primary_action(&mut host);
            }
            WindowEvent::Touch(touch) => self.handle_touch(&window, touch),
            WindowEvent::RedrawRequested => {
                let elapsed = self.started.elapsed().as_secs_f32();
                let mut host = WindowHost {
                    window: &window,
                    on_link: &mut self.on_link,
                };
                self.experience.tick(elapsed, &mut host);
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        self.experience.process_device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        debug!(
            "Exiting after {:.1}s",
            self.started.elapsed().as_secs_f32()
        );
    }
}
