//! # Experience
//!
//! [`Experience`] ties a classified room together and drives it one frame at
//! a time. The host forwards normalized pointer, touch, click and resize
//! notifications and calls [`Experience::tick`] once per display refresh.
//!
//! Every tick runs in a fixed order:
//!
//! 1. orbit controls (damped)
//! 2. fan rotation
//! 3. pointer raycast, hover transitions and cursor style
//! 4. hover tween requests, then tween advance
//! 5. render
//!
//! Drawing and host UI effects go through the [`RenderSurface`] and
//! [`HostUi`] seams, so the whole loop runs without a window in tests.
//!
//! ## Usage
//!
//! ```no_run
//! use diorama::prelude::*;
//!
//! struct Headless;
//!
//! impl RenderSurface for Headless {
//!     fn resize(&mut self, _width: u32, _height: u32, _pixel_ratio: f32) {}
//!     fn render(&mut self, _graph: &SceneGraph, _materials: &MaterialLibrary, _camera: &OrbitCamera) {}
//! }
//!
//! # fn main() -> diorama::Result<()> {
//! let graph = diorama::loader::load_room("room.obj")?;
//! let mut experience = Experience::new(graph, &RoomConfig::default(), Headless)?;
//! experience.resize(1280, 720, 1.0);
//! # Ok(())
//! # }
//! ```

use log::info;
use winit::event::DeviceEvent;

use crate::animation::AnimationDriver;
use crate::classify::{Classification, Classifier};
use crate::config::RoomConfig;
use crate::error::Result;
use crate::gfx::{
    camera::{CameraController, OrbitCamera},
    resources::MaterialLibrary,
    scene::SceneGraph,
};
use crate::interaction::{
    CursorStyle, InteractionController, OpenLinkRequest, SocialLinkTable, TickOutcome,
};

const ROTATE_SPEED: f32 = 0.005;
const ZOOM_SPEED: f32 = 0.1;

/// Draws the scene; supplied by the host
pub trait RenderSurface {
    /// Output size in physical pixels and the (already capped) pixel ratio
    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32);

    fn render(&mut self, graph: &SceneGraph, materials: &MaterialLibrary, camera: &OrbitCamera);
}

/// Side effects the host UI layer carries out
pub trait HostUi {
    fn set_cursor(&mut self, cursor: CursorStyle);

    /// Opens `request.url` in a new, unrelated browsing context
    fn open_link(&mut self, request: &OpenLinkRequest);
}

pub struct Experience<S: RenderSurface> {
    graph: SceneGraph,
    materials: MaterialLibrary,
    classification: Classification,
    camera: OrbitCamera,
    controls: CameraController,
    interaction: InteractionController,
    animation: AnimationDriver,
    surface: S,
    max_pixel_ratio: f32,
}

impl<S: RenderSurface> Experience<S> {
    /// Classifies `graph` and prepares every per-frame collaborator
    ///
    /// The camera starts with a square aspect until the first
    /// [`resize`](Self::resize).
    pub fn new(mut graph: SceneGraph, config: &RoomConfig, surface: S) -> Result<Self> {
        config.validate()?;

        let classification = Classifier::new(config).classify(&mut graph);
        let materials = MaterialLibrary::from_config(config);
        let camera = OrbitCamera::from_setup(&config.camera, 1.0);
        let controls =
            CameraController::new(ROTATE_SPEED, ZOOM_SPEED).with_damping(config.camera.damping);
        let interaction = InteractionController::new(
            &classification,
            SocialLinkTable::new(config.social_links.clone()),
        );
        let animation = AnimationDriver::new(&classification, config);

        Ok(Self {
            graph,
            materials,
            classification,
            camera,
            controls,
            interaction,
            animation,
            surface,
            max_pixel_ratio: config.max_pixel_ratio,
        })
    }

    /// Runs one frame at `elapsed` seconds since start
    pub fn tick(&mut self, elapsed: f32, host: &mut dyn HostUi) -> TickOutcome {
        self.controls.update(&mut self.camera);
        self.animation.spin_fans(&mut self.graph, elapsed);

        let outcome = self.interaction.tick(&self.graph, &self.camera);
        self.animation
            .apply_transitions(&self.graph, &outcome.transitions, elapsed);
        host.set_cursor(outcome.cursor);

        self.animation.advance_tweens(&mut self.graph, elapsed);
        self.surface
            .render(&self.graph, &self.materials, &self.camera);

        outcome
    }

    /// Applies a viewport resize to the camera and the surface together
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) {
        let pixel_ratio = device_pixel_ratio.min(self.max_pixel_ratio);
        self.camera.resize_projection(width, height);
        self.surface.resize(width, height, pixel_ratio);
        info!(
            "Viewport resized to {}x{} (pixel ratio {})",
            width, height, pixel_ratio
        );
    }

    /// Pointer position in normalized device coordinates
    pub fn on_pointer_move(&mut self, ndc_x: f32, ndc_y: f32) {
        self.interaction.on_pointer_move(ndc_x, ndc_y);
    }

    pub fn on_touch_start(&mut self, ndc_x: f32, ndc_y: f32) {
        self.interaction.on_pointer_move(ndc_x, ndc_y);
    }

    pub fn on_touch_move(&mut self, ndc_x: f32, ndc_y: f32) {
        self.interaction.on_pointer_move(ndc_x, ndc_y);
    }

    /// Touch release acts as a click
    pub fn on_touch_end(&mut self, host: &mut dyn HostUi) {
        self.on_primary_action(host);
    }

    /// Click: opens the link of the current nearest hit, if any
    pub fn on_primary_action(&mut self, host: &mut dyn HostUi) {
        if let Some(request) = self.interaction.on_primary_action(&self.graph) {
            host.open_link(&request);
        }
    }

    /// Raw device input for the orbit controls
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        self.controls.process_events(event);
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn controls_mut(&mut self) -> &mut CameraController {
        &mut self.controls
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn animation(&self) -> &AnimationDriver {
        &self.animation
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::picking::Aabb;
    use crate::gfx::scene::{NodeId, SceneNode, Transform};
    use crate::interaction::InteractionState;
    use cgmath::{InnerSpace, Vector3};

    #[derive(Default)]
    struct RecordingSurface {
        resizes: Vec<(u32, u32, f32)>,
        /// Camera aspect seen by each render
        frames: Vec<f32>,
    }

    impl RenderSurface for RecordingSurface {
        fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
            self.resizes.push((width, height, pixel_ratio));
        }

        fn render(&mut self, _graph: &SceneGraph, _materials: &MaterialLibrary, camera: &OrbitCamera) {
            self.frames.push(camera.aspect);
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        cursors: Vec<CursorStyle>,
        links: Vec<OpenLinkRequest>,
    }

    impl HostUi for RecordingHost {
        fn set_cursor(&mut self, cursor: CursorStyle) {
            self.cursors.push(cursor);
        }

        fn open_link(&mut self, request: &OpenLinkRequest) {
            self.links.push(request.clone());
        }
    }

    const STEAM: &str = "Steam_Logo_Fourth_Raycaster_Hover_Pointer";
    const FAN: &str = "Cooler4_Second";

    fn unit_box() -> Aabb {
        Aabb::new(Vector3::new(-0.5, -0.5, -0.5), Vector3::new(0.5, 0.5, 0.5))
    }

    // The Steam logo sits on the camera target, so the screen centre hits it
    fn room() -> Experience<RecordingSurface> {
        let config = RoomConfig::default();
        let mut graph = SceneGraph::new("Room");
        let root = graph.root();
        graph.add_node(
            root,
            SceneNode::mesh(STEAM, unit_box())
                .with_transform(Transform::from_position(config.camera.target)),
        );
        graph.add_node(
            root,
            SceneNode::mesh(FAN, unit_box())
                .with_transform(Transform::from_position(Vector3::new(0.0, -40.0, 0.0))),
        );
        graph.add_node(root, SceneNode::mesh("Water_Tank", unit_box()));

        Experience::new(graph, &config, RecordingSurface::default()).unwrap()
    }

    fn node(experience: &Experience<RecordingSurface>, name: &str) -> NodeId {
        experience.graph().find_by_name(name).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = RoomConfig::default().hover(crate::config::HoverTweenConfig {
            enter_duration: 0.0,
            ..Default::default()
        });
        let result = Experience::new(SceneGraph::new("Room"), &config, RecordingSurface::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_resize_updates_camera_and_surface_before_render() {
        let mut experience = room();
        let mut host = RecordingHost::default();

        experience.resize(800, 400, 3.0);
        experience.tick(0.0, &mut host);

        assert_eq!(experience.surface().resizes, vec![(800, 400, 2.0)]);
        assert_eq!(experience.surface().frames, vec![2.0]);
    }

    #[test]
    fn test_pixel_ratio_below_cap_is_kept() {
        let mut experience = room();
        experience.resize(1024, 768, 1.5);
        assert_eq!(experience.surface().resizes, vec![(1024, 768, 1.5)]);
    }

    #[test]
    fn test_hover_cycle_returns_to_baseline() {
        let mut experience = room();
        let mut host = RecordingHost::default();
        let steam = node(&experience, STEAM);
        let baseline = *experience.animation().baseline(steam).unwrap();

        experience.on_pointer_move(0.0, 0.0);
        let outcome = experience.tick(0.0, &mut host);
        assert_eq!(
            outcome.transitions,
            vec![crate::interaction::HoverTransition::Enter(steam)]
        );
        assert_eq!(host.cursors.last(), Some(&CursorStyle::Pointer));

        experience.tick(0.25, &mut host);
        let grown = experience.graph()[steam].transform.scale;
        assert!(grown.x > baseline.scale.x);

        experience.on_pointer_move(0.95, 0.95);
        experience.tick(0.3, &mut host);
        assert_eq!(experience.interaction().state(), InteractionState::Idle);
        assert_eq!(host.cursors.last(), Some(&CursorStyle::Default));

        experience.tick(1.0, &mut host);
        let transform = experience.graph()[steam].transform;
        assert_eq!(transform.scale, baseline.scale);
        assert_eq!(transform.position, baseline.position);
        assert!(experience.animation().tweens().is_empty());
    }

    #[test]
    fn test_cursor_is_reported_every_tick() {
        let mut experience = room();
        let mut host = RecordingHost::default();

        experience.on_pointer_move(0.0, 0.0);
        for frame in 0..4 {
            experience.tick(frame as f32 / 60.0, &mut host);
        }
        assert_eq!(host.cursors, vec![CursorStyle::Pointer; 4]);
        assert_eq!(experience.surface().frames.len(), 4);
    }

    #[test]
    fn test_click_opens_steam_link_once() {
        let mut experience = room();
        let mut host = RecordingHost::default();

        experience.on_pointer_move(0.0, 0.0);
        experience.tick(0.0, &mut host);
        experience.on_primary_action(&mut host);

        assert_eq!(host.links.len(), 1);
        assert_eq!(host.links[0].url, "https://steamcommunity.com/id/2201763");
        assert!(host.links[0].no_opener && host.links[0].no_referrer);
    }

    #[test]
    fn test_touch_acts_like_pointer_and_click() {
        let mut experience = room();
        let mut host = RecordingHost::default();

        experience.on_touch_start(0.9, -0.9);
        experience.tick(0.0, &mut host);
        experience.on_touch_end(&mut host);
        assert!(host.links.is_empty());

        experience.on_touch_move(0.0, 0.0);
        experience.tick(0.016, &mut host);
        experience.on_touch_end(&mut host);
        assert_eq!(host.links.len(), 1);
    }

    #[test]
    fn test_click_before_first_tick_is_noop() {
        let mut experience = room();
        let mut host = RecordingHost::default();

        experience.on_pointer_move(0.0, 0.0);
        experience.on_primary_action(&mut host);
        assert!(host.links.is_empty());
    }

    #[test]
    fn test_fans_spin_and_materials_assigned() {
        let mut experience = room();
        let mut host = RecordingHost::default();
        let fan = node(&experience, FAN);
        let water = node(&experience, "Water_Tank");

        for frame in 0..10 {
            experience.tick(frame as f32 / 60.0, &mut host);
        }

        assert!((experience.graph()[fan].transform.rotation.z - 1.0).abs() < 1e-5);
        assert_eq!(
            experience.graph()[water].material().map(String::as_str),
            Some(crate::gfx::resources::material::WATER)
        );
    }

    #[test]
    fn test_damped_controls_move_camera_gradually() {
        let mut experience = room();
        let mut host = RecordingHost::default();
        let start = experience.camera().eye;

        experience.controls_mut().rotate((-20.0, 0.0));
        experience.tick(0.0, &mut host);
        let first = (experience.camera().eye - start).magnitude();
        experience.tick(0.016, &mut host);
        let second = (experience.camera().eye - start).magnitude();

        assert!(first > 0.0);
        assert!(second > first);
    }
}
