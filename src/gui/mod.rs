use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::light::Light;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};
use nalgebra::Point3;

use self::controller::Controller;
use self::view::View;
use crate::config::Config;
use crate::model::clock::wall_clock_seconds;
use crate::model::{resolve_transforms, InputRouter, SimulationState, SolarSystem};

mod camera;
mod controller;
mod renderers;
mod view;

/// A single point light where the star is. The root body always sits at the
/// origin, so bodies get a day side and a night side.
///
/// kiss3d can't switch lighting off for a single node, so the star itself is
/// only shaded by its ambient term.
pub fn star_light() -> Light {
    Light::Absolute(Point3::origin())
}

pub struct Simulation {
    system: SolarSystem,
    state: SimulationState,
    router: InputRouter,
    view: View,
    controller: Controller,
}

impl Simulation {
    pub fn new(system: SolarSystem, config: &Config, window: &mut Window) -> Self {
        let state = SimulationState {
            knobs: config.knobs(),
            ..SimulationState::default()
        };
        Self {
            view: View::new(&system, config, window),
            system,
            state,
            router: InputRouter::new(config.navigation()),
            controller: Controller::new(),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        // Process events
        for event in events.iter() {
            if let Some(input) = self.controller.translate(&event.value) {
                self.router.route(input, &mut self.state);
            }
        }
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());

        // One clock reading for the whole frame
        let now = wall_clock_seconds();
        let frames = resolve_transforms(&self.system, &self.state.knobs, now);
        self.view.render(
            window,
            &self.system,
            &frames,
            &self.state,
            self.controller.fps(),
        );
        self.controller.increment_frame_counter();
    }
}
