pub mod body;
pub mod camera;
pub mod catalog;
pub mod clock;
pub mod hierarchy;
pub mod input;

pub use body::{Body, BodyID, BodyInfo, CatalogError, OrbitInfo, SolarSystem};
pub use camera::{Camera, PanDirection, ViewPreset};
pub use clock::RotationKnobs;
pub use hierarchy::{draw_system, resolve_transforms, ResolvedBody, ResolvedFrames, SystemRenderer};
pub use input::{InputEvent, InputRouter, NavigationSettings};

/// Everything that input can change. Owned by the render loop and handed to
/// whoever needs it, rather than living in globals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationState {
    pub camera: Camera,
    pub knobs: RotationKnobs,
}
