use kiss3d::camera::Camera;
use kiss3d::event::WindowEvent;
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector3};

use crate::config::CameraConfig;
use crate::model;

// kiss3d wants to own a camera, but all of the navigation lives in the model,
// so this one just mirrors whatever the model camera says. The controller
// does the event handling; all we care about here is the window size.
pub struct FreeCamera {
    // -- position, copied from the model every frame --
    eye: Point3<f32>,
    target: Point3<f32>,
    up: Vector3<f32>,
    look_distance: f64,
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
}

impl FreeCamera {
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut camera = FreeCamera {
            eye: Point3::origin(),
            target: Point3::origin(),
            up: Vector3::y(),
            look_distance: config.look_distance,
            width,
            height,
            fovy: config.fovy_degrees.to_radians() as f32,
            znear: config.znear as f32,
            zfar: config.zfar as f32,
        };
        camera.sync(&model::Camera::default());
        camera
    }

    /// Copies the model camera's position and orientation.
    pub fn sync(&mut self, camera: &model::Camera) {
        self.eye = nalgebra::convert(camera.eye());
        self.target = nalgebra::convert(camera.target(self.look_distance));
        self.up = nalgebra::convert(camera.up().into_inner());
    }

    pub fn zfar(&self) -> f32 {
        self.zfar
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height.max(1) as f32,
            self.fovy,
            self.znear,
            self.zfar,
        )
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }
}

impl Camera for FreeCamera {
    fn handle_event(&mut self, _canvas: &Canvas, event: &WindowEvent) {
        if let WindowEvent::FramebufferSize(w, h) = *event {
            self.width = w;
            self.height = h;
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.eye
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye, &self.target, &self.up)
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}
