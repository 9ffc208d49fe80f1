use nalgebra::Point3;
use thiserror::Error;
use tracing::debug;

/// Orbits are spread out by this much after compression, so that the inner
/// planets don't all sit inside the star.
pub const ORBIT_RADIUS_FACTOR: f64 = 10.0;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

// All the immutable info about a body, in catalog units
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub name: String,
    pub radius: f64,
    // degrees
    pub tilt: f64,
    // rotation period around its own axis; zero means it doesn't spin
    pub period: f64,
    pub color: Point3<f32>,
}

// Catalog description of a circular orbit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitInfo {
    // degrees
    pub inclination: f64,
    pub radius: f64,
    pub period: f64,
}

#[derive(Debug, Clone)]
pub struct Orbit {
    pub info: OrbitInfo,
    display_radius: f64,
}

impl Orbit {
    fn new(info: OrbitInfo) -> Self {
        Orbit {
            info,
            display_radius: shape_orbit_radius(info.radius),
        }
    }

    /// Radius of the orbit in scene units; `info.radius` shaped exactly once.
    pub fn display_radius(&self) -> f64 {
        self.display_radius
    }
}

#[derive(Debug, Clone)]
pub enum BodyState {
    FixedAtOrigin,
    Orbiting { parent_id: BodyID, orbit: Orbit },
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub info: BodyInfo,
    pub state: BodyState,
    display_radius: f64,
    children: Vec<BodyID>,
}

impl Body {
    fn new(id: BodyID, info: BodyInfo, state: BodyState) -> Self {
        Body {
            id,
            display_radius: shape_body_radius(info.radius),
            info,
            state,
            children: vec![],
        }
    }

    pub fn parent_id(&self) -> Option<BodyID> {
        match self.state {
            BodyState::FixedAtOrigin => None,
            BodyState::Orbiting { parent_id, .. } => Some(parent_id),
        }
    }

    pub fn orbit(&self) -> Option<&Orbit> {
        match &self.state {
            BodyState::FixedAtOrigin => None,
            BodyState::Orbiting { orbit, .. } => Some(orbit),
        }
    }

    /// Radius of the body in scene units; `info.radius` shaped exactly once.
    pub fn display_radius(&self) -> f64 {
        self.display_radius
    }

    /// Children in the order they were added.
    pub fn children(&self) -> &[BodyID] {
        &self.children
    }
}

/// Compresses large radii so that the giant planets don't dwarf everything.
pub fn shape_body_radius(radius: f64) -> f64 {
    if radius > 1.0 {
        radius.sqrt().sqrt()
    } else {
        radius
    }
}

/// Compresses large orbits, then scales everything up to scene units.
pub fn shape_orbit_radius(radius: f64) -> f64 {
    let radius = if radius > 1.0 { radius.sqrt() } else { radius };
    radius * ORBIT_RADIUS_FACTOR
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("{name}: {field} must be finite and non-negative, got {value}")]
    InvalidQuantity {
        name: String,
        field: &'static str,
        value: f64,
    },
    #[error("{name}: {field} must be finite, got {value}")]
    NonFiniteAngle {
        name: String,
        field: &'static str,
        value: f64,
    },
    #[error("{name}: parent {parent:?} does not exist")]
    UnknownParent { name: String, parent: BodyID },
    #[error("{name}: system already has a root body ({existing:?})")]
    SecondRoot { name: String, existing: BodyID },
}

/// The whole body tree, stored as an arena indexed by `BodyID`.
///
/// Bodies can only be attached to parents that already exist, so the tree is
/// acyclic by construction. Nothing can be changed once a body is added.
#[derive(Debug, Clone, Default)]
pub struct SolarSystem {
    bodies: Vec<Body>,
}

impl SolarSystem {
    pub fn new() -> Self {
        SolarSystem { bodies: vec![] }
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get_body(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    pub fn root(&self) -> Option<&Body> {
        self.bodies.first()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies
            .iter()
            .find(|body| body.info.name.eq_ignore_ascii_case(name))
    }

    pub fn child_bodies(&self, id: BodyID) -> impl Iterator<Item = &Body> {
        self.get_body(id)
            .children
            .iter()
            .map(move |child| self.get_body(*child))
    }

    pub fn add_fixed_body(&mut self, info: BodyInfo) -> Result<BodyID, CatalogError> {
        if let Some(root) = self.root() {
            return Err(CatalogError::SecondRoot {
                name: info.name,
                existing: root.id,
            });
        }
        validate_body(&info)?;
        Ok(self.insert_new_body(info, BodyState::FixedAtOrigin))
    }

    pub fn add_body(
        &mut self,
        info: BodyInfo,
        orbit: OrbitInfo,
        parent_id: BodyID,
    ) -> Result<BodyID, CatalogError> {
        if parent_id.0 >= self.bodies.len() {
            return Err(CatalogError::UnknownParent {
                name: info.name,
                parent: parent_id,
            });
        }
        validate_body(&info)?;
        validate_orbit(&info.name, &orbit)?;

        let state = BodyState::Orbiting {
            parent_id,
            orbit: Orbit::new(orbit),
        };
        let id = self.insert_new_body(info, state);
        self.bodies[parent_id.0].children.push(id);
        Ok(id)
    }

    fn insert_new_body(&mut self, info: BodyInfo, state: BodyState) -> BodyID {
        let id = BodyID(self.bodies.len());
        let body = Body::new(id, info, state);
        debug!(
            name = %body.info.name,
            radius = body.display_radius,
            orbit_radius = ?body.orbit().map(Orbit::display_radius),
            "added body {:?}",
            id
        );

        self.bodies.push(body);
        id
    }
}

fn validate_body(info: &BodyInfo) -> Result<(), CatalogError> {
    check_quantity(&info.name, "radius", info.radius)?;
    check_quantity(&info.name, "rotation period", info.period)?;
    check_angle(&info.name, "tilt", info.tilt)
}

fn validate_orbit(name: &str, orbit: &OrbitInfo) -> Result<(), CatalogError> {
    check_quantity(name, "orbit radius", orbit.radius)?;
    check_quantity(name, "orbit period", orbit.period)?;
    check_angle(name, "inclination", orbit.inclination)
}

fn check_quantity(name: &str, field: &'static str, value: f64) -> Result<(), CatalogError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidQuantity {
            name: name.to_owned(),
            field,
            value,
        })
    }
}

fn check_angle(name: &str, field: &'static str, value: f64) -> Result<(), CatalogError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CatalogError::NonFiniteAngle {
            name: name.to_owned(),
            field,
            value,
        })
    }
}
