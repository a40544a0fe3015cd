/// Ray body shapes.
///
/// Contains the authored shape descriptor, the radius profile family, and a
/// dispatcher that selects the profile for a body type.
pub mod descriptor;
pub mod dispatcher;
pub mod profile;

pub use descriptor::{BodyType, ShapeDescriptor};
pub use profile::RadiusProfile;
