pub mod constants;
pub mod error;
pub mod markers;
pub mod observers;
pub mod orbit;
pub mod params;
pub mod picking;
pub mod router;
pub mod spherical;
pub mod state;
pub mod subscription;

pub use constants::*;
pub use error::*;
pub use markers::*;
pub use observers::*;
pub use orbit::*;
pub use params::*;
pub use picking::*;
pub use router::*;
pub use spherical::*;
pub use state::*;
pub use subscription::*;
