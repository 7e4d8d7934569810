pub use crate::elements::{EciPosition, OrbitalElements, SatcatId};
pub use crate::tle::{UnstructuredTle, TLE_LINE_LEN};
