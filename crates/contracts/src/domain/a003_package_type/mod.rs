pub mod aggregate;

pub use aggregate::{PackageType, PackageTypeId};
