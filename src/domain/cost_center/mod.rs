pub mod model;

pub use model::{CostCenter, CostCenterBalance, CostCenterBasis, CostCenterId};
