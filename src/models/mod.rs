pub mod classify;
pub mod common;
pub mod correction;
pub mod describe;
pub mod translate;

pub use classify::*;
pub use common::*;
pub use correction::*;
pub use describe::*;
pub use translate::*;
