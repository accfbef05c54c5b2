//! Testing utilities and harness for Vitrine

pub mod fakes;
pub mod robot;
pub mod robot_assertions;

pub use fakes::*;
pub use robot::*;

pub mod prelude {
    pub use crate::fakes::*;
    pub use crate::robot::*;
    pub use crate::robot_assertions;
}
