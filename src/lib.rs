pub mod error;
pub mod lagrange;
pub mod rational;
pub mod share;
pub mod share_file;

pub use error::*;
pub use lagrange::*;
pub use rational::*;
pub use share::*;
pub use share_file::*;
