#![cfg_attr(not(feature = "std"), no_std)]

pub mod assets;
pub mod ecosystem;
pub mod management;
pub mod traits;
pub mod weighted;

pub use assets::*;
pub use ecosystem::*;
pub use management::*;
pub use traits::*;
pub use weighted::*;
