pub mod assets;
pub mod compute;
pub mod constants;
pub mod display;
pub mod entities;
pub mod error;
