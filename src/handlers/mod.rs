pub mod orders;
pub mod seed;
pub mod status;
