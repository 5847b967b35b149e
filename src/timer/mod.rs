pub mod breathing;
pub mod sos;
pub mod ticker;
