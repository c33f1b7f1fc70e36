pub mod analysis;
pub mod io;
