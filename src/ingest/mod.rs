pub mod csv;
pub mod synthetic;
