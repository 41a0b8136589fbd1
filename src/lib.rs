pub mod complex_matrix;
pub use complex_matrix::*;
pub mod gates;
pub use gates::*;
pub mod error;
pub use error::SimulatorError;
pub mod result;
pub use result::SimulationResult;
pub mod algorithms;
pub mod backend;
pub mod cache;
pub mod circuit;
pub mod composition;
pub mod config;
pub mod qubits;
pub mod session;
pub mod state;
