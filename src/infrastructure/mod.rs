// Infrastructure implementations for livetrace.

pub mod config;
pub mod logging;
pub mod python_locator;
pub mod space_tracer;

pub use python_locator::PythonLocator;
pub use space_tracer::SpaceTracer;
