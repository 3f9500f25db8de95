/*!
 * Monitoring
 * Structured tracing for the simulator
 */

mod tracer;

pub use tracer::{init_tracing, span_command, CommandSpan};
