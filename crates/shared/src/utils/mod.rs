mod gracefullshutdown;
mod logs;
mod metrics;
mod random_string;
mod tracing_ctx;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, Status, SystemMetrics, run_metrics_collector};
pub use self::random_string::generate_random_string;
pub use self::tracing_ctx::TracingContext;
