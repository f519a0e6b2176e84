//! `format!`-style logging macros
//!
//! Each takes a [`Logger`](crate::Logger) or [`LoggerHandle`](crate::LoggerHandle)
//! followed by format arguments.

#[macro_export]
macro_rules! log_dev {
    ($logger:expr, $($arg:tt)*) => {
        $logger.dev(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(format_args!($($arg)*))
    };
}
