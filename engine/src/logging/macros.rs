/// Scoped logging gated by the runtime LogConfig rather than the subscriber,
/// so individual subsystems can be turned up without flooding the rest.
#[macro_export]
macro_rules! scoped_log {
    (error, $scope:expr, $($arg:tt)*) => {
        if $crate::logging::get_log_config().should_log($scope, $crate::logging::Level::ERROR) {
            tracing::error!(scope = $scope, $($arg)*);
        }
    };
    (warn, $scope:expr, $($arg:tt)*) => {
        if $crate::logging::get_log_config().should_log($scope, $crate::logging::Level::WARN) {
            tracing::warn!(scope = $scope, $($arg)*);
        }
    };
    (info, $scope:expr, $($arg:tt)*) => {
        if $crate::logging::get_log_config().should_log($scope, $crate::logging::Level::INFO) {
            tracing::info!(scope = $scope, $($arg)*);
        }
    };
    (debug, $scope:expr, $($arg:tt)*) => {
        if $crate::logging::get_log_config().should_log($scope, $crate::logging::Level::DEBUG) {
            tracing::debug!(scope = $scope, $($arg)*);
        }
    };
    (trace, $scope:expr, $($arg:tt)*) => {
        if $crate::logging::get_log_config().should_log($scope, $crate::logging::Level::TRACE) {
            tracing::trace!(scope = $scope, $($arg)*);
        }
    };
}

// Convenience macros for common scopes

#[macro_export]
macro_rules! render_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "render", $($arg)*);
    };
}

#[macro_export]
macro_rules! assets_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "assets", $($arg)*);
    };
}

#[macro_export]
macro_rules! motion_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "motion", $($arg)*);
    };
}

#[macro_export]
macro_rules! viewer_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "viewer", $($arg)*);
    };
}
