//! Error macros for saiten

/// Return early with a usage error
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::SaitenError::UsageError($msg.to_string()))
    };
}

/// Return early with a schema error at the given path
#[macro_export]
macro_rules! bail_schema {
    ($path:expr, $reason:expr) => {
        return Err($crate::error::SaitenError::schema($path, $reason))
    };
}

/// Return early with an invalid input error for a criterion key
#[macro_export]
macro_rules! bail_input {
    ($key:expr, $reason:expr) => {
        return Err($crate::error::SaitenError::invalid_input($key, $reason))
    };
}
