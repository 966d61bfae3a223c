/***************************************/
/*               Macros                */
/***************************************/

/// Unwraps a `Result` in the binary, logging the error with context and exiting on failure.
#[macro_export]
macro_rules! unwrap_or_exit {
    ($expr:expr, $context:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => {
                log::error!("{}: {}", $context, e);
                std::process::exit(1);
            }
        }
    };
}
