/// Asserts that an expression matches a pattern, with an optional guard.
///
/// Any arguments after the pattern are formatted into the panic message.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat $(if $guard:expr)? $(,)?) => {
        match $expr {
            $pat $(if $guard)? => {}
            ref value => ::core::panic!(
                "assertion `{} matches {}` failed\n  value: {value:?}",
                ::core::stringify!($expr),
                ::core::stringify!($pat $(if $guard)?),
            ),
        }
    };
    ($expr:expr, $pat:pat $(if $guard:expr)?, $($msg:tt)+) => {
        match $expr {
            $pat $(if $guard)? => {}
            ref value => ::core::panic!(
                "assertion `{} matches {}` failed: {}\n  value: {value:?}",
                ::core::stringify!($expr),
                ::core::stringify!($pat $(if $guard)?),
                ::core::format_args!($($msg)+),
            ),
        }
    };
}
