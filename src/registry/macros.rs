//! Registration macros
//!
//! A suite is a marker type and each test is an associated function on it, so
//! declaring the same test twice in one suite is a duplicate definition that
//! the compiler rejects.

/// Declare a test suite marker type
///
/// ```ignore
/// xtest::suite!(FactorialTest);
/// ```
#[macro_export]
macro_rules! suite {
    ($(#[$meta:meta])* $vis:vis $suite:ident) => {
        $(#[$meta])*
        #[allow(dead_code, non_camel_case_types)]
        $vis struct $suite;
    };
}

/// Declare a test and register it under its suite
///
/// ```ignore
/// xtest::suite!(FactorialTest);
///
/// xtest::xtest!(FactorialTest, HandlesZero, |ctx| {
///     xtest::expect_eq!(ctx, factorial(0), 1);
/// });
/// ```
#[macro_export]
macro_rules! xtest {
    ($suite:ident, $name:ident, |$ctx:ident| $body:block $(;)?) => {
        const _: () = {
            impl $suite {
                #[allow(non_snake_case)]
                fn $name($ctx: &mut $crate::TestContext) $body
            }

            $crate::__private::inventory::submit! {
                $crate::TestDescriptor::new(
                    ::std::stringify!($suite),
                    ::std::stringify!($name),
                    <$suite>::$name,
                    ::std::file!(),
                    ::std::line!(),
                )
            }
        };
    };
}
