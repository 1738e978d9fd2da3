// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Shorthand for `Ok(())` or `Ok(value)` at the end of a fallible function.
///
/// ```
/// use r3bl_printansi::ok;
///
/// fn nothing_to_do() -> Result<(), std::io::Error> { ok!() }
/// fn answer() -> Result<u8, std::io::Error> { ok!(42) }
///
/// assert!(nothing_to_do().is_ok());
/// assert_eq!(answer().unwrap(), 42);
/// ```
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}
