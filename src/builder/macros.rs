//! Macros for declaring states.

/// Declare unit-struct states with a fixed status label.
///
/// # Example
///
/// ```
/// use lumen::core::State;
/// use lumen::status_state;
///
/// status_state! {
///     /// Fan spinning
///     pub struct FanOn => "Fan is ON";
///     pub struct FanOff => "Fan is OFF";
/// }
///
/// assert_eq!(FanOn.status(), "Fan is ON");
/// assert_eq!(FanOff.status(), "Fan is OFF");
/// ```
#[macro_export]
macro_rules! status_state {
    (
        $(
            $(#[$meta:meta])*
            $vis:vis struct $name:ident => $status:expr;
        )+
    ) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
            $vis struct $name;

            impl $crate::core::State for $name {
                fn status(&self) -> &str {
                    $status
                }
            }
        )+
    };
}
