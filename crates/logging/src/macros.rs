//! crates/logging/src/macros.rs
//! The `sitelog!` call-site macro.

/// Logs a message through a call site with its own registry entry.
///
/// The first character of the template is the severity marker
/// (`0`, `a`, `c`, `e`, `w`, `n`, `i` or `d`, any case). The rest uses
/// [`format!`] syntax. The whole template, marker included, is written.
///
/// Each expansion owns a `static` [`Entry`](crate::Entry) that registers the
/// first time the call site runs. Later executions read one flag; when it is
/// off the arguments are not evaluated at all.
///
/// Without a registry argument the call site uses
/// [`Registry::global`](crate::Registry::global). Use `in <registry>;` to
/// target another one.
///
/// # Examples
///
/// ```
/// use sitelog::{Registry, sitelog};
///
/// let registry = Registry::without_sink();
/// registry.set_sink(Vec::<u8>::new());
///
/// let mut evaluated = 0;
/// for round in 0..3 {
///     sitelog!(in &registry; "d: round {}", { evaluated += 1; round });
/// }
/// assert_eq!(evaluated, 0);
/// assert_eq!(registry.len(), 1);
/// ```
#[macro_export]
macro_rules! sitelog {
    (in $registry:expr; $template:literal $($args:tt)*) => {{
        static ENTRY: $crate::Entry = $crate::Entry::new($template);
        let registry: &$crate::Registry = $registry;
        if registry.admit(&ENTRY) {
            registry.emit(::core::format_args!($template $($args)*));
        }
    }};
    ($template:literal $($args:tt)*) => {
        $crate::sitelog!(in $crate::Registry::global(); $template $($args)*)
    };
}
