// ABOUTME: Configuration and constants for the Lisp interpreter

pub const VERSION: &str = "1.0.0";

/// Default step quota passed to `norm` when the CLI's `--fuel` flag is absent.
pub const DEFAULT_FUEL: usize = 1000;

pub const WELCOME_MESSAGE: &str = "vau-lisp v1.0";
pub const WELCOME_SUBTITLE: &str = "A metacircular vau-calculus Lisp interpreter";
