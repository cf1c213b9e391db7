//! Greeting handlers
//!
//! Both endpoints answer any GET with a single fixed line of plain text.

/// Body served by `GET /hello`
pub const HELLO_BODY: &str = "Hello World\n";

/// Body served by `GET /goodbye`
pub const GOODBYE_BODY: &str = "Goodbye World\n";

/// GET /hello
pub async fn hello() -> &'static str {
    HELLO_BODY
}

/// GET /goodbye
pub async fn goodbye() -> &'static str {
    GOODBYE_BODY
}
