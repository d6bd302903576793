// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression, e.g. a literal, a const, or a &str
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Static CSS selector, parsed once on first use.
///
/// Only ever called with literals, so a bad selector panics in the extractor
/// tests long before it reaches a real page.
#[macro_export]
macro_rules! sel {
    ($css:literal) => {{
        static SELECTOR: ::std::sync::LazyLock<::scraper::Selector> =
            ::std::sync::LazyLock::new(|| {
                ::scraper::Selector::parse($css).expect(concat!("bad selector: ", $css))
            });
        &*SELECTOR
    }};
}
