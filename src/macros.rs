// Compiles a regex literal once and hands out a `&'static Regex`
macro_rules! regex(
    ($s:expr) => ({
        static RE: ::std::sync::LazyLock<::regex::Regex> =
            ::std::sync::LazyLock::new(|| ::regex::Regex::new($s).expect("invalid regex"));
        &*RE
    });
);
