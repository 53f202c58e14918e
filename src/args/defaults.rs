/// Identity sent with every fetch so the target can tell load traffic apart.
pub(crate) const DEFAULT_USER_AGENT: &str = concat!(
    "wblg-loadgen/",
    env!("CARGO_PKG_VERSION"),
    " (web browsing load generator)"
);
