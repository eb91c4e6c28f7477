pub use {
    anyhow,
    log,
    polars,
    pretty_env_logger,
};
