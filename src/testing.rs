//! Helpers shared by the handler tests.

use crate::config::Config;

/// Defaults only, the process environment is not consulted.
pub fn test_config() -> Config {
    Config::from_vars(|_| None).unwrap()
}

/// Builds the full app, middleware included, over an in-memory database.
macro_rules! test_app {
    ($config:expr) => {
        $crate::testing::test_app!($config, $crate::db::memory_pool().await)
    };
    ($config:expr, $pool:expr) => {{
        let config: $crate::config::Config = $config;
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool))
                .app_data(actix_web::web::Data::new(config.clone()))
                .wrap(actix_web::middleware::from_fn(
                    $crate::middleware::host_middleware,
                ))
                .wrap($crate::middleware::cors(&config))
                .wrap(actix_web::middleware::NormalizePath::trim())
                .configure(|cfg| $crate::routes::configure(cfg, &config)),
        )
        .await
    }};
}

pub(crate) use test_app;
