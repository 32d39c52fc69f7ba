use std::io;

use agrotrack_core::config::AppConfig;
use agrotrack_db::{connect_with_settings, migrations, SqlProductRepository, SqlVehicleRepository};

use crate::commands::{CommandResult, GlobalOptions};
use crate::console::Console;
use crate::logging;
use crate::session::Session;

/// Runs the interactive menu against the configured database.
pub fn run(options: &GlobalOptions) -> CommandResult {
    let config = match AppConfig::load(options.load_options()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "menu",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };
    logging::init(&config.logging);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "menu",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let opened = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;
        if let Err(error) = migrations::run_pending(&pool).await {
            pool.close().await;
            return Err(("migration", error.to_string(), 5u8));
        }
        Ok(pool)
    });
    let pool = match opened {
        Ok(pool) => pool,
        Err((error_class, message, exit_code)) => {
            tracing::error!(event_name = "session.store_unavailable", error_class, %message);
            return CommandResult::failure("menu", error_class, message, exit_code);
        }
    };

    tracing::info!(
        event_name = "session.started",
        database_url = %config.database.url,
        export_directory = %config.export.directory.display(),
        "interactive session started"
    );

    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    let mut session = Session::new(
        &runtime,
        SqlProductRepository::new(pool.clone()),
        SqlVehicleRepository::new(pool.clone()),
        console,
        config.export.directory.clone(),
    );
    let outcome = session.run();
    drop(session);
    runtime.block_on(pool.close());

    match outcome {
        Ok(()) => {
            tracing::info!(event_name = "session.stopped", "interactive session stopped");
            CommandResult::quiet(0)
        }
        Err(error) => {
            tracing::error!(event_name = "session.aborted", error = %error, "console failure");
            CommandResult::failure("menu", "console_io", error.to_string(), 1)
        }
    }
}
