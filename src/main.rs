use log::{error, info};
use memkv::{
    config::{load_env_file, report_env_file, Config},
    logger::setup_logger,
    KvServer,
};
use std::{
    env as stdenv,
    io::{Error as IOError, ErrorKind},
    process::id as process_id,
};

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let env_file = load_env_file();
    setup_logger();
    report_env_file(&env_file);

    let this_script_relative_path = stdenv::args().next().unwrap_or_default();
    info!("{} {} started as {}", NAME, VERSION, this_script_relative_path);
    info!("PID: {}", process_id());

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        IOError::new(ErrorKind::InvalidInput, e)
    })?;
    info!("Configuration: {:?}", config);

    let server = KvServer::new(config).run()?;
    let execution = server.await;

    info!("Worker stopped with PID: {}", process_id());
    if let Err(e) = execution {
        error!("Server terminated with error: {:?}", e);
        return Err(e);
    }

    Ok(())
}
