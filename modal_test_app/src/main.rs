//! Modal lifecycle test program
//!
//! Opens a parent window on the headless backend, plays a scripted user
//! session against it (show, blocked clicks, title bar close, rapid cycles,
//! parent close) and exits with an error if the session left the modal or
//! the parent in a bad state.
//!
//! Usage: `modal_test [config.toml | config.ron]`

mod session;

use session::Session;
use site_bridge::foundation::logging;
use site_bridge::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("host startup failed: {0}")]
    Host(#[from] HostError),

    #[error("{0} end-of-session check(s) failed")]
    ChecksFailed(usize),
}

fn main() -> Result<(), AppError> {
    let config = match std::env::args().nth(1) {
        Some(path) => ModalTestConfig::load_from_file(&path)?,
        None => ModalTestConfig::default(),
    };
    logging::init(&config.logging.level);

    log::info!("Starting modal lifecycle test");
    let host = ModalTestHost::startup(HeadlessBackend::new(), &config)?;

    let mut session = Session::new(host, &config.effective_script());
    session.run();
    session.log_summary();

    let failures = session.verify();
    if failures.is_empty() {
        log::info!("All end-of-session checks passed");
        Ok(())
    } else {
        for failure in &failures {
            log::error!("Check failed: {}", failure);
        }
        Err(AppError::ChecksFailed(failures.len()))
    }
}
