//! # Arm Control Executable
//!
//! This executable drives the six joint arm: it receives command tokens from clients, runs the
//! matching motion sequence on the servo driver board, and reports the arm's state back.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Command server abstraction.
mod cmd_server;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Result};
use log::{info, trace};

// Internal
use arm_lib::{
    data_store::DataStore,
    delay::StdDelay,
    dispatcher::Dispatcher,
    params::{ArmExecParams, DriverKind},
    servo_ctrl::{ServoDriver, SimDriver},
};
use cmd_server::CmdServer;
use util::{logger::logger_init, session::Session};

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("arm_exec", "sessions").wrap_err("Failed to create the session")?;

    let params: ArmExecParams =
        util::params::load("arm_exec.toml").wrap_err("Failed to load parameters")?;

    // Initialise logger
    logger_init(params.log_level, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Arm Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    info!("Parameters: {:#?}", params);

    info!("Initialising...");

    // ---- DRIVER INITIALISATION ----

    // Without a driver board the arm can't be made safe, so this is fatal
    let driver = init_driver(&params).wrap_err("Failed to initialise the servo driver")?;

    info!("Servo driver initialised ({:?})", params.driver);

    let mut ds = DataStore::new(driver, StdDelay);
    ds.home().wrap_err("Failed to move the arm to its home pose")?;

    for line in ds.registry.map_text().lines() {
        info!("{}", line);
    }

    let mut dispatcher = Dispatcher::new(ds);

    // ---- SERVER INITIALISATION ----

    let mut server = CmdServer::new(&params).wrap_err("Failed to initialise server")?;

    info!("Server listening on {}", params.cmd_endpoint);

    // ---- MAIN LOOP ----

    info!("Initialisation complete, entering main loop");

    loop {
        server.check_connection();

        let cmd = match server.get_cmd() {
            Some(c) => c,
            None => continue,
        };

        let outcome = dispatcher.dispatch(&cmd, &mut server);

        trace!("{:?} -> {:?}", cmd, outcome);
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn init_driver(params: &ArmExecParams) -> Result<Box<dyn ServoDriver>> {
    match params.driver {
        DriverKind::Sim => Ok(Box::new(SimDriver::new())),
        DriverKind::Pca9685 => init_pca9685(params),
    }
}

#[cfg(all(target_arch = "arm", target_os = "linux"))]
fn init_pca9685(params: &ArmExecParams) -> Result<Box<dyn ServoDriver>> {
    let i2c = rppal::i2c::I2c::new().wrap_err("Failed to open the I2C bus")?;

    let pwm = arm_lib::servo_ctrl::pca9685::init(i2c, params.i2c_address, params.pwm_prescale)
        .wrap_err_with(|| format!("No PCA9685 responding at {:#04x}", params.i2c_address))?;

    Ok(Box::new(pwm))
}

#[cfg(not(all(target_arch = "arm", target_os = "linux")))]
fn init_pca9685(_params: &ArmExecParams) -> Result<Box<dyn ServoDriver>> {
    Err(color_eyre::eyre::eyre!(
        "The PCA9685 driver is only available on the Raspberry Pi, use driver = \"sim\""
    ))
}
