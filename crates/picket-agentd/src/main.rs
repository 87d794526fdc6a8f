use anyhow::Context;
use tracing::info;

use picket_agentd::{Agent, AgentConfig, logger_from_env};
use picket_control::ControlClient;
use picket_exec::NativeRuntime;
use picket_observe::logger_init;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) Logger
    let logger = logger_from_env().context("logger configuration")?;
    logger_init(&logger).context("logger initialization")?;

    // 2) Agent configuration
    let config = AgentConfig::from_env().context("agent configuration")?;
    info!(
        os = %config.os,
        endpoint = %config.control.endpoint,
        interval_secs = config.interval.as_secs(),
        "agent starting"
    );

    // 3) Controller client
    let client = ControlClient::new(&config.control).context("controller client")?;

    // 4) Run the cycle until the configured count runs out or the OS says stop.
    //    An in-flight probe is not interruptible; the signal lands at the
    //    next await point.
    let agent = Agent::new(config, client, NativeRuntime);
    tokio::select! {
        _ = agent.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown requested");
        }
    }

    info!("agent exiting");
    Ok(())
}
