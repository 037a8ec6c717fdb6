use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use micflow::vcd::Trace;
use micflow::*;
use micflow_hub::constants::mic_hub::*;
use micflow_hub::pdm::pdm_clock_hz;
use micflow_hub::*;
use micflow_std::Ready;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<(), HubError> {
    tracing_subscriber::registry().with(fmt::layer()).with(EnvFilter::from_default_env()).init();

    let config = StreamerConfig::default();
    let hub = MicHub::new(&config)?;
    info!(
        host = %config.ip_address,
        port = config.udp_port,
        fifo_depth = config.fifo_depth,
        pdm_clock_hz = pdm_clock_hz(SYS_CLK_FREQ),
        "simulating mic hub"
    );

    let path = Path::new(VCD_PATH);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|error| HubError::Fs { error })?;
    }
    let file = File::create(path).map_err(|error| HubError::Fs { error })?;
    let mut trace = Trace::for_module::<MicHub>(BufWriter::new(file), VCD_TIMESCALE)?;

    let sample = Sample::from_u128(TEST_PATTERN);
    let mut sim = Sim::new(hub);
    let mut words = 0;
    for _ in 0..SIM_CYCLES {
        let cycle = sim.step(sample, ((), Ready::new(true)));
        trace.record(&cycle)?;
        words += u64::from(cycle.egress_fwd.1.valid);
    }
    trace.into_inner()?;

    let stream2udp = sim.module().stream2udp();
    info!(
        cycles = sim.cycle(),
        words,
        datagrams = stream2udp.datagrams(),
        dropped = stream2udp.dropped(),
        "waveform written to {}",
        path.display()
    );
    Ok(())
}
