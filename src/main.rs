use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};

use anyhow::{Context, Result};
use crossbeam_channel::bounded;
use finger_counter::{
    Config,
    pipeline::{ReplaySource, SessionController},
};

fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    env_logger::init();

    let config = Config::from_env();
    log::debug!("loaded config: {config:?}");

    let reader: Box<dyn BufRead + Send> = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            log::info!("replaying detector output from {}", path.display());
            Box::new(BufReader::new(file))
        }
        None => {
            log::info!("replaying detector output from stdin");
            Box::new(BufReader::new(io::stdin()))
        }
    };

    let source = ReplaySource::new(reader, config.detector.clone(), config.frame_size);
    let (report_tx, report_rx) = bounded(1);

    let mut controller = SessionController::new();
    controller.start(source, report_tx)?;

    for report in report_rx.iter() {
        for hand in &report.hands {
            let fingers: Vec<&str> = hand.finger_states.iter().map(|s| s.label()).collect();
            log::debug!(
                "{} caption at {:?}: {}",
                hand.handedness,
                hand.label_anchor,
                fingers.join(", ")
            );
        }
        controller.apply(&report);

        let readout = controller.readout();
        println!("{}", readout.total);
        if !readout.per_hand.is_empty() {
            println!("{}", readout.per_hand);
        }
    }

    controller.stop();
    Ok(())
}
