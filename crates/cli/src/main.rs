use std::fs::File;
use std::io::{self, BufReader, Write};

use anyhow::Context;

use gigledger_cli::{Config, run_script, script};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    gigledger_observability::tracing::init(config.log_format);

    let mut session = config.session();
    tracing::info!(
        fuel_price = %config.fuel_price,
        companies = session.state().companies().len(),
        "session started"
    );

    let applied = match std::env::args().nth(1) {
        Some(path) if path != "-" => {
            let file = File::open(&path).with_context(|| format!("failed to open script {path}"))?;
            run_script(BufReader::new(file), &mut session)?
        }
        _ => run_script(io::stdin().lock(), &mut session)?,
    };

    let output = script::output(&session, applied, config.today());
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output).context("failed to write output")?;
    writeln!(stdout)?;
    Ok(())
}
