//! Kinds command handler.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use kforge::ResourceKind;
use tabwriter::TabWriter;

#[derive(Args)]
pub struct KindsArgs {
	/// Plain kind names output
	#[arg(long)]
	pub names: bool,
}

/// Run the kinds command.
pub fn run<W: Write>(args: KindsArgs, mut writer: W) -> Result<()> {
	if args.names {
		for kind in ResourceKind::KNOWN {
			writeln!(writer, "{kind}")?;
		}
		return Ok(());
	}

	let mut table = TabWriter::new(writer).padding(3);
	writeln!(table, "KIND\tAPIVERSION\tSCOPE")?;
	for kind in ResourceKind::KNOWN {
		let scope = if kind.is_namespaced() {
			"Namespaced"
		} else {
			"Cluster"
		};
		writeln!(table, "{kind}\t{}\t{scope}", kind.api_version())?;
	}
	table.flush().context("writing kinds table")
}
