//! Generate command handler.

use std::{
	fs,
	io::{Read, Write},
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Args;
use kforge::{ManifestRequest, Settings};
use tracing::{debug, info};

#[derive(Args)]
pub struct GenerateArgs {
	/// Request file (YAML or JSON). Reads stdin when omitted or `-`
	pub file: Option<PathBuf>,

	/// Override the resource name from the request
	#[arg(long)]
	pub name: Option<String>,

	/// Override the namespace from the request
	#[arg(short = 'n', long)]
	pub namespace: Option<String>,

	/// Settings file. By default `.kforge.yaml` is searched upward from the request file
	#[arg(long)]
	pub settings: Option<PathBuf>,

	/// Write the manifest to this file instead of stdout
	#[arg(short = 'o', long)]
	pub output: Option<PathBuf>,
}

impl GenerateArgs {
	fn request_file(&self) -> Option<&Path> {
		self.file.as_deref().filter(|path| *path != Path::new("-"))
	}
}

/// Run the generate command.
pub fn run<R: Read, W: Write>(args: GenerateArgs, input: R, mut writer: W) -> Result<()> {
	let mut request = read_request(args.request_file(), input)?;
	if let Some(name) = &args.name {
		request.name.clone_from(name);
	}
	if let Some(namespace) = &args.namespace {
		request.namespace = Some(namespace.clone());
	}

	let settings = load_settings(&args)?;
	let manifest = kforge::generate(&request, &settings)
		.with_context(|| format!("generating {} {:?}", request.kind, request.name))?;

	match &args.output {
		Some(path) => {
			fs::write(path, &manifest)
				.with_context(|| format!("failed to write manifest: {}", path.display()))?;
			info!(path = %path.display(), kind = %request.kind, "manifest written");
		}
		None => {
			writer.write_all(manifest.as_bytes())?;
			writer.flush()?;
		}
	}
	Ok(())
}

fn read_request<R: Read>(file: Option<&Path>, mut input: R) -> Result<ManifestRequest> {
	let (content, source) = match file {
		Some(path) => (
			fs::read_to_string(path)
				.with_context(|| format!("failed to read request file: {}", path.display()))?,
			path.display().to_string(),
		),
		None => {
			let mut content = String::new();
			input
				.read_to_string(&mut content)
				.context("failed to read request from stdin")?;
			(content, "<stdin>".to_string())
		}
	};
	// JSON requests are valid YAML
	serde_yaml_with_quirks::from_str(&content)
		.with_context(|| format!("failed to parse request: {source}"))
}

fn load_settings(args: &GenerateArgs) -> Result<Settings> {
	if let Some(path) = &args.settings {
		return Ok(Settings::load_from_file(path)?);
	}
	let start_dir = match args.request_file().and_then(Path::parent) {
		Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
		_ => std::env::current_dir().context("failed to get current directory")?,
	};
	let settings = Settings::load_from_directory(&start_dir)?;
	if settings.is_none() {
		debug!(dir = %start_dir.display(), "no settings file found, using defaults");
	}
	Ok(settings.unwrap_or_default())
}

#[cfg(test)]
mod tests {
	use std::io;

	use assert_matches::assert_matches;
	use indoc::indoc;
	use kforge::settings::SETTINGS_FILE_NAME;
	use tempfile::TempDir;

	use super::*;
	use crate::commands::util::{BrokenPipeGuard, ClosedPipe};

	const ROUTE_REQUEST: &str = indoc! {"
		kind: HTTPRoute
		name: shop
		namespace: team-a
		config:
		  spec:
		    rules:
		      - backendRefs:
		          - name: shop
		            port: 8080
	"};

	fn args(file: Option<PathBuf>) -> GenerateArgs {
		GenerateArgs {
			file,
			name: None,
			namespace: None,
			settings: None,
			output: None,
		}
	}

	fn run_to_string(args: GenerateArgs, input: &str) -> Result<String> {
		let mut output = Vec::new();
		run(args, input.as_bytes(), &mut output)?;
		Ok(String::from_utf8(output).unwrap())
	}

	#[test]
	fn test_reads_stdin() {
		let temp = TempDir::new().unwrap();
		let mut args = args(None);
		args.settings = Some(temp.path().join("absent.yaml"));
		// A missing explicit settings file is an error, not a silent fallback
		assert!(run_to_string(args, ROUTE_REQUEST).is_err());

		let output = run_to_string(self::args(Some(PathBuf::from("-"))), ROUTE_REQUEST).unwrap();
		let manifest: serde_json::Value = serde_yaml_with_quirks::from_str(&output).unwrap();
		assert_eq!(manifest["kind"], "HTTPRoute");
		assert_eq!(
			manifest["spec"]["rules"][0]["backendRefs"][0]["namespace"],
			"team-a"
		);
	}

	#[test]
	fn test_settings_next_to_request() {
		let temp = TempDir::new().unwrap();
		fs::write(
			temp.path().join(SETTINGS_FILE_NAME),
			"gateway:\n  parentName: edge\n  parentNamespace: edge-system\n",
		)
		.unwrap();
		let request = temp.path().join("route.yaml");
		fs::write(&request, ROUTE_REQUEST).unwrap();

		let mut args = args(Some(request));
		args.namespace = Some("team-b".to_string());
		let output = run_to_string(args, "").unwrap();
		let manifest: serde_json::Value = serde_yaml_with_quirks::from_str(&output).unwrap();
		assert_eq!(manifest["metadata"]["namespace"], "team-b");
		assert_eq!(
			manifest["spec"]["parentRefs"],
			serde_json::json!([{ "name": "edge", "namespace": "edge-system" }])
		);
	}

	#[test]
	fn test_writes_output_file() {
		let temp = TempDir::new().unwrap();
		let output_path = temp.path().join("out.yaml");
		let mut args = args(None);
		args.settings = Some(temp.path().join(SETTINGS_FILE_NAME));
		fs::write(temp.path().join(SETTINGS_FILE_NAME), "{}").unwrap();
		args.output = Some(output_path.clone());
		args.name = Some("renamed".to_string());

		let stdout = run_to_string(
			args,
			r#"{"kind": "ConfigMap", "name": "cm", "config": {"data": {"a": "1"}}}"#,
		)
		.unwrap();
		assert_eq!(stdout, "");
		let written = fs::read_to_string(output_path).unwrap();
		assert!(written.contains("name: renamed"), "{written}");
		assert!(written.contains("a: '1'") || written.contains("a: \"1\""), "{written}");
	}

	#[test]
	fn test_validation_error_is_reported() {
		let err = run_to_string(
			args(None),
			indoc! {"
				kind: Pod
				name: p
				containers:
				  - name: web
			"},
		)
		.unwrap_err();
		assert!(format!("{err:#}").contains("container `web` has no image"), "{err:#}");
	}

	#[test]
	fn test_exits_cleanly_on_broken_pipe() {
		let result = run(
			args(None),
			ROUTE_REQUEST.as_bytes(),
			BrokenPipeGuard::new(ClosedPipe),
		);
		assert_matches!(result, Ok(()));
	}

	#[test]
	fn test_unparsable_request() {
		let err = run(args(None), "kind: [".as_bytes(), io::sink()).unwrap_err();
		assert!(format!("{err:#}").contains("failed to parse request"), "{err:#}");
	}
}
