/// Flags accepted on the command line. Values are kept raw; `Config` validates them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub path: Option<String>,
    pub filename: Option<String>,
    pub branch: Option<String>,
    pub policy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Pull(CliArgs),
    Help,
}

pub fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} --path <dir> [--filename <name>] [--branch <fork>] [--policy <short-circuit|full-scan>]\n\nFlags:\n  --path <dir>         Destination directory; must exist and be writable\n  --filename <name>    Destination file name (default: default.json)\n  --branch <fork>      Fork label to pull. When no collection carries this label the\n                       staging fork is used. Empty selects the root collection.\n  --policy <p>         short-circuit (default): first matching fork wins\n                       full-scan: last matching fork wins\n  -h, --help           Show this help\n\nEnvironment:\n  POSTMAN_API_KEY          API key sent as X-API-Key (required)\n  POSTMAN_WORKSPACE_ID     Workspace to list collections from (required)\n  POSTMAN_API_BASE         API base URL (default: https://api.getpostman.com)\n  POSTMAN_TIMEOUT_SECS     Per-request timeout in seconds (default: none)\n  RUST_LOG                 Log filter (default: info)\n\nExamples:\n  {program} --path ./postman --filename orders.json --branch feature-123\n  {program} --path /tmp --branch \"\"    # root collection"
    );
}

/// Parse arguments (without the program name). Accepts `--flag value` and `--flag=value`.
pub fn parse_args(args: &[String]) -> Result<CliCommand, String> {
    let mut out = CliArgs::default();
    let mut i = 0;
    while i < args.len() {
        let (flag, inline) = match args[i].split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f, Some(v.to_string())),
            _ => (args[i].as_str(), None),
        };
        let slot = match flag {
            "--path" => &mut out.path,
            "--filename" => &mut out.filename,
            "--branch" => &mut out.branch,
            "--policy" => &mut out.policy,
            "-h" | "--help" => return Ok(CliCommand::Help),
            unk => return Err(format!("Unrecognized argument: {}", unk)),
        };
        match inline {
            Some(v) => { *slot = Some(v); i += 1; }
            None => {
                if i + 1 >= args.len() { return Err(format!("{} requires a value", flag)); }
                *slot = Some(args[i + 1].clone());
                i += 2;
            }
        }
    }
    Ok(CliCommand::Pull(out))
}
