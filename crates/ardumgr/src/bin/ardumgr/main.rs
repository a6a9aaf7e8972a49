mod cli;

use ardumgr::manager::{Manager, RuntimeOs};
use ardumgr::programmer::{Programmer, Selection};

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("ARDUMGR_LOG"))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

fn run(cli: cli::Cli) -> anyhow::Result<()> {
    let Some(home) = cli.home else {
        anyhow::bail!("No installation given, use --home or set ARDUMGR_HOME");
    };
    anyhow::ensure!(
        home.is_dir(),
        "Installation directory {} does not exist",
        home.display()
    );

    let os = cli.os.unwrap_or_else(RuntimeOs::host);
    let mut manager = Manager::open(home, os);

    match cli.command {
        cli::Command::Platforms => print_lines(manager.platform_ids()?),
        cli::Command::Boards(args) => print_lines(manager.platform(&args.platform)?.boards()),
        cli::Command::Programmers(args) => {
            print_lines(manager.platform(&args.platform)?.programmers())
        }
        cli::Command::Tools(args) => print_lines(manager.platform(&args.platform)?.tools()),
        cli::Command::Cpus(cpus_cli) => {
            let platform = manager.platform(&cpus_cli.platform.platform)?;
            anyhow::ensure!(
                platform.boards().contains(&cpus_cli.board),
                "Unknown board {} in platform {}",
                cpus_cli.board,
                platform.id()
            );
            print_lines(platform.board_supported_cpus(&cpus_cli.board))
        }
        cli::Command::Resolve(resolve_cli) => {
            let programmer = resolve(&mut manager, resolve_cli.selection)?;
            output(&resolve_cli.output, &programmer)?;
        }
        cli::Command::UploadPattern(selection) => {
            let programmer = resolve(&mut manager, selection)?;
            println!("{}", programmer.upload_pattern()?);
        }
    }

    Ok(())
}

fn resolve(manager: &mut Manager, args: cli::SelectionArgs) -> anyhow::Result<Programmer> {
    let mut selection = Selection::new(args.programmer, args.board);
    selection.cpu = args.cpu;
    selection.serial_port = args.serial_port;

    let programmer = manager.resolve(&args.platform.platform, selection)?;
    tracing::info!(platform = %args.platform.platform, "resolved");
    Ok(programmer)
}

fn print_lines<I: IntoIterator<Item = String>>(lines: I) {
    for line in lines {
        println!("{line}");
    }
}

fn output(output: &cli::OutputArgs, programmer: &Programmer) -> anyhow::Result<()> {
    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), programmer.config())?,
        cli::OutputFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), programmer.config())?;
            println!();
        }
    };

    Ok(())
}
