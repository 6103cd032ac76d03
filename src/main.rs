#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), replterm::error::ConsoleError> {
    use replterm::{
        config::{ConfigPaths, ConsoleConfig},
        flags::Flags,
    };
    use std::env;

    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("replterm {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if flags.is_set("debug") {
        init_logging()?;
    }

    let paths = match flags.get_value("config") {
        Some(path) => ConfigPaths::with_override(path)?,
        None => ConfigPaths::new()?,
    };
    let config = ConsoleConfig::load(&paths.rc_path)?;
    tracing::debug!(rc = %paths.rc_path.display(), ?config, "configuration loaded");

    replterm::tty::run(config, flags.is_set("quiet"))
}

// stdout and stderr belong to the raw-mode terminal, so logs go to a file
#[cfg(not(target_arch = "wasm32"))]
fn init_logging() -> Result<(), replterm::error::ConsoleError> {
    use std::{fs::OpenOptions, sync::Mutex};
    use tracing_subscriber::EnvFilter;

    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("replterm");
    std::fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("replterm.log"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("replterm=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
