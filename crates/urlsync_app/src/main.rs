mod platform;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    platform::run_app(config_path.as_deref())
}
