use spinning_cubes::Config;

/// Optional path to a JSON config file.
const CONFIG_ENV: &str = "CUBES_CONFIG";

fn main() -> anyhow::Result<()> {
    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    spinning_cubes::run(config)
}
