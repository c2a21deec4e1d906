// Entrypoint for the CLI application.
// - Keeps `main` small: resolve config, build the generator and store, and
//   hand them to the UI loop.
// - Returns `anyhow::Result`, so a missing API key aborts with its message
//   before any menu is shown.

use contentforge_cli::{
    config::Config, generator::ContentGenerator, storage::ContentStore, ui::main_menu,
};

fn main() -> anyhow::Result<()> {
    // All environment reads happen here. See `config::Config::from_env`.
    let config = Config::from_env()?;
    let generator = ContentGenerator::new(&config)?;
    let store = ContentStore::new(config.output_dir.clone())?;

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(&config, &generator, &store)?;
    Ok(())
}
