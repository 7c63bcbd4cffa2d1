use anyhow::Context;
use secp256k1_vectors::{
    backend::DefaultBackend,
    driver::{GeneratorConfig, generate},
};
use tracing::Level;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let config = GeneratorConfig::default();
    let vectors = generate(&config, &mut rand::rng(), DefaultBackend::default())
        .context("vector generation aborted")?;
    vectors
        .write_json(&config.output_path)
        .context("vector artifact not written")?;

    println!(
        "Generated {} vectors -> {}",
        vectors.len(),
        config.output_path.display()
    );
    Ok(())
}
