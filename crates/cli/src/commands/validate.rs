use crate::site::Site;
use garden_validator::validate_site;
use std::path::PathBuf;

pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating site at: {}", path.display());

    let site = Site::load(&path)?;

    println!("✓ garden.toml valid");
    println!("  Site: {} ({})", site.garden.site.title, site.garden.site.site);
    println!(
        "  Feed: /{} from '{}'",
        site.garden.feed.path, site.garden.feed.collection
    );

    let report = validate_site(&site.root, &site.garden)?;

    for line in &report.info {
        println!("  {}", line);
    }
    for warning in &report.warnings {
        println!("⚠ {}", warning);
    }
    for error in &report.errors {
        eprintln!("✗ {}", error);
    }

    if !report.is_ok() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }

    println!("\n✓ Content valid");
    Ok(())
}
