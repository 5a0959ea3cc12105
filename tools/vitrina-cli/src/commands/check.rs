//! Check delivery capabilities.

use vitrina_common::AppConfig;
use vitrina_compose_engine::Typeface;
use vitrina_delivery_desktop::{check_capabilities, print_capability_report, Capability};

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("Vitrina System Check");
    println!("{}", "=".repeat(50));

    println!("Config:");
    println!("  Catalogues: {}", config.catalogues_dir.display());
    println!("  Cache: {}", config.cache_dir.display());
    println!("  Pictures root: {}", config.gallery.pictures_dir.display());
    println!("  Default album: {}", config.gallery.album);
    println!();

    let mut capabilities = check_capabilities(config);
    capabilities.push(check_typeface(config));
    print_capability_report(&capabilities);

    let all_required_ok = capabilities
        .iter()
        .filter(|c| c.required)
        .all(|c| c.available);

    println!();
    if all_required_ok {
        println!("All required capabilities are available. Vitrina is ready.");
    } else {
        println!("Some required capabilities are missing. See above for fixes.");
    }

    Ok(())
}

/// Card composition needs a rasterizable typeface.
fn check_typeface(config: &AppConfig) -> Capability {
    let resolved = Typeface::resolve(config.card.typeface.as_deref());
    let available = resolved.is_ok();

    Capability {
        name: "Card Typeface".to_string(),
        description: match &resolved {
            Ok(typeface) => format!("Typeface at {}", typeface.path().display()),
            Err(_) => "A typeface for card captions".to_string(),
        },
        available,
        required: false, // plain-mode sharing works without one
        fix_instructions: if !available {
            Some(
                "Install the DejaVu or Liberation fonts, or set card.typeface in the configuration"
                    .to_string(),
            )
        } else {
            None
        },
    }
}
