//! Capability detection and guidance for desktop delivery.
//!
//! Vitrina needs a writable cache and pictures root, and optionally an
//! external share handler, depending on how batches are delivered.

use vitrina_common::AppConfig;
use vitrina_delivery_core::ShareSheet;

use crate::gallery_dir::probe_write;
use crate::share_command::CommandShareSheet;

/// A system capability that Vitrina may need.
#[derive(Debug, Clone)]
pub struct Capability {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub required: bool,
    pub fix_instructions: Option<String>,
}

/// Check all delivery capabilities and report status.
pub fn check_capabilities(config: &AppConfig) -> Vec<Capability> {
    vec![
        check_cache_dir(config),
        check_pictures_root(config),
        check_share_handler(config),
    ]
}

/// Check that downloaded media can be cached locally.
fn check_cache_dir(config: &AppConfig) -> Capability {
    let available = probe_write(&config.cache_dir).is_ok();

    Capability {
        name: "Media Cache".to_string(),
        description: format!("Writable cache directory at {}", config.cache_dir.display()),
        available,
        required: true,
        fix_instructions: if !available {
            Some(format!(
                "Create the directory or point cache_dir elsewhere: mkdir -p {}",
                config.cache_dir.display()
            ))
        } else {
            None
        },
    }
}

/// Check that albums can be written under the pictures root.
fn check_pictures_root(config: &AppConfig) -> Capability {
    let available = probe_write(&config.gallery.pictures_dir).is_ok();

    Capability {
        name: "Pictures Root".to_string(),
        description: format!(
            "Writable album root at {}",
            config.gallery.pictures_dir.display()
        ),
        available,
        required: true,
        fix_instructions: if !available {
            Some(format!(
                "Create the directory or set gallery.pictures_dir: mkdir -p {}",
                config.gallery.pictures_dir.display()
            ))
        } else {
            None
        },
    }
}

/// Check whether an external share handler can be invoked.
fn check_share_handler(config: &AppConfig) -> Capability {
    let sheet = CommandShareSheet::from_defaults(&config.share);
    let available = sheet.is_available();

    Capability {
        name: "Share Handler".to_string(),
        description: "External command for handing batches to a share sheet".to_string(),
        available,
        required: false, // saving to an album works without one
        fix_instructions: if !available {
            Some(
                "Set share.handler in the configuration to an installed command".to_string(),
            )
        } else {
            None
        },
    }
}

/// Print a user-friendly capability report.
pub fn print_capability_report(capabilities: &[Capability]) {
    println!("Vitrina System Capabilities:");
    println!("{}", "-".repeat(60));

    for cap in capabilities {
        let status = if cap.available {
            "[OK]"
        } else if cap.required {
            "[MISSING - REQUIRED]"
        } else {
            "[MISSING - OPTIONAL]"
        };

        println!("  {} {}: {}", status, cap.name, cap.description);

        if let Some(ref fix) = cap.fix_instructions {
            println!("    Fix: {fix}");
        }
    }
}
