//! Human-readable catalog and trait listings

use crate::catalog::Catalog;
use crate::generation::TraitAssignment;
use crate::io::configuration::UNASSIGNED_TRAIT;
use std::fmt;

/// Format an integer with space-separated thousands, e.g. `12 500`
pub fn readable_number(n: u128) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    grouped
}

/// State of a listed directory
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectoryStatus {
    /// Active layer with variants
    Active,
    /// Active layer without any PNG file
    Empty,
    /// Present on disk but not listed in the layer order
    Skipped,
}

/// One numbered line of the directory listing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryLine {
    /// Directory name
    pub name: String,
    /// Number of PNG files in it
    pub images: usize,
    /// Whether and how it takes part in generation
    pub status: DirectoryStatus,
}

/// Diagnostics shown after a load
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogSummary {
    /// Active layers holding variants
    pub available: usize,
    /// Active layers left out because they are empty
    pub excluded: usize,
    /// Directories absent from the layer order
    pub not_listed: usize,
    /// All directories, sorted case-insensitively
    pub directories: Vec<DirectoryLine>,
    /// PNG count over active layers
    pub total_images: usize,
    /// Distinct combinations over active layers
    pub possible_combinations: u128,
}

impl CatalogSummary {
    /// Summarise a loaded catalog
    pub fn new(catalog: &Catalog) -> Self {
        let active = catalog.active_layers().iter().map(|layer| DirectoryLine {
            name: layer.name().to_string(),
            images: layer.len(),
            status: if layer.is_empty() {
                DirectoryStatus::Empty
            } else {
                DirectoryStatus::Active
            },
        });
        let skipped = catalog.skipped_layers().iter().map(|layer| DirectoryLine {
            name: layer.name().to_string(),
            images: layer.len(),
            status: DirectoryStatus::Skipped,
        });

        let mut directories: Vec<DirectoryLine> = active.chain(skipped).collect();
        directories.sort_by_key(|line| line.name.to_lowercase());

        let available = catalog.non_empty_active();
        Self {
            available,
            excluded: catalog.active_layers().len().saturating_sub(available),
            not_listed: catalog.skipped_layers().len(),
            directories,
            total_images: catalog.total_images(),
            possible_combinations: catalog.possible_combinations(),
        }
    }
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Available directories: {}", self.available)?;
        match self.excluded {
            0 => {}
            1 => write!(f, " (1 was excluded)")?,
            n => write!(f, " ({n} were excluded)")?,
        }
        match self.not_listed {
            0 => {}
            1 => write!(f, " (1 wasn't listed in layers order)")?,
            n => write!(f, " ({n} weren't listed in layers order)")?,
        }
        writeln!(f)?;

        for (i, line) in self.directories.iter().enumerate() {
            write!(f, "{:>3}. {} ({})", i + 1, line.name, line.images)?;
            match line.status {
                DirectoryStatus::Active => writeln!(f)?,
                DirectoryStatus::Empty => writeln!(f, " [empty]")?,
                DirectoryStatus::Skipped => writeln!(f, " [skipped]")?,
            }
        }

        writeln!(
            f,
            "Total images: {}",
            readable_number(self.total_images as u128)
        )?;
        write!(
            f,
            "Total possible combinations: {}",
            readable_number(self.possible_combinations)
        )
    }
}

/// `layer: trait` lines for every active layer, `---` before any generation
pub fn format_traits(catalog: &Catalog, traits: Option<&TraitAssignment>) -> String {
    catalog
        .active_layers()
        .iter()
        .map(|layer| {
            let value = traits
                .and_then(|traits| traits.get(layer.name()))
                .map_or(UNASSIGNED_TRAIT, |choice| choice.as_str());
            format!("{}: {value}", layer.name())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
