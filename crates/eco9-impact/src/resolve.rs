use eco9_model::{ImpactMultiplier, MultiplierTable};
use serde::Serialize;

/// Applied when the category is unknown or declares no subtypes.
pub const GLOBAL_DEFAULT_MULTIPLIER: ImpactMultiplier = ImpactMultiplier::new(0.5, 0.1);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MultiplierSource {
    Subtype { category: String, subtype: String },
    GlobalDefault,
}

impl MultiplierSource {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::GlobalDefault)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub multiplier: ImpactMultiplier,
    pub source: MultiplierSource,
}

/// Multiplier governing `category`: its first declared subtype, else the
/// global default. Never fails.
#[must_use]
pub fn resolve_multiplier(table: &MultiplierTable, category: &str) -> ImpactMultiplier {
    resolve(table, category, None).multiplier
}

/// Like [`resolve_multiplier`], but honors an explicitly requested subtype
/// when the category declares it, and reports where the multiplier came from.
///
/// A requested subtype the category does not declare is ignored.
#[must_use]
pub fn resolve(table: &MultiplierTable, category: &str, subtype: Option<&str>) -> Resolution {
    let Some(entry) = table.category(category) else {
        return global_default();
    };

    let chosen = subtype
        .and_then(|name| entry.subtype(name))
        .or_else(|| entry.first_subtype());

    match chosen {
        Some(found) => Resolution {
            multiplier: found.multiplier(),
            source: MultiplierSource::Subtype {
                category: entry.name.clone(),
                subtype: found.name.clone(),
            },
        },
        None => global_default(),
    }
}

fn global_default() -> Resolution {
    Resolution {
        multiplier: GLOBAL_DEFAULT_MULTIPLIER,
        source: MultiplierSource::GlobalDefault,
    }
}
