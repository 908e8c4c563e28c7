//! Built-in flavors, served when the store has nothing to recommend.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::bandit::{OutcomeCounts, Scale};
use crate::store::CandidateSnapshot;

/// A catalog entry with historical counts on the default 0..=10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogFlavor {
    pub name: &'static str,
    pub description: &'static str,
    pub ratings: [u64; Scale::DEFAULT_OUTCOMES],
}

impl CatalogFlavor {
    /// Snapshot on `scale`. Historical counts only apply to the default
    /// scale; any other scale gets the uniform prior.
    #[must_use]
    pub fn snapshot(&self, scale: Scale) -> CandidateSnapshot {
        let counts = OutcomeCounts::restore(scale, &self.ratings)
            .unwrap_or_else(|_| OutcomeCounts::uniform(scale));
        CandidateSnapshot {
            name: self.name.to_string(),
            description: self.description.to_string(),
            counts,
        }
    }
}

const FLAVORS: &[CatalogFlavor] = &[
    CatalogFlavor {
        name: "Strawberry",
        description: "Sweet and tangy with real strawberry pieces.",
        ratings: [2, 1, 3, 5, 8, 12, 15, 20, 18, 10, 6],
    },
    CatalogFlavor {
        name: "Blueberry",
        description: "Rich in antioxidants with a bold berry flavor.",
        ratings: [1, 2, 2, 4, 6, 10, 18, 22, 15, 12, 8],
    },
    CatalogFlavor {
        name: "Vanilla",
        description: "Smooth and creamy with classic vanilla bean.",
        ratings: [1, 1, 2, 3, 5, 8, 12, 25, 20, 15, 8],
    },
    CatalogFlavor {
        name: "Greek Honey",
        description: "Thick Greek yogurt swirled with natural honey.",
        ratings: [2, 1, 1, 3, 4, 9, 14, 18, 22, 16, 10],
    },
    CatalogFlavor {
        name: "Peach",
        description: "Summer peaches blended into creamy yogurt.",
        ratings: [1, 2, 3, 4, 7, 11, 16, 19, 17, 13, 7],
    },
    CatalogFlavor {
        name: "Coconut",
        description: "Tropical coconut flakes in a creamy base.",
        ratings: [3, 2, 4, 6, 8, 12, 15, 18, 14, 11, 7],
    },
    CatalogFlavor {
        name: "Mixed Berry",
        description: "A medley of strawberries, blueberries, and raspberries.",
        ratings: [1, 1, 2, 4, 6, 10, 15, 21, 19, 14, 7],
    },
    CatalogFlavor {
        name: "Lemon",
        description: "Zesty lemon flavor with a refreshing tang.",
        ratings: [2, 3, 4, 7, 9, 13, 16, 17, 15, 10, 4],
    },
    CatalogFlavor {
        name: "Mango",
        description: "Sweet tropical mango with a smooth finish.",
        ratings: [1, 1, 1, 2, 4, 7, 11, 20, 23, 18, 12],
    },
    CatalogFlavor {
        name: "Plain",
        description: "Simple, versatile yogurt with no added flavors.",
        ratings: [4, 3, 5, 8, 12, 15, 18, 16, 12, 5, 2],
    },
    CatalogFlavor {
        name: "Cherry",
        description: "Sweet black cherries in a creamy yogurt base.",
        ratings: [2, 2, 3, 5, 7, 12, 17, 20, 16, 11, 5],
    },
    CatalogFlavor {
        name: "Coffee",
        description: "Rich coffee flavor perfect for mornings.",
        ratings: [3, 4, 5, 8, 10, 14, 16, 18, 13, 7, 2],
    },
];

#[must_use]
pub const fn flavors() -> &'static [CatalogFlavor] {
    FLAVORS
}

/// Exact-name lookup.
#[must_use]
pub fn find(name: &str) -> Option<&'static CatalogFlavor> {
    FLAVORS.iter().find(|flavor| flavor.name == name)
}

/// Uniformly random catalog flavor.
pub fn random<R: Rng + ?Sized>(rng: &mut R) -> &'static CatalogFlavor {
    // The catalog is a non-empty constant.
    FLAVORS.choose(rng).unwrap_or(&FLAVORS[0])
}
