//! Connection strength scoring.
//!
//! Pure and deterministic: identical inputs always produce identical scores,
//! and every score lands in [0,1].

use serde::{Deserialize, Serialize};
use crate::model::{ConnectionCategory, Entity};

/// Tunable scoring constants.
///
/// These are deployment knobs, not invariants — the defaults mirror the
/// heuristics the surrounding system shipped with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Base for `responsible_for`.
    pub responsible_base: f64,
    /// Base for `parent_of` / `child_of`.
    pub hierarchy_base: f64,
    /// Base for `contact_of`.
    pub contact_base: f64,
    /// Base for `related_to`.
    pub related_base: f64,
    /// Multiplier applied when either endpoint is inactive.
    pub inactive_penalty: f64,
    /// Added when both endpoints carry an email address.
    pub email_bonus: f64,
    /// Added when both endpoints carry a phone number.
    pub phone_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            responsible_base: 0.9,
            hierarchy_base: 0.8,
            contact_base: 0.7,
            related_base: 0.5,
            inactive_penalty: 0.7,
            email_bonus: 0.1,
            phone_bonus: 0.1,
        }
    }
}

/// Activity/completeness profile of one connection endpoint.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub active: bool,
    pub has_email: bool,
    pub has_phone: bool,
}

impl From<&Entity> for Endpoint {
    fn from(entity: &Entity) -> Self {
        Self {
            active: entity.active,
            has_email: entity.has_email(),
            has_phone: entity.has_phone(),
        }
    }
}

/// Assigns a strength value to a relationship given its category and the
/// activity/completeness of its endpoints.
#[derive(Debug, Clone, Default)]
pub struct ConnectionScorer {
    weights: ScoringWeights,
}

impl ConnectionScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, category: ConnectionCategory, from: Endpoint, to: Endpoint) -> f64 {
        let w = &self.weights;
        let base = match category {
            ConnectionCategory::ResponsibleFor => w.responsible_base,
            ConnectionCategory::ParentOf | ConnectionCategory::ChildOf => w.hierarchy_base,
            ConnectionCategory::ContactOf => w.contact_base,
            ConnectionCategory::RelatedTo => w.related_base,
        };

        let mut strength = base;
        if !from.active || !to.active {
            strength *= w.inactive_penalty;
        }
        if from.has_email && to.has_email {
            strength += w.email_bonus;
        }
        if from.has_phone && to.has_phone {
            strength += w.phone_bonus;
        }
        strength.clamp(0.0, 1.0)
    }
}
