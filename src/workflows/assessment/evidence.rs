use std::collections::{BTreeMap, BTreeSet};

use super::domain::{CriterionId, Evidence, VendorId};
use super::scorecard::{Scorecard, ScoringError};

/// Per-vendor evidence keyed by criterion, validated against one scorecard.
///
/// The store records vendor insertion order because the ranking engine uses
/// it as the final, deterministic tie-break.
#[derive(Debug, Clone, Default)]
pub struct EvidenceStore {
    known: BTreeSet<CriterionId>,
    records: BTreeMap<VendorId, BTreeMap<CriterionId, Evidence>>,
    order: Vec<VendorId>,
}

impl EvidenceStore {
    pub fn new(scorecard: &Scorecard) -> Self {
        let known = scorecard
            .categories()
            .iter()
            .flat_map(|category| category.criteria.iter().map(|criterion| criterion.id.clone()))
            .collect();

        Self {
            known,
            records: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    /// Insert evidence with last-write-wins semantics.
    pub fn put(
        &mut self,
        vendor: VendorId,
        criterion: CriterionId,
        evidence: Evidence,
    ) -> Result<(), ScoringError> {
        if !self.known.contains(&criterion) {
            return Err(ScoringError::UnknownCriterion(criterion));
        }

        if !self.records.contains_key(&vendor) {
            self.order.push(vendor.clone());
        }
        self.records
            .entry(vendor)
            .or_default()
            .insert(criterion, evidence);
        Ok(())
    }

    /// `None` means no evidence was extracted, which scoring treats
    /// differently from evidence with zero confidence.
    pub fn get(&self, vendor: &VendorId, criterion: &CriterionId) -> Option<&Evidence> {
        self.records.get(vendor)?.get(criterion)
    }

    /// Vendors in first-seen order.
    pub fn vendors(&self) -> &[VendorId] {
        &self.order
    }
}
