// crates/dataplan-gate-core/src/runtime/compiler.rs
// ============================================================================
// Module: Data Plan Compiler
// Description: Lowers data-plan documents into lookup tables and blocking policies.
// Purpose: Build the immutable decision table consulted at event-emission time.
// Dependencies: tracing, crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! The compiler walks data points in document order. Each valid point yields
//! one primary entry; commerce points yield a second entry under their
//! product-attribute key. Invalid points are reported through the
//! [`Logger`] collaborator and skipped. When two points share a key the later
//! one wins.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::debug;

use crate::core::DataPlanDocument;
use crate::core::DataPlanPoint;
use crate::core::FilterScope;
use crate::core::MatchKey;
use crate::core::PropertyFilter;
use crate::core::extract_filter;
use crate::interfaces::Logger;
use crate::runtime::policy::BlockingPolicy;
use crate::runtime::policy::PolicyOverrides;
use crate::runtime::table::CompiledDataPlan;
use crate::runtime::table::LookupTable;

// ============================================================================
// SECTION: Compiler
// ============================================================================

/// Compiles data-plan documents.
#[derive(Debug, Clone)]
pub struct DataPlanCompiler<L> {
    /// Diagnostic sink for malformed documents and points.
    logger: L,
    /// Host-side policy overrides.
    overrides: PolicyOverrides,
}

impl<L: Logger> DataPlanCompiler<L> {
    /// Creates a compiler reporting through `logger`.
    #[must_use]
    pub fn new(logger: L) -> Self {
        Self {
            logger,
            overrides: PolicyOverrides::default(),
        }
    }

    /// Applies host-side policy overrides to every compiled plan.
    #[must_use]
    pub fn with_overrides(mut self, overrides: PolicyOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Compiles `document`; `None` yields a plan with blocking disabled.
    ///
    /// Overrides only apply when a document is supplied.
    #[must_use]
    pub fn compile(&self, document: Option<&DataPlanDocument>) -> CompiledDataPlan {
        let Some(document) = document else {
            return CompiledDataPlan::disabled();
        };

        let policy =
            BlockingPolicy::from_block(document.policy.as_ref()).with_overrides(self.overrides);
        if document.data_points.is_empty() {
            self.logger.error("data plan contains no data points");
            return CompiledDataPlan {
                policy,
                table: LookupTable::default(),
            };
        }

        let mut table = LookupTable::default();
        for (index, raw) in document.data_points.iter().enumerate() {
            match DataPlanPoint::decode(raw) {
                Ok(point) => add_point(&mut table, &point),
                Err(err) => {
                    self.logger.warn(&format!("data plan point {index} is not valid: {err}"));
                }
            }
        }
        debug!(entries = table.len(), enabled = policy.enabled, "compiled data plan");
        CompiledDataPlan {
            policy,
            table,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Adds the entries contributed by one decoded point.
fn add_point(table: &mut LookupTable, point: &DataPlanPoint<'_>) {
    let match_type = point.match_clause.match_type;
    let descriptor = point.match_clause.descriptor();

    let filter = extract_filter(point.validator, FilterScope::for_match_type(match_type));
    insert_entry(table, descriptor.primary_key(), filter);

    if let Some(product_key) = descriptor.product_attribute_key() {
        let filter = extract_filter(point.validator, FilterScope::ProductAttributes);
        insert_entry(table, product_key, filter);
    }
}

/// Inserts an entry, noting when an earlier point is overwritten.
fn insert_entry(table: &mut LookupTable, key: MatchKey, filter: PropertyFilter) {
    let label = key.to_string();
    if table.insert(key, filter).is_some() {
        debug!(key = %label, "data plan point overrides an earlier point");
    }
}
