//! Propagation of changes to dependant modules

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use tracing::{debug, info};

use crate::types::ModuleName;

use super::changes::ChangeReason;
use super::graph::DependencyGraph;

/// Walks the dependant relation of a graph to find every impacted module
pub struct ImpactPropagator<'a> {
    graph: &'a DependencyGraph,
}

impl<'a> ImpactPropagator<'a> {
    /// Create a propagator over `graph`
    pub fn new(graph: &'a DependencyGraph) -> Self {
        Self { graph }
    }

    /// `directly_modified` plus every module that transitively imports one of them
    pub fn transitive_closure(
        &self,
        directly_modified: &BTreeSet<ModuleName>,
    ) -> BTreeSet<ModuleName> {
        let direct = directly_modified
            .iter()
            .map(|name| (name.clone(), ChangeReason::DirectChanges))
            .collect();

        self.propagate(direct).into_keys().collect()
    }

    /// Extend `direct` with indirectly impacted modules.
    ///
    /// Modules already present keep their reason. Each discovered module is
    /// tagged with the dependency through which it was first reached. The
    /// visited set is the only termination guarantee, so cycles are safe.
    pub fn propagate(
        &self,
        direct: BTreeMap<ModuleName, ChangeReason>,
    ) -> BTreeMap<ModuleName, ChangeReason> {
        let mut impacted = direct;
        let mut visited: HashSet<ModuleName> = impacted.keys().cloned().collect();
        let mut queue: VecDeque<ModuleName> = impacted.keys().cloned().collect();
        let direct_count = impacted.len();

        while let Some(current) = queue.pop_front() {
            for dependant in self.graph.direct_dependants(&current) {
                if !visited.insert(dependant.clone()) {
                    continue;
                }

                debug!(module = %dependant, via = %current, "indirectly impacted");
                impacted.insert(
                    dependant.clone(),
                    ChangeReason::DependencyChanged(current.clone()),
                );
                queue.push_back(dependant);
            }
        }

        info!(
            direct = direct_count,
            indirect = impacted.len() - direct_count,
            "impact propagation complete"
        );
        impacted
    }
}
