//! # Route Compiler
//!
//! Resolves every registered route against its group and folds the result
//! into a dispatch table.
//!
//! For a route in group `g`:
//!
//! - effective pattern = `g.prefix` + route pattern
//! - effective middlewares = `g.middlewares` followed by the route's own
//!
//! Routes are compiled in registration order, which is also the tie-break
//! order of the dispatch table: when two routes can match the same path under
//! the same method, the one registered first answers.

use crate::definition::{RouteCollector, RouteSpec};
use crate::dispatch::{DispatchData, DispatchTableBuilder};
use crate::error::{Result, RouterError};
use crate::pattern::{self, Segment};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// A route after group resolution and pattern parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledRoute {
    /// Parsed pattern alternatives, least specific first
    pub alternatives: Vec<Vec<Segment>>,
    pub methods: Vec<String>,
    /// Effective pattern, group prefix included
    pub pattern: String,
    /// Effective middlewares, group middlewares first
    pub middlewares: Vec<String>,
    pub handler: Value,
    pub group: Option<String>,
}

/// Every compiled route plus the dispatch table built from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledRouteSet {
    /// Routes by name, in registration order
    pub routes: IndexMap<String, CompiledRoute>,
    pub dispatch_data: DispatchData,
}

impl CompiledRouteSet {
    /// Look up a compiled route by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CompiledRoute> {
        self.routes.get(name)
    }

    /// Rebuild the dispatch table from the route map alone.
    ///
    /// # Errors
    ///
    /// Fails with [`RouterError::InvalidPattern`] if a stored alternative cannot
    /// be turned into a dispatch entry.
    pub fn rebuild_dispatch_data(&self) -> Result<DispatchData> {
        let mut builder = DispatchTableBuilder::new();
        for (name, route) in &self.routes {
            add_to_builder(&mut builder, name, route)?;
        }
        Ok(builder.build())
    }
}

/// Compile every route registered on `collector`.
///
/// # Errors
///
/// - [`RouterError::UnknownGroup`] if a route names a group that was never
///   registered
/// - [`RouterError::InvalidPattern`] if a pattern cannot be parsed or compiled
pub fn compile(collector: &RouteCollector) -> Result<CompiledRouteSet> {
    let mut builder = DispatchTableBuilder::new();
    let mut routes = IndexMap::with_capacity(collector.len());

    for spec in collector.routes() {
        let route = resolve(collector, spec)?;
        add_to_builder(&mut builder, &spec.name, &route)?;
        debug!(
            route_name = %spec.name,
            pattern = %route.pattern,
            methods = ?route.methods,
            alternatives = route.alternatives.len(),
            "Route compiled"
        );
        routes.insert(spec.name.clone(), route);
    }

    let dispatch_data = builder.build();
    info!(
        routes_count = routes.len(),
        dispatch_entries = dispatch_data.len(),
        "Route table compiled"
    );

    Ok(CompiledRouteSet {
        routes,
        dispatch_data,
    })
}

fn resolve(collector: &RouteCollector, spec: &RouteSpec) -> Result<CompiledRoute> {
    let (pattern, middlewares) = match &spec.group {
        Some(group_name) => {
            let group = collector
                .group(group_name)
                .ok_or_else(|| RouterError::UnknownGroup {
                    route: spec.name.clone(),
                    group: group_name.clone(),
                })?;
            let pattern = format!("{}{}", group.prefix, spec.pattern);
            let middlewares = group
                .middlewares
                .iter()
                .chain(&spec.middlewares)
                .cloned()
                .collect();
            (pattern, middlewares)
        }
        None => (spec.pattern.clone(), spec.middlewares.clone()),
    };

    let alternatives = pattern::parse(&pattern).map_err(|source| RouterError::InvalidPattern {
        route: spec.name.clone(),
        source,
    })?;

    Ok(CompiledRoute {
        alternatives,
        methods: spec.methods.clone(),
        pattern,
        middlewares,
        handler: spec.handler.clone(),
        group: spec.group.clone(),
    })
}

fn add_to_builder(builder: &mut DispatchTableBuilder, name: &str, route: &CompiledRoute) -> Result<()> {
    for method in &route.methods {
        for alternative in &route.alternatives {
            builder
                .add_entry(method, alternative, name)
                .map_err(|source| RouterError::InvalidPattern {
                    route: name.to_string(),
                    source,
                })?;
        }
    }
    Ok(())
}
