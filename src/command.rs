// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2023, 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

//! Stateless, config driven queries over a view map.
//!
//! Every command reads its parameters from a string map and answers with a string map. The
//! `"command"` key selects the query. Curves are given either as `"view_edge"`, the index of one
//! view edge, or as `"chain"`, a comma separated list of view edge indices where a leading `-`
//! traverses the edge from `B` to `A`.

mod impls;

use crate::{
    ViewMapError,
    chain::{Chain, ChainLink, chain_view_edges},
    functions::{
        Interface1D, IntegrationType, UnaryFunction1D,
        functions0d::{
            GetProjectedXF0D, GetProjectedYF0D, GetProjectedZF0D, GetXF0D, GetYF0D, GetZF0D,
            QuantitativeInvisibilityF0D,
        },
        functions1d::{GetOccludeeF1D, GetOccludersF1D, GetShapeF1D, QuantitativeInvisibilityF1D},
        integrate,
    },
    id::Id,
    stroke::Stroke,
    view_map::{ViewEdgeId, ViewMap, ViewShapeId, ViewVertexId},
};
use log::{debug, warn};
use std::{collections::HashMap, iter::successors, str::FromStr, time::Instant};

pub(crate) trait Options {
    /// Will return an option parsed as a `T` or an Err
    fn get_mandatory_parsed_option<T: FromStr>(
        &self,
        key: &str,
        default: Option<T>,
    ) -> Result<T, ViewMapError>;

    /// Will return an option parsed as a `T` or None.
    /// If the option is missing None is returned, if it there but if it can't be parsed an error
    /// will be returned.
    fn get_parsed_option<T: FromStr>(&self, key: &str) -> Result<Option<T>, ViewMapError>;

    /// Returns the &str value of an option, or an Err is it does not exists
    fn get_mandatory_option(&self, key: &str) -> Result<&str, ViewMapError>;

    /// Returns true if the option exists
    fn does_option_exist(&self, key: &str) -> Result<bool, ViewMapError>;
}

pub type ConfigType = HashMap<String, String>;

/// The scalar 0D functions that can be integrated through the `"integrate"` command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScalarFunction {
    X,
    Y,
    Z,
    ProjectedX,
    ProjectedY,
    ProjectedZ,
    Qi,
}

impl FromStr for ScalarFunction {
    type Err = ViewMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "x" => ScalarFunction::X,
            "y" => ScalarFunction::Y,
            "z" => ScalarFunction::Z,
            "projected_x" => ScalarFunction::ProjectedX,
            "projected_y" => ScalarFunction::ProjectedY,
            "projected_z" => ScalarFunction::ProjectedZ,
            "qi" => ScalarFunction::Qi,
            _ => {
                return Err(ViewMapError::InvalidParameter(format!(
                    "unknown function: {s}"
                )));
            }
        })
    }
}

/// The curve a command operates on
enum Curve {
    ViewEdge(ViewEdgeId),
    Chain(Chain),
}

impl Curve {
    fn from_config(map: &ViewMap, config: &ConfigType) -> Result<Self, ViewMapError> {
        if !config.does_option_exist("chain")? {
            let index: usize = config.get_mandatory_parsed_option("view_edge", None)?;
            let edge = ViewEdgeId::new(index);
            let _ = map.view_edge(edge)?;
            return Ok(Curve::ViewEdge(edge));
        }
        let mut chain = Chain::new(Id::default());
        for token in config.get_mandatory_option("chain")?.split(',') {
            let token = token.trim();
            let (forward, index) = match token.strip_prefix('-') {
                Some(index) => (false, index),
                None => (true, token),
            };
            let index: usize = index.parse().map_err(|_| {
                ViewMapError::InvalidParameter(format!("Invalid chain link: {{\"{token}\"}}"))
            })?;
            chain.push(map, ChainLink::new(ViewEdgeId::new(index), forward))?;
        }
        Ok(Curve::Chain(chain))
    }

    fn interface(&self) -> Interface1D<'_> {
        match self {
            Curve::ViewEdge(edge) => Interface1D::ViewEdge(*edge),
            Curve::Chain(chain) => Interface1D::Chain(chain),
        }
    }
}

/// Lists shapes as comma separated indices under `key` and as names under `{key}_names`
fn insert_shapes(
    map: &ViewMap,
    rv: &mut ConfigType,
    key: &str,
    shapes: &[ViewShapeId],
) -> Result<(), ViewMapError> {
    let indices: Vec<String> = shapes.iter().map(|s| s.index().to_string()).collect();
    let mut names = Vec::with_capacity(shapes.len());
    for shape in shapes {
        names.push(map.shape(*shape)?.name());
    }
    let _ = rv.insert(key.to_string(), indices.join(","));
    let _ = rv.insert(format!("{key}_names"), names.join(","));
    Ok(())
}

fn encode_links(links: &[ChainLink]) -> String {
    links
        .iter()
        .map(|l| {
            if l.forward {
                l.edge.index().to_string()
            } else {
                format!("-{}", l.edge.index())
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn integrate_scalar(
    map: &ViewMap,
    inter: &Interface1D<'_>,
    function: ScalarFunction,
    integration: IntegrationType,
) -> Result<f64, ViewMapError> {
    match function {
        ScalarFunction::X => integrate(&GetXF0D, map, inter, integration),
        ScalarFunction::Y => integrate(&GetYF0D, map, inter, integration),
        ScalarFunction::Z => integrate(&GetZF0D, map, inter, integration),
        ScalarFunction::ProjectedX => integrate(&GetProjectedXF0D, map, inter, integration),
        ScalarFunction::ProjectedY => integrate(&GetProjectedYF0D, map, inter, integration),
        ScalarFunction::ProjectedZ => integrate(&GetProjectedZF0D, map, inter, integration),
        ScalarFunction::Qi => integrate(&QuantitativeInvisibilityF0D, map, inter, integration),
    }
}

/// This is the main entry point, all commands will be routed through this API
pub fn process_command(map: &ViewMap, config: ConfigType) -> Result<ConfigType, ViewMapError> {
    let command = config.get_mandatory_option("command")?;
    debug!("process_command: {command}");
    let integration = config
        .get_parsed_option::<IntegrationType>("integration")?
        .unwrap_or_default();
    let mut rv = ConfigType::new();

    match command {
        "get_occluders" => {
            let curve = Curve::from_config(map, &config)?;
            let shapes = GetOccludersF1D.evaluate(map, &curve.interface())?;
            insert_shapes(map, &mut rv, "occluders", &shapes)?;
        }
        "get_shape" => {
            let curve = Curve::from_config(map, &config)?;
            let shapes = GetShapeF1D.evaluate(map, &curve.interface())?;
            insert_shapes(map, &mut rv, "shapes", &shapes)?;
        }
        "get_occludee" => {
            let curve = Curve::from_config(map, &config)?;
            let shapes = GetOccludeeF1D.evaluate(map, &curve.interface())?;
            insert_shapes(map, &mut rv, "occludees", &shapes)?;
        }
        "quantitative_invisibility" => {
            let curve = Curve::from_config(map, &config)?;
            let qi = QuantitativeInvisibilityF1D::new(integration)
                .evaluate(map, &curve.interface())?;
            let _ = rv.insert("qi".to_string(), qi.to_string());
        }
        "integrate" => {
            let curve = Curve::from_config(map, &config)?;
            let function: ScalarFunction = config.get_mandatory_parsed_option("function", None)?;
            let value = integrate_scalar(map, &curve.interface(), function, integration)?;
            let _ = rv.insert("value".to_string(), value.to_string());
        }
        "tvertex_mate" => {
            let vertex: usize = config.get_mandatory_parsed_option("tvertex", None)?;
            let edge: usize = config.get_mandatory_parsed_option("view_edge", None)?;
            let tvertex = map.tvertex(ViewVertexId::new(vertex))?;
            if let Some(mate) = tvertex.mate(ViewEdgeId::new(edge)) {
                let _ = rv.insert("mate".to_string(), mate.index().to_string());
            }
        }
        "stroke_length" => {
            let stroke = match Curve::from_config(map, &config)? {
                Curve::ViewEdge(edge) => Stroke::from_view_edge(map, edge)?,
                Curve::Chain(chain) => Stroke::from_chain(map, &chain)?,
            };
            let _ = rv.insert("length".to_string(), stroke.length().to_string());
            let _ = rv.insert("vertex_count".to_string(), stroke.len().to_string());
        }
        "chain_view_edges" => {
            let max_qi = config.get_mandatory_parsed_option::<u32>("max_qi", Some(u32::MAX))?;
            let chains = chain_view_edges(map, |e| e.qi() <= max_qi)?;
            for (n, chain) in chains.iter().enumerate() {
                let _ = rv.insert(format!("chain_{n}"), encode_links(chain.links()));
            }
            let _ = rv.insert("chain_count".to_string(), chains.len().to_string());
        }
        illegal_command => {
            return Err(ViewMapError::InvalidParameter(format!(
                "Invalid command:{illegal_command}"
            )));
        }
    }
    Ok(rv)
}

/// Converts any Err object into a response map with a single `"ERROR"` key.
pub fn process_command_error_handler(map: &ViewMap, config: ConfigType) -> ConfigType {
    let start = Instant::now();
    let rv = match process_command(map, config) {
        Ok(rv) => rv,
        Err(err) => {
            warn!("{err:?}");
            for cause in successors(Some(&err as &dyn std::error::Error), |e| e.source()).skip(1)
            {
                warn!("Caused by: {cause:?}");
            }
            let mut config = ConfigType::new();
            let _ = config.insert("ERROR".to_string(), err.to_string());
            config
        }
    };
    debug!(
        "Time elapsed in process_command() was {:?}",
        start.elapsed()
    );
    rv
}
